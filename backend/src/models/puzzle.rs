use serde::{Deserialize, Serialize};

/// A cell coordinate, row 0 at the top and column 0 at the left
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right along a row
    Horizontal,
    /// Top to bottom along a column
    Vertical,
}

impl Direction {
    /// Position of the letter `offset` cells away from `start`
    pub fn step(self, start: Position, offset: usize) -> Position {
        match self {
            Direction::Horizontal => Position {
                row: start.row,
                col: start.col + offset,
            },
            Direction::Vertical => Position {
                row: start.row + offset,
                col: start.col,
            },
        }
    }
}

/// Answer key marker for a single cell
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub enum MaskCell {
    #[serde(rename = "0")]
    Filler,
    #[serde(rename = "1")]
    Word,
}

pub type Grid = Vec<Vec<char>>;
pub type SolutionMask = Vec<Vec<MaskCell>>;

/// A word that was written into the grid
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Placement {
    pub word: String,
    pub start: Position,
    pub direction: Direction,
}

impl Placement {
    /// Every cell covered by the word, in reading order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.word.len()).map(move |offset| self.direction.step(self.start, offset))
    }
}

/// A finished puzzle: the letter grid, its answer key and what happened to each word
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordSearch {
    pub size: usize,
    pub grid: Grid,
    pub solution: SolutionMask,
    pub placements: Vec<Placement>,
    /// Words that could not be placed, in input order
    pub dropped_words: Vec<String>,
}

impl WordSearch {
    pub fn letter_at(&self, pos: Position) -> Option<char> {
        self.grid.get(pos.row)?.get(pos.col).copied()
    }

    pub fn placed_words(&self) -> impl Iterator<Item = &str> {
        self.placements.iter().map(|p| p.word.as_str())
    }
}
