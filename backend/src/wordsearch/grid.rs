use rand::Rng;

use crate::{
    config::PuzzleConfig,
    error::GridError,
    models::{Direction, Grid, MaskCell, Placement, Position, SolutionMask, WordSearch},
    utils::letters::{normalize_word, random_letter},
};

/// Grid under construction; `None` marks a cell no word has claimed yet
type Cells = Vec<Vec<Option<char>>>;

/// Packs a word list into a square letter grid with an answer key.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    pub min_size: usize,
    pub cells_per_word: usize,
    pub max_size: usize,
    pub max_attempts: usize,
    pub max_words: usize,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::from_config(&PuzzleConfig::default())
    }
}

impl GridBuilder {
    pub fn from_config(config: &PuzzleConfig) -> Self {
        Self {
            min_size: config.min_size,
            cells_per_word: config.cells_per_word,
            max_size: config.max_size,
            max_attempts: config.max_attempts,
            max_words: config.max_words,
        }
    }

    /// Grid dimension for a word list: max(min_size, ceil(sqrt(count * cells_per_word)))
    pub fn grid_size(&self, word_count: usize) -> usize {
        let area = word_count.saturating_mul(self.cells_per_word) as f64;
        (area.sqrt().ceil() as usize).max(self.min_size)
    }

    /// Build a puzzle sized from the number of words
    pub fn build<R: Rng>(
        &self,
        words: &[String],
        rng: &mut R,
    ) -> Result<WordSearch, GridError> {
        let size = self.grid_size(words.len());
        self.build_sized(words, size, rng)
    }

    /// Build a puzzle with a dimension chosen by the caller, at most `max_size`
    pub fn build_with_size<R: Rng>(
        &self,
        words: &[String],
        size: usize,
        rng: &mut R,
    ) -> Result<WordSearch, GridError> {
        if size > self.max_size {
            return Err(GridError::InvalidSize {
                size,
                max: self.max_size,
            });
        }
        self.build_sized(words, size, rng)
    }

    /// Words are placed in input order. A word that cannot be placed within
    /// `max_attempts` random tries is skipped and reported in
    /// [`WordSearch::dropped_words`]; it never fails the whole build.
    fn build_sized<R: Rng>(
        &self,
        words: &[String],
        size: usize,
        rng: &mut R,
    ) -> Result<WordSearch, GridError> {
        if words.is_empty() {
            return Err(GridError::EmptyWordList);
        }
        if words.len() > self.max_words {
            return Err(GridError::TooManyWords {
                count: words.len(),
                max: self.max_words,
            });
        }
        if size == 0 {
            return Err(GridError::InvalidSize {
                size,
                max: self.max_size,
            });
        }

        let mut cells: Cells = vec![vec![None; size]; size];
        let mut placements = Vec::with_capacity(words.len());
        let mut dropped_words = Vec::new();

        for raw in words {
            let Some(word) = normalize_word(raw) else {
                tracing::warn!("Skipping word {:?}: not made of letters A-Z", raw);
                dropped_words.push(raw.trim().to_string());
                continue;
            };

            if word.len() > size {
                tracing::warn!(
                    "Skipping word {}: {} letters do not fit a {}x{} grid",
                    word,
                    word.len(),
                    size,
                    size
                );
                dropped_words.push(word);
                continue;
            }

            match self.find_placement(&cells, &word, rng) {
                Some((start, direction)) => {
                    let placement = Placement {
                        word,
                        start,
                        direction,
                    };
                    for (pos, letter) in placement.positions().zip(placement.word.chars()) {
                        cells[pos.row][pos.col] = Some(letter);
                    }
                    tracing::debug!(
                        "Placed {} at ({}, {}) {:?}",
                        placement.word,
                        start.row,
                        start.col,
                        direction
                    );
                    placements.push(placement);
                }
                None => {
                    tracing::warn!(
                        "Could not place word {} after {} attempts",
                        word,
                        self.max_attempts
                    );
                    dropped_words.push(word);
                }
            }
        }

        let (grid, solution) = Self::fill(cells, rng);

        Ok(WordSearch {
            size,
            grid,
            solution,
            placements,
            dropped_words,
        })
    }

    /// Try random starts and directions until one fits or attempts run out
    fn find_placement<R: Rng>(
        &self,
        cells: &Cells,
        word: &str,
        rng: &mut R,
    ) -> Option<(Position, Direction)> {
        let size = cells.len();

        for _ in 0..self.max_attempts {
            let start = Position {
                row: rng.random_range(0..size),
                col: rng.random_range(0..size),
            };
            let direction = if rng.random_bool(0.5) {
                Direction::Horizontal
            } else {
                Direction::Vertical
            };

            if Self::fits(cells, word, start, direction) {
                return Some((start, direction));
            }
        }

        None
    }

    /// A word fits when it stays inside the grid and only crosses equal letters
    fn fits(cells: &Cells, word: &str, start: Position, direction: Direction) -> bool {
        let size = cells.len();
        let first = match direction {
            Direction::Horizontal => start.col,
            Direction::Vertical => start.row,
        };
        if first + word.len() > size {
            return false;
        }

        word.chars().enumerate().all(|(offset, letter)| {
            let pos = direction.step(start, offset);
            match cells[pos.row][pos.col] {
                Some(existing) => existing == letter,
                None => true,
            }
        })
    }

    /// Fill unclaimed cells with random letters and derive the answer key
    fn fill<R: Rng>(cells: Cells, rng: &mut R) -> (Grid, SolutionMask) {
        let size = cells.len();
        let mut grid = Vec::with_capacity(size);
        let mut solution = Vec::with_capacity(size);

        for row in cells {
            let mut letters = Vec::with_capacity(size);
            let mut mask = Vec::with_capacity(size);
            for cell in row {
                match cell {
                    Some(letter) => {
                        letters.push(letter);
                        mask.push(MaskCell::Word);
                    }
                    None => {
                        letters.push(random_letter(rng));
                        mask.push(MaskCell::Filler);
                    }
                }
            }
            grid.push(letters);
            solution.push(mask);
        }

        (grid, solution)
    }
}
