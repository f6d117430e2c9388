use crate::models::{Direction, Placement, Position, WordSearch};

pub struct SelectionValidator;

impl SelectionValidator {
    /// Check whether the selected cells spell one of the placed words.
    ///
    /// The selection must cover exactly the word's cells. Cells picked from
    /// the last letter back to the first are accepted too.
    pub fn check_selection<'a>(
        puzzle: &'a WordSearch,
        positions: &[Position],
    ) -> Option<&'a Placement> {
        let mut selection = positions.to_vec();
        if !Self::is_straight_line(&selection) {
            selection.reverse();
            if !Self::is_straight_line(&selection) {
                return None;
            }
        }

        // Out-of-bounds cells can never match a placement
        Self::extract_word(puzzle, &selection)?;

        puzzle
            .placements
            .iter()
            .find(|placement| placement.positions().eq(selection.iter().copied()))
    }

    /// Positions run left to right along one row, or top to bottom along one column
    pub fn is_straight_line(positions: &[Position]) -> bool {
        match positions {
            [] => false,
            [_] => true,
            [first, second, ..] => match Self::step_direction(first, second) {
                Some(direction) => positions
                    .windows(2)
                    .all(|window| Self::step_direction(&window[0], &window[1]) == Some(direction)),
                None => false,
            },
        }
    }

    /// Direction of a single step between neighbouring cells
    fn step_direction(from: &Position, to: &Position) -> Option<Direction> {
        if to.row == from.row && to.col == from.col + 1 {
            Some(Direction::Horizontal)
        } else if to.col == from.col && to.row == from.row + 1 {
            Some(Direction::Vertical)
        } else {
            None
        }
    }

    /// Extract the letters under the given positions, `None` if any is off the grid
    pub fn extract_word(puzzle: &WordSearch, positions: &[Position]) -> Option<String> {
        positions.iter().map(|pos| puzzle.letter_at(*pos)).collect()
    }
}
