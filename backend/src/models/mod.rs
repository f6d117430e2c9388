pub mod puzzle;

pub use puzzle::{
    Direction, Grid, MaskCell, Placement, Position, SolutionMask, WordSearch,
};
