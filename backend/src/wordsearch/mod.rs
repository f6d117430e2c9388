// Word search puzzle engine

pub mod grid;
pub mod validator;

pub use grid::GridBuilder;
pub use validator::SelectionValidator;
