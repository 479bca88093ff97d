pub mod board;
pub mod types;

pub use board::{Board, UndoToken, KNIGHT_OFFSETS};
pub use types::{Move, PlayerId, Position, Utility};
