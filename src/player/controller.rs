use crate::core::{Board, Move};
use std::time::Duration;

/// A participant in a match.
///
/// The driver hands each turn a snapshot of its authoritative board, the
/// precomputed legal moves for the side to move, and the wall-clock budget
/// for the decision. Returning after the budget elapses, or returning a
/// move outside `legal_moves`, forfeits the game; returning `None` while
/// legal moves exist does too.
pub trait PlayerController {
    fn choose_move(
        &mut self,
        board: &Board,
        legal_moves: &[Move],
        time_left: Duration,
    ) -> Option<Move>;

    fn name(&self) -> &str;
}
