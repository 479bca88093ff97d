use crate::core::{Board, Move};
use crate::player::ai::Heuristic;
use crate::player::PlayerController;
use std::time::Duration;

/// Scores every candidate with its heuristic one ply ahead and picks the
/// maximum. Equivalent to a depth-1 minimax agent, and a cheap opponent for
/// calibrating heuristics.
pub struct GreedyPlayer {
    name: String,
    heuristic: Box<dyn Heuristic>,
}

impl GreedyPlayer {
    pub fn new(name: &str, heuristic: Box<dyn Heuristic>) -> Self {
        GreedyPlayer {
            name: name.to_string(),
            heuristic,
        }
    }
}

impl PlayerController for GreedyPlayer {
    fn choose_move(
        &mut self,
        board: &Board,
        legal_moves: &[Move],
        _time_left: Duration,
    ) -> Option<Move> {
        let me = board.active_player();
        let mut forecast = board.clone();
        let mut best: Option<(f64, Move)> = None;
        for &mv in legal_moves {
            let token = forecast.apply(mv);
            let score = self.heuristic.score(&forecast, me);
            forecast.undo(token);
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, mv));
            }
        }
        best.map(|(_, mv)| mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;
    use crate::logic::{legal_moves, mobility};
    use crate::player::ai::OpenMoveScore;

    #[test]
    fn greedy_open_move_maximizes_resulting_mobility() {
        let mut board = Board::new(7, 7);
        let _ = board.apply(Position::new(0, 0));
        let _ = board.apply(Position::new(6, 6));
        let moves = legal_moves(&board, board.active_player());
        let mut player = GreedyPlayer::new("greedy", Box::new(OpenMoveScore));
        let chosen = player
            .choose_move(&board, &moves, Duration::from_millis(10))
            .unwrap();
        let best = moves.iter().map(|&mv| mobility(&board, mv)).max().unwrap();
        assert_eq!(mobility(&board, chosen), best);
    }
}
