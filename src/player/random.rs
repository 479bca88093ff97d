use crate::core::{Board, Move};
use crate::player::PlayerController;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Duration;

/// Baseline player: uniform random choice among the legal moves.
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(name: &str) -> Self {
        RandomPlayer {
            name: name.to_string(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(name: &str, seed: u64) -> Self {
        RandomPlayer {
            name: name.to_string(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PlayerController for RandomPlayer {
    fn choose_move(
        &mut self,
        _board: &Board,
        legal_moves: &[Move],
        _time_left: Duration,
    ) -> Option<Move> {
        legal_moves.choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;
    use crate::logic::legal_moves;

    #[test]
    fn always_picks_a_legal_move() {
        let mut board = Board::new(5, 5);
        let _ = board.apply(Position::new(2, 2));
        let _ = board.apply(Position::new(0, 0));
        let moves = legal_moves(&board, board.active_player());
        let mut player = RandomPlayer::with_seed("rand", 1);
        for _ in 0..20 {
            let mv = player
                .choose_move(&board, &moves, Duration::from_millis(10))
                .unwrap();
            assert!(moves.contains(&mv));
        }
    }

    #[test]
    fn no_moves_means_no_choice() {
        let board = Board::new(3, 3);
        let mut player = RandomPlayer::with_seed("rand", 1);
        assert_eq!(
            player.choose_move(&board, &[], Duration::from_millis(10)),
            None
        );
    }
}
