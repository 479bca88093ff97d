//! # Position evaluation
//!
//! Interchangeable scoring strategies for non-terminal boards, selected
//! once at agent construction. Every variant scores a board from the point
//! of view of a given player, higher is better, and returns `±inf` for
//! terminal boards so that search always prefers a real win (and avoids a
//! real loss) over any heuristic estimate.
//!
//! Evaluation cost spans two orders of magnitude across variants, from the
//! O(1) terminal check of [`NullScore`] to the full-board BFS of
//! [`ReachScore`] and the simulated playouts of [`RolloutScore`]. The
//! search deadline, not a node budget, bounds total work.

use crate::core::{Board, PlayerId, Utility};
use crate::logic::{legal_moves, reachable_by_depth};
use crate::player::ai::config::AIConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Scoring strategy for a board position.
pub trait Heuristic: Send {
    /// Score `board` from `player`'s perspective; higher is better.
    /// Terminal boards score `+inf` (win for `player`) or `-inf` (loss).
    ///
    /// `&mut self` only so that stochastic variants can own their RNG;
    /// evaluation never depends on game state outside `board`.
    fn score(&mut self, board: &Board, player: PlayerId) -> f64;

    fn name(&self) -> &str;
}

fn terminal_value(board: &Board, player: PlayerId) -> Option<f64> {
    match board.utility(player) {
        Utility::Win => Some(f64::INFINITY),
        Utility::Loss => Some(f64::NEG_INFINITY),
        Utility::Ongoing => None,
    }
}

/// Terminal value only; presumes no knowledge about non-terminal states.
pub struct NullScore;

impl Heuristic for NullScore {
    fn score(&mut self, board: &Board, player: PlayerId) -> f64 {
        terminal_value(board, player).unwrap_or(0.0)
    }

    fn name(&self) -> &str {
        "null"
    }
}

/// Number of moves open to the player.
pub struct OpenMoveScore;

impl Heuristic for OpenMoveScore {
    fn score(&mut self, board: &Board, player: PlayerId) -> f64 {
        terminal_value(board, player)
            .unwrap_or_else(|| legal_moves(board, player).len() as f64)
    }

    fn name(&self) -> &str {
        "open-move"
    }
}

/// Difference between the player's and the opponent's open moves.
pub struct ImprovedScore;

impl Heuristic for ImprovedScore {
    fn score(&mut self, board: &Board, player: PlayerId) -> f64 {
        terminal_value(board, player).unwrap_or_else(|| {
            let own = legal_moves(board, player).len() as f64;
            let opp = legal_moves(board, player.opponent()).len() as f64;
            own - opp
        })
    }

    fn name(&self) -> &str {
        "improved"
    }
}

/// Distance-discounted count of the cells the player can still reach:
/// a cell first reachable in k moves contributes `ratio^(1-k)`, so near
/// cells weigh more than far ones, which the opponent is more likely to
/// cut off first. Approximates the mobility left before being trapped.
pub fn reach_score(board: &Board, player: PlayerId, ratio: f64) -> f64 {
    reachable_by_depth(board, player)
        .iter()
        .enumerate()
        .map(|(i, cells)| cells.len() as f64 * ratio.powi(-(i as i32)))
        .sum()
}

/// Weighted reachability of the player's own cells.
pub struct ReachScore {
    ratio: f64,
}

impl ReachScore {
    pub fn new(ratio: f64) -> Self {
        ReachScore { ratio }
    }
}

impl Default for ReachScore {
    fn default() -> Self {
        Self::new(AIConfig::get().heuristics.reach_ratio)
    }
}

impl Heuristic for ReachScore {
    fn score(&mut self, board: &Board, player: PlayerId) -> f64 {
        terminal_value(board, player).unwrap_or_else(|| reach_score(board, player, self.ratio))
    }

    fn name(&self) -> &str {
        "reach"
    }
}

/// Weighted reachability of the player minus that of the opponent.
pub struct DifferentialReachScore {
    ratio: f64,
}

impl DifferentialReachScore {
    pub fn new(ratio: f64) -> Self {
        DifferentialReachScore { ratio }
    }
}

impl Default for DifferentialReachScore {
    fn default() -> Self {
        Self::new(AIConfig::get().heuristics.differential_reach_ratio)
    }
}

impl Heuristic for DifferentialReachScore {
    fn score(&mut self, board: &Board, player: PlayerId) -> f64 {
        terminal_value(board, player).unwrap_or_else(|| {
            reach_score(board, player, self.ratio)
                - reach_score(board, player.opponent(), self.ratio)
        })
    }

    fn name(&self) -> &str {
        "differential-reach"
    }
}

/// Average outcome of uniform-random playouts to completion, +1 for a win
/// and -1 for a loss of the scored player. Uses no domain knowledge. The
/// playout count is fixed at construction so a single evaluation stays
/// bounded; the RNG is owned by the instance and shared with nothing.
pub struct RolloutScore {
    playouts: u32,
    rng: StdRng,
}

impl RolloutScore {
    pub fn new(playouts: u32) -> Self {
        RolloutScore {
            playouts,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for reproducible runs.
    pub fn with_seed(playouts: u32, seed: u64) -> Self {
        RolloutScore {
            playouts,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn playout(&mut self, board: &Board, player: PlayerId) -> f64 {
        let mut sim = board.clone();
        loop {
            let moves = legal_moves(&sim, sim.active_player());
            match moves.choose(&mut self.rng) {
                Some(&mv) => {
                    let _ = sim.apply(mv);
                }
                // active player is trapped and loses
                None => {
                    return if sim.active_player() == player { -1.0 } else { 1.0 };
                }
            }
        }
    }
}

impl Heuristic for RolloutScore {
    fn score(&mut self, board: &Board, player: PlayerId) -> f64 {
        if let Some(value) = terminal_value(board, player) {
            return value;
        }
        let total: f64 = (0..self.playouts)
            .map(|_| self.playout(board, player))
            .sum();
        total / self.playouts as f64
    }

    fn name(&self) -> &str {
        "rollout"
    }
}

/// Evaluator selection, for the CLI and config surfaces. `build` reads the
/// tunables (decay ratios, rollout count) from [`AIConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum HeuristicKind {
    Null,
    OpenMove,
    Improved,
    Reach,
    DifferentialReach,
    Rollout,
}

impl HeuristicKind {
    pub fn build(self) -> Box<dyn Heuristic> {
        let config = &AIConfig::get().heuristics;
        match self {
            HeuristicKind::Null => Box::new(NullScore),
            HeuristicKind::OpenMove => Box::new(OpenMoveScore),
            HeuristicKind::Improved => Box::new(ImprovedScore),
            HeuristicKind::Reach => Box::new(ReachScore::new(config.reach_ratio)),
            HeuristicKind::DifferentialReach => {
                Box::new(DifferentialReachScore::new(config.differential_reach_ratio))
            }
            HeuristicKind::Rollout => Box::new(RolloutScore::new(config.rollout_count)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;

    /// 5x5 board, P1 placed at the centre, P2 still unplaced.
    fn centre_board() -> Board {
        let mut board = Board::new(5, 5);
        let _ = board.apply(Position::new(2, 2));
        board
    }

    /// 3x3 board with P1 trapped in the centre (no knight exits).
    fn trapped_board() -> Board {
        let mut board = Board::new(3, 3);
        let _ = board.apply(Position::new(1, 1)); // P1
        let _ = board.apply(Position::new(0, 0)); // P2
        board
    }

    #[test]
    fn every_variant_dominates_with_terminal_values() {
        let board = trapped_board(); // P1 to move and trapped
        let mut variants: Vec<Box<dyn Heuristic>> = vec![
            Box::new(NullScore),
            Box::new(OpenMoveScore),
            Box::new(ImprovedScore),
            Box::new(ReachScore::new(1.3)),
            Box::new(DifferentialReachScore::new(1.4)),
            Box::new(RolloutScore::with_seed(8, 7)),
        ];
        for h in variants.iter_mut() {
            assert_eq!(h.score(&board, PlayerId::Player1), f64::NEG_INFINITY);
            assert_eq!(h.score(&board, PlayerId::Player2), f64::INFINITY);
        }
    }

    #[test]
    fn open_move_score_counts_knight_exits() {
        let board = centre_board();
        assert_eq!(OpenMoveScore.score(&board, PlayerId::Player1), 8.0);
    }

    #[test]
    fn improved_score_is_antisymmetric_between_players() {
        let mut board = centre_board();
        let _ = board.apply(Position::new(0, 0)); // P2 in a corner
        let p1 = ImprovedScore.score(&board, PlayerId::Player1);
        let p2 = ImprovedScore.score(&board, PlayerId::Player2);
        assert_eq!(p1, -p2);
        assert!(p1 > 0.0); // centre has more exits than a corner
    }

    #[test]
    fn reach_score_with_unit_ratio_counts_reachable_cells() {
        // ratio 1.0 weights every distance equally, so the score is the
        // number of reachable cells: all 24 non-centre cells of a 5x5.
        let board = centre_board();
        assert_eq!(reach_score(&board, PlayerId::Player1, 1.0), 24.0);
    }

    #[test]
    fn reach_score_decays_with_distance() {
        let board = centre_board();
        let levels = reachable_by_depth(&board, PlayerId::Player1);
        let close = levels[0].len() as f64;
        // Score with a large ratio is dominated by the level-1 cells.
        assert!(reach_score(&board, PlayerId::Player1, 100.0) < close + 1.0);
        assert!(reach_score(&board, PlayerId::Player1, 100.0) >= close);
    }

    #[test]
    fn rollout_score_is_a_bounded_average_and_seed_deterministic() {
        let mut board = centre_board();
        let _ = board.apply(Position::new(0, 0));
        let a = RolloutScore::with_seed(32, 99).score(&board, PlayerId::Player1);
        let b = RolloutScore::with_seed(32, 99).score(&board, PlayerId::Player1);
        assert_eq!(a, b);
        assert!((-1.0..=1.0).contains(&a));
    }
}
