//! Match driver: owns the authoritative board, alternately solicits the
//! players for a move under a wall-clock budget, applies it, and declares
//! the result. The engine's internal deadline is advisory to itself; the
//! forfeit on overrun is enforced here.

use crate::core::{Board, Move, PlayerId};
use crate::logic::legal_moves;
use crate::player::PlayerController;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Why a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The loser had no legal moves left. The normal ending.
    Trapped,
    /// The loser failed to answer within the time limit.
    Timeout,
    /// The loser returned a move outside the legal set (or none at all).
    IllegalMove,
}

#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub winner: PlayerId,
    pub reason: FinishReason,
    pub history: Vec<Move>,
}

/// Serializable record of a finished match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub width: usize,
    pub height: usize,
    pub player1: String,
    pub player2: String,
    pub winner: PlayerId,
    pub reason: FinishReason,
    pub moves: Vec<Move>,
}

pub struct Game {
    pub board: Board,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Game { board }
    }

    /// Run the match to completion, giving each turn `time_limit` of
    /// wall-clock budget. Players receive a snapshot; only the driver
    /// mutates the authoritative board.
    pub fn play<'a>(
        &mut self,
        player1: &'a mut dyn PlayerController,
        player2: &'a mut dyn PlayerController,
        time_limit: Duration,
    ) -> MatchOutcome {
        let mut history = Vec::new();
        loop {
            let mover = self.board.active_player();
            let moves = legal_moves(&self.board, mover);
            if moves.is_empty() {
                return MatchOutcome {
                    winner: mover.opponent(),
                    reason: FinishReason::Trapped,
                    history,
                };
            }

            let snapshot = self.board.clone();
            let player = match mover {
                PlayerId::Player1 => &mut *player1,
                PlayerId::Player2 => &mut *player2,
            };
            let turn_start = Instant::now();
            let chosen = player.choose_move(&snapshot, &moves, time_limit);

            if turn_start.elapsed() > time_limit {
                return MatchOutcome {
                    winner: mover.opponent(),
                    reason: FinishReason::Timeout,
                    history,
                };
            }
            let mv = match chosen {
                Some(mv) if moves.contains(&mv) => mv,
                _ => {
                    return MatchOutcome {
                        winner: mover.opponent(),
                        reason: FinishReason::IllegalMove,
                        history,
                    };
                }
            };
            let _ = self.board.apply(mv);
            history.push(mv);
        }
    }

    pub fn record(
        &self,
        player1: &dyn PlayerController,
        player2: &dyn PlayerController,
        outcome: &MatchOutcome,
    ) -> GameRecord {
        GameRecord {
            width: self.board.width,
            height: self.board.height,
            player1: player1.name().to_string(),
            player2: player2.name().to_string(),
            winner: outcome.winner,
            reason: outcome.reason,
            moves: outcome.history.clone(),
        }
    }
}

/// Write a record to `dir` as pretty JSON under a timestamped name.
pub fn save_record(record: &GameRecord, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating record directory {}", dir.display()))?;
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!(
        "game_{}_{}_vs_{}.json",
        stamp, record.player1, record.player2
    ));
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::RandomPlayer;

    /// Player that answers with an off-board cell, forfeiting immediately.
    struct Cheater;

    impl PlayerController for Cheater {
        fn choose_move(
            &mut self,
            board: &Board,
            _legal_moves: &[Move],
            _time_left: Duration,
        ) -> Option<Move> {
            Some(Move::new(board.height + 1, board.width + 1))
        }

        fn name(&self) -> &str {
            "cheater"
        }
    }

    #[test]
    fn random_match_ends_with_a_trapped_player() {
        let mut game = Game::new(Board::new(5, 5));
        let mut p1 = RandomPlayer::with_seed("r1", 11);
        let mut p2 = RandomPlayer::with_seed("r2", 22);
        let outcome = game.play(&mut p1, &mut p2, Duration::from_millis(100));
        assert_eq!(outcome.reason, FinishReason::Trapped);
        // The loser is the side left without moves on the final board.
        let loser = outcome.winner.opponent();
        assert_eq!(game.board.active_player(), loser);
        assert!(legal_moves(&game.board, loser).is_empty());
        assert_eq!(outcome.history.len(), game.board.ply());
    }

    #[test]
    fn illegal_answer_forfeits() {
        let mut game = Game::new(Board::new(5, 5));
        let mut p1 = Cheater;
        let mut p2 = RandomPlayer::with_seed("r2", 5);
        let outcome = game.play(&mut p1, &mut p2, Duration::from_millis(100));
        assert_eq!(outcome.winner, PlayerId::Player2);
        assert_eq!(outcome.reason, FinishReason::IllegalMove);
        assert!(outcome.history.is_empty());
    }

    #[test]
    fn record_captures_the_match() {
        let mut game = Game::new(Board::new(4, 4));
        let mut p1 = RandomPlayer::with_seed("alpha", 1);
        let mut p2 = RandomPlayer::with_seed("beta", 2);
        let outcome = game.play(&mut p1, &mut p2, Duration::from_millis(100));
        let record = game.record(&p1, &p2, &outcome);
        assert_eq!(record.player1, "alpha");
        assert_eq!(record.moves, outcome.history);
        let json = serde_json::to_string(&record).unwrap();
        let back: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.winner, outcome.winner);
    }
}
