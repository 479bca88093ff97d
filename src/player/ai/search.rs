//! # Adversarial search
//!
//! Depth-limited minimax and alpha-beta over the in-place board, driven by
//! an anytime iterative-deepening loop under a wall-clock deadline. Every
//! node brackets its recursive exploration with an apply/undo pair, so a
//! whole search allocates no boards beyond one working copy of the caller's
//! snapshot.
//!
//! The deadline is polled at every node entry; on expiry the recursion
//! unwinds normally (undoing all pending moves) and the driver keeps the
//! move of the deepest iteration that ran to completion. A partially
//! explored depth is discarded: its candidate was never compared against
//! all root alternatives at that depth.

use crate::core::{Board, Move, PlayerId, Utility};
use crate::logic::{legal_moves, mobility};
use crate::player::ai::config::AIConfig;
use crate::player::ai::heuristics::Heuristic;
use crate::player::ai::time::{TimeManager, TimedOut};
use crate::player::PlayerController;
use std::cmp::Reverse;
use std::time::Duration;

/// Search algorithm used below the iterative-deepening driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMethod {
    /// Plain minimax, no pruning. Mostly useful as a reference.
    Minimax,
    /// Minimax with alpha-beta pruning and move ordering.
    AlphaBeta,
}

/// Outcome of one top-level decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Best move found; None only when the side to move has no legal moves.
    pub best_move: Option<Move>,
    /// Depth of the deepest fully completed iteration backing `best_move`.
    pub depth: usize,
    /// Backed-up value of `best_move` from the searcher's perspective.
    pub value: f64,
}

impl SearchResult {
    fn no_move() -> Self {
        SearchResult {
            best_move: None,
            depth: 0,
            value: f64::NEG_INFINITY,
        }
    }
}

/// Deadline-bounded game-playing agent.
pub struct SearchPlayer {
    name: String,
    heuristic: Box<dyn Heuristic>,
    method: SearchMethod,
    iterative: bool,
    fixed_depth: usize,
    timer_margin: Duration,
    nodes: u64,
}

impl SearchPlayer {
    /// Iterative-deepening agent; the margin and fixed depth come from
    /// [`AIConfig`].
    pub fn new(name: &str, heuristic: Box<dyn Heuristic>, method: SearchMethod) -> Self {
        let config = &AIConfig::get().search;
        SearchPlayer {
            name: name.to_string(),
            heuristic,
            method,
            iterative: true,
            fixed_depth: config.fixed_depth,
            timer_margin: Duration::from_millis(config.timer_margin_ms),
            nodes: 0,
        }
    }

    /// Single fixed-depth search instead of iterative deepening.
    pub fn with_fixed_depth(
        name: &str,
        heuristic: Box<dyn Heuristic>,
        method: SearchMethod,
        depth: usize,
    ) -> Self {
        assert!(depth >= 1, "search depth must be at least 1");
        let mut player = Self::new(name, heuristic, method);
        player.iterative = false;
        player.fixed_depth = depth;
        player
    }

    pub fn timer_margin(mut self, margin: Duration) -> Self {
        self.timer_margin = margin;
        self
    }

    /// Nodes expanded by the most recent [`SearchPlayer::search`] call.
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    /// Decide a move for the side to move on `snapshot` within `time_left`.
    ///
    /// Never returns a no-move result while legal moves exist: the first
    /// legal move is seeded as a fallback before any search, so even an
    /// already-expired deadline yields a legal (if uninformed) choice.
    pub fn search(&mut self, snapshot: &Board, time_left: Duration) -> SearchResult {
        let perspective = snapshot.active_player();
        let moves = legal_moves(snapshot, perspective);
        if moves.is_empty() {
            return SearchResult::no_move();
        }

        self.nodes = 0;
        let timer = TimeManager::start(time_left, self.timer_margin);
        let mut best = SearchResult {
            best_move: Some(moves[0]),
            depth: 0,
            value: f64::NEG_INFINITY,
        };
        let mut board = snapshot.clone();

        if !self.iterative {
            if let Ok((value, mv)) = self.search_root(&mut board, self.fixed_depth, perspective, &timer)
            {
                best = SearchResult {
                    best_move: Some(mv),
                    depth: self.fixed_depth,
                    value,
                };
            }
            return best;
        }

        // A game from here lasts at most one ply per blank cell, so any
        // deeper iteration would revisit an already fully solved tree.
        let max_depth = snapshot.blank_count();
        for depth in 1..=max_depth {
            match self.search_root(&mut board, depth, perspective, &timer) {
                Ok((value, mv)) => {
                    best = SearchResult {
                        best_move: Some(mv),
                        depth,
                        value,
                    };
                    // A backed-up ±inf is exact (terminal-derived), so the
                    // position is solved; deeper iterations cannot improve it.
                    if value.is_infinite() {
                        break;
                    }
                }
                Err(TimedOut) => break,
            }
        }
        best
    }

    /// One fixed-depth iteration over the root moves. Maximizing layer for
    /// `perspective`, which is always the side to move at the root.
    fn search_root(
        &mut self,
        board: &mut Board,
        depth: usize,
        perspective: PlayerId,
        timer: &TimeManager,
    ) -> Result<(f64, Move), TimedOut> {
        timer.check()?;
        let mut moves = legal_moves(board, perspective);
        self.order_moves(board, &mut moves);

        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best_value = f64::NEG_INFINITY;
        let mut best_move = moves[0];

        for mv in moves {
            let token = board.apply(mv);
            let searched = match self.method {
                SearchMethod::Minimax => self.minimax(board, depth - 1, perspective, false, timer),
                SearchMethod::AlphaBeta => {
                    self.alphabeta(board, depth - 1, perspective, alpha, beta, false, timer)
                }
            };
            board.undo(token);
            let value = searched?;
            if value > best_value {
                best_value = value;
                best_move = mv;
            }
            alpha = alpha.max(value);
        }
        Ok((best_value, best_move))
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: usize,
        perspective: PlayerId,
        maximizing: bool,
        timer: &TimeManager,
    ) -> Result<f64, TimedOut> {
        timer.check()?;
        self.nodes += 1;

        match board.utility(perspective) {
            Utility::Win => return Ok(f64::INFINITY),
            Utility::Loss => return Ok(f64::NEG_INFINITY),
            Utility::Ongoing => {}
        }
        if depth == 0 {
            return Ok(self.heuristic.score(board, perspective));
        }

        // Non-empty: an ongoing board always has moves for the side to move.
        let mut moves = legal_moves(board, board.active_player());
        self.order_moves(board, &mut moves);

        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for mv in moves {
            let token = board.apply(mv);
            let searched = self.minimax(board, depth - 1, perspective, !maximizing, timer);
            // restore before propagating a timeout, so the whole unwind
            // leaves the board exactly as the caller passed it
            board.undo(token);
            let value = searched?;
            best = if maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        Ok(best)
    }

    #[allow(clippy::too_many_arguments)]
    fn alphabeta(
        &mut self,
        board: &mut Board,
        depth: usize,
        perspective: PlayerId,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        timer: &TimeManager,
    ) -> Result<f64, TimedOut> {
        timer.check()?;
        self.nodes += 1;

        match board.utility(perspective) {
            Utility::Win => return Ok(f64::INFINITY),
            Utility::Loss => return Ok(f64::NEG_INFINITY),
            Utility::Ongoing => {}
        }
        if depth == 0 {
            return Ok(self.heuristic.score(board, perspective));
        }

        let mut moves = legal_moves(board, board.active_player());
        self.order_moves(board, &mut moves);

        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for mv in moves {
                let token = board.apply(mv);
                let searched =
                    self.alphabeta(board, depth - 1, perspective, alpha, beta, false, timer);
                board.undo(token);
                let value = searched?;
                best = best.max(value);
                if best >= beta {
                    break; // opponent will never allow this line
                }
                alpha = alpha.max(best);
            }
            Ok(best)
        } else {
            let mut best = f64::INFINITY;
            for mv in moves {
                let token = board.apply(mv);
                let searched =
                    self.alphabeta(board, depth - 1, perspective, alpha, beta, true, timer);
                board.undo(token);
                let value = searched?;
                best = best.min(value);
                if best <= alpha {
                    break;
                }
                beta = beta.min(best);
            }
            Ok(best)
        }
    }

    /// Explore the most promising candidates first: descending mobility of
    /// the destination cell. Better ordering prunes more siblings, which is
    /// the single largest lever on feasible search depth. Applied in both
    /// methods so minimax and alpha-beta traverse roots identically.
    ///
    /// The mover's own cell is already blocked, so the mobility of the
    /// destination on the current board equals the mover's legal-move count
    /// after the move.
    fn order_moves(&self, board: &Board, moves: &mut [Move]) {
        moves.sort_by_key(|&mv| Reverse(mobility(board, mv)));
    }
}

impl PlayerController for SearchPlayer {
    fn choose_move(
        &mut self,
        board: &Board,
        legal_moves: &[Move],
        time_left: Duration,
    ) -> Option<Move> {
        if legal_moves.is_empty() {
            return None;
        }
        self.search(board, time_left).best_move
    }

    fn name(&self) -> &str {
        &self.name
    }
}
