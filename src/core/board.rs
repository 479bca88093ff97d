use super::types::{col_letter, Move, PlayerId, Position, Utility};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The eight L-shaped knight displacements, as (d_row, d_col).
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Game board for knight's-move Isolation.
///
/// Cells become blocked once either player has occupied them and stay
/// blocked for the rest of the game. The board is mutated in place by
/// [`Board::apply`] and restored by [`Board::undo`]; search brackets every
/// recursive exploration with an apply/undo pair instead of cloning the
/// grid per node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    /// Row-major occupancy history: true once a cell has ever been occupied.
    blocked: Vec<bool>,
    /// Current cell per player; None until the opening placement.
    locations: [Option<Position>; 2],
    active: PlayerId,
    move_count: usize,
    blanks: usize,
}

/// Opaque receipt returned by [`Board::apply`], consumed by [`Board::undo`].
///
/// Records exactly what the apply changed: who moved, from where, and which
/// cell it blocked. Tokens must be redeemed in LIFO order.
#[derive(Debug, Clone, Copy)]
#[must_use = "an applied move must be undone with its token"]
pub struct UndoToken {
    mover: PlayerId,
    prev_location: Option<Position>,
    blocked_cell: Position,
    ply: usize,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board must have at least one cell");
        Board {
            width,
            height,
            blocked: vec![false; width * height],
            locations: [None, None],
            active: PlayerId::Player1,
            move_count: 0,
            blanks: width * height,
        }
    }

    fn cell_index(&self, pos: Position) -> usize {
        pos.row * self.width + pos.col
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    pub fn is_blocked(&self, pos: Position) -> bool {
        self.blocked[self.cell_index(pos)]
    }

    pub fn location(&self, player: PlayerId) -> Option<Position> {
        self.locations[player.index()]
    }

    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    /// Number of plies played so far.
    pub fn ply(&self) -> usize {
        self.move_count
    }

    /// Number of never-occupied cells. An upper bound on the number of
    /// plies the game can still last.
    pub fn blank_count(&self) -> usize {
        self.blanks
    }

    /// All never-occupied cells in row-major order.
    pub fn blank_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, &b)| !b)
            .map(move |(i, _)| Position::new(i / width, i % width))
    }

    /// Whether `mv` is currently legal for `player`: an unblocked in-bounds
    /// cell, knight-reachable from the player's cell (any blank cell while
    /// the player has not been placed yet).
    pub fn is_legal_move(&self, player: PlayerId, mv: Move) -> bool {
        if !self.in_bounds(mv) || self.is_blocked(mv) {
            return false;
        }
        match self.location(player) {
            None => true,
            Some(from) => KNIGHT_OFFSETS.iter().any(|&(dr, dc)| {
                from.row as i32 + dr == mv.row as i32 && from.col as i32 + dc == mv.col as i32
            }),
        }
    }

    fn has_any_move(&self, player: PlayerId) -> bool {
        match self.location(player) {
            None => self.blanks > 0,
            Some(from) => KNIGHT_OFFSETS.iter().any(|&(dr, dc)| {
                let r = from.row as i32 + dr;
                let c = from.col as i32 + dc;
                r >= 0
                    && c >= 0
                    && (r as usize) < self.height
                    && (c as usize) < self.width
                    && !self.is_blocked(Position::new(r as usize, c as usize))
            }),
        }
    }

    /// Move the active player to `mv` in place: block the destination,
    /// update the location, flip the active player, advance the ply.
    ///
    /// # Panics
    ///
    /// Panics if `mv` is not a legal move for the active player. An illegal
    /// apply is a programming error on the caller's side and must not
    /// silently corrupt the board.
    pub fn apply(&mut self, mv: Move) -> UndoToken {
        let mover = self.active;
        assert!(
            self.is_legal_move(mover, mv),
            "illegal move {} for {:?} at ply {}",
            mv,
            mover,
            self.move_count
        );
        let prev_location = self.locations[mover.index()];
        // legal_moves never yields a blocked cell, so this apply is the
        // first (and only) time the destination gets blocked
        let idx = self.cell_index(mv);
        self.blocked[idx] = true;
        self.blanks -= 1;
        self.locations[mover.index()] = Some(mv);
        self.active = mover.opponent();
        self.move_count += 1;
        UndoToken {
            mover,
            prev_location,
            blocked_cell: mv,
            ply: self.move_count,
        }
    }

    /// Exact inverse of the [`Board::apply`] that produced `token`.
    ///
    /// Tokens must be redeemed in LIFO order relative to their applies;
    /// the board is mutated in place, so there is nothing older to restore.
    ///
    /// # Panics
    ///
    /// Panics if `token` does not belong to the most recent un-undone apply.
    pub fn undo(&mut self, token: UndoToken) {
        assert_eq!(
            token.ply, self.move_count,
            "undo out of LIFO order (token ply {}, board ply {})",
            token.ply, self.move_count
        );
        let idx = self.cell_index(token.blocked_cell);
        debug_assert!(self.blocked[idx], "undo target cell is not blocked");
        self.blocked[idx] = false;
        self.blanks += 1;
        self.locations[token.mover.index()] = token.prev_location;
        self.active = token.mover;
        self.move_count -= 1;
    }

    /// Terminal status from `player`'s point of view. The game ends when
    /// the player to move has no legal moves; that player loses.
    pub fn utility(&self, player: PlayerId) -> Utility {
        if self.has_any_move(self.active) {
            Utility::Ongoing
        } else if player == self.active {
            Utility::Loss
        } else {
            Utility::Win
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rule = "-".repeat(4 * self.width + 3);
        write!(f, "  |")?;
        for c in 0..self.width {
            write!(f, " {} |", col_letter(c).unwrap_or('?'))?;
        }
        writeln!(f, "\n{rule}")?;
        for r in 0..self.height {
            write!(f, "{} |", r + 1)?;
            for c in 0..self.width {
                let pos = Position::new(r, c);
                let mark = if self.location(PlayerId::Player1) == Some(pos) {
                    '1'
                } else if self.location(PlayerId::Player2) == Some(pos) {
                    '2'
                } else if self.is_blocked(pos) {
                    '-'
                } else {
                    ' '
                };
                write!(f, " {mark} |")?;
            }
            writeln!(f, "\n{rule}")?;
        }
        Ok(())
    }
}
