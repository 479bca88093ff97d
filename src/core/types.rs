use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two players of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Player1, // moves first
    Player2,
}

impl Default for PlayerId {
    fn default() -> Self {
        PlayerId::Player1
    }
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    /// Index into per-player arrays (Player1 = 0, Player2 = 1).
    pub fn index(self) -> usize {
        match self {
            PlayerId::Player1 => 0,
            PlayerId::Player2 => 1,
        }
    }
}

/// Board coordinate (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// Letter label for a column: 'A'..='Z', then 'a'..='z'. None once the
/// letters run out; callers fall back to a numeric rendering.
pub(crate) fn col_letter(col: usize) -> Option<char> {
    match col {
        0..=25 => Some((b'A' + col as u8) as char),
        26..=51 => Some((b'a' + (col - 26) as u8) as char),
        _ => None,
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match col_letter(self.col) {
            Some(letter) => write!(f, "{}{}", letter, self.row + 1),
            None => write!(f, "({},{})", self.row + 1, self.col + 1),
        }
    }
}

/// A move is just the destination cell the mover jumps to. Moves are
/// transient descriptors produced by move generation; they carry no
/// identity of their own.
pub type Move = Position;

/// Game-theoretic value of a board for a given player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utility {
    Win,
    Loss,
    Ongoing,
}
