//! Time-bounded adversarial search agent for knight's-move Isolation.
//!
//! Two players alternately jump like chess knights on a rectangular grid;
//! every visited cell stays blocked, and the first player left without a
//! move loses. The crate provides the mutable board model with reversible
//! apply/undo, six interchangeable position evaluators, a deadline-bounded
//! minimax / alpha-beta engine with iterative deepening, and a match
//! driver that enforces the per-turn time limit.

pub mod core;
pub mod game;
pub mod logic;
pub mod player;
