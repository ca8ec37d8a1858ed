//! Rotation Puzzle Engine
//!
//! Core library for a rotation grid puzzle: a board of colored cells must be
//! rearranged into a target outline (a partition of the grid into four
//! tetromino regions) using 2x2 block rotations and full row/column cyclic
//! shifts.
//!
//! The crate exposes four pure entry points:
//! - [`solve`]: shortest move sequence from board to outline, or `None` if
//!   unreachable within the search bound. An empty sequence means the board
//!   already matches the outline.
//! - [`is_solved`]: replays a candidate move sequence and checks the result.
//! - [`generate_outline_boards`]: the complete catalogue of valid outlines.
//! - [`encode`]: the canonical state encoding used for all comparisons.
//!
//! Everything is synchronous and state-free between calls; callers may run
//! any number of solves in parallel.

pub mod board;
pub mod creation;
pub mod moves;
pub mod outlines;
pub mod persistence;
pub mod solver;

pub use board::{encode, EncodeMode, FixedAreas, State};
pub use moves::{build_moves, DisabledMoves};
pub use outlines::generate_outline_boards;
pub use solver::{is_solved, solve, MoveSequence, MoveStep};
