//! The move catalogue: every reversible transformation of a grid.
//!
//! Three kinds of node exist: a clockwise 2x2 block rotation for each 2x2
//! neighborhood, a cyclic shift for each column, and a cyclic shift for each
//! row. Every node stores its cell indices as a single permutation cycle, so
//! applying a move is the same loop for all kinds and direct/reverse are
//! exact inverses by construction.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::State;

/// Which directions of a node are switched off.
///
/// Wire shape (JSON): `{"3": {"cw": true, "ccw": true}}`, keyed by 1-based
/// node index. A missing entry means fully enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledDirections {
    #[serde(default)]
    pub cw: bool,
    #[serde(default)]
    pub ccw: bool,
}

/// Disabled-move mask: node index -> disabled directions.
pub type DisabledMoves = FxHashMap<usize, DisabledDirections>;

/// The shape of a node's permutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// 4-cycle of a 2x2 neighborhood; direct is clockwise.
    Block,
    /// Cyclic shift of a full column; direct moves cells down.
    Column,
    /// Cyclic shift of a full row; direct moves cells right.
    Row,
}

/// One reversible grid transformation.
#[derive(Clone, Debug)]
pub struct Move {
    /// 1-based catalogue index, the id used in move sequences and masks.
    pub index: usize,
    pub kind: MoveKind,
    /// Cell indices in cycle order: a direct application moves the value at
    /// `cells[k]` to `cells[(k + 1) % len]`.
    pub cells: Vec<usize>,
    pub allow_direct: bool,
    pub allow_reverse: bool,
}

impl Move {
    /// Applies this move to `state`, producing a new state.
    ///
    /// `direct == true` is the clockwise/down/right sense. Applying direct
    /// then reverse (in either order) restores the original state.
    pub fn apply(&self, state: &[i32], direct: bool) -> State {
        let mut next = state.to_vec();
        let len = self.cells.len();
        for k in 0..len {
            let from = self.cells[k];
            let to = self.cells[(k + 1) % len];
            if direct {
                next[to] = state[from];
            } else {
                next[from] = state[to];
            }
        }
        next
    }
}

/// Builds the ordered catalogue for a `rows` x `cols` grid.
///
/// Indices are assigned 1-based: first the `(rows-1)*(cols-1)` block
/// rotations row-major, then one node per column, then one node per row.
/// For an n x n grid that is `(n-1)^2 + 2n` nodes.
pub fn build_moves(rows: usize, cols: usize, disabled: &DisabledMoves) -> Vec<Move> {
    let mut moves = Vec::with_capacity((rows - 1) * (cols - 1) + rows + cols);
    let mut index = 1;

    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let anchor = r * cols + c;
            // cycle order: top-left, top-right, bottom-right, bottom-left
            moves.push(with_mask(
                index,
                MoveKind::Block,
                vec![anchor, anchor + 1, anchor + cols + 1, anchor + cols],
                disabled,
            ));
            index += 1;
        }
    }
    for c in 0..cols {
        moves.push(with_mask(
            index,
            MoveKind::Column,
            (0..rows).map(|r| r * cols + c).collect(),
            disabled,
        ));
        index += 1;
    }
    for r in 0..rows {
        moves.push(with_mask(
            index,
            MoveKind::Row,
            (0..cols).map(|c| r * cols + c).collect(),
            disabled,
        ));
        index += 1;
    }

    moves
}

fn with_mask(index: usize, kind: MoveKind, cells: Vec<usize>, disabled: &DisabledMoves) -> Move {
    let mask = disabled.get(&index).copied().unwrap_or_default();
    Move {
        index,
        kind,
        cells,
        allow_direct: !mask.cw,
        allow_reverse: !mask.ccw,
    }
}
