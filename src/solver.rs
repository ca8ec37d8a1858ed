//! Bidirectional shortest-path search over canonical board states.
//!
//! Two breadth-first frontiers expand in lock-step layers, one rooted at the
//! start board and one at the goal outline. Every discovered state is passed
//! through the canonical encoder before the visited-set lookup; without that
//! step, color-permuted duplicates would blow the frontiers up. The first
//! state seen by both sides is the meeting point, and the concatenated paths
//! form a shortest solution.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{encode, EncodeMode, FixedAreas, State};
use crate::moves::{build_moves, DisabledMoves, Move};

/// Hard ceiling on the total solution length. Partial paths stop expanding
/// once they reach half of this on their own side, so the search space stays
/// bounded even for unsolvable inputs.
pub const MAX_PATH_LENGTH: usize = 25;

/// One entry of a move sequence: which node, and in which sense.
///
/// `clockwise == true` is the direct sense (clockwise rotation, or a
/// down/right line shift).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStep {
    pub node: usize,
    pub clockwise: bool,
}

/// An ordered solution: the moves to play from start to reach the goal.
pub type MoveSequence = Vec<MoveStep>;

fn step(state: &[i32], m: &Move, fixed_areas: &FixedAreas, direct: bool) -> State {
    encode(&m.apply(state, direct), fixed_areas, EncodeMode::Full)
}

/// Successor states of `state` with the move labels a forward path would use.
///
/// The goal-side frontier (`reverse == true`) walks edges backwards: it
/// applies each node's opposite permutation, gated by the capability of the
/// forward move that edge represents, and records that forward label. Paths
/// from the two sides therefore concatenate without any label rewriting.
fn neighbors(
    state: &[i32],
    moves: &[Move],
    fixed_areas: &FixedAreas,
    reverse: bool,
) -> Vec<(State, MoveStep)> {
    let mut out = Vec::with_capacity(moves.len() * 2);
    for m in moves {
        if reverse {
            if m.allow_reverse {
                out.push((
                    step(state, m, fixed_areas, true),
                    MoveStep { node: m.index, clockwise: false },
                ));
            }
            if m.allow_direct {
                out.push((
                    step(state, m, fixed_areas, false),
                    MoveStep { node: m.index, clockwise: true },
                ));
            }
        } else {
            if m.allow_direct {
                out.push((
                    step(state, m, fixed_areas, true),
                    MoveStep { node: m.index, clockwise: true },
                ));
            }
            if m.allow_reverse {
                out.push((
                    step(state, m, fixed_areas, false),
                    MoveStep { node: m.index, clockwise: false },
                ));
            }
        }
    }
    out
}

fn join(forward: &[MoveStep], backward: &[MoveStep]) -> MoveSequence {
    let mut path = forward.to_vec();
    path.extend(backward.iter().rev().copied());
    path
}

/// Searches for a shortest move sequence between two canonical states.
///
/// Returns `Some(vec![])` when `start == goal` (already solved) and `None`
/// when no path of length `MAX_PATH_LENGTH` or less exists.
pub fn bfs(
    start: &State,
    goal: &State,
    moves: &[Move],
    fixed_areas: &FixedAreas,
) -> Option<MoveSequence> {
    if start == goal {
        return Some(Vec::new());
    }

    let start_limit = MAX_PATH_LENGTH / 2 + MAX_PATH_LENGTH % 2;
    let goal_limit = MAX_PATH_LENGTH / 2;

    let mut start_queue: VecDeque<State> = VecDeque::from([start.clone()]);
    let mut start_paths: FxHashMap<State, MoveSequence> = FxHashMap::default();
    start_paths.insert(start.clone(), Vec::new());

    let mut goal_queue: VecDeque<State> = VecDeque::from([goal.clone()]);
    let mut goal_paths: FxHashMap<State, MoveSequence> = FxHashMap::default();
    goal_paths.insert(goal.clone(), Vec::new());

    while !start_queue.is_empty() && !goal_queue.is_empty() {
        // one full layer from the start side
        for _ in 0..start_queue.len() {
            let current = start_queue.pop_front().expect("layer length checked");
            let path = start_paths[&current].clone();
            if path.len() >= start_limit {
                continue;
            }
            for (next, mv) in neighbors(&current, moves, fixed_areas, false) {
                if !start_paths.contains_key(&next) {
                    let mut extended = path.clone();
                    extended.push(mv);
                    if let Some(backward) = goal_paths.get(&next) {
                        return Some(join(&extended, backward));
                    }
                    start_paths.insert(next.clone(), extended);
                    start_queue.push_back(next);
                }
            }
        }
        // one full layer from the goal side
        for _ in 0..goal_queue.len() {
            let current = goal_queue.pop_front().expect("layer length checked");
            let path = goal_paths[&current].clone();
            if path.len() >= goal_limit {
                continue;
            }
            for (next, mv) in neighbors(&current, moves, fixed_areas, true) {
                if !goal_paths.contains_key(&next) {
                    let mut extended = path.clone();
                    extended.push(mv);
                    if let Some(forward) = start_paths.get(&next) {
                        return Some(join(forward, &extended));
                    }
                    goal_paths.insert(next.clone(), extended);
                    goal_queue.push_back(next);
                }
            }
        }
    }

    None
}

/// Solves a puzzle: board colors into the outline's partition.
///
/// Builds the move catalogue for the board's grid, canonicalizes both sides
/// and runs the bidirectional search. `None` means unsolvable within
/// [`MAX_PATH_LENGTH`]; an empty sequence means the board already matches.
pub fn solve(
    board: &[i32],
    outline: &[i32],
    disabled: &DisabledMoves,
    fixed_areas: &FixedAreas,
) -> Option<MoveSequence> {
    let n = grid_side(board.len());
    let moves = build_moves(n, n, disabled);
    let start = encode(board, fixed_areas, EncodeMode::Full);
    let goal = encode(outline, fixed_areas, EncodeMode::Outline);
    bfs(&start, &goal, &moves, fixed_areas)
}

/// Replays `moves_applied` from `start` and checks the result solves `goal`.
///
/// Any reference to a node that does not exist, or whose required direction
/// is disabled, makes the sequence invalid; that is reported as `false`,
/// never as an error.
pub fn is_solved(
    start: &[i32],
    goal: &[i32],
    moves_applied: &[MoveStep],
    fixed_areas: &FixedAreas,
    disabled: &DisabledMoves,
) -> bool {
    let n = grid_side(start.len());
    let catalogue = build_moves(n, n, disabled);

    let mut state = encode(start, fixed_areas, EncodeMode::Full);
    for mv in moves_applied {
        let Some(node) = mv.node.checked_sub(1).and_then(|i| catalogue.get(i)) else {
            return false;
        };
        let allowed = if mv.clockwise {
            node.allow_direct
        } else {
            node.allow_reverse
        };
        if !allowed {
            return false;
        }
        state = encode(
            &node.apply(&state, mv.clockwise),
            fixed_areas,
            EncodeMode::Full,
        );
    }
    state == encode(goal, fixed_areas, EncodeMode::Outline)
}

fn grid_side(cells: usize) -> usize {
    let n = (cells as f64).sqrt() as usize;
    debug_assert_eq!(n * n, cells, "board must be square");
    n
}
