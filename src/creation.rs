//! Puzzle creation workflow: input validation, record building, and the
//! random generate-and-test loop.
//!
//! The core (`board`, `moves`, `solver`, `outlines`) assumes well-formed
//! input and reports outcomes as plain values; everything that can reject a
//! puzzle lives here, as `CreationError`. "Unsolvable" and "already solved"
//! are creation errors rather than solver faults: a puzzle identical to its
//! target, or with no path to it, is simply not worth storing.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::FixedAreas;
use crate::moves::{build_moves, DisabledMoves};
use crate::outlines::{CELLS_TOTAL, GRID_SIZE};
use crate::solver::{solve, MoveSequence};

/// Colors available on a board, and the number of cells of each on 4x4.
pub const COLOR_COUNT: i32 = 4;

/// Default retry budget for [`random_puzzle`].
pub const DEFAULT_MAX_TRIES: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreationError {
    #[error("Incomplete outline.")]
    IncompleteOutline,
    #[error("Invalid outline.")]
    InvalidOutline,
    #[error("Incomplete board.")]
    IncompleteBoard,
    #[error("Invalid board.")]
    InvalidBoard,
    #[error("Invalid fixed areas.")]
    InvalidFixedAreas,
    #[error("No active nodes.")]
    NoActiveNodes,
    #[error("No such outline in the catalogue.")]
    UnknownOutline,
    #[error("The puzzle is unsolvable.")]
    Unsolvable,
    #[error("The puzzle is already solved.")]
    AlreadySolved,
}

impl CreationError {
    /// Whether a fresh random board is worth trying after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unsolvable | Self::AlreadySolved)
    }
}

/// A validated puzzle configuration, ready for solving.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatePayload {
    /// Outline relabelled 0-based by first occurrence.
    pub outline: Vec<i32>,
    /// Board colors, 1..=4, four cells of each.
    pub board: Vec<i32>,
    #[serde(default)]
    pub fixed_areas: FixedAreas,
    #[serde(default)]
    pub disabled_nodes: DisabledMoves,
}

/// A created puzzle record, the unit the storage layer would persist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub board: Vec<i32>,
    pub outline: Vec<i32>,
    pub fixed_areas: FixedAreas,
    pub disabled_nodes: DisabledMoves,
    /// Length of the shortest solution found at creation time.
    pub moves_min_num: usize,
}

/// Validates raw puzzle input into a [`CreatePayload`].
///
/// The outline may use arbitrary labels; it is relabelled 0-based by first
/// occurrence and must form exactly four groups over sixteen cells. Fixed
/// areas are keyed by 1-based group rank and deduplicated/auto-completed by
/// [`complete_fixed_areas`]. Disabled entries outside the catalogue are
/// dropped; a mask that switches off every node in both directions is
/// rejected outright.
pub fn normalize_payload(
    outline: &[i32],
    board: &[i32],
    fixed_areas: &FixedAreas,
    disabled_nodes: &DisabledMoves,
) -> Result<CreatePayload, CreationError> {
    if outline.len() != CELLS_TOTAL {
        return Err(CreationError::IncompleteOutline);
    }
    let mut labels: Vec<i32> = Vec::new();
    let relabelled: Vec<i32> = outline
        .iter()
        .map(|&value| {
            if let Some(pos) = labels.iter().position(|&seen| seen == value) {
                pos as i32
            } else {
                labels.push(value);
                labels.len() as i32 - 1
            }
        })
        .collect();
    if labels.len() != 4 {
        return Err(CreationError::InvalidOutline);
    }

    let fixed_areas = complete_fixed_areas(fixed_areas)?;

    if board.len() != CELLS_TOTAL {
        return Err(CreationError::IncompleteBoard);
    }
    if board.iter().any(|&color| !(1..=COLOR_COUNT).contains(&color)) {
        return Err(CreationError::InvalidBoard);
    }
    for color in 1..=COLOR_COUNT {
        if board.iter().filter(|&&c| c == color).count() != 4 {
            return Err(CreationError::InvalidBoard);
        }
    }

    let node_count = build_moves(GRID_SIZE, GRID_SIZE, &DisabledMoves::default()).len();
    let disabled_nodes: DisabledMoves = disabled_nodes
        .iter()
        .filter(|(&index, _)| (1..=node_count).contains(&index))
        .map(|(&index, &mask)| (index, mask))
        .collect();
    let fully_disabled = disabled_nodes
        .values()
        .filter(|mask| mask.cw && mask.ccw)
        .count();
    if fully_disabled == node_count {
        return Err(CreationError::NoActiveNodes);
    }

    Ok(CreatePayload {
        outline: relabelled,
        board: board.to_vec(),
        fixed_areas,
        disabled_nodes,
    })
}

/// Checks and completes a fixed-areas mapping.
///
/// Keys and colors must lie in 1..=4 and colors must be pairwise distinct.
/// Exactly three pins determine the fourth: the unique unused group gets the
/// unique unused color.
pub fn complete_fixed_areas(fixed_areas: &FixedAreas) -> Result<FixedAreas, CreationError> {
    let mut completed = fixed_areas.clone();
    if completed
        .iter()
        .any(|(&group, &color)| !(1..=4).contains(&group) || !(1..=COLOR_COUNT).contains(&color))
    {
        return Err(CreationError::InvalidFixedAreas);
    }
    let colors: Vec<i32> = completed.values().copied().collect();
    let mut distinct = colors.clone();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() != colors.len() {
        return Err(CreationError::InvalidFixedAreas);
    }
    if completed.len() == 3 {
        let missing_group = (1..=4)
            .find(|group| !completed.contains_key(group))
            .expect("three pins leave one group");
        let missing_color = (1..=COLOR_COUNT)
            .find(|color| !colors.contains(color))
            .expect("three distinct colors leave one");
        completed.insert(missing_group, missing_color);
    }
    Ok(completed)
}

/// Solves a validated payload and builds the puzzle record.
pub fn create_puzzle(payload: &CreatePayload) -> Result<(Puzzle, MoveSequence), CreationError> {
    let solution = solve(
        &payload.board,
        &payload.outline,
        &payload.disabled_nodes,
        &payload.fixed_areas,
    )
    .ok_or(CreationError::Unsolvable)?;
    if solution.is_empty() {
        return Err(CreationError::AlreadySolved);
    }
    let puzzle = Puzzle {
        board: payload.board.clone(),
        outline: payload.outline.clone(),
        fixed_areas: payload.fixed_areas.clone(),
        disabled_nodes: payload.disabled_nodes.clone(),
        moves_min_num: solution.len(),
    };
    Ok((puzzle, solution))
}

/// Generate-and-test: shuffles the color multiset until a board makes a
/// proper puzzle against `outline`.
///
/// Unsolvable and already-solved boards are retried up to `max_tries`; the
/// last such error is returned if the budget runs out.
pub fn random_puzzle(
    outline: &[i32],
    max_tries: usize,
    rng: &mut impl Rng,
) -> Result<(Puzzle, MoveSequence), CreationError> {
    let mut template: Vec<i32> = (1..=COLOR_COUNT)
        .flat_map(|color| std::iter::repeat(color).take(4))
        .collect();

    let mut last_error = CreationError::Unsolvable;
    for _ in 0..max_tries {
        template.shuffle(rng);
        let payload = normalize_payload(
            outline,
            &template,
            &FixedAreas::new(),
            &DisabledMoves::default(),
        )?;
        match create_puzzle(&payload) {
            Ok(created) => return Ok(created),
            Err(error) if error.is_retryable() => last_error = error,
            Err(error) => return Err(error),
        }
    }
    Err(last_error)
}
