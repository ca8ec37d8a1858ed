//! Exhaustive generation of target outlines: every way to partition the
//! 4x4 grid into four tetromino-shaped regions.
//!
//! The seven free tetrominoes are expanded into their distinct 90-degree
//! rotation variants, every variant into every in-grid placement, and a
//! backtracking search over the lowest-index empty cell assembles complete
//! tilings. Filling cells in a fixed order means each distinct tiling is
//! reached by exactly one search path, so the catalogue needs no dedup pass.

use std::collections::BTreeSet;

/// Side length of the outline grid.
pub const GRID_SIZE: usize = 4;

/// Total cells in the outline grid.
pub const CELLS_TOTAL: usize = GRID_SIZE * GRID_SIZE;

/// Number of regions in an outline (each one tetromino here).
const GROUPS: usize = 4;

/// An outline board: one group id (0..=3) per cell, row-major.
pub type OutlineBoard = [u8; CELLS_TOTAL];

/// A tetromino's cells as (row, col) offsets from its bounding-box corner.
type Shape = Vec<(i32, i32)>;

/// A concrete 4-cell placement, identified by sorted absolute cell indices.
type Placement = [usize; GROUPS];

/// The seven free tetrominoes: I, O, T, L, J, S, Z.
const TETROMINOES: [[(i32, i32); 4]; 7] = [
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    [(0, 0), (0, 1), (1, 0), (1, 1)],
    [(0, 0), (0, 1), (0, 2), (1, 1)],
    [(0, 0), (1, 0), (2, 0), (2, 1)],
    [(0, 1), (1, 1), (2, 1), (2, 0)],
    [(0, 1), (0, 2), (1, 0), (1, 1)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

/// Translates a shape so its minimum row and column are zero, sorted.
///
/// Two placements of the same shape that differ only by translation
/// normalize to the same value, which is what makes rotation dedup work.
fn normalize(shape: impl IntoIterator<Item = (i32, i32)>) -> Shape {
    let cells: Vec<(i32, i32)> = shape.into_iter().collect();
    let min_r = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let min_c = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);
    let mut normalized: Shape = cells.iter().map(|&(r, c)| (r - min_r, c - min_c)).collect();
    normalized.sort_unstable();
    normalized
}

/// Rotates a shape 90 degrees and renormalizes.
fn rotate(shape: &[(i32, i32)]) -> Shape {
    normalize(shape.iter().map(|&(r, c)| (c, -r)))
}

/// All distinct 90-degree rotation variants of a shape.
///
/// Symmetric shapes collapse: O yields 1 variant, I yields 2, S/Z yield 2,
/// T/L/J yield 4.
pub fn rotation_variants(shape: &[(i32, i32)]) -> Vec<Shape> {
    let mut variants = BTreeSet::new();
    let mut current = normalize(shape.iter().copied());
    for _ in 0..4 {
        let next = rotate(&current);
        variants.insert(current);
        current = next;
    }
    variants.into_iter().collect()
}

/// Every in-grid placement of every rotation variant of every tetromino.
fn placements() -> Vec<Placement> {
    let mut set: BTreeSet<Placement> = BTreeSet::new();
    for tetromino in &TETROMINOES {
        for variant in rotation_variants(tetromino) {
            let max_r = variant.iter().map(|&(r, _)| r).max().unwrap_or(0) as usize;
            let max_c = variant.iter().map(|&(_, c)| c).max().unwrap_or(0) as usize;
            for row in 0..GRID_SIZE - max_r {
                for col in 0..GRID_SIZE - max_c {
                    let mut cells = [0usize; GROUPS];
                    for (slot, &(dr, dc)) in variant.iter().enumerate() {
                        cells[slot] = (row + dr as usize) * GRID_SIZE + (col + dc as usize);
                    }
                    cells.sort_unstable();
                    set.insert(cells);
                }
            }
        }
    }
    set.into_iter().collect()
}

/// Generates the complete outline catalogue for the 4x4 grid.
///
/// Each board partitions the grid into four tetromino regions, group ids
/// assigned in placement order. The catalogue is deterministic and free of
/// duplicates.
pub fn generate_outline_boards() -> Vec<OutlineBoard> {
    let placements = placements();
    let mut by_cell: Vec<Vec<usize>> = vec![Vec::new(); CELLS_TOTAL];
    for (placement_idx, placement) in placements.iter().enumerate() {
        for &cell in placement {
            by_cell[cell].push(placement_idx);
        }
    }

    let mut boards = Vec::new();
    let mut grid = [-1i8; CELLS_TOTAL];
    backtrack(0, &mut grid, &placements, &by_cell, &mut boards);
    boards
}

fn backtrack(
    group_id: u8,
    grid: &mut [i8; CELLS_TOTAL],
    placements: &[Placement],
    by_cell: &[Vec<usize>],
    boards: &mut Vec<OutlineBoard>,
) {
    if group_id as usize == GROUPS {
        let mut board = [0u8; CELLS_TOTAL];
        for (cell, &group) in grid.iter().enumerate() {
            board[cell] = group as u8;
        }
        boards.push(board);
        return;
    }
    let Some(first_empty) = grid.iter().position(|&cell| cell < 0) else {
        return;
    };
    for &placement_idx in &by_cell[first_empty] {
        let placement = &placements[placement_idx];
        if placement.iter().all(|&cell| grid[cell] < 0) {
            for &cell in placement {
                grid[cell] = group_id as i8;
            }
            backtrack(group_id + 1, grid, placements, by_cell, boards);
            for &cell in placement {
                grid[cell] = -1;
            }
        }
    }
}

/// Renders an outline board as one digit row per grid row.
pub fn format_outline(board: &OutlineBoard) -> String {
    let mut output = String::with_capacity(CELLS_TOTAL + GRID_SIZE);
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let group = board[row * GRID_SIZE + col];
            output.push(char::from(b'0' + group));
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_variant_counts_per_tetromino() {
        let expected = [2, 1, 4, 4, 4, 2, 2]; // I, O, T, L, J, S, Z
        for (tetromino, &count) in TETROMINOES.iter().zip(&expected) {
            assert_eq!(rotation_variants(tetromino).len(), count);
        }
        let total: usize = TETROMINOES
            .iter()
            .map(|t| rotation_variants(t).len())
            .sum();
        assert_eq!(total, 19);
    }

    #[test]
    fn test_rotating_four_times_is_identity() {
        for tetromino in &TETROMINOES {
            let base = normalize(tetromino.iter().copied());
            let mut shape = base.clone();
            for _ in 0..4 {
                shape = rotate(&shape);
            }
            assert_eq!(shape, base);
        }
    }

    #[test]
    fn test_placement_count() {
        assert_eq!(placements().len(), 113);
    }

    #[test]
    fn test_placements_fit_the_grid() {
        for placement in placements() {
            assert!(placement.iter().all(|&cell| cell < CELLS_TOTAL));
            // sorted and duplicate-free
            assert!(placement.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_catalogue_count_and_known_members() {
        let boards = generate_outline_boards();
        assert_eq!(boards.len(), 117);

        let squares: OutlineBoard = [0, 0, 1, 1, 0, 0, 1, 1, 2, 2, 3, 3, 2, 2, 3, 3];
        let rows: OutlineBoard = [0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3];
        assert!(boards.contains(&squares));
        assert!(boards.contains(&rows));
    }

    #[test]
    fn test_catalogue_has_no_duplicates() {
        let boards = generate_outline_boards();
        let unique: BTreeSet<OutlineBoard> = boards.iter().copied().collect();
        assert_eq!(unique.len(), boards.len());
    }

    #[test]
    fn test_every_group_is_a_valid_tetromino_region() {
        let valid: BTreeSet<Placement> = placements().into_iter().collect();
        for board in generate_outline_boards() {
            for group in 0..GROUPS as u8 {
                let mut cells: Vec<usize> = (0..CELLS_TOTAL)
                    .filter(|&cell| board[cell] == group)
                    .collect();
                assert_eq!(cells.len(), 4, "each group covers exactly 4 cells");
                cells.sort_unstable();
                let key: Placement = [cells[0], cells[1], cells[2], cells[3]];
                assert!(valid.contains(&key), "group {group} is not a tetromino");
            }
        }
    }

    #[test]
    fn test_group_ids_appear_in_scan_order() {
        // group ids are assigned in placement order, so the first cell is
        // always group 0 and new ids appear in increasing order
        for board in generate_outline_boards() {
            let mut highest_seen = 0u8;
            assert_eq!(board[0], 0);
            for &group in &board {
                assert!(group <= highest_seen + 1);
                highest_seen = highest_seen.max(group);
            }
        }
    }

    #[test]
    fn test_format_outline_layout() {
        let squares: OutlineBoard = [0, 0, 1, 1, 0, 0, 1, 1, 2, 2, 3, 3, 2, 2, 3, 3];
        assert_eq!(format_outline(&squares), "0011\n0011\n2233\n2233\n");
    }
}
