//! Board states and canonical encoding.
//!
//! A board is a flat row-major sequence of color/group ids. Two boards are
//! the "same" position exactly when their canonical encodings are equal:
//! colors are anonymized by first occurrence, except colors pinned by a
//! fixed area, which are negated so they stay distinguishable from free
//! colors across relabelings.

use std::collections::BTreeMap;

/// A board state: one color/group id per cell, row-major.
///
/// Canonical states use positive ids for free groups and negative ids for
/// cells pinned to a concrete color.
pub type State = Vec<i32>;

/// Fixed areas: 1-based canonical group id -> pinned color (1..=4).
///
/// Kept ordered so iteration and auto-completion are deterministic.
pub type FixedAreas = BTreeMap<i32, i32>;

/// How [`encode`] relabels a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeMode {
    /// Board-side canonicalization: first-seen values get sequential ids,
    /// values matching a pinned color are negated instead. A state that
    /// already contains negative markers keeps them and only relabels the
    /// remaining non-negative values.
    Full,
    /// Target-side canonicalization: the k-th first-seen group becomes the
    /// negated pinned color when group k is a fixed-areas key, otherwise it
    /// gets its sequential id.
    Outline,
    /// No relabeling; only negates values that appear in the fixed-areas
    /// value set.
    PinsOnly,
}

/// Canonically relabels `state` under the given fixed areas.
///
/// Pure function of its inputs; `Full` mode is idempotent on board states,
/// and with empty
/// fixed areas it degenerates to plain relabeling by first occurrence.
pub fn encode(state: &[i32], fixed_areas: &FixedAreas, mode: EncodeMode) -> State {
    match mode {
        EncodeMode::PinsOnly => {
            return state
                .iter()
                .map(|&v| {
                    if fixed_areas.values().any(|&color| color == v) {
                        -v
                    } else {
                        v
                    }
                })
                .collect();
        }
        EncodeMode::Full | EncodeMode::Outline => {}
    }

    let mut mapping: BTreeMap<i32, i32> = BTreeMap::new();
    let mut next_id = 1;
    let already_encoded = state.iter().any(|&v| v < 0);
    let mut out = Vec::with_capacity(state.len());

    for &value in state {
        if !mapping.contains_key(&value) {
            let mapped = match mode {
                EncodeMode::Outline => match fixed_areas.get(&next_id) {
                    Some(&color) => -color,
                    None => next_id,
                },
                EncodeMode::Full => {
                    if already_encoded {
                        if value < 0 {
                            value
                        } else {
                            next_id
                        }
                    } else if fixed_areas.values().any(|&color| color == value) {
                        -value
                    } else {
                        next_id
                    }
                }
                EncodeMode::PinsOnly => unreachable!(),
            };
            mapping.insert(value, mapped);
            // the counter tracks first-seen groups, pinned or not
            next_id += 1;
        }
        out.push(mapping[&value]);
    }
    out
}

/// Assigns a concrete display color to every outline group.
///
/// Pinned groups keep their pinned color; remaining groups (largest first)
/// take the most frequent board color under them that is still unused,
/// falling back to the most frequent color outright.
pub fn target_preview(board: &[i32], outline: &[i32], fixed_areas: &FixedAreas) -> Vec<i32> {
    let mut groups: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    // 1-based first-occurrence rank of each group value, the same numbering
    // fixed-areas keys use
    let mut ranks: BTreeMap<i32, i32> = BTreeMap::new();
    for (idx, &group) in outline.iter().enumerate() {
        if !ranks.contains_key(&group) {
            let rank = ranks.len() as i32 + 1;
            ranks.insert(group, rank);
        }
        groups.entry(group).or_default().push(idx);
    }

    let mut group_color: BTreeMap<i32, i32> = BTreeMap::new();
    let mut used: Vec<i32> = Vec::new();

    for &group in groups.keys() {
        if group < 0 {
            group_color.insert(group, -group);
            used.push(-group);
        }
    }
    for (&group, &rank) in &ranks {
        if let Some(&color) = fixed_areas.get(&rank) {
            if !group_color.contains_key(&group) {
                group_color.insert(group, color);
                used.push(color);
            }
        }
    }

    let mut by_size: Vec<(&i32, &Vec<usize>)> = groups.iter().collect();
    by_size.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    for (&group, cells) in by_size {
        if group_color.contains_key(&group) {
            continue;
        }
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for &idx in cells {
            *counts.entry(board[idx]).or_insert(0) += 1;
        }
        let pick = counts
            .iter()
            .filter(|&(color, _)| !used.contains(color))
            .max_by_key(|&(_, count)| count)
            .or_else(|| counts.iter().max_by_key(|&(_, count)| count))
            .map(|(&color, _)| color);
        if let Some(color) = pick {
            group_color.insert(group, color);
            used.push(color);
        }
    }

    outline.iter().map(|group| group_color[group]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(pairs: &[(i32, i32)]) -> FixedAreas {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_full_encoding_relabels_by_first_occurrence() {
        let state = vec![7, 7, 3, 3, 7, 3, 9, 9];
        assert_eq!(
            encode(&state, &FixedAreas::new(), EncodeMode::Full),
            vec![1, 1, 2, 2, 1, 2, 3, 3]
        );
    }

    #[test]
    fn test_full_encoding_negates_pinned_colors() {
        // color 2 is pinned somewhere, so it stays identifiable as -2
        let state = vec![3, 1, 2, 2];
        let encoded = encode(&state, &fixed(&[(1, 2)]), EncodeMode::Full);
        assert_eq!(encoded, vec![1, 2, -2, -2]);
    }

    #[test]
    fn test_full_encoding_passes_existing_markers_through() {
        // the marker group still consumes id 1, so 5 relabels to 2
        let state = vec![-2, 5, 5, -2, 8];
        let encoded = encode(&state, &fixed(&[(1, 2)]), EncodeMode::Full);
        assert_eq!(encoded, vec![-2, 2, 2, -2, 3]);
    }

    #[test]
    fn test_full_encoding_is_idempotent() {
        let areas = fixed(&[(1, 1), (2, 2), (3, 4), (4, 3)]);
        for state in [
            vec![1, 1, 2, 2, 1, 2, 4, 2, 3, 1, 3, 4, 3, 3, 4, 4],
            vec![4, 3, 2, 1],
            vec![2, 1, 1, 2],
        ] {
            let once = encode(&state, &areas, EncodeMode::Full);
            let twice = encode(&once, &areas, EncodeMode::Full);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_outline_encoding_pins_groups_by_rank() {
        let outline = vec![0, 0, 1, 1, 0, 0, 1, 1, 2, 2, 3, 3, 2, 2, 3, 3];
        let areas = fixed(&[(1, 1), (2, 2), (3, 4), (4, 3)]);
        assert_eq!(
            encode(&outline, &areas, EncodeMode::Outline),
            vec![-1, -1, -2, -2, -1, -1, -2, -2, -4, -4, -3, -3, -4, -4, -3, -3]
        );
    }

    #[test]
    fn test_outline_encoding_without_pins_is_sequential() {
        let outline = vec![3, 3, 0, 0, 1, 1, 2, 2];
        assert_eq!(
            encode(&outline, &FixedAreas::new(), EncodeMode::Outline),
            vec![1, 1, 2, 2, 3, 3, 4, 4]
        );
    }

    #[test]
    fn test_pins_only_negates_pinned_values() {
        let state = vec![1, 2, 3, 4];
        let encoded = encode(&state, &fixed(&[(1, 2), (2, 4)]), EncodeMode::PinsOnly);
        assert_eq!(encoded, vec![1, -2, 3, -4]);
    }

    #[test]
    fn test_target_preview_prefers_pins_then_majority() {
        let outline = vec![0, 0, 1, 1, 0, 0, 1, 1, 2, 2, 3, 3, 2, 2, 3, 3];
        let board = vec![4, 4, 2, 2, 4, 1, 2, 2, 3, 3, 1, 1, 3, 3, 1, 4];
        let preview = target_preview(&board, &outline, &fixed(&[(1, 1)]));
        // group 0 is pinned to 1; the rest pick their dominant unused color
        assert_eq!(preview[0], 1);
        assert_eq!(preview[2], 2);
        assert_eq!(preview[8], 3);
        assert_eq!(preview[10], 4);
    }
}
