//! Per-segment subsequence scoring.
//!
//! Greedy left-to-right matching with one refinement: each query character
//! takes the cheapest position in the remaining segment, not the first one,
//! so "fb" lands on the `b` of `foo_bar` instead of paying for a mid-word
//! gap earlier. Ties go to the leftmost position to keep results stable.

use crate::config::ScoringWeights;

/// Outcome of matching a query slice against one segment. `consumed` is
/// how many query characters found a home; matching never fails, it just
/// stops consuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentMatch {
    pub weight: usize,
    pub consumed: usize,
}

/// True when `name[pos]` starts a word: segment start, right after a
/// non-alphanumeric character, or a lower-to-upper camelCase transition.
pub fn is_word_boundary(name: &[char], pos: usize) -> bool {
    if pos == 0 {
        return true;
    }
    let prev = name[pos - 1];
    if !prev.is_alphanumeric() {
        return true;
    }
    prev.is_lowercase() && name[pos].is_uppercase()
}

/// Match `query` against `name[start..]`, consuming the longest query
/// prefix that fits in order. When `indices` is given, the chosen position
/// (relative to the whole segment) is pushed for every consumed character.
pub fn match_segment(
    name: &[char],
    query: &[char],
    start: usize,
    weights: &ScoringWeights,
    mut indices: Option<&mut Vec<usize>>,
) -> SegmentMatch {
    let mut weight = 0;
    let mut consumed = 0;
    // Position right after the previously matched character.
    let mut next = start;

    while consumed < query.len() {
        let wanted = query[consumed];
        let mut best: Option<(usize, usize)> = None;

        for pos in next..name.len() {
            let candidate = name[pos];
            let exact = candidate == wanted;
            if !exact && !candidate.eq_ignore_ascii_case(&wanted) {
                continue;
            }
            let skipped = pos - next;
            let mut cost = if skipped == 0 {
                0
            } else if is_word_boundary(name, pos) {
                weights.boundary_gap_cost
            } else {
                weights.gap_cost * skipped
            };
            if !exact {
                cost += weights.case_penalty;
            }
            if best.is_none_or(|(best_cost, _)| cost < best_cost) {
                best = Some((cost, pos));
            }
            if cost == 0 {
                // A contiguous exact hit cannot be beaten.
                break;
            }
        }

        let Some((cost, pos)) = best else {
            break;
        };
        weight += cost;
        if let Some(out) = indices.as_mut() {
            out.push(pos);
        }
        next = pos + 1;
        consumed += 1;
    }

    SegmentMatch { weight, consumed }
}
