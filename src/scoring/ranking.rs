//! Ordering and lookup over computed score records.

use super::config::TieBreaker;
use super::types::ScoreRecord;
use std::cmp::Ordering;

/// Largest id a JavaScript object treats as an array index.
const MAX_INDEX_KEY: i64 = u32::MAX as i64 - 1;

/// Key order of an integer-keyed JavaScript object.
///
/// Ids in `0..=MAX_INDEX_KEY` come first in ascending order. Every other id
/// (negative or too large) compares equal, so a stable sort leaves those in
/// insertion order after the index keys.
fn js_key_order(a: i64, b: i64) -> Ordering {
    let index = |id: i64| (0..=MAX_INDEX_KEY).contains(&id);
    match (index(a), index(b)) {
        (true, true) => a.cmp(&b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Sorts records by descending score.
///
/// Equal scores are ordered by `tie_breaker`. The sort is stable, so with
/// [`TieBreaker::PreserveOrder`] ties keep the order they were passed in,
/// and [`TieBreaker::ById`] keeps negative or oversized ids in that order
/// after the ascending non-negative ones.
pub fn rank(records: &mut [ScoreRecord], tie_breaker: TieBreaker) {
    records.sort_by(|a, b| {
        let by_score = b.score.cmp(&a.score);
        if by_score != Ordering::Equal {
            return by_score;
        }
        match tie_breaker {
            TieBreaker::PreserveOrder => Ordering::Equal,
            TieBreaker::ById => js_key_order(a.id, b.id),
        }
    });
}

/// Returns the top `n` records of an already ranked slice.
///
/// Shorter slices are returned whole.
pub fn podium(ranked: &[ScoreRecord], n: usize) -> &[ScoreRecord] {
    &ranked[..n.min(ranked.len())]
}

/// Returns the 1-based position of vehicle `id` in a ranked slice.
pub fn position_of(ranked: &[ScoreRecord], id: i64) -> Option<usize> {
    ranked.iter().position(|r| r.id == id).map(|i| i + 1)
}
