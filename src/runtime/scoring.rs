//! Review weighting and score ranking.

/// Weight a raw review score by reviewer reputation.
///
/// Returns `None` on overflow.
pub fn weighted_score(score: u64, reputation: u64, offset: u64) -> Option<u64> {
    reputation.checked_add(offset)?.checked_mul(score)
}

/// Percentage of `scores` that are less than or equal to `score`.
///
/// Returns `None` for an empty population.
pub fn percentile(score: u64, scores: impl IntoIterator<Item = u64>) -> Option<f64> {
    let (total, at_or_below) = scores
        .into_iter()
        .fold((0usize, 0usize), |(total, below), s| {
            (total + 1, below + usize::from(s <= score))
        });

    if total == 0 {
        return None;
    }
    Some(at_or_below as f64 / total as f64 * 100.0)
}
