// Rank banding: similarity 0-100 maps onto 1 (closest) .. 1000 (farthest).

/// Best possible rank (perfect match).
pub const BEST_RANK: u32 = 1;

/// Worst possible rank.
pub const WORST_RANK: u32 = 1000;

/// Label sent instead of a numeric rank when there was nothing to score.
pub const ZERO_RANK_LABEL: &str = "Very Low";

/// `floor((1 - similarity/100) * 1000) + 1`, kept within [1, 1000].
///
/// The formula alone yields 1001 only at zero similarity and below; the
/// clamp puts those on the worst rank. Non-finite input is treated as zero.
pub fn calculate_rank(similarity: f64) -> u32 {
    if !similarity.is_finite() {
        return WORST_RANK;
    }
    let raw = ((1.0 - similarity / 100.0) * 1000.0).floor() + 1.0;
    raw.clamp(BEST_RANK as f64, WORST_RANK as f64) as u32
}
