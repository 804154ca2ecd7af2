use std::cmp::Ordering;

use crate::models::ScoreResult;

/// Total order used for every ranked list: score descending, then id ascending
#[inline]
pub fn rank_order(a_score: f64, a_id: &str, b_score: f64, b_id: &str) -> Ordering {
    b_score.total_cmp(&a_score).then_with(|| a_id.cmp(b_id))
}

/// Order scored candidates and keep the top `limit`
///
/// There is no score floor: a zero-scoring candidate still appears when
/// fewer than `limit` candidates exist.
pub fn rank(mut scored: Vec<ScoreResult>, limit: usize) -> Vec<ScoreResult> {
    scored.sort_by(|a, b| rank_order(a.total, &a.candidate_id, b.total, &b.candidate_id));
    scored.truncate(limit);
    scored
}
