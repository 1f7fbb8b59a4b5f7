use crate::matching::models::MatchResult;

/// Drops results with a zero score and no matched keywords, sorts by score
/// descending and keeps the first `top_n`. Ties keep harvest order.
pub fn rank_results(results: Vec<MatchResult>, top_n: usize) -> Vec<MatchResult> {
    let mut ranked: Vec<MatchResult> = results
        .into_iter()
        .filter(|r| r.match_score > 0.0 || !r.matched_keywords.is_empty())
        .collect();

    ranked.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    ranked.truncate(top_n);
    ranked
}
