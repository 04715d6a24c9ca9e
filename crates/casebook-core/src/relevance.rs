//! Query-coverage relevance scoring shared by the memory stores.
//!
//! The score is `|query ∩ candidate| / max(|query|, 1)`: how much of the
//! query a candidate covers. Candidates carrying extra unrelated topics are
//! not penalized, so this is intentionally asymmetric and NOT a Jaccard
//! similarity. Callers supply their own match threshold.

use std::cmp::Ordering;

use serde::Serialize;

use casebook_types::memory::TopicSet;

/// A candidate together with its coverage score.
#[derive(Debug, Clone, Serialize)]
pub struct Scored<T> {
    pub item: T,
    pub score: f32,
}

/// Fraction of `query` topics present in `candidate`, in [0, 1].
///
/// An empty query scores 0 against every candidate.
pub fn coverage_score(query: &TopicSet, candidate: &TopicSet) -> f32 {
    if query.is_empty() {
        return 0.0;
    }
    let overlap = query.intersection(candidate).count();
    overlap as f32 / query.len() as f32
}

/// Score every candidate against `query` and keep those strictly above
/// `threshold`, sorted by descending score.
///
/// Ties keep their original relative order. An empty query returns no
/// matches immediately, without considering any candidate.
pub fn rank_matches<T>(
    query: &TopicSet,
    candidates: impl IntoIterator<Item = (T, TopicSet)>,
    threshold: f32,
) -> Vec<Scored<T>> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<Scored<T>> = candidates
        .into_iter()
        .filter_map(|(item, topics)| {
            let score = coverage_score(query, &topics);
            (score > threshold).then_some(Scored { item, score })
        })
        .collect();

    // Stable sort: equal scores keep candidate order.
    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    matches
}
