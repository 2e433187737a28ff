//! Graded-relevance metrics: NDCG@k and BPREF.

use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::Hash;

/// Discounted cumulative gain over the first `k` entries of `gains`.
///
/// Position 1 is undiscounted; position `i >= 2` is discounted by
/// `log2(i+1)`. This is the source's convention, not the textbook
/// `log2(i+1)`-for-every-position form (which would also discount position 1).
fn dcg_at_k(gains: &[f64], k: usize) -> f64 {
    let truncated = &gains[..gains.len().min(k)];
    let mut iter = truncated.iter();
    let Some(first) = iter.next() else {
        return 0.0;
    };
    let mut dcg = *first;
    for (i, gain) in iter.enumerate() {
        let rank = i + 2; // second element onward starts at rank 2
        dcg += gain / (rank as f64 + 1.0).log2();
    }
    dcg
}

/// NDCG@k for a single query.
///
/// `retrieved` is re-sorted by score descending (the caller's order is not
/// trusted); `grades` maps a document to its relevance grade, with documents
/// absent from `grades` treated as grade 0. The ideal ranking is built from
/// every grade in `grades`, sorted descending, independent of what was
/// actually retrieved.
pub fn ndcg_at_k<D: Eq + Hash + Clone>(
    retrieved: &[(D, f64)],
    grades: &HashMap<D, i32>,
    k: usize,
) -> f64 {
    let mut sorted: Vec<&(D, f64)> = retrieved.iter().collect();
    sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let gains: Vec<f64> = sorted
        .iter()
        .map(|(doc, _)| *grades.get(doc).unwrap_or(&0) as f64)
        .collect();
    let dcg = dcg_at_k(&gains, k);

    let mut ideal_gains: Vec<f64> = grades.values().map(|g| *g as f64).collect();
    ideal_gains.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let idcg = dcg_at_k(&ideal_gains, k);

    if idcg == 0.0 {
        0.0
    } else {
        dcg / idcg
    }
}

/// BPREF for a single query.
///
/// `retrieved` is the ranked document list (best first); `relevant` is the
/// judged-relevant set; `judged_non_relevant` is the judged-non-relevant set.
/// Queries with an empty relevant set should be excluded from the average by
/// the caller (this function returns 0 for them, matching "excluded" only
/// once averaged, not as a sentinel).
pub fn bpref<D: Eq + Hash>(
    retrieved: &[D],
    relevant: &HashSet<D>,
    judged_non_relevant: &HashSet<D>,
) -> f64 {
    let r = relevant.len();
    if r == 0 {
        return 0.0;
    }
    let n_jn = judged_non_relevant.len();

    let mut non_rel_seen = 0usize;
    let mut sum = 0.0;
    for doc in retrieved {
        if judged_non_relevant.contains(doc) {
            non_rel_seen += 1;
        } else if relevant.contains(doc) {
            let b_r = if n_jn == 0 {
                0.0
            } else {
                non_rel_seen as f64 / n_jn as f64
            };
            sum += b_r;
        }
    }
    sum / r as f64
}
