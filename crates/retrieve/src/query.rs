//! Query processing: normalize a query, score against the index, truncate.

use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::Hash;

use okapi_stem::StemmerCache;

use crate::index::InvertedIndex;
use crate::tokenize::normalize;

/// Default truncation width, shared by the query engine and the evaluator's
/// P@15/NDCG@15 so there is a single constant for "top 15" rather than two.
pub const DEFAULT_TOP_K: usize = 15;

/// Run `query_text` against `index`, returning the top `top_k` documents
/// ranked by accumulated BM25 score, descending.
///
/// Query terms are normalized with the same tokenizer used at index time.
/// Repeated terms accumulate their posting weight once per occurrence (the
/// query-term-frequency effect); terms absent from the index are silently
/// skipped. Ties break on ascending `DocId`, a documented, deterministic
/// rule rather than incidental hash-map order.
pub fn query<D: Eq + Hash + Clone + Ord>(
    index: &InvertedIndex<D>,
    query_text: &str,
    stopwords: &HashSet<String>,
    cache: &mut StemmerCache,
    top_k: usize,
) -> Vec<(D, f64)> {
    let terms = normalize(query_text, stopwords, cache);

    let mut acc: HashMap<D, f64> = HashMap::new();
    for term in &terms {
        let Some(postings) = index.postings(term) else {
            continue;
        };
        for (doc, weight) in postings {
            *acc.entry(doc.clone()).or_insert(0.0) += weight;
        }
    }

    let mut ranked: Vec<(D, f64)> = acc.into_iter().collect();
    ranked.sort_by(|(doc_a, score_a), (doc_b, score_b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| doc_a.cmp(doc_b))
    });
    ranked.truncate(top_k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{build_index, Bm25Params};

    fn tiny_docs() -> Vec<(u32, Vec<String>)> {
        vec![
            (1, vec!["cat".into(), "dog".into(), "cat".into()]),
            (2, vec!["dog".into()]),
            (3, vec!["cat".into()]),
        ]
    }

    #[test]
    fn s3_single_term_query() {
        let index = build_index(&tiny_docs(), &Bm25Params::default()).unwrap();
        let stopwords = HashSet::new();
        let mut cache = StemmerCache::new();
        let results = query(&index, "cat", &stopwords, &mut cache, DEFAULT_TOP_K);

        let ids: Vec<u32> = results.iter().map(|(d, _)| *d).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(results[0].1 > results[1].1);
        assert!(results[1].1 > 0.0);
    }

    #[test]
    fn s4_multi_term_query() {
        let params = Bm25Params::default();
        let index = build_index(&tiny_docs(), &params).unwrap();
        let stopwords = HashSet::new();
        let mut cache = StemmerCache::new();
        let results = query(&index, "cat dog", &stopwords, &mut cache, DEFAULT_TOP_K);

        assert_eq!(results[0].0, 1);

        let idf = (1.6f64).ln();
        let avgdl = 5.0 / 3.0;
        let w = |tf: f64, doc_len: f64| {
            idf * (tf * (params.k1 + 1.0)) / (tf + params.k1 * (1.0 - params.b + params.b * doc_len / avgdl))
        };
        let expected_d1 = w(2.0, 3.0) + w(1.0, 3.0);
        let expected_d2 = w(1.0, 1.0);
        let expected_d3 = w(1.0, 1.0);

        let by_id: HashMap<u32, f64> = results.into_iter().collect();
        assert!((by_id[&1] - expected_d1).abs() < 1e-9);
        assert!((by_id[&2] - expected_d2).abs() < 1e-9);
        assert!((by_id[&3] - expected_d3).abs() < 1e-9);
    }

    #[test]
    fn missing_terms_are_skipped_without_error() {
        let index = build_index(&tiny_docs(), &Bm25Params::default()).unwrap();
        let stopwords = HashSet::new();
        let mut cache = StemmerCache::new();
        let results = query(&index, "bird", &stopwords, &mut cache, DEFAULT_TOP_K);
        assert!(results.is_empty());
    }

    #[test]
    fn truncates_to_top_k() {
        let docs: Vec<(u32, Vec<String>)> = (0..30).map(|i| (i, vec!["word".into()])).collect();
        let index = build_index(&docs, &Bm25Params::default()).unwrap();
        let stopwords = HashSet::new();
        let mut cache = StemmerCache::new();
        let results = query(&index, "word", &stopwords, &mut cache, DEFAULT_TOP_K);
        assert_eq!(results.len(), DEFAULT_TOP_K);
    }

    #[test]
    fn monotonic_ranking_property() {
        // d1 contains the query term, d2 does not: d1 must rank above d2.
        let docs = vec![(1u32, vec!["cat".into()]), (2u32, vec!["dog".into()])];
        let index = build_index(&docs, &Bm25Params::default()).unwrap();
        let stopwords = HashSet::new();
        let mut cache = StemmerCache::new();
        let results = query(&index, "cat", &stopwords, &mut cache, DEFAULT_TOP_K);
        assert_eq!(results[0].0, 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn length_penalty_property() {
        // Same term multiset, different lengths: the shorter document scores
        // at least as high for any single shared term.
        let docs = vec![
            (1u32, vec!["cat".into(), "dog".into()]),
            (2u32, vec!["cat".into(), "dog".into(), "bird".into(), "fish".into()]),
        ];
        let index = build_index(&docs, &Bm25Params::default()).unwrap();
        let stopwords = HashSet::new();
        let mut cache = StemmerCache::new();
        let results = query(&index, "cat", &stopwords, &mut cache, DEFAULT_TOP_K);
        let by_id: HashMap<u32, f64> = results.into_iter().collect();
        assert!(by_id[&1] >= by_id[&2]);
    }
}
