//! Classical IR metrics evaluator.
//!
//! Combines the binary and graded metric kernels over a full results/qrels
//! pair into the aggregate [`Metrics`] a run reports.

pub mod binary;
pub mod error;
pub mod graded;
pub mod trec;
pub mod types;

pub use error::EvalError;
pub use types::{Metrics, Qrels, QueryQrels};

use std::collections::HashMap;

/// Evaluate every query present in `results` against `qrels`.
///
/// `results` maps query id to its ranked `(doc_id, score)` list, already
/// truncated to the reporting width (`k`); denominators for Precision,
/// Recall, R-Precision, P@k, MAP, and NDCG are the number of queries in
/// `results`. BPREF additionally excludes queries with an empty relevant set
/// from its own average, per the source's convention.
pub fn evaluate(results: &HashMap<String, Vec<(String, f64)>>, qrels: &Qrels, k: usize) -> Metrics {
    let mut sums = Metrics::default();
    let mut n = 0usize;
    let mut bpref_sum = 0.0;
    let mut bpref_n = 0usize;

    for (query_id, retrieved) in results {
        let retrieved_docs: Vec<String> = retrieved.iter().map(|(doc, _)| doc.clone()).collect();
        let empty = QueryQrels::default();
        let query_qrels = qrels.get(query_id).unwrap_or(&empty);
        let relevant = query_qrels.relevant();

        sums.precision += binary::precision(&retrieved_docs, &relevant);
        sums.recall += binary::recall(&retrieved_docs, &relevant);
        sums.r_precision += binary::r_precision(&retrieved_docs, &relevant);
        sums.p_at_k += binary::p_at_k(&retrieved_docs, &relevant, k);
        sums.map += binary::average_precision(&retrieved_docs, &relevant);
        sums.ndcg_at_k += graded::ndcg_at_k(retrieved, query_qrels.grades(), k);
        n += 1;

        if !relevant.is_empty() {
            let judged_non_relevant = query_qrels.judged_non_relevant();
            bpref_sum += graded::bpref(&retrieved_docs, &relevant, &judged_non_relevant);
            bpref_n += 1;
        }
    }

    if n == 0 {
        return Metrics::default();
    }

    Metrics {
        precision: sums.precision / n as f64,
        recall: sums.recall / n as f64,
        r_precision: sums.r_precision / n as f64,
        p_at_k: sums.p_at_k / n as f64,
        map: sums.map / n as f64,
        ndcg_at_k: sums.ndcg_at_k / n as f64,
        bpref: if bpref_n == 0 {
            0.0
        } else {
            bpref_sum / bpref_n as f64
        },
    }
}
