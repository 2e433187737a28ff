//! The qrels dual view and the evaluator's aggregate output.

use std::collections::{HashMap, HashSet};

/// Relevance judgments for one query, with both the views different metrics need:
/// a *gated* view (grade-0 entries dropped, used by Precision/Recall/R-Precision/
/// P@k/MAP) and a *raw* view (grade 0 kept, used by NDCG's gains and BPREF's
/// judged-non-relevant set).
///
/// A strictly literal "drop every zero on load" rule would make BPREF's
/// judged-non-relevant set permanently empty. Keeping both views resolves that
/// tension without picking a single rule that breaks one metric to satisfy another.
#[derive(Debug, Clone, Default)]
pub struct QueryQrels {
    raw: HashMap<String, i32>,
}

impl QueryQrels {
    /// Build from a raw `doc_id -> grade` map, grade 0 included.
    pub fn from_raw(raw: HashMap<String, i32>) -> Self {
        Self { raw }
    }

    /// Relevant documents: grade > 0.
    pub fn relevant(&self) -> HashSet<String> {
        self.raw
            .iter()
            .filter(|(_, grade)| **grade > 0)
            .map(|(doc, _)| doc.clone())
            .collect()
    }

    /// Judged-non-relevant documents: grade <= 0 but present in the judgments.
    pub fn judged_non_relevant(&self) -> HashSet<String> {
        self.raw
            .iter()
            .filter(|(_, grade)| **grade <= 0)
            .map(|(doc, _)| doc.clone())
            .collect()
    }

    /// Graded relevance for every judged document (grade 0 included), as
    /// NDCG needs for both the actual and ideal gain vectors.
    pub fn grades(&self) -> &HashMap<String, i32> {
        &self.raw
    }
}

/// Full qrels for every query.
#[derive(Debug, Clone, Default)]
pub struct Qrels {
    by_query: HashMap<String, QueryQrels>,
}

impl Qrels {
    /// Build from flat `query -> doc -> grade` judgments (grade 0 included).
    pub fn from_raw(by_query: HashMap<String, HashMap<String, i32>>) -> Self {
        Self {
            by_query: by_query
                .into_iter()
                .map(|(query_id, grades)| (query_id, QueryQrels::from_raw(grades)))
                .collect(),
        }
    }

    /// Judgments for `query_id`, if any were loaded.
    pub fn get(&self, query_id: &str) -> Option<&QueryQrels> {
        self.by_query.get(query_id)
    }

    /// Every query id with at least one judgment.
    pub fn query_ids(&self) -> impl Iterator<Item = &String> {
        self.by_query.keys()
    }
}

/// Full-precision average metrics across all evaluated queries.
///
/// Rounding to 3 decimals for display is a presentation concern of the CLI's
/// table printer, not of this type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metrics {
    pub precision: f64,
    pub recall: f64,
    pub r_precision: f64,
    pub p_at_k: f64,
    pub map: f64,
    pub ndcg_at_k: f64,
    pub bpref: f64,
}
