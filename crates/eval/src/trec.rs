//! Parsers for the trec_eval-style record formats: qrels, results, and queries.
//!
//! These functions take already-read file content and return parsed records;
//! they never touch the filesystem themselves (that's `okapi-cli`'s job).
//! Malformed lines are reported individually so the caller can choose to warn
//! and skip rather than abort the whole file.

use std::collections::HashMap;

use crate::error::EvalError;

/// One qrels record: `<query_id> <iteration> <doc_id> <relevance>`. The
/// iteration field is parsed but ignored, per the documented format.
#[derive(Debug, Clone, PartialEq)]
pub struct QrelsRecord {
    pub query_id: String,
    pub doc_id: String,
    pub relevance: i32,
}

/// One results record, automatic mode: `<query_id> <doc_id> <rank> <score>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsRecord {
    pub query_id: String,
    pub doc_id: String,
    pub rank: usize,
    pub score: f64,
}

/// One queries record: `<query_id> <query_text...>`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecord {
    pub query_id: String,
    pub text: String,
}

/// Parse qrels content into well-formed records, skipping lines that don't
/// match the format and reporting each as an [`EvalError::MalformedLine`].
pub fn parse_qrels(text: &str) -> (Vec<QrelsRecord>, Vec<EvalError>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        let parsed = (|| {
            if fields.len() != 4 {
                return None;
            }
            let relevance: i32 = fields[3].parse().ok()?;
            Some(QrelsRecord {
                query_id: fields[0].to_string(),
                doc_id: fields[2].to_string(),
                relevance,
            })
        })();
        match parsed {
            Some(record) => records.push(record),
            None => errors.push(EvalError::MalformedLine {
                line_no: idx + 1,
                text: line.to_string(),
            }),
        }
    }
    (records, errors)
}

/// Parse automatic-mode results content: `<query_id> <doc_id> <rank> <score>`.
pub fn parse_results(text: &str) -> (Vec<ResultsRecord>, Vec<EvalError>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        let parsed = (|| {
            if fields.len() != 4 {
                return None;
            }
            let rank: usize = fields[2].parse().ok()?;
            let score: f64 = fields[3].parse().ok()?;
            Some(ResultsRecord {
                query_id: fields[0].to_string(),
                doc_id: fields[1].to_string(),
                rank,
                score,
            })
        })();
        match parsed {
            Some(record) => records.push(record),
            None => errors.push(EvalError::MalformedLine {
                line_no: idx + 1,
                text: line.to_string(),
            }),
        }
    }
    (records, errors)
}

/// Parse queries content: `<query_id> <query_text...>`, one query per line.
pub fn parse_queries(text: &str) -> (Vec<QueryRecord>, Vec<EvalError>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.split_once(char::is_whitespace) {
            Some((query_id, rest)) => records.push(QueryRecord {
                query_id: query_id.to_string(),
                text: rest.trim_start().to_string(),
            }),
            None => errors.push(EvalError::MalformedLine {
                line_no: idx + 1,
                text: line.to_string(),
            }),
        }
    }
    (records, errors)
}

/// Group flat qrels records into the nested `query -> doc -> grade` shape
/// used by the evaluator, keeping every record (including grade 0).
pub fn group_qrels_raw(records: &[QrelsRecord]) -> HashMap<String, HashMap<String, i32>> {
    let mut by_query: HashMap<String, HashMap<String, i32>> = HashMap::new();
    for record in records {
        by_query
            .entry(record.query_id.clone())
            .or_default()
            .insert(record.doc_id.clone(), record.relevance);
    }
    by_query
}

/// Group flat results records into `query -> [(doc_id, score)]`, sorted by
/// rank ascending (the file's own rank field, not a re-derivation).
pub fn group_results_by_rank(records: &[ResultsRecord]) -> HashMap<String, Vec<(String, f64)>> {
    let mut by_query: HashMap<String, Vec<(String, usize, f64)>> = HashMap::new();
    for record in records {
        by_query.entry(record.query_id.clone()).or_default().push((
            record.doc_id.clone(),
            record.rank,
            record.score,
        ));
    }
    by_query
        .into_iter()
        .map(|(query_id, mut rows)| {
            rows.sort_by_key(|(_, rank, _)| *rank);
            let pairs = rows.into_iter().map(|(doc, _, score)| (doc, score)).collect();
            (query_id, pairs)
        })
        .collect()
}
