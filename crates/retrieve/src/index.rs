//! Inverted index construction with Okapi BM25 term weights.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::RetrieveError;

/// Okapi BM25 parameters.
///
/// Defaults to `k1 = 1.0`, `b = 0.75`, the values the converged reference
/// indexer used, kept here for score fidelity against its test vectors.
/// [`Bm25Params::ecosystem_default`] exposes the more commonly cited
/// `k1 = 1.2` for callers who aren't chasing that fidelity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    /// Term-frequency saturation parameter.
    pub k1: f64,
    /// Length-normalization parameter, in `[0, 1]`.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.0, b: 0.75 }
    }
}

impl Bm25Params {
    /// `k1 = 1.2`, `b = 0.75`, the parameters most BM25 writeups cite as default.
    pub fn ecosystem_default() -> Self {
        Self { k1: 1.2, b: 0.75 }
    }

    /// Reject out-of-range parameters before they silently distort scores:
    /// `k1` must be non-negative and `b` must fall in `[0, 1]`.
    pub fn validate(&self) -> Result<(), RetrieveError> {
        if self.k1 < 0.0 {
            return Err(RetrieveError::InvalidParameter(format!(
                "k1 must be >= 0.0, got {}",
                self.k1
            )));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(RetrieveError::InvalidParameter(format!(
                "b must be in [0, 1], got {}",
                self.b
            )));
        }
        Ok(())
    }
}

/// A term's document frequency stats and weighted posting list.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TermEntry<D> {
    idf: f64,
    /// `(doc, weight)` pairs, descending by weight.
    postings: Vec<(D, f64)>,
}

/// Term -> (idf, posting list), plus the corpus statistics needed to
/// reproduce BM25 scores without rebuilding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvertedIndex<D> {
    terms: HashMap<String, TermEntry<D>>,
    num_docs: usize,
    avg_doc_len: f64,
}

impl<D: Eq + Hash + Clone + Ord> InvertedIndex<D> {
    /// Number of documents the index was built over.
    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    /// Average document length across the corpus (0.0 for an empty corpus).
    pub fn avg_doc_len(&self) -> f64 {
        self.avg_doc_len
    }

    /// Number of distinct terms in the index.
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// The idf of `term`, if it appears in the index.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.terms.get(term).map(|entry| entry.idf)
    }

    /// The posting list of `term` (doc, weight pairs, descending by weight).
    pub fn postings(&self, term: &str) -> Option<&[(D, f64)]> {
        self.terms.get(term).map(|entry| entry.postings.as_slice())
    }

    /// Whether `doc` appears in `term`'s posting list.
    pub fn contains(&self, term: &str, doc: &D) -> bool {
        self.terms
            .get(term)
            .is_some_and(|entry| entry.postings.iter().any(|(d, _)| d == doc))
    }
}

/// Build an inverted index with BM25 term weights from already-tokenized documents.
///
/// `docs` pairs each document id with its processed term sequence (as
/// produced by [`crate::tokenize::normalize`]); multiplicity matters, since
/// term frequency is the raw per-document count.
///
/// An empty corpus (`docs` empty) produces an empty index with `avg_doc_len
/// == 0.0` rather than dividing by zero.
///
/// Returns [`RetrieveError::InvalidParameter`] if `params` fails
/// [`Bm25Params::validate`]; an out-of-range `k1`/`b` would otherwise silently
/// distort every score instead of being rejected up front.
pub fn build_index<D: Eq + Hash + Clone + Ord>(
    docs: &[(D, Vec<String>)],
    params: &Bm25Params,
) -> Result<InvertedIndex<D>, RetrieveError> {
    params.validate()?;
    let num_docs = docs.len();

    let doc_lens: HashMap<&D, usize> = docs.iter().map(|(id, terms)| (id, terms.len())).collect();
    let avg_doc_len = if num_docs == 0 {
        0.0
    } else {
        doc_lens.values().sum::<usize>() as f64 / num_docs as f64
    };

    // term -> doc -> raw term frequency in that doc.
    let mut term_freqs: HashMap<&str, HashMap<&D, usize>> = HashMap::new();
    for (id, terms) in docs {
        for term in terms {
            *term_freqs
                .entry(term.as_str())
                .or_default()
                .entry(id)
                .or_insert(0) += 1;
        }
    }

    let mut terms = HashMap::with_capacity(term_freqs.len());
    for (term, freqs) in term_freqs {
        let df = freqs.len();
        let idf = idf(num_docs, df);

        let mut postings: Vec<(D, f64)> = freqs
            .into_iter()
            .map(|(doc, tf)| {
                let doc_len = *doc_lens.get(doc).unwrap_or(&0) as f64;
                let weight = idf * bm25_tf_weight(tf as f64, doc_len, avg_doc_len, params);
                (doc.clone(), weight)
            })
            .collect();
        postings.sort_by(|(doc_a, w_a), (doc_b, w_b)| {
            w_b.partial_cmp(w_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| doc_a.cmp(doc_b))
        });

        terms.insert(term.to_string(), TermEntry { idf, postings });
    }

    Ok(InvertedIndex {
        terms,
        num_docs,
        avg_doc_len,
    })
}

/// Okapi BM25 IDF with the `+1` shift that guarantees positivity even when a
/// term appears in every document.
fn idf(num_docs: usize, doc_freq: usize) -> f64 {
    let n = num_docs as f64;
    let df = doc_freq as f64;
    (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
}

/// The tf-saturation and length-normalization factor of the BM25 weight,
/// excluding idf (callers multiply idf in separately).
fn bm25_tf_weight(tf: f64, doc_len: f64, avg_doc_len: f64, params: &Bm25Params) -> f64 {
    let length_norm = if avg_doc_len == 0.0 {
        1.0 - params.b
    } else {
        1.0 - params.b + params.b * (doc_len / avg_doc_len)
    };
    (tf * (params.k1 + 1.0)) / (tf + params.k1 * length_norm)
}
