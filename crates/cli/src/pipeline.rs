//! Shared wiring used by more than one binary: loading stopwords, building
//! the index from a corpus root, and the BM25/top-k config all three tools
//! accept as flags.

use std::collections::HashSet;
use std::path::Path;

use okapi_retrieve::{build_index, persistence, Bm25Params, InvertedIndex};
use tracing::info;

use crate::error::CliError;
use crate::io::{
    documents_dir, find_file_with_extension, index_path, read_required_file, read_documents,
    stopwords_path, write_file,
};

/// BM25 and truncation-width settings shared across the `indexer`/`query`/
/// `evaluator` binaries, exposed as CLI flags rather than hardcoded so the
/// same binaries serve either corpus without a recompile.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub k1: f64,
    pub b: f64,
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        let params = Bm25Params::default();
        Self {
            k1: params.k1,
            b: params.b,
            top_k: okapi_retrieve::DEFAULT_TOP_K,
        }
    }
}

impl Config {
    pub fn bm25_params(&self) -> Bm25Params {
        Bm25Params {
            k1: self.k1,
            b: self.b,
        }
    }
}

/// Load `<root>/files/stopwords.txt`.
pub fn load_stopwords(root: &Path) -> Result<HashSet<String>, CliError> {
    let text = read_required_file(&stopwords_path(root))?;
    Ok(okapi_retrieve::parse_stopwords(&text))
}

/// Read every document under `<root>/documents`, normalize it, and build the
/// BM25 inverted index. Document ids are the corpus file names.
pub fn build_corpus_index(
    root: &Path,
    config: &Config,
) -> Result<(InvertedIndex<String>, usize), CliError> {
    if !documents_dir(root).exists() {
        return Err(CliError::MissingFile(documents_dir(root)));
    }
    let stopwords = load_stopwords(root)?;
    let raw_docs = read_documents(root)?;
    info!(count = raw_docs.len(), "loaded documents");

    let mut cache = okapi_stem::StemmerCache::new();
    let processed: Vec<(String, Vec<String>)> = raw_docs
        .into_iter()
        .map(|(doc_id, content)| {
            let terms = okapi_retrieve::normalize(&content, &stopwords, &mut cache);
            (doc_id, terms)
        })
        .collect();
    let num_docs = processed.len();

    let index = build_index(&processed, &config.bm25_params())?;
    info!(
        num_docs,
        num_terms = index.num_terms(),
        avg_doc_len = index.avg_doc_len(),
        "built index"
    );
    Ok((index, num_docs))
}

/// Serialize `index` and write it to `<root>/<id>-<num_docs>.index`,
/// returning the path written.
pub fn save_index(
    root: &Path,
    index: &InvertedIndex<String>,
    num_docs: usize,
) -> Result<std::path::PathBuf, CliError> {
    let path = index_path(root, num_docs);
    let json = persistence::to_json_pretty(index)?;
    write_file(&path, &json)?;
    Ok(path)
}

/// Find and load the corpus's index file.
pub fn load_index(root: &Path) -> Result<InvertedIndex<String>, CliError> {
    let path = find_file_with_extension(root, "index")?;
    let text = read_required_file(&path)?;
    Ok(persistence::from_json(&text)?)
}
