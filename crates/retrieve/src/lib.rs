//! Tokenizer, inverted index, and Okapi BM25 query engine over a static corpus.

pub mod error;
pub mod index;
pub mod persistence;
pub mod query;
pub mod tokenize;

pub use error::RetrieveError;
pub use index::{build_index, Bm25Params, InvertedIndex};
pub use query::{query, DEFAULT_TOP_K};
pub use tokenize::{normalize, parse_stopwords, Term};

/// Commonly used items, re-exported for a single-line `use`.
pub mod prelude {
    pub use crate::error::RetrieveError;
    pub use crate::index::{build_index, Bm25Params, InvertedIndex};
    pub use crate::persistence::{from_json, to_json, to_json_pretty};
    pub use crate::query::{query, DEFAULT_TOP_K};
    pub use crate::tokenize::{normalize, parse_stopwords, Term};
    pub use okapi_stem::StemmerCache;
}
