//! Index (de)serialization.
//!
//! The on-disk schema mirrors the in-memory [`InvertedIndex`] field-for-field
//! via `serde`, so the round trip is a plain derive rather than a hand-rolled
//! codec. Exact byte layout is not a compatibility surface; only the
//! `build -> write -> read -> query` round trip needs to hold.

use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RetrieveError;
use crate::index::InvertedIndex;

/// Serialize `index` to a JSON string.
pub fn to_json<D>(index: &InvertedIndex<D>) -> Result<String, RetrieveError>
where
    D: Serialize,
{
    Ok(serde_json::to_string(index)?)
}

/// Serialize `index` to pretty-printed JSON, for human-inspectable index files.
pub fn to_json_pretty<D>(index: &InvertedIndex<D>) -> Result<String, RetrieveError>
where
    D: Serialize,
{
    Ok(serde_json::to_string_pretty(index)?)
}

/// Deserialize an index previously produced by [`to_json`] or [`to_json_pretty`].
pub fn from_json<D>(text: &str) -> Result<InvertedIndex<D>, RetrieveError>
where
    D: Eq + Hash + Clone + Ord + DeserializeOwned,
{
    Ok(serde_json::from_str(text)?)
}
