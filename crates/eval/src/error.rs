//! Error types for okapi-eval.

use thiserror::Error;

/// Errors raised while parsing qrels/results/queries records.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A line did not match the documented whitespace-separated field layout.
    #[error("malformed line {line_no}: {text:?}")]
    MalformedLine { line_no: usize, text: String },
}
