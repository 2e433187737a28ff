//! Error types for the CLI layer (file discovery, argv, I/O).

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors the CLI binaries exit 1 on, with a user-facing message
/// naming the offending path (printed to stdout, matching the source's
/// error-reporting convention).
#[derive(Debug, Error)]
pub enum CliError {
    /// The supplied corpus root does not exist.
    #[error("corpus root not found: {0}")]
    MissingPath(PathBuf),

    /// An expected file under the corpus root is absent.
    #[error("expected file not found: {0}")]
    MissingFile(PathBuf),

    /// argv did not match the documented invocation form.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// An I/O error while reading or writing a corpus file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The index file failed to (de)serialize.
    #[error(transparent)]
    Retrieve(#[from] okapi_retrieve::RetrieveError),
}
