//! Corpus file-path discovery, reading, and result/index writing.
//!
//! This is the only layer that touches the filesystem; `okapi-retrieve` and
//! `okapi-eval` take already-loaded strings and in-memory structures.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::CliError;

/// Confirm `root` exists and is a directory.
pub fn resolve_corpus_root(root: &Path) -> Result<PathBuf, CliError> {
    if !root.exists() {
        return Err(CliError::MissingPath(root.to_path_buf()));
    }
    Ok(root.to_path_buf())
}

/// `<root>/documents`.
pub fn documents_dir(root: &Path) -> PathBuf {
    root.join("documents")
}

/// `<root>/files/stopwords.txt`.
pub fn stopwords_path(root: &Path) -> PathBuf {
    root.join("files").join("stopwords.txt")
}

/// `<root>/files/qrels.txt`.
pub fn qrels_path(root: &Path) -> PathBuf {
    root.join("files").join("qrels.txt")
}

/// `<root>/files/queries.txt`.
pub fn queries_path(root: &Path) -> PathBuf {
    root.join("files").join("queries.txt")
}

/// `<root>/<id>-<size>.index`, where `<id>` is the corpus root's directory
/// name and `<size>` is the document count at index time.
pub fn index_path(root: &Path, num_docs: usize) -> PathBuf {
    root.join(format!("{}-{}.index", corpus_id(root), num_docs))
}

/// `<root>/<id>-<size>.results`, mirroring [`index_path`]'s naming.
pub fn results_path(root: &Path, num_docs: usize) -> PathBuf {
    root.join(format!("{}-{}.results", corpus_id(root), num_docs))
}

fn corpus_id(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "corpus".to_string())
}

/// Read a required file, mapping a missing file to [`CliError::MissingFile`]
/// and any other I/O failure to [`CliError::Io`].
pub fn read_required_file(path: &Path) -> Result<String, CliError> {
    if !path.exists() {
        return Err(CliError::MissingFile(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read every file directly under `<root>/documents`, returning `(doc_id,
/// content)` pairs sorted by file name for determinism. The file name (sans
/// extension) is the document id.
pub fn read_documents(root: &Path) -> Result<Vec<(String, String)>, CliError> {
    let dir = documents_dir(root);
    if !dir.exists() {
        return Err(CliError::MissingFile(dir));
    }
    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .map_err(|source| CliError::Io {
            path: dir.clone(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    entries.sort();

    let mut docs = Vec::with_capacity(entries.len());
    for path in entries {
        let doc_id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let content = fs::read_to_string(&path).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        docs.push((doc_id, content));
    }
    Ok(docs)
}

/// Find the single file directly under `root` with the given extension
/// (e.g. `"index"` or `"results"`), so later stages don't need to recompute
/// the exact `<id>-<size>` name an earlier stage chose.
pub fn find_file_with_extension(root: &Path, extension: &str) -> Result<PathBuf, CliError> {
    let mut matches: Vec<PathBuf> = fs::read_dir(root)
        .map_err(|source| CliError::Io {
            path: root.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(extension))
        .collect();
    matches.sort();
    matches
        .into_iter()
        .next()
        .ok_or_else(|| CliError::MissingFile(root.join(format!("*.{extension}"))))
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| CliError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Log a warning for each parse error collected from an `okapi_eval::trec`
/// parser, per the "skip and warn" malformed-line policy.
pub fn warn_on_parse_errors(source_path: &Path, errors: &[okapi_eval::EvalError]) {
    for error in errors {
        warn!(path = %source_path.display(), %error, "skipping malformed line");
    }
}
