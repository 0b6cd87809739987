//! Error types for glint

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for glint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Loading and parsing errors
///
/// Lookup misses are not errors: repository queries return empty values
/// that callers must check with `is_valid()`. These errors surface from
/// file loading, where the repository logs and skips the offending entry.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed grammar file {}: {message}", path.display())]
    Grammar { path: PathBuf, message: String },

    #[error("malformed theme file {}: {message}", path.display())]
    Theme { path: PathBuf, message: String },

    #[error("malformed index file {}: {message}", path.display())]
    Index { path: PathBuf, message: String },
}
