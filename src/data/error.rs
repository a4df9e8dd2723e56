//! Error types for the table layer.

use std::path::PathBuf;

/// Load-time faults. These abort startup (or a reload) with context; they
/// never occur at request time because requests only read an already
/// published snapshot.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("table '{table}' is missing required column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("configuration error: {0}")]
    Configuration(String),
}
