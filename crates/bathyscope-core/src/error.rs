//! Error types for bathyscope.

use thiserror::Error;

use crate::dataset::DatasetKind;

/// The main error type for bathyscope operations.
#[derive(Error, Debug)]
pub enum BathyscopeError {
    /// A text source could not be read.
    #[error("source '{path}' unavailable: {reason}")]
    SourceUnavailable { path: String, reason: String },

    /// A text source was readable but held no text.
    #[error("source '{0}' returned no text")]
    EmptySource(String),

    /// Parsing finished without a single usable record.
    #[error("{kind} dataset has no valid records ({rejected} rejected)")]
    EmptyDataset { kind: DatasetKind, rejected: usize },

    /// An operation needed a dataset that has not been loaded.
    #[error("no {0} dataset loaded")]
    NotLoaded(DatasetKind),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for bathyscope operations.
pub type Result<T> = std::result::Result<T, BathyscopeError>;
