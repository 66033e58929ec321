//! Import error types

use std::path::PathBuf;
use tasas_common::ValidationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Error, Debug)]
pub enum ImportError {
    /// Input file missing or unreadable (fatal)
    #[error("Input file '{path}' not found: {source}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not valid JSON (fatal)
    #[error("Input file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level shape is wrong (fatal)
    #[error("Malformed input file: {0}")]
    MalformedDocument(String),

    /// One record failed validation (record-level, recoverable)
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Database failure on the universities table (fatal)
    #[error("Store error: {0}")]
    Store(#[from] tasas_common::Error),
}

