//! Error types for spendlens-ingest

use spendlens_core::CoreError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Invalid amount '{value}' in transaction {transaction_id}")]
    InvalidAmount { transaction_id: String, value: String },

    #[error("Invalid date '{value}' in transaction {transaction_id}")]
    InvalidDate { transaction_id: String, value: String },

    #[error("Missing field '{field}'")]
    MissingField { field: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl IngestError {
    /// Wrap as a core source error, tagged with the failing source
    pub fn into_core(self, source_name: impl Into<String>) -> CoreError {
        CoreError::SourceError {
            source_name: source_name.into(),
            message: self.to_string(),
        }
    }
}

/// Result type with IngestError
pub type IngestResult<T> = Result<T, IngestError>;
