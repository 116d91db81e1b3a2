//! Error types for dataset construction and queries
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Errors raised while querying a loaded dataset
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Dataset contains no state vectors")]
    EmptyDataset,

    #[error("Epoch not found: {epoch}")]
    NotFound { epoch: String },

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid vector: {reason}")]
    InvalidVector { reason: String },

    #[error("Invalid time: {value}")]
    InvalidTime { value: String },
}

/// Errors raised while assembling a dataset from parsed records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("Epoch {epoch} is not a valid OEM timestamp")]
    InvalidEpoch { epoch: String },

    #[error("Epoch {current} appears after later epoch {previous}")]
    OutOfOrder { previous: String, current: String },

    #[error("Duplicate epoch: {epoch}")]
    DuplicateEpoch { epoch: String },

    #[error("State vector at {epoch} has a non-finite {field} component")]
    NonFiniteComponent { epoch: String, field: String },
}
