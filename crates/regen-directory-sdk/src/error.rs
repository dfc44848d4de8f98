//! Error types for the directory SDK
//!
//! Every failure maps onto one of four kinds (see `FailureKind`), so a
//! caller can decide how to present it without matching on transport details.

use regen_directory::{EnterpriseId, StoreError, ValidationErrors};
use thiserror::Error;

/// How a failure should be surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A fetch failed: show a page-level error, no retry
    ReadFailure,
    /// Creating an enterprise failed: keep the form editable for resubmission
    WriteFailure,
    /// The submission was rejected before any request was made
    Validation,
    /// The requested enterprise does not exist
    NotFound,
}

/// Errors that can occur when talking to the directory backend
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Read request failed or was rejected by the store
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Write request failed or was rejected by the store
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Submission failed field checks
    #[error("Validation failed: {0}")]
    ValidationError(#[from] ValidationErrors),

    /// No enterprise with this id
    #[error("Enterprise not found: {0}")]
    NotFound(EnterpriseId),

    /// Client could not be constructed from its settings
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DirectoryError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DirectoryError::WriteFailed(_) => FailureKind::WriteFailure,
            DirectoryError::ValidationError(_) => FailureKind::Validation,
            DirectoryError::NotFound(_) => FailureKind::NotFound,
            DirectoryError::ReadFailed(_)
            | DirectoryError::ConfigError(_)
            | DirectoryError::HttpError(_)
            | DirectoryError::SerializationError(_) => FailureKind::ReadFailure,
        }
    }

    /// Reclassify a failure that happened while writing.
    /// Validation errors keep their kind.
    pub fn into_write_failure(self) -> Self {
        match self {
            DirectoryError::ValidationError(_) | DirectoryError::WriteFailed(_) => self,
            DirectoryError::ReadFailed(msg) | DirectoryError::ConfigError(msg) => {
                DirectoryError::WriteFailed(msg)
            }
            other => DirectoryError::WriteFailed(other.to_string()),
        }
    }

    /// Field errors, when this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            DirectoryError::ValidationError(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<StoreError> for DirectoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(errors) => DirectoryError::ValidationError(errors),
            other => DirectoryError::ReadFailed(other.to_string()),
        }
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
