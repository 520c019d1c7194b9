//! Error types for intensity operations.

use thiserror::Error;

/// Error type for intensity operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer-level failure from tonal-core.
    #[error(transparent)]
    Core(#[from] tonal_core::Error),
}

/// Result type for intensity operations.
pub type OpsResult<T> = Result<T, OpsError>;
