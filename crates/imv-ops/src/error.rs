//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Buffer-level failure, most importantly allocation of the output.
    #[error(transparent)]
    Core(#[from] imv_core::Error),

    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl OpsError {
    /// Returns `true` if the output buffer could not be allocated.
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_allocation_error())
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
