//! Error types for the edit session and the viewer.

use imv_ops::OpsError;
use thiserror::Error;

/// Edit session failures.
#[derive(Error, Debug)]
pub enum SessionError {
    /// `op` was called with no session open.
    #[error("{op} called without an active edit session")]
    NotActive {
        /// Operation that was attempted.
        op: &'static str,
    },

    /// `begin` was called while a session was already open.
    #[error("an edit session is already active")]
    AlreadyActive,

    /// The adjustment itself failed (allocation).
    #[error(transparent)]
    Ops(#[from] OpsError),
}

impl SessionError {
    /// Session misuse rather than a resource failure.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::NotActive { .. } | Self::AlreadyActive)
    }

    /// The preview buffer could not be allocated.
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::Ops(e) if e.is_allocation_error())
    }
}

impl From<imv_core::Error> for SessionError {
    fn from(e: imv_core::Error) -> Self {
        Self::Ops(OpsError::Core(e))
    }
}

/// Result type for edit session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Viewer dispatch failures.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The event needs a loaded image.
    #[error("no image loaded")]
    NoImage,

    /// A destructive operation was refused while adjustments are pending.
    #[error("{op} is not allowed while an adjustment is in progress")]
    SessionOpen {
        /// Operation that was refused.
        op: &'static str,
    },

    /// Edit session failure.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Mirror or resize failure.
    #[error(transparent)]
    Ops(#[from] OpsError),
}

impl From<imv_core::Error> for ViewerError {
    fn from(e: imv_core::Error) -> Self {
        Self::Ops(OpsError::Core(e))
    }
}
