//! Error types for stochr
//!
//! The draw surface on [`Stream`](crate::Stream) is total and never fails.
//! Errors only arise at the backend seam, where an accelerator can be
//! missing at runtime or lack a precision.

use thiserror::Error;

/// Result type alias using stochr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when running fills on a backend
#[derive(Error, Debug)]
pub enum Error {
    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Backend limitation - operation valid but exceeds backend capabilities
    #[error("{backend} limitation: {operation} - {reason}")]
    BackendLimitation {
        /// The backend that has the limitation
        backend: &'static str,
        /// The operation being attempted
        operation: &'static str,
        /// Description of the limitation
        reason: String,
    },
}

impl Error {
    /// Create a backend limitation error
    pub fn backend_limitation(
        backend: &'static str,
        operation: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::BackendLimitation {
            backend,
            operation,
            reason: reason.into(),
        }
    }
}
