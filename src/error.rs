//! Error types for region growing and labeling.

use thiserror::Error;

/// Result type for growing and labeling operations.
pub type GrowResult<T> = Result<T, GrowError>;

/// Errors that can occur before a growth pass starts.
///
/// All checks run up front; a pass that has started never fails halfway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GrowError {
    /// The input is empty, ragged, or does not match the declared dimensions.
    #[error("invalid grid shape: {reason}")]
    InvalidGridShape {
        /// What was wrong with the shape.
        reason: String,
    },

    /// A parameter is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Which parameter was rejected and why.
        reason: String,
    },
}

impl GrowError {
    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        Self::InvalidGridShape {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
