//! Error types for chainwait.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! specific conditions. Handler failures are deliberately absent: whatever a
//! handler returns or panics with reaches the caller untouched.

use thiserror::Error;

/// Validation errors raised while constructing a component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} needs to be positive, got {value}")]
    NonPositive {
        field: String,
        value: i64,
    },

    #[error("{field} cannot be missing")]
    MissingArgument {
        field: String,
    },
}

/// Top-level error type for chainwait.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainWaitError {
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// The waiting execution unit observed a cancellation request.
    ///
    /// The originating `CancellationToken` stays cancelled.
    #[error("Wait cancelled")]
    Cancelled,
}

impl ChainWaitError {
    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the wait was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns true if this error is retryable.
    ///
    /// Configuration must be fixed by the caller and cancellation expresses
    /// caller intent, so nothing here is retried automatically.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Validation(_) | Self::Cancelled => false,
        }
    }
}

/// Result type alias for chainwait operations.
pub type ChainWaitResult<T> = Result<T, ChainWaitError>;
