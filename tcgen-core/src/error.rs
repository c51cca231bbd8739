//! Error types for tcgen descriptors and the random source.

use thiserror::Error;

/// Main error type for value generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TcgenError {
    /// The bounds describe an empty range once inclusivity is applied.
    #[error("Invalid range: [{lower}, {upper}] contains no values")]
    InvalidRange { lower: String, upper: String },

    /// A descriptor was built with arguments that break its contract.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The request is well-formed but cannot be satisfied.
    #[error("Unsatisfiable request: {message}")]
    Unsatisfiable { message: String },

    /// A rank query fell outside `[1, total]`.
    #[error("Rank {k} out of range [1, {total}]")]
    RankOutOfRange { k: u128, total: u128 },
}

impl TcgenError {
    pub(crate) fn invalid_range(lower: impl ToString, upper: impl ToString) -> Self {
        TcgenError::InvalidRange {
            lower: lower.to_string(),
            upper: upper.to_string(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        TcgenError::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn unsatisfiable(message: impl Into<String>) -> Self {
        TcgenError::Unsatisfiable {
            message: message.into(),
        }
    }
}

/// Result type for tcgen operations.
pub type Result<T> = std::result::Result<T, TcgenError>;
