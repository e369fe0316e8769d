//! Error type for suite construction.
//!
//! Only building a suite can fail. Once a [`Sample`](crate::Sample) exists,
//! every test and summary is defined for it and returns a value.

use thiserror::Error;

/// Everything that can go wrong before a test runs.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("generator failed at value #{index}: {reason}")]
    Generator { index: usize, reason: String },

    #[error("generator produced NaN at value #{index}; values must lie in [0.0, 1.0)")]
    NotANumber { index: usize },

    #[error("generator produced {value} at value #{index}; values must lie in [0.0, 1.0)")]
    OutOfRange { index: usize, value: f64 },

    #[error("sample size must be at least 1")]
    EmptySample,

    #[error("unknown test '{0}'")]
    UnknownTest(String),

    #[error("unknown summary '{0}'")]
    UnknownSummary(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigurationError {
    /// Index of the offending generator value, when the error came from sampling.
    pub fn value_index(&self) -> Option<usize> {
        match self {
            Self::Generator { index, .. }
            | Self::NotANumber { index }
            | Self::OutOfRange { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Result alias for suite construction.
pub type Result<T> = std::result::Result<T, ConfigurationError>;
