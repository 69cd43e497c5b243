//! Error types for the swap engine

use serde::{Deserialize, Serialize};

/// Errors raised by the swap engine and its collaborators
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SwapError {
    /// Drawable index outside `[0, len - 1]`
    #[error("Drawable index {index} is out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    /// The host clock asked the timeline to repeat
    #[error("Transition timeline does not support repeat")]
    RepeatUnsupported,

    /// Configuration failed validation
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl SwapError {
    /// Check if this error means the host or caller broke the engine contract.
    ///
    /// Contract violations indicate a programming error rather than bad input
    /// and should not be retried.
    #[inline]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::RepeatUnsupported)
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "index",
            Self::RepeatUnsupported => "timeline",
            Self::InvalidConfig { .. } => "config",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
