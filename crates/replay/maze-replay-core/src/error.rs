//! Error types for the replay core.
//!
//! Playback controls never fail (out-of-range input is clamped). Errors only
//! arise while building a profile or decoding one from JSON.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ReplayError {
    /// A keyframe timestamp was NaN or infinite and cannot be used as a key.
    #[error("Non-finite keyframe time: {time}")]
    NonFiniteTime { time: f32 },

    /// Profile or config JSON could not be decoded.
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl ReplayError {
    /// Error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NonFiniteTime { .. } => "validation",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
