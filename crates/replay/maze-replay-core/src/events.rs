//! Discrete playback signals queued by the engine for adapters to forward.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum PlaybackEvent {
    ProfileInstalled { keyframes: usize, duration: f32 },
    Started { at: f32 },
    Paused { at: f32 },
    Stopped,
    Seeked { from: f32, to: f32 },
    Looped { wraps: u32 },
    /// A non-looping run reached its last keyframe.
    Ended { at: f32 },
    SpeedChanged { speed: f32 },
    LoopChanged { enabled: bool },
}
