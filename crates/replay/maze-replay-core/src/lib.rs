//! Maze Replay Core (engine-agnostic)
//!
//! Time-indexed trajectory playback for replaying a robot's maze run:
//! a sparse, timestamped pose profile becomes a smoothly interpolated motion
//! signal that can be played at any speed, scrubbed, looped and read every frame.
//!
//! Adapters (Bevy, wasm) own the render loop and call [`PlaybackEngine::advance`]
//! once per frame; UI drives playback through [`PlaybackControl`].

pub mod clock;
pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod events;
pub mod format;
pub mod handle;
pub mod index;
pub mod interp;
pub mod pose;
pub mod profile;
pub mod store;

// Re-exports for consumers (adapters)
pub use clock::{ClockTick, PlaybackClock, PlaybackState, PlaybackStatus};
pub use config::{Config, EndBehavior};
pub use control::{ControlCommand, PlaybackControl};
pub use engine::PlaybackEngine;
pub use error::ReplayError;
pub use events::PlaybackEvent;
pub use format::{format_speed, format_time};
pub use handle::PlaybackHandle;
pub use index::{Segment, TimestampIndex};
pub use interp::{interpolate, sample};
pub use pose::{Keyframe, Pose};
pub use profile::TrajectoryProfile;
pub use store::{DualRateStateStore, FrameReader, FrameSnapshot, ObservedState, StatusReader};

pub type Result<T> = core::result::Result<T, ReplayError>;
