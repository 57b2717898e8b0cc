//! Shared handle to one engine.
//!
//! Components that need to drive or inspect playback receive a clone of this
//! handle explicitly. Every method takes the engine lock once, so a profile swap
//! and the state reset that goes with it are never observed half done.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::clock::{ClockTick, PlaybackState};
use crate::control::{ControlCommand, PlaybackControl};
use crate::engine::PlaybackEngine;
use crate::events::PlaybackEvent;
use crate::profile::TrajectoryProfile;
use crate::store::{FrameReader, StatusReader};

#[derive(Debug, Clone, Default)]
pub struct PlaybackHandle {
    inner: Arc<Mutex<PlaybackEngine>>,
}

impl PlaybackHandle {
    pub fn new(engine: PlaybackEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PlaybackEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut PlaybackEngine) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn set_profile(&self, profile: TrajectoryProfile) {
        self.lock().set_profile(profile);
    }

    pub fn advance(&self, dt: f32) -> ClockTick {
        self.lock().advance(dt)
    }

    pub fn state(&self) -> PlaybackState {
        self.lock().state()
    }

    pub fn take_events(&self) -> Vec<PlaybackEvent> {
        self.lock().take_events()
    }

    /// Readers do not go through the engine lock afterwards.
    pub fn frame_reader(&self) -> FrameReader {
        self.lock().frame_reader()
    }

    pub fn status_reader(&self) -> StatusReader {
        self.lock().status_reader()
    }
}

impl PlaybackControl for PlaybackHandle {
    fn apply(&mut self, cmd: ControlCommand) -> bool {
        self.lock().apply(cmd)
    }
}
