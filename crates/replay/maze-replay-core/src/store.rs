//! Dual-rate state store.
//!
//! - Frame cell (high rate): `{current_time, pose}` rewritten on every advance and
//!   seek, read by the renderer each frame. No notification is issued.
//! - Observed tier (low rate): transport fields published immediately on control
//!   calls, plus a copy of `current_time` refreshed at a fixed interval of host
//!   time. Observers poll by revision or subscribe to a channel.
//!
//! Readers are cheap clonable handles; the engine holds the only writer.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::clock::{PlaybackState, PlaybackStatus};
use crate::pose::Pose;

/// Hot-path snapshot consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub current_time: f32,
    pub pose: Pose,
}

impl Default for FrameSnapshot {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            pose: Pose::ORIGIN,
        }
    }
}

/// Display-rate view for UI widgets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ObservedState {
    pub status: PlaybackStatus,
    pub is_playing: bool,
    pub duration: f32,
    pub speed: f32,
    pub is_loop_enabled: bool,
    /// Mirrored from the frame cell; may lag by up to one observe interval.
    pub current_time: f32,
    /// Bumped on every published change.
    pub revision: u64,
}

impl ObservedState {
    fn same_fields(&self, other: &ObservedState) -> bool {
        self.status == other.status
            && self.is_playing == other.is_playing
            && self.duration == other.duration
            && self.speed == other.speed
            && self.is_loop_enabled == other.is_loop_enabled
            && self.current_time == other.current_time
    }
}

#[derive(Debug, Default)]
struct ObservedTier {
    state: ObservedState,
    subscribers: Vec<Sender<ObservedState>>,
}

fn lock(m: &Mutex<ObservedTier>) -> MutexGuard<'_, ObservedTier> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read side of the frame cell.
#[derive(Debug, Clone)]
pub struct FrameReader {
    cell: Arc<RwLock<FrameSnapshot>>,
}

impl FrameReader {
    #[inline]
    pub fn read(&self) -> FrameSnapshot {
        *self.cell.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.read().pose
    }

    #[inline]
    pub fn current_time(&self) -> f32 {
        self.read().current_time
    }
}

/// Read side of the observed tier.
#[derive(Debug, Clone)]
pub struct StatusReader {
    tier: Arc<Mutex<ObservedTier>>,
}

impl StatusReader {
    pub fn get(&self) -> ObservedState {
        lock(&self.tier).state
    }

    pub fn revision(&self) -> u64 {
        lock(&self.tier).state.revision
    }

    /// Poll helper: the current state if it changed after `revision`.
    pub fn changed_since(&self, revision: u64) -> Option<ObservedState> {
        let state = lock(&self.tier).state;
        (state.revision > revision).then_some(state)
    }

    /// Receive every state published from now on. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> Receiver<ObservedState> {
        let (tx, rx) = channel();
        lock(&self.tier).subscribers.push(tx);
        rx
    }
}

#[derive(Debug)]
pub struct DualRateStateStore {
    frame: Arc<RwLock<FrameSnapshot>>,
    observed: Arc<Mutex<ObservedTier>>,
    mirror_interval: f32,
    since_mirror: f32,
}

impl DualRateStateStore {
    pub fn new(mirror_interval: f32) -> Self {
        Self {
            frame: Arc::new(RwLock::new(FrameSnapshot::default())),
            observed: Arc::new(Mutex::new(ObservedTier::default())),
            mirror_interval: mirror_interval.max(0.0),
            since_mirror: 0.0,
        }
    }

    pub fn frame_reader(&self) -> FrameReader {
        FrameReader {
            cell: Arc::clone(&self.frame),
        }
    }

    pub fn status_reader(&self) -> StatusReader {
        StatusReader {
            tier: Arc::clone(&self.observed),
        }
    }

    #[inline]
    pub fn frame(&self) -> FrameSnapshot {
        *self.frame.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn observed(&self) -> ObservedState {
        lock(&self.observed).state
    }

    /// Hot path: overwrite the frame cell.
    #[inline]
    pub fn write_frame(&self, current_time: f32, pose: Pose) {
        let mut cell = self.frame.write().unwrap_or_else(PoisonError::into_inner);
        cell.current_time = current_time;
        cell.pose = pose;
    }

    /// Publish transport fields right away. `mirror_time` also refreshes the
    /// displayed time (seek, stop, profile install).
    pub fn publish_controls(&mut self, state: &PlaybackState, mirror_time: bool) {
        let mut tier = lock(&self.observed);
        let mut next = tier.state;
        next.status = state.status;
        next.is_playing = state.is_playing;
        next.duration = state.duration;
        next.speed = state.speed;
        next.is_loop_enabled = state.is_loop_enabled;
        if mirror_time {
            next.current_time = state.current_time;
        }
        Self::publish(&mut tier, next);
        drop(tier);
        if mirror_time {
            self.since_mirror = 0.0;
        }
    }

    /// Account `host_dt` of wall time; mirror `current_time` once the interval elapses.
    pub fn tick(&mut self, host_dt: f32, current_time: f32) {
        if host_dt.is_finite() && host_dt > 0.0 {
            self.since_mirror += host_dt;
        }
        if self.since_mirror < self.mirror_interval {
            return;
        }
        self.since_mirror = 0.0;
        let mut tier = lock(&self.observed);
        let mut next = tier.state;
        next.current_time = current_time;
        if Self::publish(&mut tier, next) {
            trace!("mirrored t={current_time:.3} rev={}", tier.state.revision);
        }
    }

    fn publish(tier: &mut ObservedTier, mut next: ObservedState) -> bool {
        if next.same_fields(&tier.state) {
            return false;
        }
        next.revision = tier.state.revision + 1;
        tier.state = next;
        tier.subscribers.retain(|tx| tx.send(next).is_ok());
        true
    }
}
