//! Engine: owns the installed profile, its index, the clock and the dual-rate store.
//!
//! Per frame: `advance(dt)` → clock integrates → index locates → pose interpolated →
//! frame cell written → observed tier mirrored when its interval elapses.
//! Control calls (see [`PlaybackControl`]) land synchronously, so a command issued
//! before a frame's `advance` is always seen by it.

use std::collections::VecDeque;

use log::debug;

use crate::clock::{ClockTick, PlaybackClock, PlaybackState, PlaybackStatus};
use crate::config::Config;
use crate::control::{ControlCommand, PlaybackControl};
use crate::events::PlaybackEvent;
use crate::index::TimestampIndex;
use crate::interp::sample;
use crate::pose::Pose;
use crate::profile::TrajectoryProfile;
use crate::store::{DualRateStateStore, FrameReader, FrameSnapshot, ObservedState, StatusReader};

#[derive(Debug)]
pub struct PlaybackEngine {
    cfg: Config,
    profile: TrajectoryProfile,
    index: TimestampIndex,
    clock: PlaybackClock,
    pose: Pose,
    store: DualRateStateStore,
    events: VecDeque<PlaybackEvent>,
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl PlaybackEngine {
    pub fn new(cfg: Config) -> Self {
        let cfg = cfg.normalized();
        let mut engine = Self {
            clock: PlaybackClock::new(&cfg),
            store: DualRateStateStore::new(cfg.observe_interval_seconds),
            cfg,
            profile: TrajectoryProfile::new(),
            index: TimestampIndex::default(),
            pose: Pose::ORIGIN,
            events: VecDeque::new(),
        };
        engine.publish(true);
        engine
    }

    /// Convenience: engine with `profile` already installed.
    pub fn with_profile(cfg: Config, profile: TrajectoryProfile) -> Self {
        let mut engine = Self::new(cfg);
        engine.set_profile(profile);
        engine
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Replace the trajectory. The new index is built before anything else is
    /// touched; then index, duration, clock and pose switch together and the
    /// clock rewinds to Stopped at 0.
    pub fn set_profile(&mut self, profile: TrajectoryProfile) {
        let index = TimestampIndex::build(&profile);
        let duration = index.last_time().unwrap_or(0.0).max(0.0);

        self.index = index;
        self.profile = profile;
        self.clock.reset(duration);
        self.resample();
        self.publish(true);

        debug!(
            "profile installed: {} keyframes, duration {:.3}s",
            self.index.len(),
            duration
        );
        self.push_event(PlaybackEvent::ProfileInstalled {
            keyframes: self.index.len(),
            duration,
        });
    }

    #[inline]
    pub fn profile(&self) -> &TrajectoryProfile {
        &self.profile
    }

    #[inline]
    pub fn index(&self) -> &TimestampIndex {
        &self.index
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.clock.state()
    }

    #[inline]
    pub fn status(&self) -> PlaybackStatus {
        self.clock.status()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    #[inline]
    pub fn current_time(&self) -> f32 {
        self.clock.current_time()
    }

    #[inline]
    pub fn current_pose(&self) -> Pose {
        self.pose
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.clock.duration()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.clock.speed()
    }

    #[inline]
    pub fn is_loop_enabled(&self) -> bool {
        self.clock.is_loop_enabled()
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.clock.progress()
    }

    /// Pose at an arbitrary time without moving the clock (e.g. for ghost markers).
    pub fn pose_at(&self, time: f32) -> Pose {
        sample(&self.index, time)
    }

    #[inline]
    pub fn frame(&self) -> FrameSnapshot {
        self.store.frame()
    }

    #[inline]
    pub fn observed(&self) -> ObservedState {
        self.store.observed()
    }

    /// Handle for the renderer (high-rate tier).
    pub fn frame_reader(&self) -> FrameReader {
        self.store.frame_reader()
    }

    /// Handle for UI widgets (low-rate tier).
    pub fn status_reader(&self) -> StatusReader {
        self.store.status_reader()
    }

    /// Drain queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain(..).collect()
    }

    /// Integrate one frame of host time.
    pub fn advance(&mut self, dt: f32) -> ClockTick {
        let tick = self.clock.advance(dt);
        match tick {
            ClockTick::Idle => {}
            ClockTick::Advanced => self.resample(),
            ClockTick::Looped { wraps } => {
                self.resample();
                self.push_event(PlaybackEvent::Looped { wraps });
            }
            ClockTick::Ended => {
                self.resample();
                self.publish(true);
                self.push_event(PlaybackEvent::Ended {
                    at: self.clock.current_time(),
                });
            }
        }
        self.store.tick(dt, self.clock.current_time());
        tick
    }

    fn resample(&mut self) {
        let time = self.clock.current_time();
        self.pose = sample(&self.index, time);
        self.store.write_frame(time, self.pose);
    }

    fn publish(&mut self, mirror_time: bool) {
        let state = self.clock.state();
        self.store.publish_controls(&state, mirror_time);
    }

    fn push_event(&mut self, event: PlaybackEvent) {
        if self.cfg.max_pending_events == 0 {
            return;
        }
        while self.events.len() >= self.cfg.max_pending_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn cmd_play(&mut self) -> bool {
        if !self.clock.play() {
            return false;
        }
        // play() may have rewound a finished run.
        self.resample();
        self.publish(true);
        self.push_event(PlaybackEvent::Started {
            at: self.clock.current_time(),
        });
        true
    }

    fn cmd_pause(&mut self) -> bool {
        if !self.clock.pause() {
            return false;
        }
        self.publish(true);
        self.push_event(PlaybackEvent::Paused {
            at: self.clock.current_time(),
        });
        true
    }

    fn cmd_stop(&mut self) -> bool {
        if !self.clock.stop() {
            return false;
        }
        self.resample();
        self.publish(true);
        self.push_event(PlaybackEvent::Stopped);
        true
    }

    fn cmd_seek(&mut self, time: f32, pause_after_seek: bool) -> bool {
        let from = self.clock.current_time();
        let was_playing = self.clock.is_playing();
        if !self.clock.seek_to(time, pause_after_seek) {
            return false;
        }
        let to = self.clock.current_time();
        self.resample();
        self.publish(true);
        if from != to {
            self.push_event(PlaybackEvent::Seeked { from, to });
        }
        if was_playing && !self.clock.is_playing() {
            self.push_event(PlaybackEvent::Paused { at: to });
        }
        true
    }

    fn cmd_step(&mut self, forward: bool) -> bool {
        let now = self.clock.current_time();
        let target = if forward {
            self.index
                .next_key_after(now)
                .unwrap_or(self.clock.duration())
        } else {
            self.index.prev_key_before(now).unwrap_or(0.0)
        };
        let paused = self.cmd_pause();
        self.cmd_seek(target, true) || paused
    }
}

impl PlaybackControl for PlaybackEngine {
    fn apply(&mut self, cmd: ControlCommand) -> bool {
        match cmd {
            ControlCommand::Play => self.cmd_play(),
            ControlCommand::Pause => self.cmd_pause(),
            ControlCommand::Stop => self.cmd_stop(),
            ControlCommand::TogglePlay => {
                if self.clock.is_playing() {
                    self.cmd_pause()
                } else {
                    self.cmd_play()
                }
            }
            ControlCommand::Seek {
                time,
                pause_after_seek,
            } => self.cmd_seek(time, pause_after_seek),
            ControlCommand::SetSpeed { speed } => {
                if !self.clock.set_speed(speed) {
                    return false;
                }
                self.publish(false);
                self.push_event(PlaybackEvent::SpeedChanged {
                    speed: self.clock.speed(),
                });
                true
            }
            ControlCommand::SetLoopEnabled { enabled } => {
                if !self.clock.set_loop_enabled(enabled) {
                    return false;
                }
                self.publish(false);
                self.push_event(PlaybackEvent::LoopChanged { enabled });
                true
            }
            ControlCommand::StepForward => self.cmd_step(true),
            ControlCommand::StepBackward => self.cmd_step(false),
        }
    }
}
