//! Playback clock: position, speed and loop flag, plus the Stopped/Paused/Playing
//! state machine that integrates host frame time into trajectory time.
//!
//! The clock knows nothing about poses. The engine resamples the pose whenever
//! a clock operation reports that time moved.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::{Config, EndBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// At time 0, not advancing.
    #[default]
    Stopped,
    /// Holding some time `t`.
    Paused,
    /// Advancing on every `advance`.
    Playing,
}

impl PlaybackStatus {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Paused => "paused",
            Self::Playing => "playing",
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Outcome of a single `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Not playing, or nothing to integrate.
    Idle,
    /// Time moved forward inside the run.
    Advanced,
    /// Time passed `duration` and wrapped `wraps` times.
    Looped { wraps: u32 },
    /// A non-looping run reached its end.
    Ended,
}

impl ClockTick {
    #[inline]
    pub fn moved(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Copy of the clock's externally visible fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_time: f32,
    pub status: PlaybackStatus,
    pub is_playing: bool,
    pub speed: f32,
    pub is_loop_enabled: bool,
    pub duration: f32,
}

#[derive(Debug, Clone)]
pub struct PlaybackClock {
    status: PlaybackStatus,
    current_time: f32,
    speed: f32,
    loop_enabled: bool,
    duration: f32,

    min_speed: f32,
    max_speed: f32,
    max_step: f32,
    end_behavior: EndBehavior,
}

impl PlaybackClock {
    pub fn new(cfg: &Config) -> Self {
        let cfg = cfg.clone().normalized();
        Self {
            status: PlaybackStatus::Stopped,
            current_time: 0.0,
            speed: cfg.initial_speed,
            loop_enabled: cfg.loop_enabled,
            duration: 0.0,
            min_speed: cfg.min_speed,
            max_speed: cfg.max_speed,
            max_step: cfg.max_step_seconds,
            end_behavior: cfg.end_behavior,
        }
    }

    /// Rewind to Stopped at 0 for a new run length. Speed and loop survive.
    pub fn reset(&mut self, duration: f32) {
        self.duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        self.current_time = 0.0;
        self.status = PlaybackStatus::Stopped;
    }

    #[inline]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    #[inline]
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.status.is_playing()
    }

    #[inline]
    pub fn is_loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn max_step(&self) -> f32 {
        self.max_step
    }

    /// Fraction of the run elapsed, 0 for an empty run.
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            self.current_time / self.duration
        } else {
            0.0
        }
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_time: self.current_time,
            status: self.status,
            is_playing: self.is_playing(),
            speed: self.speed,
            is_loop_enabled: self.loop_enabled,
            duration: self.duration,
        }
    }

    #[inline]
    fn has_run(&self) -> bool {
        self.duration > 0.0
    }

    fn transition(&mut self, to: PlaybackStatus) {
        if self.status != to {
            debug!(
                "playback {} -> {} at t={:.3}",
                self.status.name(),
                to.name(),
                self.current_time
            );
            self.status = to;
        }
    }

    /// Start or resume. A run sitting at its end restarts from 0.
    /// Returns whether anything changed.
    pub fn play(&mut self) -> bool {
        if !self.has_run() || self.is_playing() {
            return false;
        }
        if self.current_time >= self.duration {
            self.current_time = 0.0;
        }
        self.transition(PlaybackStatus::Playing);
        true
    }

    pub fn pause(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.transition(PlaybackStatus::Paused);
        true
    }

    pub fn stop(&mut self) -> bool {
        if self.status == PlaybackStatus::Stopped && self.current_time == 0.0 {
            return false;
        }
        self.current_time = 0.0;
        self.transition(PlaybackStatus::Stopped);
        true
    }

    /// Move to `time` clamped into [0, duration]. With `pause_after_seek` a playing
    /// clock pauses; otherwise the play state is left alone. A stopped clock that
    /// lands away from 0 becomes paused there. Non-finite times are ignored.
    pub fn seek_to(&mut self, time: f32, pause_after_seek: bool) -> bool {
        if !self.has_run() || !time.is_finite() {
            return false;
        }
        let target = time.clamp(0.0, self.duration);
        let before = (self.current_time, self.status);
        self.current_time = target;
        if pause_after_seek && self.is_playing() {
            self.transition(PlaybackStatus::Paused);
        }
        if self.status == PlaybackStatus::Stopped && target > 0.0 {
            self.transition(PlaybackStatus::Paused);
        }
        before != (self.current_time, self.status)
    }

    /// Clamp into the configured speed range. Non-finite input is ignored, as is
    /// any call while there is no run to play.
    pub fn set_speed(&mut self, speed: f32) -> bool {
        if !self.has_run() || !speed.is_finite() {
            return false;
        }
        let clamped = speed.clamp(self.min_speed, self.max_speed);
        if clamped == self.speed {
            return false;
        }
        self.speed = clamped;
        true
    }

    pub fn set_loop_enabled(&mut self, enabled: bool) -> bool {
        if !self.has_run() || self.loop_enabled == enabled {
            return false;
        }
        self.loop_enabled = enabled;
        true
    }

    /// Integrate `dt` seconds of host time. Only a playing clock moves.
    pub fn advance(&mut self, dt: f32) -> ClockTick {
        if !self.is_playing() || !self.has_run() {
            return ClockTick::Idle;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return ClockTick::Idle;
        }
        let step = if dt > self.max_step {
            trace!("dt {dt:.4}s capped to {:.4}s", self.max_step);
            self.max_step
        } else {
            dt
        };

        let next = self.current_time + step * self.speed;
        if next < self.duration {
            self.current_time = next;
            return ClockTick::Advanced;
        }

        if self.loop_enabled {
            let wraps = (next / self.duration).floor().max(1.0) as u32;
            self.current_time = next.rem_euclid(self.duration);
            // rem_euclid may round up to the divisor itself.
            if self.current_time >= self.duration {
                self.current_time = 0.0;
            }
            trace!("looped x{wraps} to t={:.3}", self.current_time);
            return ClockTick::Looped { wraps };
        }

        match self.end_behavior {
            EndBehavior::Pause => {
                self.current_time = self.duration;
                self.transition(PlaybackStatus::Paused);
            }
            EndBehavior::Stop => {
                self.current_time = 0.0;
                self.transition(PlaybackStatus::Stopped);
            }
        }
        ClockTick::Ended
    }
}
