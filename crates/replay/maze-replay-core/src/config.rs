//! Engine configuration.

use serde::{Deserialize, Serialize};

/// What a non-looping run does once it reaches the last keyframe.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndBehavior {
    /// Hold the final pose and pause at `duration`.
    #[default]
    Pause,
    /// Rewind to the start and stop.
    Stop,
}

/// Tuning for the clock and the observable tier. Every field has a default, so
/// partial JSON such as `{"max_speed": 4}` deserializes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound on the `dt` integrated by a single `advance` call (seconds).
    pub max_step_seconds: f32,
    /// How often the observable tier mirrors `current_time` (seconds of host time).
    pub observe_interval_seconds: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub initial_speed: f32,
    pub loop_enabled: bool,
    pub end_behavior: EndBehavior,
    /// Oldest events are dropped once this many are waiting to be taken.
    pub max_pending_events: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_step_seconds: 0.1,
            observe_interval_seconds: 0.05,
            min_speed: 0.1,
            max_speed: 10.0,
            initial_speed: 1.0,
            loop_enabled: false,
            end_behavior: EndBehavior::Pause,
            max_pending_events: 256,
        }
    }
}

impl Config {
    /// Repair values that would break clock invariants: swapped speed bounds,
    /// non-positive steps or intervals.
    pub fn normalized(mut self) -> Self {
        let defaults = Config::default();
        if !self.min_speed.is_finite() || self.min_speed <= 0.0 {
            self.min_speed = defaults.min_speed;
        }
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            self.max_speed = defaults.max_speed;
        }
        if self.min_speed > self.max_speed {
            std::mem::swap(&mut self.min_speed, &mut self.max_speed);
        }
        if !self.max_step_seconds.is_finite() || self.max_step_seconds <= 0.0 {
            self.max_step_seconds = defaults.max_step_seconds;
        }
        if !self.observe_interval_seconds.is_finite() || self.observe_interval_seconds < 0.0 {
            self.observe_interval_seconds = defaults.observe_interval_seconds;
        }
        if !self.initial_speed.is_finite() {
            self.initial_speed = defaults.initial_speed;
        }
        self.initial_speed = self.initial_speed.clamp(self.min_speed, self.max_speed);
        self
    }

    #[inline]
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        speed.clamp(self.min_speed, self.max_speed)
    }
}
