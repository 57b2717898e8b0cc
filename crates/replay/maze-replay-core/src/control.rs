//! Control API shared by the engine, the shared handle and the adapters.
//!
//! Every operation is infallible and idempotent: repeating a call whose effect
//! already holds changes nothing and emits no event.

use serde::{Deserialize, Serialize};

fn default_pause_after_seek() -> bool {
    true
}

/// Serializable form of a control call, for adapters that transport commands
/// (Bevy events, JSON from a web UI).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlCommand {
    Play,
    Pause,
    Stop,
    TogglePlay,
    Seek {
        time: f32,
        #[serde(default = "default_pause_after_seek")]
        pause_after_seek: bool,
    },
    SetSpeed {
        speed: f32,
    },
    SetLoopEnabled {
        enabled: bool,
    },
    StepForward,
    StepBackward,
}

pub trait PlaybackControl {
    /// Apply one command. Returns whether playback state changed.
    fn apply(&mut self, cmd: ControlCommand) -> bool;

    fn play(&mut self) -> bool {
        self.apply(ControlCommand::Play)
    }

    fn pause(&mut self) -> bool {
        self.apply(ControlCommand::Pause)
    }

    fn stop(&mut self) -> bool {
        self.apply(ControlCommand::Stop)
    }

    fn toggle_play(&mut self) -> bool {
        self.apply(ControlCommand::TogglePlay)
    }

    /// Scrub to `time`, clamped into [0, duration].
    fn seek_to(&mut self, time: f32, pause_after_seek: bool) -> bool {
        self.apply(ControlCommand::Seek {
            time,
            pause_after_seek,
        })
    }

    fn set_speed(&mut self, speed: f32) -> bool {
        self.apply(ControlCommand::SetSpeed { speed })
    }

    fn set_loop_enabled(&mut self, enabled: bool) -> bool {
        self.apply(ControlCommand::SetLoopEnabled { enabled })
    }

    fn step_to_next_keyframe(&mut self) -> bool {
        self.apply(ControlCommand::StepForward)
    }

    fn step_to_previous_keyframe(&mut self) -> bool {
        self.apply(ControlCommand::StepBackward)
    }
}
