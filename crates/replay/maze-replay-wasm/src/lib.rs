use js_sys::{Function, JSON};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use maze_replay_core::{
    Config, ControlCommand, PlaybackControl, PlaybackEngine, StatusReader, TrajectoryProfile,
};

/// Replay engine exposed to a web UI. The page's animation-frame loop calls
/// `advance(dt)` and positions the robot from the returned frame; widgets read
/// `status()` or register `on_status` to hear about display-rate changes.
#[wasm_bindgen]
pub struct MazeReplay {
    core: PlaybackEngine,
    status: StatusReader,
    seen_revision: u64,
    on_status: Option<Function>,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

impl MazeReplay {
    /// Invoke the status callback once if the observed tier moved since last time.
    fn notify(&mut self) {
        let Some(state) = self.status.changed_since(self.seen_revision) else {
            return;
        };
        self.seen_revision = state.revision;
        if let Some(f) = &self.on_status {
            if let Ok(value) = swb::to_value(&state) {
                // A throwing listener must not break the render loop.
                if let Err(err) = f.call1(&JsValue::UNDEFINED, &value) {
                    web_sys::console::warn_2(&JsValue::from_str("on_status listener threw:"), &err);
                }
            }
        }
    }

    fn control(&mut self, cmd: ControlCommand) -> bool {
        let changed = self.core.apply(cmd);
        self.notify();
        changed
    }
}

#[wasm_bindgen]
impl MazeReplay {
    /// Create an engine. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new MazeReplay({ max_speed: 4, loop_enabled: true })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<MazeReplay, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let core = PlaybackEngine::new(cfg);
        let status = core.status_reader();
        let seen_revision = status.revision();

        Ok(MazeReplay {
            core,
            status,
            seen_revision,
            on_status: None,
        })
    }

    /// Install a trajectory `{ keyframes: [{ time, pose: { position: [x, y], heading } }] }`.
    /// Keyframes may be in any order. Returns the number of distinct keyframes.
    #[wasm_bindgen(js_name = set_profile)]
    pub fn set_profile(&mut self, profile_json: JsValue) -> Result<u32, JsError> {
        if jsvalue_is_undefined_or_null(&profile_json) {
            return Err(JsError::new("set_profile: profile_json is null/undefined"));
        }
        // Stringify so the core parser (and its validation) is reused as-is.
        let s = JSON::stringify(&profile_json)
            .map_err(|e| JsError::new(&format!("set_profile stringify error: {:?}", e)))?
            .as_string()
            .ok_or_else(|| JsError::new("set_profile: stringify produced non-string"))?;
        let profile = TrajectoryProfile::from_json(&s)
            .map_err(|e| JsError::new(&format!("set_profile parse error: {e}")))?;
        let count = profile.len() as u32;
        self.core.set_profile(profile);
        self.notify();
        Ok(count)
    }

    pub fn play(&mut self) -> bool {
        self.control(ControlCommand::Play)
    }

    pub fn pause(&mut self) -> bool {
        self.control(ControlCommand::Pause)
    }

    pub fn stop(&mut self) -> bool {
        self.control(ControlCommand::Stop)
    }

    #[wasm_bindgen(js_name = toggle_play)]
    pub fn toggle_play(&mut self) -> bool {
        self.control(ControlCommand::TogglePlay)
    }

    /// Scrub to `time` seconds. `pause_after_seek` defaults to true.
    #[wasm_bindgen(js_name = seek_to)]
    pub fn seek_to(&mut self, time: f32, pause_after_seek: Option<bool>) -> bool {
        self.control(ControlCommand::Seek {
            time,
            pause_after_seek: pause_after_seek.unwrap_or(true),
        })
    }

    #[wasm_bindgen(js_name = set_speed)]
    pub fn set_speed(&mut self, speed: f32) -> bool {
        self.control(ControlCommand::SetSpeed { speed })
    }

    #[wasm_bindgen(js_name = set_loop_enabled)]
    pub fn set_loop_enabled(&mut self, enabled: bool) -> bool {
        self.control(ControlCommand::SetLoopEnabled { enabled })
    }

    #[wasm_bindgen(js_name = step_forward)]
    pub fn step_forward(&mut self) -> bool {
        self.control(ControlCommand::StepForward)
    }

    #[wasm_bindgen(js_name = step_backward)]
    pub fn step_backward(&mut self) -> bool {
        self.control(ControlCommand::StepBackward)
    }

    /// Apply a JSON command such as `{ type: "seek", time: 3.2 }`.
    pub fn apply(&mut self, cmd: JsValue) -> Result<bool, JsError> {
        let cmd: ControlCommand =
            swb::from_value(cmd).map_err(|e| JsError::new(&format!("command error: {e}")))?;
        Ok(self.control(cmd))
    }

    /// Step the clock by `dt` seconds. Returns `{ current_time, pose }`.
    pub fn advance(&mut self, dt: f32) -> Result<JsValue, JsError> {
        self.core.advance(dt);
        self.notify();
        self.frame()
    }

    /// High-rate snapshot `{ current_time, pose: { position, heading } }`.
    pub fn frame(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.frame()).map_err(|e| JsError::new(&format!("frame error: {e}")))
    }

    /// Display-rate state `{ status, is_playing, duration, speed, is_loop_enabled, current_time, revision }`.
    pub fn status(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.status.get()).map_err(|e| JsError::new(&format!("status error: {e}")))
    }

    /// Register (or clear with undefined) a callback invoked with the observed state
    /// whenever it changes.
    #[wasm_bindgen(js_name = on_status)]
    pub fn on_status(&mut self, callback: Option<Function>) {
        self.on_status = callback;
    }

    /// Drain queued playback events as an array of `{ type, ... }` objects.
    #[wasm_bindgen(js_name = take_events)]
    pub fn take_events(&mut self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.take_events())
            .map_err(|e| JsError::new(&format!("events error: {e}")))
    }
}

/// `mm:ss.hh` label for a seek bar.
#[wasm_bindgen(js_name = format_time)]
pub fn format_time(seconds: f32) -> String {
    maze_replay_core::format_time(seconds)
}

/// `Nx` label for a speed picker.
#[wasm_bindgen(js_name = format_speed)]
pub fn format_speed(value: f32) -> String {
    maze_replay_core::format_speed(value)
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
