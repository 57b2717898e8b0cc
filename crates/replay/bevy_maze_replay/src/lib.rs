//! Bevy adapter for `maze-replay-core`.
//!
//! Each `Update`: profile loads → control commands → advance by `Time` delta →
//! pose written to `ReplayTarget` transforms → engine events forwarded.

use bevy::prelude::*;
use maze_replay_core::{Config, PlaybackEngine};

pub mod components;
pub mod resources;
pub mod systems;

pub use components::{ReplayOffset, ReplayTarget};
pub use resources::{
    GroundPlane, LoadProfile, PoseMapping, ReplayCommand, ReplayEngine, ReplayEvent,
    ReplayReaders,
};

/// Ordering anchor for systems that must run before or after replay playback.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReplaySet;

#[derive(Default)]
pub struct MazeReplayPlugin {
    pub config: Config,
}

impl Plugin for MazeReplayPlugin {
    fn build(&self, app: &mut App) {
        let engine = PlaybackEngine::new(self.config.clone());
        let readers = ReplayReaders {
            frames: engine.frame_reader(),
            status: engine.status_reader(),
        };
        app.insert_resource(ReplayEngine(engine))
            .insert_resource(readers)
            .init_resource::<PoseMapping>()
            .add_event::<LoadProfile>()
            .add_event::<ReplayCommand>()
            .add_event::<ReplayEvent>()
            .add_systems(
                Update,
                (
                    systems::load_profile_system,
                    systems::apply_commands_system,
                    systems::advance_system,
                    systems::apply_pose_system,
                    systems::forward_events_system,
                )
                    .chain()
                    .in_set(ReplaySet),
            );
    }
}
