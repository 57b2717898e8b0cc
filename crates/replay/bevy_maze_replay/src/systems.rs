use bevy::log::debug;
use bevy::prelude::*;
use maze_replay_core::PlaybackControl;

use crate::components::{ReplayOffset, ReplayTarget};
use crate::resources::{LoadProfile, PoseMapping, ReplayCommand, ReplayEngine, ReplayEvent};

/// Installs the most recent `LoadProfile` of this frame; earlier ones are superseded.
pub fn load_profile_system(mut loads: EventReader<LoadProfile>, mut eng: ResMut<ReplayEngine>) {
    if let Some(LoadProfile(profile)) = loads.read().last() {
        debug!("installing replay profile ({} keyframes)", profile.len());
        eng.0.set_profile(profile.clone());
    }
}

/// Applies queued control commands in arrival order.
pub fn apply_commands_system(
    mut commands: EventReader<ReplayCommand>,
    mut eng: ResMut<ReplayEngine>,
) {
    for ReplayCommand(cmd) in commands.read() {
        eng.0.apply(cmd.clone());
    }
}

/// Advances the engine by this frame's delta.
pub fn advance_system(time: Res<Time>, mut eng: ResMut<ReplayEngine>) {
    eng.0.advance(time.delta_seconds());
}

/// Writes the current pose onto every `ReplayTarget`.
pub fn apply_pose_system(
    eng: Res<ReplayEngine>,
    mapping: Res<PoseMapping>,
    mut targets: Query<(&mut Transform, Option<&ReplayOffset>), With<ReplayTarget>>,
) {
    let pose = eng.0.current_pose();
    let translation = mapping.translation(&pose);
    for (mut tf, offset) in targets.iter_mut() {
        let (dt, dh) = offset.map_or((Vec3::ZERO, 0.0), |o| (o.translation, o.heading));
        tf.translation = translation + dt;
        tf.rotation = mapping.rotation(pose.heading + dh);
    }
}

/// Moves engine events into the ECS event queue.
pub fn forward_events_system(mut eng: ResMut<ReplayEngine>, mut out: EventWriter<ReplayEvent>) {
    for event in eng.0.take_events() {
        out.send(ReplayEvent(event));
    }
}
