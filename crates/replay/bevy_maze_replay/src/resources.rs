use bevy::prelude::*;
use maze_replay_core::{
    ControlCommand, FrameReader, PlaybackEngine, PlaybackEvent, Pose, StatusReader,
    TrajectoryProfile,
};

/// The playback engine, advanced once per `Update`.
#[derive(Resource)]
pub struct ReplayEngine(pub PlaybackEngine);

/// Reader handles for code outside the ECS schedule (UI overlays, recorders).
#[derive(Resource, Clone)]
pub struct ReplayReaders {
    pub frames: FrameReader,
    pub status: StatusReader,
}

/// How the planar maze pose lands in the 3D scene.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum GroundPlane {
    /// Maze x → world x, maze y → world -z, heading about +Y (Bevy's Y-up default).
    #[default]
    XZ,
    /// Maze x → world x, maze y → world y, heading about +Z.
    XY,
}

#[derive(Resource, Clone, Debug)]
pub struct PoseMapping {
    pub plane: GroundPlane,
    /// Height above the ground plane for mapped targets.
    pub height: f32,
    /// World units per maze unit.
    pub scale: f32,
}

impl Default for PoseMapping {
    fn default() -> Self {
        Self {
            plane: GroundPlane::XZ,
            height: 0.0,
            scale: 1.0,
        }
    }
}

impl PoseMapping {
    pub fn translation(&self, pose: &Pose) -> Vec3 {
        let x = pose.x() * self.scale;
        let y = pose.y() * self.scale;
        match self.plane {
            GroundPlane::XZ => Vec3::new(x, self.height, -y),
            GroundPlane::XY => Vec3::new(x, y, self.height),
        }
    }

    pub fn rotation(&self, heading: f32) -> Quat {
        match self.plane {
            GroundPlane::XZ => Quat::from_rotation_y(heading),
            GroundPlane::XY => Quat::from_rotation_z(heading),
        }
    }
}

/// Install a new trajectory. Applied before commands in the same frame.
#[derive(Event, Clone, Debug)]
pub struct LoadProfile(pub TrajectoryProfile);

/// Control call from UI systems. Applied before the frame's advance.
#[derive(Event, Clone, Debug)]
pub struct ReplayCommand(pub ControlCommand);

/// Engine events forwarded into the ECS after each advance.
#[derive(Event, Clone, Debug)]
pub struct ReplayEvent(pub PlaybackEvent);
