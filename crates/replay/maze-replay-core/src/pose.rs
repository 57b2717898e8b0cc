//! Pose and keyframe value types.

use serde::{Deserialize, Serialize};

/// Planar pose of the tracked robot: position in maze units, heading in radians.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: [f32; 2],
    pub heading: f32,
}

impl Pose {
    /// Pose at the maze origin facing along +x. Used whenever there is nothing to sample.
    pub const ORIGIN: Pose = Pose {
        position: [0.0, 0.0],
        heading: 0.0,
    };

    #[inline]
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            position: [x, y],
            heading,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position[1]
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// One timestamped entry of a trajectory profile.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Seconds from the start of the run.
    pub time: f32,
    pub pose: Pose,
}

impl Keyframe {
    #[inline]
    pub fn new(time: f32, pose: Pose) -> Self {
        Self { time, pose }
    }
}

impl From<(f32, Pose)> for Keyframe {
    fn from((time, pose): (f32, Pose)) -> Self {
        Self { time, pose }
    }
}
