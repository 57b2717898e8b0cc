use bevy::prelude::*;

/// Marker for entities whose `Transform` follows the replayed pose
/// (typically the robot model).
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct ReplayTarget;

/// Optional per-target offset applied on top of the mapped pose, e.g. to lift a
/// model whose origin is not at its base.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct ReplayOffset {
    pub translation: Vec3,
    pub heading: f32,
}
