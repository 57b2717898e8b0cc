//! Trajectory profile: a time-keyed mapping of poses.
//!
//! Keys are unique and insertion order carries no meaning. Ordering is the job
//! of [`crate::index::TimestampIndex`], which is derived from a profile when it
//! is installed into an engine.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::ReplayError;
use crate::pose::{Keyframe, Pose};

/// Map a time to a hashable key. `-0.0` and `0.0` share a key.
#[inline]
fn time_key(time: f32) -> u32 {
    (time + 0.0).to_bits()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProfile", into = "RawProfile")]
pub struct TrajectoryProfile {
    frames: Vec<Keyframe>,
    slots: HashMap<u32, usize>,
}

/// Serialized shape: `{"keyframes": [{"time": .., "pose": {..}}, ..]}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct RawProfile {
    #[serde(default)]
    keyframes: Vec<Keyframe>,
}

impl TrajectoryProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a profile from keyframes in any order. A later keyframe with the same
    /// time replaces an earlier one.
    pub fn from_keyframes<I>(keyframes: I) -> Result<Self, ReplayError>
    where
        I: IntoIterator,
        I::Item: Into<Keyframe>,
    {
        let mut profile = Self::new();
        for kf in keyframes {
            let kf = kf.into();
            profile.insert(kf.time, kf.pose)?;
        }
        Ok(profile)
    }

    /// Insert or replace the pose at `time`. Returns the previous pose for that key.
    pub fn insert(&mut self, time: f32, pose: Pose) -> Result<Option<Pose>, ReplayError> {
        if !time.is_finite() {
            return Err(ReplayError::NonFiniteTime { time });
        }
        let time = time + 0.0;
        match self.slots.get(&time_key(time)) {
            Some(&slot) => {
                let prev = std::mem::replace(&mut self.frames[slot].pose, pose);
                Ok(Some(prev))
            }
            None => {
                self.slots.insert(time_key(time), self.frames.len());
                self.frames.push(Keyframe { time, pose });
                Ok(None)
            }
        }
    }

    /// Pose stored at exactly `time`, if any.
    pub fn get(&self, time: f32) -> Option<&Pose> {
        self.slots
            .get(&time_key(time))
            .map(|&slot| &self.frames[slot].pose)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Keyframes in insertion order.
    #[inline]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.frames
    }

    /// Parse the JSON shape used by fixtures and the web adapter.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let raw: RawProfile = serde_json::from_str(json)?;
        Self::try_from(raw)
    }
}

impl TryFrom<RawProfile> for TrajectoryProfile {
    type Error = ReplayError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        Self::from_keyframes(raw.keyframes)
    }
}

impl From<TrajectoryProfile> for RawProfile {
    fn from(profile: TrajectoryProfile) -> Self {
        RawProfile {
            keyframes: profile.frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_time_replaces_pose() {
        let mut p = TrajectoryProfile::new();
        assert_eq!(p.insert(1.0, Pose::new(1.0, 0.0, 0.0)).unwrap(), None);
        let prev = p.insert(1.0, Pose::new(2.0, 0.0, 0.0)).unwrap();
        assert_eq!(prev, Some(Pose::new(1.0, 0.0, 0.0)));
        assert_eq!(p.len(), 1);
        assert_eq!(p.get(1.0), Some(&Pose::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn negative_zero_is_same_key() {
        let mut p = TrajectoryProfile::new();
        p.insert(0.0, Pose::ORIGIN).unwrap();
        p.insert(-0.0, Pose::new(5.0, 5.0, 0.0)).unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.get(0.0).map(|pose| pose.x()), Some(5.0));
    }

    #[test]
    fn rejects_non_finite_time() {
        let mut p = TrajectoryProfile::new();
        assert!(matches!(
            p.insert(f32::NAN, Pose::ORIGIN),
            Err(ReplayError::NonFiniteTime { .. })
        ));
        assert!(p.insert(f32::NEG_INFINITY, Pose::ORIGIN).is_err());
        assert!(p.is_empty());
    }

    #[test]
    fn json_shape() {
        let json = r#"{"keyframes":[
            {"time": 2.0, "pose": {"position": [1.0, 1.0], "heading": 1.5707964}},
            {"time": 0.0, "pose": {"position": [0.0, 0.0], "heading": 0.0}}
        ]}"#;
        let p = TrajectoryProfile::from_json(json).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.keyframes()[0].time, 2.0);

        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["keyframes"].as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn missing_keyframes_is_empty_profile() {
        let p = TrajectoryProfile::from_json("{}").unwrap();
        assert!(p.is_empty());
    }
}
