//! Sorted timestamp cache and binary-search locator.
//!
//! Built once per installed profile (O(n log n)); every lookup afterwards is
//! O(log n). Nothing here runs per frame except `locate`/`segment`.

use crate::pose::Keyframe;
use crate::profile::TrajectoryProfile;

/// Bracketing keyframe pair for a query time.
/// `before == after` at or outside the ends of the profile, in which case `t` is 0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub before: usize,
    pub after: usize,
    /// Local fraction in [0, 1] between `before` and `after`.
    pub t: f32,
}

#[derive(Clone, Debug, Default)]
pub struct TimestampIndex {
    /// Keyframes sorted by ascending time.
    frames: Vec<Keyframe>,
}

impl TimestampIndex {
    /// Build the index from a profile, sorting its keys.
    pub fn build(profile: &TrajectoryProfile) -> Self {
        let mut frames = profile.keyframes().to_vec();
        frames.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { frames }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn frames(&self) -> &[Keyframe] {
        &self.frames
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<&Keyframe> {
        self.frames.get(i)
    }

    pub fn keys(&self) -> impl Iterator<Item = f32> + '_ {
        self.frames.iter().map(|k| k.time)
    }

    pub fn first_time(&self) -> Option<f32> {
        self.frames.first().map(|k| k.time)
    }

    pub fn last_time(&self) -> Option<f32> {
        self.frames.last().map(|k| k.time)
    }

    /// Index `i` with `keys[i] <= time < keys[i + 1]`.
    /// Clamps to 0 at or before the first key and to `last` at or after the last key.
    /// Returns 0 for an empty index.
    pub fn locate(&self, time: f32) -> usize {
        let n = self.frames.len();
        if n == 0 || time <= self.frames[0].time || time.is_nan() {
            return 0;
        }
        if time >= self.frames[n - 1].time {
            return n - 1;
        }
        // First key strictly greater than `time`; the one before it brackets.
        self.frames.partition_point(|k| k.time <= time) - 1
    }

    /// Resolve the bracketing pair and local fraction for `time`.
    pub fn segment(&self, time: f32) -> Segment {
        let i = self.locate(time);
        let n = self.frames.len();
        if n < 2 || i + 1 >= n || time <= self.frames[0].time {
            return Segment {
                before: i,
                after: i,
                t: 0.0,
            };
        }
        let t0 = self.frames[i].time;
        let t1 = self.frames[i + 1].time;
        let span = (t1 - t0).max(f32::EPSILON);
        Segment {
            before: i,
            after: i + 1,
            t: ((time - t0) / span).clamp(0.0, 1.0),
        }
    }

    /// Time of the first key strictly after `time`.
    pub fn next_key_after(&self, time: f32) -> Option<f32> {
        let i = self.frames.partition_point(|k| k.time <= time);
        self.frames.get(i).map(|k| k.time)
    }

    /// Time of the last key strictly before `time`.
    pub fn prev_key_before(&self, time: f32) -> Option<f32> {
        let i = self.frames.partition_point(|k| k.time < time);
        i.checked_sub(1).map(|j| self.frames[j].time)
    }
}
