//! Pose interpolation:
//! - lerp on position (component-wise)
//! - shortest-arc lerp on heading
//! - `sample` ties an index lookup to the interpolation (no extrapolation past the ends)

use std::f32::consts::{PI, TAU};

use crate::index::TimestampIndex;
use crate::pose::Pose;

#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: [f32; 2], b: [f32; 2], t: f32) -> [f32; 2] {
    [lerp_f32(a[0], b[0], t), lerp_f32(a[1], b[1], t)]
}

/// Wrap an angle into [-π, π).
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    (a + PI).rem_euclid(TAU) - PI
}

/// Signed shortest angular distance from `a0` to `a1`, in [-π, π).
#[inline]
pub fn shortest_delta(a0: f32, a1: f32) -> f32 {
    (a1 - a0 + 3.0 * PI).rem_euclid(TAU) - PI
}

/// Heading interpolation along the shortest arc. The result is normalized.
#[inline]
pub fn lerp_angle(a0: f32, a1: f32, t: f32) -> f32 {
    normalize_angle(a0 + shortest_delta(a0, a1) * t)
}

/// Interpolate between two keyframe poses at local fraction `t` in [0, 1].
/// The endpoints are returned untouched so keyframe poses survive exactly.
pub fn interpolate(before: &Pose, after: &Pose, t: f32) -> Pose {
    if t <= 0.0 {
        return *before;
    }
    if t >= 1.0 {
        return *after;
    }
    Pose {
        position: lerp_vec2(before.position, after.position, t),
        heading: lerp_angle(before.heading, after.heading, t),
    }
}

/// Pose at `time` over an indexed profile. Empty index yields [`Pose::ORIGIN`].
pub fn sample(index: &TimestampIndex, time: f32) -> Pose {
    let seg = index.segment(time);
    match (index.get(seg.before), index.get(seg.after)) {
        (Some(before), Some(after)) if seg.before != seg.after => {
            interpolate(&before.pose, &after.pose, seg.t)
        }
        (Some(only), _) => only.pose,
        _ => Pose::ORIGIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: f32, b: f32, eps: f32) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn endpoints_are_exact() {
        let a = Pose::new(1.0, 2.0, 3.0);
        let b = Pose::new(-4.0, 5.0, -3.0);
        assert_eq!(interpolate(&a, &b, 0.0), a);
        assert_eq!(interpolate(&a, &b, 1.0), b);
        assert_eq!(interpolate(&a, &b, -2.0), a);
        assert_eq!(interpolate(&a, &b, 7.0), b);
    }

    #[test]
    fn heading_crosses_pi_the_short_way() {
        let a0 = 179f32.to_radians();
        let a1 = (-179f32).to_radians();
        let mid = lerp_angle(a0, a1, 0.5);
        // Halfway lands on ±π, never near 0.
        approx(mid.abs(), PI, 1e-4);
    }

    #[test]
    fn heading_sweep_never_exceeds_pi() {
        let samples = [-3.1, -2.0, -0.5, 0.0, 0.4, 1.9, 3.1, 6.0, -7.5];
        for &a0 in &samples {
            for &a1 in &samples {
                let total = shortest_delta(a0, a1).abs();
                assert!(total <= PI + 1e-5, "a0={a0} a1={a1} delta={total}");
                for step in 0..=10 {
                    let t = step as f32 / 10.0;
                    let h = lerp_angle(a0, a1, t);
                    let travelled = shortest_delta(normalize_angle(a0), h).abs();
                    assert!(travelled <= total + 1e-4, "a0={a0} a1={a1} t={t}");
                }
            }
        }
    }

    #[test]
    fn quarter_turn_midpoint() {
        let a = Pose::new(1.0, 0.0, 0.0);
        let b = Pose::new(1.0, 1.0, FRAC_PI_2);
        let p = interpolate(&a, &b, 0.5);
        approx(p.x(), 1.0, 1e-6);
        approx(p.y(), 0.5, 1e-6);
        approx(p.heading, FRAC_PI_2 / 2.0, 1e-5);
    }

    #[test]
    fn normalize_range() {
        for a in [-10.0f32, -PI, 0.0, PI, 4.0, 100.0] {
            let n = normalize_angle(a);
            assert!((-PI..PI + 1e-6).contains(&n), "{a} -> {n}");
        }
    }

    #[test]
    fn sample_empty_is_origin() {
        assert_eq!(sample(&TimestampIndex::default(), 3.0), Pose::ORIGIN);
    }
}
