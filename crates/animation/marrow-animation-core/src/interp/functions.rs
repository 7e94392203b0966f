//! Interpolation primitives:
//! - lerp for scalars and vectors
//! - quaternion SLERP with shortest-arc sign correction and an NLERP
//!   fallback for nearly parallel inputs

use marrow_math_core::{Quat, Vec3};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    Vec3::new(
        lerp_f32(a.x, b.x, t),
        lerp_f32(a.y, b.y, t),
        lerp_f32(a.z, b.z, t),
    )
}

/// Dot threshold above which SLERP degrades to NLERP; sin(theta) is too
/// small to divide by beyond this point.
const SLERP_NLERP_CUTOFF: f32 = 0.9995;

#[inline]
fn nlerp_quat(a: Quat, b: Quat, t: f32) -> Quat {
    Quat::new(
        lerp_f32(a.x, b.x, t),
        lerp_f32(a.y, b.y, t),
        lerp_f32(a.z, b.z, t),
        lerp_f32(a.w, b.w, t),
    )
    .normalized()
}

/// Spherical interpolation along the shortest arc.
/// If dot < 0, negate the second quaternion to ensure the shortest path.
/// Always returns a normalized quaternion.
pub fn slerp_quat(a: Quat, mut b: Quat, t: f32) -> Quat {
    let mut d = a.dot(b);
    if d < 0.0 {
        b = -b;
        d = -d;
    }
    if d > SLERP_NLERP_CUTOFF {
        return nlerp_quat(a, b, t);
    }
    let theta = d.clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    let wa = ((1.0 - t) * theta).sin() / sin_theta;
    let wb = (t * theta).sin() / sin_theta;
    Quat::new(
        a.x * wa + b.x * wb,
        a.y * wa + b.y * wb,
        a.z * wa + b.z * wb,
        a.w * wa + b.w * wb,
    )
    .normalized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marrow_math_core::Vec3 as V;

    #[test]
    fn slerp_endpoints_match_inputs() {
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle(V::new(0.0, 1.0, 0.0), std::f32::consts::FRAC_PI_2);
        let s0 = slerp_quat(a, b, 0.0);
        let s1 = slerp_quat(a, b, 1.0);
        assert!((s0.dot(a).abs() - 1.0).abs() < 1e-5);
        assert!((s1.dot(b).abs() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn slerp_takes_shortest_arc() {
        let a = Quat::from_axis_angle(V::new(0.0, 1.0, 0.0), 0.1);
        let b = -Quat::from_axis_angle(V::new(0.0, 1.0, 0.0), 0.3);
        let mid = slerp_quat(a, b, 0.5);
        let expect = Quat::from_axis_angle(V::new(0.0, 1.0, 0.0), 0.2);
        assert!(mid.dot(expect).abs() > 0.99999);
    }

    #[test]
    fn slerp_output_is_unit() {
        let a = Quat::from_axis_angle(V::new(1.0, 0.0, 0.0), 0.7);
        let b = Quat::from_axis_angle(V::new(0.0, 0.0, 1.0), 2.1);
        for i in 0..=10 {
            let q = slerp_quat(a, b, i as f32 / 10.0);
            assert!((q.length() - 1.0).abs() < 1e-5);
        }
    }
}
