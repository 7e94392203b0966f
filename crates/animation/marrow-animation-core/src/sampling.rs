//! Keyframe bracket search and per-channel interpolation.
//!
//! Each channel is sampled independently: locate the bracketing key pair by
//! a linear scan from the start, derive a [0,1] factor from the segment
//! endpoints, then lerp (position/scale) or slerp (rotation).
//!
//! Out-of-range times clamp at both ends: below the first key resolves to
//! the first segment, at or past the last key to the last segment. The
//! `_strict` variant reports a typed error for the high end instead, for
//! callers that treat an overrun clock as a bug.

use crate::data::{NodeChannel, QuatKey, VectorKey};
use crate::error::RigError;
use crate::interp::functions::{lerp_vec3, slerp_quat};
use marrow_math_core::{Quat, Vec3};

/// A keyframe with a timestamp; lets the bracket search work across key
/// value types.
pub trait Keyed {
    fn time(&self) -> f32;
}

impl Keyed for VectorKey {
    #[inline]
    fn time(&self) -> f32 {
        self.time
    }
}

impl Keyed for QuatKey {
    #[inline]
    fn time(&self) -> f32 {
        self.time
    }
}

/// Index `i` of the segment such that `time < keys[i + 1].time`, scanning
/// linearly from the start. Requires at least 2 keys. Times past the last
/// key clamp to the final segment.
pub fn locate_bracket<K: Keyed>(time: f32, keys: &[K]) -> usize {
    debug_assert!(keys.len() >= 2);
    for i in 0..keys.len() - 1 {
        if time < keys[i + 1].time() {
            return i;
        }
    }
    keys.len() - 2
}

/// Strict variant: a time at or past the last key is an
/// [`RigError::OutOfRangeTime`] rather than a clamp.
pub fn locate_bracket_strict<K: Keyed>(time: f32, keys: &[K]) -> Result<usize, RigError> {
    debug_assert!(keys.len() >= 2);
    let last = keys[keys.len() - 1].time();
    if time >= last {
        return Err(RigError::OutOfRangeTime { time, last });
    }
    Ok(locate_bracket(time, keys))
}

/// Blend factor for `time` within segment `i`, constrained to [0, 1].
#[inline]
fn segment_factor<K: Keyed>(time: f32, keys: &[K], i: usize) -> f32 {
    let t0 = keys[i].time();
    let t1 = keys[i + 1].time();
    let denom = (t1 - t0).max(f32::EPSILON);
    ((time - t0) / denom).clamp(0.0, 1.0)
}

/// Interpolated position at `time`; single-key channels are constant.
pub fn sample_position(channel: &NodeChannel, time: f32) -> Vec3 {
    sample_vector_keys(&channel.position_keys, time)
}

/// Interpolated scale at `time`; single-key channels are constant.
pub fn sample_scaling(channel: &NodeChannel, time: f32) -> Vec3 {
    sample_vector_keys(&channel.scaling_keys, time)
}

fn sample_vector_keys(keys: &[VectorKey], time: f32) -> Vec3 {
    if keys.len() == 1 {
        return keys[0].value;
    }
    let i = locate_bracket(time, keys);
    let factor = segment_factor(time, keys, i);
    lerp_vec3(keys[i].value, keys[i + 1].value, factor)
}

/// Interpolated rotation at `time`, renormalized to counter floating-point
/// drift; single-key channels are constant.
pub fn sample_rotation(channel: &NodeChannel, time: f32) -> Quat {
    let keys = &channel.rotation_keys;
    if keys.len() == 1 {
        return keys[0].value;
    }
    let i = locate_bracket(time, keys);
    let factor = segment_factor(time, keys, i);
    slerp_quat(keys[i].value, keys[i + 1].value, factor)
}
