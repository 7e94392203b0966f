//! Canonical clip and scene-graph data model.
//!
//! Channels are read-only input to the core: three independent ordered key
//! sequences per animated node. Every sequence has at least one entry; a
//! single entry means the value is constant for all time.

use serde::{Deserialize, Serialize};

use marrow_math_core::{Mat4, Quat, Vec3};

/// A (time, vector) keyframe; time is in clip ticks, monotonically
/// increasing within a sequence.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct VectorKey {
    pub time: f32,
    pub value: Vec3,
}

/// A (time, unit quaternion) keyframe.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuatKey {
    pub time: f32,
    pub value: Quat,
}

/// Per-node animation channel: independent position/rotation/scale tracks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NodeChannel {
    /// Name of the node this channel drives.
    pub node: String,
    pub position_keys: Vec<VectorKey>,
    pub rotation_keys: Vec<QuatKey>,
    pub scaling_keys: Vec<VectorKey>,
}

/// One animation clip: a set of node channels over a tick timeline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    /// Authored duration in ticks. May disagree with the key data; prefer
    /// [`AnimationClip::max_key_time`] when building loop windows.
    pub duration_ticks: f32,
    /// 0 means unspecified; the clock substitutes its default rate.
    pub ticks_per_second: f32,
    pub channels: Vec<NodeChannel>,
}

impl AnimationClip {
    /// Channel driving `node`, if any. Nodes without a channel keep their
    /// bind-time transform during evaluation.
    pub fn channel_for(&self, node: &str) -> Option<&NodeChannel> {
        self.channels.iter().find(|c| c.node == node)
    }

    /// Largest key time across every sequence of every channel.
    pub fn max_key_time(&self) -> f32 {
        let mut max = 0.0f32;
        for ch in &self.channels {
            for k in &ch.position_keys {
                max = max.max(k.time);
            }
            for k in &ch.rotation_keys {
                max = max.max(k.time);
            }
            for k in &ch.scaling_keys {
                max = max.max(k.time);
            }
        }
        max
    }

    /// Validate basic invariants (non-empty sequences, finite non-decreasing
    /// times, positive duration).
    pub fn validate_basic(&self) -> Result<(), String> {
        if !self.duration_ticks.is_finite() || self.duration_ticks <= 0.0 {
            return Err("AnimationClip.duration_ticks must be > 0".into());
        }
        for ch in &self.channels {
            if ch.position_keys.is_empty()
                || ch.rotation_keys.is_empty()
                || ch.scaling_keys.is_empty()
            {
                return Err(format!(
                    "channel '{}' has an empty key sequence",
                    ch.node
                ));
            }
            check_times(&ch.node, ch.position_keys.iter().map(|k| k.time))?;
            check_times(&ch.node, ch.rotation_keys.iter().map(|k| k.time))?;
            check_times(&ch.node, ch.scaling_keys.iter().map(|k| k.time))?;
        }
        Ok(())
    }
}

fn check_times(node: &str, times: impl Iterator<Item = f32>) -> Result<(), String> {
    let mut last = -f32::INFINITY;
    for t in times {
        if !t.is_finite() {
            return Err(format!("key time must be finite for '{node}'"));
        }
        if t < last {
            return Err(format!("key times must be non-decreasing for '{node}'"));
        }
        last = t;
    }
    Ok(())
}

/// A node in the imported scene hierarchy. Exactly one root; finite and
/// acyclic by construction of the importer. Read-only during evaluation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub name: String,
    /// Bind-time local transform.
    pub transform: Mat4,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: &str, transform: Mat4) -> Self {
        Self {
            name: name.to_string(),
            transform,
            children: Vec::new(),
        }
    }

    /// Depth-first search by name (pre-order, same order evaluation visits).
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}
