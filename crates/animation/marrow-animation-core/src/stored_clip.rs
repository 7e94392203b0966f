//! Stored-clip JSON loader.
//!
//! Parses the exported clip schema into the canonical [`AnimationClip`]:
//!
//! ```json
//! {
//!   "name": "walk",
//!   "duration": 2.6667,
//!   "ticksPerSecond": 30,
//!   "channels": [
//!     {
//!       "node": "hip",
//!       "positionKeys": [{ "time": 0.0, "value": [0, 1, 0] }],
//!       "rotationKeys": [{ "time": 0.0, "value": [0, 0, 0, 1] }],
//!       "scalingKeys":  [{ "time": 0.0, "value": [1, 1, 1] }]
//!     }
//!   ]
//! }
//! ```
//!
//! Times are ticks; quaternions are (x, y, z, w). Basic validation
//! (non-empty sequences, non-decreasing finite times, positive duration)
//! runs after conversion.

use serde::Deserialize;

use crate::data::{AnimationClip, NodeChannel, QuatKey, VectorKey};
use crate::error::ClipParseError;
use marrow_math_core::{Quat, Vec3};

pub fn parse_stored_clip_json(s: &str) -> Result<AnimationClip, ClipParseError> {
    let sc: StoredClip =
        serde_json::from_str(s).map_err(|e| ClipParseError::Parse(e.to_string()))?;

    let mut channels = Vec::with_capacity(sc.channels.len());
    for ch in sc.channels {
        channels.push(NodeChannel {
            node: ch.node,
            position_keys: ch
                .position_keys
                .iter()
                .map(|k| VectorKey {
                    time: k.time as f32,
                    value: Vec3::new(k.value[0] as f32, k.value[1] as f32, k.value[2] as f32),
                })
                .collect(),
            rotation_keys: ch
                .rotation_keys
                .iter()
                .map(|k| QuatKey {
                    time: k.time as f32,
                    value: Quat::new(
                        k.value[0] as f32,
                        k.value[1] as f32,
                        k.value[2] as f32,
                        k.value[3] as f32,
                    ),
                })
                .collect(),
            scaling_keys: ch
                .scaling_keys
                .iter()
                .map(|k| VectorKey {
                    time: k.time as f32,
                    value: Vec3::new(k.value[0] as f32, k.value[1] as f32, k.value[2] as f32),
                })
                .collect(),
        });
    }

    let clip = AnimationClip {
        name: sc.name,
        duration_ticks: sc.duration as f32,
        ticks_per_second: sc.ticks_per_second.unwrap_or(0.0) as f32,
        channels,
    };
    clip.validate_basic().map_err(ClipParseError::Invalid)?;
    log::debug!(
        "loaded clip '{}' ({} channels, {} ticks)",
        clip.name,
        clip.channels.len(),
        clip.duration_ticks
    );
    Ok(clip)
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct StoredClip {
    pub name: String,
    /// Ticks.
    pub duration: f64,
    #[serde(rename = "ticksPerSecond")]
    pub ticks_per_second: Option<f64>,
    pub channels: Vec<ScChannel>,
}

#[derive(Debug, Deserialize)]
struct ScChannel {
    pub node: String,
    #[serde(rename = "positionKeys")]
    pub position_keys: Vec<ScVectorKey>,
    #[serde(rename = "rotationKeys")]
    pub rotation_keys: Vec<ScQuatKey>,
    #[serde(rename = "scalingKeys")]
    pub scaling_keys: Vec<ScVectorKey>,
}

#[derive(Debug, Deserialize)]
struct ScVectorKey {
    pub time: f64,
    pub value: [f64; 3],
}

#[derive(Debug, Deserialize)]
struct ScQuatKey {
    pub time: f64,
    pub value: [f64; 4],
}
