//! Marrow Animation Core (engine-agnostic)
//!
//! Turns a time value plus a node hierarchy with per-node keyframe channels
//! into a dense palette of final bone-space matrices ready for GPU skinning.
//! Scene import and rendering live in adapters; this crate owns the data
//! model, channel sampling, the bone registry, the recursive hierarchy
//! evaluator, and the playback clock.

pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod hierarchy;
pub mod interp;
pub mod rig;
pub mod sampling;
pub mod skinning;
pub mod stored_clip;

// Re-exports for consumers (adapters)
pub use clock::{ClipWindow, PlaybackClock};
pub use config::Config;
pub use data::{AnimationClip, Node, NodeChannel, QuatKey, VectorKey};
pub use error::{ClipParseError, RigError};
pub use hierarchy::evaluate_pose;
pub use rig::{BoneIndex, BoneRecord, Rig};
pub use sampling::{sample_position, sample_rotation, sample_scaling};
pub use skinning::{VertexInfluences, MAX_INFLUENCES};
pub use stored_clip::parse_stored_clip_json;
pub use marrow_math_core::{DegenerateMatrixError, Mat4, Quat, Vec3};
