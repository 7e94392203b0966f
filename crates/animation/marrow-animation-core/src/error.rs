//! Typed errors for the animation core.
//!
//! Precondition violations that a source-asset pipeline can trip (degenerate
//! root transform, overfull vertex influences, out-of-table clip ids) are
//! recoverable errors here; the caller picks the fallback. Missing channels
//! and unregistered node names are defined default paths, not errors.

use thiserror::Error;

use marrow_math_core::DegenerateMatrixError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RigError {
    #[error(transparent)]
    DegenerateMatrix(#[from] DegenerateMatrixError),

    /// Strict bracket search only; the default sampling path clamps instead.
    #[error("time {time} is past the last key at {last}")]
    OutOfRangeTime { time: f32, last: f32 },

    #[error("vertex already carries {max} bone influences")]
    TooManyInfluences { max: usize },

    #[error("rig is full ({max} bones)")]
    TooManyBones { max: usize },

    #[error("no clip window registered for clip {0}")]
    UnknownClip(usize),
}

/// Errors produced while parsing stored-clip JSON.
#[derive(Debug, Error)]
pub enum ClipParseError {
    #[error("clip json parse error: {0}")]
    Parse(String),
    #[error("invalid clip: {0}")]
    Invalid(String),
}
