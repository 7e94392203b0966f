//! Core configuration for marrow-animation-core.

use serde::{Deserialize, Serialize};

/// Sizing and fallback knobs shared by the rig and the clock.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Upper bound on registered bones; the renderer sizes its uniform
    /// array to this.
    pub max_bones: usize,

    /// Rate used when a clip reports 0 ticks per second.
    pub default_ticks_per_second: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bones: 100,
            default_ticks_per_second: 25.0,
        }
    }
}
