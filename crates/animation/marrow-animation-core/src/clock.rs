//! Playback clock: wall-clock seconds plus a clip id to an intra-clip tick
//! value, looping within a per-clip window.
//!
//! Windows are data; build them from the clip's own timeline via
//! [`ClipWindow::from_clip`] rather than hand-tuning constants.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::data::AnimationClip;
use crate::error::RigError;

fn fmod(a: f32, b: f32) -> f32 {
    if b == 0.0 {
        return 0.0;
    }
    let m = a % b;
    if (m < 0.0 && b > 0.0) || (m > 0.0 && b < 0.0) {
        m + b
    } else {
        m
    }
}

/// Loop window for one clip on a shared tick timeline.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClipWindow {
    /// Loop length in ticks.
    pub duration: f32,
    /// Tick offset of the window start on the shared timeline.
    pub start_offset: f32,
    /// Per-clip rate override; `None` (or 0 in source data) falls back to
    /// the configured default.
    pub ticks_per_second: Option<f32>,
}

impl ClipWindow {
    /// Derive a window from the clip's own timeline: duration is the larger
    /// of the authored duration and the last key time, offset zero.
    pub fn from_clip(clip: &AnimationClip) -> Self {
        let duration = clip.duration_ticks.max(clip.max_key_time());
        let ticks_per_second = if clip.ticks_per_second != 0.0 {
            Some(clip.ticks_per_second)
        } else {
            None
        };
        Self {
            duration,
            start_offset: 0.0,
            ticks_per_second,
        }
    }
}

/// Maps (seconds, clip id) to clip time in ticks.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    windows: Vec<ClipWindow>,
    default_ticks_per_second: f32,
}

impl PlaybackClock {
    pub fn new(cfg: &Config) -> Self {
        Self {
            windows: Vec::new(),
            default_ticks_per_second: cfg.default_ticks_per_second,
        }
    }

    /// Append a window; the returned index is the clip id.
    pub fn push_window(&mut self, window: ClipWindow) -> usize {
        self.windows.push(window);
        self.windows.len() - 1
    }

    pub fn window(&self, clip: usize) -> Option<&ClipWindow> {
        self.windows.get(clip)
    }

    pub fn clip_count(&self) -> usize {
        self.windows.len()
    }

    /// `clip_time = (seconds * tps) mod duration + start_offset`.
    ///
    /// A zero-length window pins time to its start offset.
    pub fn clip_time(&self, seconds: f32, clip: usize) -> Result<f32, RigError> {
        let w = self
            .windows
            .get(clip)
            .ok_or(RigError::UnknownClip(clip))?;
        let tps = match w.ticks_per_second {
            Some(t) if t != 0.0 => t,
            _ => self.default_ticks_per_second,
        };
        let ticks = seconds * tps;
        if w.duration <= 0.0 {
            return Ok(w.start_offset);
        }
        Ok(fmod(ticks, w.duration) + w.start_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmod_matches_c_semantics() {
        assert!((fmod(5.0, 2.2) - 0.6).abs() < 1e-6);
        assert_eq!(fmod(3.0, 0.0), 0.0);
        assert!(fmod(-0.5, 2.0) >= 0.0);
    }

    #[test]
    fn zero_rate_falls_back_to_default() {
        let mut clock = PlaybackClock::new(&Config::default());
        let id = clock.push_window(ClipWindow {
            duration: 50.0,
            start_offset: 0.0,
            ticks_per_second: None,
        });
        // 25 ticks/s default: 1 second -> 25 ticks
        assert_eq!(clock.clip_time(1.0, id).unwrap(), 25.0);
    }
}
