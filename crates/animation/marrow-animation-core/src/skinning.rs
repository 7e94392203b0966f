//! Per-vertex bone influences.
//!
//! Fixed capacity of 4 (bone index, weight) pairs per vertex, matching the
//! vertex attribute layout consumed by the skinning shader. A fifth
//! influence is either a typed error or an evict-the-weakest, depending on
//! which entry point the importer calls.

use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::rig::BoneIndex;

/// Maximum bones influencing a single vertex.
pub const MAX_INFLUENCES: usize = 4;

/// Influence slots for one vertex. A slot with weight 0.0 is free.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct VertexInfluences {
    pub bones: [u32; MAX_INFLUENCES],
    pub weights: [f32; MAX_INFLUENCES],
}

impl VertexInfluences {
    /// Occupied slot count.
    pub fn count(&self) -> usize {
        self.weights.iter().filter(|w| **w != 0.0).count()
    }

    /// Add an influence into the first free slot.
    pub fn push(&mut self, bone: BoneIndex, weight: f32) -> Result<(), RigError> {
        for i in 0..MAX_INFLUENCES {
            if self.weights[i] == 0.0 {
                self.bones[i] = bone.0;
                self.weights[i] = weight;
                return Ok(());
            }
        }
        Err(RigError::TooManyInfluences {
            max: MAX_INFLUENCES,
        })
    }

    /// Add an influence, evicting the weakest existing one when full (only
    /// if the new weight is heavier). Returns whether the influence landed.
    /// Callers using this policy should renormalize afterwards.
    pub fn push_or_replace_weakest(&mut self, bone: BoneIndex, weight: f32) -> bool {
        if self.push(bone, weight).is_ok() {
            return true;
        }
        let mut weakest = 0;
        for i in 1..MAX_INFLUENCES {
            if self.weights[i] < self.weights[weakest] {
                weakest = i;
            }
        }
        if weight > self.weights[weakest] {
            self.bones[weakest] = bone.0;
            self.weights[weakest] = weight;
            true
        } else {
            false
        }
    }

    /// Scale weights so they sum to 1.0; all-zero influences are left as is.
    pub fn normalize_weights(&mut self) {
        let total: f32 = self.weights.iter().sum();
        if total > 0.0 {
            let inv = total.recip();
            for w in &mut self.weights {
                *w *= inv;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifth_influence_is_an_error() {
        let mut v = VertexInfluences::default();
        for i in 0..MAX_INFLUENCES {
            v.push(BoneIndex(i as u32), 0.25).unwrap();
        }
        assert_eq!(
            v.push(BoneIndex(9), 0.5),
            Err(RigError::TooManyInfluences {
                max: MAX_INFLUENCES
            })
        );
    }

    #[test]
    fn weakest_is_evicted_only_for_heavier_weights() {
        let mut v = VertexInfluences::default();
        for (i, w) in [0.4, 0.3, 0.2, 0.1].iter().enumerate() {
            v.push(BoneIndex(i as u32), *w).unwrap();
        }
        assert!(!v.push_or_replace_weakest(BoneIndex(8), 0.05));
        assert!(v.push_or_replace_weakest(BoneIndex(9), 0.25));
        assert!(v.bones.contains(&9));
        assert!(!v.weights.contains(&0.1));
    }

    #[test]
    fn normalize_weights_sums_to_one() {
        let mut v = VertexInfluences::default();
        v.push(BoneIndex(0), 2.0).unwrap();
        v.push(BoneIndex(1), 6.0).unwrap();
        v.normalize_weights();
        let sum: f32 = v.weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!((v.weights[0] - 0.25).abs() < 1e-6);
    }
}
