//! Bone registry and per-bone records.
//!
//! The mapping from bone name to dense index is insertion-ordered and
//! append-only; the index doubles as the slot in the output palette. All of
//! this state is owned by a [`Rig`] constructed at load time and passed by
//! reference into evaluation, never ambient.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::data::Node;
use crate::error::RigError;
use marrow_math_core::Mat4;

/// Dense bone index; slot in the output palette.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BoneIndex(pub u32);

impl BoneIndex {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Per-bone record: bind-pose offset set once at registration, final
/// transform overwritten whole once per evaluation pass.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BoneRecord {
    /// Inverse of the bone's rest-pose world transform.
    pub offset: Mat4,
    /// Most recently computed skinning matrix; identity until the first
    /// evaluation reaches this bone.
    pub final_transform: Mat4,
}

/// The skeleton definition plus mutable evaluation output.
///
/// Registry and offsets are written during load and read-only afterwards;
/// `final_transform`s are overwritten per evaluation call. Instances sharing
/// one skeleton either serialize evaluation calls or keep a palette each via
/// [`Rig::write_palette`].
#[derive(Clone, Debug)]
pub struct Rig {
    records: Vec<BoneRecord>,
    index_by_name: HashMap<String, BoneIndex>,
    global_inverse: Mat4,
    max_bones: usize,
}

impl Rig {
    pub fn new(cfg: &Config) -> Self {
        Self {
            records: Vec::new(),
            index_by_name: HashMap::new(),
            global_inverse: Mat4::IDENTITY,
            max_bones: cfg.max_bones,
        }
    }

    /// Store the inverse of the asset's root transform, applied as the final
    /// correction to every bone. A non-invertible root is a broken asset and
    /// surfaces as [`RigError::DegenerateMatrix`].
    pub fn set_root_transform(&mut self, root_transform: Mat4) -> Result<(), RigError> {
        self.global_inverse = root_transform.inverse()?;
        Ok(())
    }

    #[inline]
    pub fn global_inverse(&self) -> Mat4 {
        self.global_inverse
    }

    /// Register `name`, assigning the next dense index on first sighting.
    /// Re-registration returns the existing index and leaves the stored
    /// offset untouched (first registration wins).
    pub fn register_bone(&mut self, name: &str, offset: Mat4) -> Result<BoneIndex, RigError> {
        if let Some(&idx) = self.index_by_name.get(name) {
            return Ok(idx);
        }
        if self.records.len() >= self.max_bones {
            return Err(RigError::TooManyBones {
                max: self.max_bones,
            });
        }
        let idx = BoneIndex(self.records.len() as u32);
        self.records.push(BoneRecord {
            offset,
            final_transform: Mat4::IDENTITY,
        });
        self.index_by_name.insert(name.to_string(), idx);
        log::trace!("registered bone '{name}' as index {}", idx.0);
        Ok(idx)
    }

    #[inline]
    pub fn bone_index(&self, name: &str) -> Option<BoneIndex> {
        self.index_by_name.get(name).copied()
    }

    #[inline]
    pub fn bone_count(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn offset(&self, idx: BoneIndex) -> Mat4 {
        self.records[idx.as_usize()].offset
    }

    #[inline]
    pub fn final_transform(&self, idx: BoneIndex) -> Mat4 {
        self.records[idx.as_usize()].final_transform
    }

    #[inline]
    pub(crate) fn set_final_transform(&mut self, idx: BoneIndex, m: Mat4) {
        self.records[idx.as_usize()].final_transform = m;
    }

    /// Copy the current final transforms into `out`, resized to the bone
    /// count. Index order matches registration order.
    pub fn write_palette(&self, out: &mut Vec<Mat4>) {
        out.clear();
        out.extend(self.records.iter().map(|r| r.final_transform));
    }

    /// Names of registered bones with no node of the same name under `root`.
    ///
    /// Such bones keep a stale final transform across evaluations; run this
    /// once after load and treat a non-empty result as an asset defect.
    pub fn unreachable_bones(&self, root: &Node) -> Vec<String> {
        let mut missing: Vec<String> = self
            .index_by_name
            .keys()
            .filter(|name| root.find(name).is_none())
            .cloned()
            .collect();
        missing.sort();
        for name in &missing {
            log::warn!("bone '{name}' is not reachable from the node tree");
        }
        missing
    }
}
