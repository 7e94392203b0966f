//! Recursive pose evaluation over the node tree.
//!
//! One call is one full pre-order traversal: compose each node's (possibly
//! animated) local transform onto the accumulated parent transform, and for
//! registered bones write `global_inverse * global * offset` into the rig.
//! Callers treat the produced palette as atomic; partial results are never
//! observable because the palette is copied out after the walk completes.

use crate::data::{AnimationClip, Node};
use crate::rig::Rig;
use crate::sampling::{sample_position, sample_rotation, sample_scaling};
use marrow_math_core::Mat4;

/// Evaluate `clip` at `time_ticks` over the tree under `root`, returning the
/// bone palette in registration order.
///
/// Nodes without a channel keep their bind-time transform; node names with
/// no registered bone contribute to the accumulated transform only. Sibling
/// order follows the order children appear in the tree.
pub fn evaluate_pose(rig: &mut Rig, clip: &AnimationClip, time_ticks: f32, root: &Node) -> Vec<Mat4> {
    evaluate_node(rig, clip, time_ticks, root, Mat4::IDENTITY);
    let mut palette = Vec::with_capacity(rig.bone_count());
    rig.write_palette(&mut palette);
    palette
}

fn evaluate_node(rig: &mut Rig, clip: &AnimationClip, time: f32, node: &Node, parent: Mat4) {
    let mut local = node.transform;
    if let Some(channel) = clip.channel_for(&node.name) {
        let scaling = sample_scaling(channel, time);
        let rotation = sample_rotation(channel, time);
        let position = sample_position(channel, time);
        // Standard TRS order: scale first, then rotate, then translate.
        local = Mat4::from_translation(position.x, position.y, position.z)
            * Mat4::from_quat(rotation)
            * Mat4::from_scale(scaling.x, scaling.y, scaling.z);
    }

    let global = parent * local;
    if let Some(idx) = rig.bone_index(&node.name) {
        let final_transform = rig.global_inverse() * global * rig.offset(idx);
        rig.set_final_transform(idx, final_transform);
    }

    for child in &node.children {
        evaluate_node(rig, clip, time, child, global);
    }
}
