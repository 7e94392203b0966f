use criterion::{black_box, criterion_group, criterion_main, Criterion};

use marrow_animation_core::{
    config::Config,
    data::{AnimationClip, Node, NodeChannel, QuatKey, VectorKey},
    hierarchy::evaluate_pose,
    rig::Rig,
    Mat4, Quat, Vec3,
};

const CHAIN_LEN: usize = 60;
const KEYS_PER_TRACK: usize = 32;

fn bone_name(i: usize) -> String {
    format!("bone{i}")
}

fn build_chain() -> Node {
    let mut node = Node::new(&bone_name(CHAIN_LEN - 1), Mat4::from_translation(0.0, 1.0, 0.0));
    for i in (0..CHAIN_LEN - 1).rev() {
        let mut parent = Node::new(&bone_name(i), Mat4::from_translation(0.0, 1.0, 0.0));
        parent.children.push(node);
        node = parent;
    }
    node
}

fn build_clip() -> AnimationClip {
    let channels = (0..CHAIN_LEN)
        .map(|i| {
            let position_keys = (0..KEYS_PER_TRACK)
                .map(|k| VectorKey {
                    time: k as f32,
                    value: Vec3::new(k as f32 * 0.01, 1.0, 0.0),
                })
                .collect();
            let rotation_keys = (0..KEYS_PER_TRACK)
                .map(|k| QuatKey {
                    time: k as f32,
                    value: Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), k as f32 * 0.05),
                })
                .collect();
            NodeChannel {
                node: bone_name(i),
                position_keys,
                rotation_keys,
                scaling_keys: vec![VectorKey {
                    time: 0.0,
                    value: Vec3::ONE,
                }],
            }
        })
        .collect();
    AnimationClip {
        name: "bench".into(),
        duration_ticks: (KEYS_PER_TRACK - 1) as f32,
        ticks_per_second: 30.0,
        channels,
    }
}

fn bench_pose_step(c: &mut Criterion) {
    let root = build_chain();
    let clip = build_clip();
    let mut rig = Rig::new(&Config::default());
    for i in 0..CHAIN_LEN {
        rig.register_bone(&bone_name(i), Mat4::IDENTITY).unwrap();
    }

    c.bench_function("evaluate_pose_60_bones", |b| {
        let mut t = 0.0f32;
        b.iter(|| {
            t = (t + 0.37) % (KEYS_PER_TRACK - 1) as f32;
            black_box(evaluate_pose(&mut rig, &clip, t, &root))
        })
    });
}

criterion_group!(benches, bench_pose_step);
criterion_main!(benches);
