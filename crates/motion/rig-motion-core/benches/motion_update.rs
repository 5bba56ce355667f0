use criterion::{criterion_group, criterion_main, Criterion};
use rig_motion_core::{
    ids::{ParamId, ParamInterner},
    model::RigModel,
    parse_motion_json, Config, Motion, PlaybackEntry,
};
use serde_json::json;

struct BenchModel {
    params: Vec<(ParamId, f32)>,
}

impl RigModel for BenchModel {
    fn parameter_index(&self, id: ParamId) -> Option<usize> {
        self.params.iter().position(|(p, _)| *p == id)
    }
    fn parameter_value(&self, index: usize) -> f32 {
        self.params[index].1
    }
    fn set_parameter_value(&mut self, index: usize, value: f32) {
        self.params[index].1 = value;
    }
    fn part_index(&self, _id: ParamId) -> Option<usize> {
        None
    }
    fn part_opacity(&self, _index: usize) -> f32 {
        1.0
    }
    fn set_part_opacity(&mut self, _index: usize, _value: f32) {}
    fn set_model_opacity(&mut self, _value: f32) {}
}

/// Looping clip with a bezier curve per parameter, exercising the Cardano
/// inversion path on every frame.
fn build_clip_json(param_count: usize) -> String {
    let curves: Vec<_> = (0..param_count)
        .map(|i| {
            json!({
                "target": "Parameter",
                "id": format!("Param{i}"),
                "segments": [0.0, 0.0, 1.0, 0.7, 0.1, 2.3, 0.9, 3.0, 1.0],
            })
        })
        .collect();
    json!({
        "meta": {
            "duration": 3.0,
            "loop": true,
            "fps": 30.0,
            "curveCount": param_count,
            "totalSegmentCount": param_count,
            "totalPointCount": param_count * 4,
            "userDataCount": 0,
        },
        "curves": curves,
    })
    .to_string()
}

fn bench_update(c: &mut Criterion) {
    let mut interner = ParamInterner::new();
    let clip = parse_motion_json(&build_clip_json(32), &mut interner).expect("bench clip");
    let mut motion = Motion::from_clip(clip, &Config::default());
    motion.fade_in_seconds = 0.5;
    let mut model = BenchModel {
        params: (0..32)
            .map(|i| (interner.get(&format!("Param{i}")).expect("interned"), 0.0))
            .collect(),
    };
    let mut entry = PlaybackEntry {
        available: true,
        ..PlaybackEntry::default()
    };

    let mut clock = 0.0f32;
    c.bench_function("update_parameters/32_bezier_curves", |b| {
        b.iter(|| {
            clock += 1.0 / 60.0;
            motion.update_parameters(&mut model, &mut entry, clock)
        })
    });
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
