//! # Swing Render Benchmark
//!
//! REQUIREMENTS:
//! - A full six-stage frame records in well under a microsecond budget per swing
//! - 0 allocations per frame
//!
//! Run with: `cargo bench --package bladeworks_rendering`

// Benchmarks don't need docs
#![allow(missing_docs)]

use bladeworks_core::{TrailRingBuffer, TrailSample};
use bladeworks_rendering::{AllStages, RenderPipeline, SwingFrame, TextureId, WeaponVisuals};
use bladeworks_shared::{SwingPalette, Vec2};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn full_trail() -> TrailRingBuffer {
    let mut trail = TrailRingBuffer::new(60);
    for i in 0..60 {
        let rotation = i as f32 * 0.04;
        trail.push(TrailSample::new(Vec2::from_angle(rotation) * 96.0, rotation));
    }
    trail
}

/// Benchmark: record one complete frame with a full 60-sample trail.
fn bench_full_frame(c: &mut Criterion) {
    let trail = full_trail();
    let palette = SwingPalette::from_hex(&[
        0x0B_1A_3A_FF,
        0x16_3A_7A_FF,
        0x2A_6A_C8_FF,
        0x4A_A8_F0_FF,
        0x9A_E0_FF_FF,
        0xF0_FF_FF_FF,
    ])
    .unwrap();
    let visuals = WeaponVisuals {
        smear_textures: vec![Some(TextureId(10)), Some(TextureId(11)), Some(TextureId(12))],
        ..WeaponVisuals::default()
    };
    let mut pipeline = RenderPipeline::new(64, 256);

    c.bench_function("render_full_frame", |b| {
        b.iter(|| {
            let frame = SwingFrame {
                combo_step: 1,
                progression: black_box(0.5),
                anchor: Vec2::ZERO,
                tip: Vec2::from_angle(2.36) * 96.0,
                rotation: 2.36,
                angle_shift: 1.2,
                squish: 0.95,
                blade_length: 96.0,
                direction: 1.0,
                trail: &trail,
                palette: &palette,
                visuals: &visuals,
            };
            pipeline.render(&frame, &AllStages, |_| {}).commands().len()
        });
    });
}

criterion_group!(benches, bench_full_frame);
criterion_main!(benches);
