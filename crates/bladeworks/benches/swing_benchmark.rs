//! # Swing Controller Benchmark
//!
//! REQUIREMENTS:
//! - Ticking a wielder is O(own swings), independent of other wielders
//! - 0 allocations per tick once swings are spawned
//!
//! Run with: `cargo bench --package bladeworks`

// Benchmarks don't need docs
#![allow(missing_docs)]

use std::sync::Arc;

use bladeworks::{
    ComboController, ComboKey, ComboPhase, EngineConfig, HitTarget, NoHooks, SpawnParams, TargetId,
    WeaponSwingDefinition, WeaponTypeId, WielderId, WielderInput,
};
use bladeworks_core::{CurveSegment, EasingKind};
use bladeworks_rendering::{AllStages, RenderPipeline};
use bladeworks_shared::{Aabb, SwingPalette, Vec2};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn blade() -> Arc<WeaponSwingDefinition> {
    let curve = vec![
        CurveSegment::new(EasingKind::SineOut, 0.0, -1.0, 0.2),
        CurveSegment::new(EasingKind::PolyIn, 0.25, -0.8, 1.75).with_exponent(3.0),
        CurveSegment::new(EasingKind::ExpOut, 0.85, 0.95, 0.05),
    ];
    let phases = vec![
        ComboPhase::new(curve.clone(), 100f32.to_radians(), 30, 80.0).with_squish_range(0.85),
        ComboPhase::new(curve, 120f32.to_radians(), 36, 88.0).flipped(true),
    ];
    let palette = SwingPalette::from_hex(&[0x0B1A_3AFF, 0x2A6A_C8FF, 0x9AE0_FFFF, 0xF0FF_FFFF]).unwrap();
    Arc::new(WeaponSwingDefinition::new(WeaponTypeId(1), "Bench Blade", phases, palette).unwrap())
}

fn ring_of_targets() -> Vec<HitTarget> {
    (0..16)
        .map(|i| {
            let center = Vec2::from_angle(i as f32 * std::f32::consts::TAU / 16.0) * 70.0;
            HitTarget {
                id: TargetId(i),
                bounds: Aabb::from_center_size(center, Vec2::splat(20.0)),
            }
        })
        .collect()
}

/// Benchmark: one game tick for 256 wielders mid-combo, 16 targets each.
fn bench_tick_wielders(c: &mut Criterion) {
    let blade = blade();
    let mut controller = ComboController::new(EngineConfig::default());
    let keys: Vec<ComboKey> = (0..256).map(|i| ComboKey::new(WielderId(i), WeaponTypeId(1))).collect();
    let targets = ring_of_targets();
    let held = WielderInput::new(Vec2::ZERO, true);
    for &key in &keys {
        controller.activate(key, &blade, SpawnParams::default());
    }

    c.bench_function("tick_256_wielders", |b| {
        b.iter(|| {
            for &key in &keys {
                controller.tick_wielder(black_box(key), &held, &targets, &mut NoHooks);
                if controller.can_activate(key) {
                    controller.activate(key, &blade, SpawnParams::default());
                }
            }
        });
    });
}

/// Benchmark: tick and record one swing's frame.
fn bench_tick_and_render(c: &mut Criterion) {
    let blade = blade();
    let mut controller = ComboController::new(EngineConfig::default());
    let key = ComboKey::new(WielderId(1), WeaponTypeId(1));
    let held = WielderInput::new(Vec2::ZERO, true);
    let mut pipeline = RenderPipeline::new(64, 256);
    controller.activate(key, &blade, SpawnParams::default());

    c.bench_function("tick_and_render_one_swing", |b| {
        b.iter(|| {
            controller.tick_wielder(key, &held, &[], &mut NoHooks);
            if let Some(swing) = controller.instances(key).next() {
                black_box(swing.render(&mut pipeline, &AllStages, &NoHooks).map(|draw| draw.commands().len()));
            }
            if controller.can_activate(key) {
                controller.activate(key, &blade, SpawnParams::default());
            }
        });
    });
}

criterion_group!(benches, bench_tick_wielders, bench_tick_and_render);
criterion_main!(benches);
