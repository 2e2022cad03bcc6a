//! Two peers running the same swing from one 8-byte packet.

use std::sync::Arc;

use bladeworks::{
    apply_packet, decode_swing, encode_swing, ComboController, ComboKey, ComboPhase, EngineConfig, NoHooks,
    SpawnParams, WeaponSwingDefinition, WeaponTypeId, WielderId, WielderInput,
};
use bladeworks_core::{CurveSegment, EasingKind};
use bladeworks_shared::{SwingPalette, SwingSync, Vec2};

fn blade() -> Arc<WeaponSwingDefinition> {
    let phases = vec![
        ComboPhase::new(
            vec![CurveSegment::new(EasingKind::SineInOut, 0.0, -1.0, 2.0)],
            100f32.to_radians(),
            40,
            64.0,
        )
        .with_squish_range(0.8),
        ComboPhase::new(
            vec![CurveSegment::new(EasingKind::ExpOut, 0.0, 1.0, -2.0)],
            110f32.to_radians(),
            44,
            64.0,
        ),
    ];
    let palette = SwingPalette::from_hex(&[0x3010_10FF, 0xFF80_40FF]).unwrap();
    Arc::new(WeaponSwingDefinition::new(WeaponTypeId(4), "Ember Sickle", phases, palette).unwrap())
}

#[test]
fn test_progression_matches_bit_for_bit() {
    let blade = blade();
    let key = ComboKey::new(WielderId(1), WeaponTypeId(4));
    let held = WielderInput::new(Vec2::ZERO, true);

    let mut local = ComboController::new(EngineConfig::default());
    let mut remote = ComboController::new(EngineConfig::default());

    let mut packet = [0u8; SwingSync::SIZE];
    assert!(SwingSync::new(48, 0.9).write_to(&mut packet));
    let sync = decode_swing(&packet).unwrap();

    let local_handle = local
        .spawn_remote(key, &blade, SpawnParams::default(), 1, SwingSync::new(48, 0.9))
        .unwrap();
    let remote_handle = remote.spawn_remote(key, &blade, SpawnParams::default(), 1, sync).unwrap();

    for _ in 0..24 {
        local.tick_wielder(key, &held, &[], &mut NoHooks);
        remote.tick_wielder(key, &held, &[], &mut NoHooks);
    }

    let a = local.get(local_handle).unwrap();
    let b = remote.get(remote_handle).unwrap();
    assert_eq!(a.elapsed_ticks(), 24);
    assert_eq!(a.progression().to_bits(), b.progression().to_bits());
    assert_eq!(a.pose().rotation.to_bits(), b.pose().rotation.to_bits());
    assert_eq!(a.squish_factor(), 0.9);
}

#[test]
fn test_local_swing_replicates_to_peer() {
    let blade = blade();
    let key = ComboKey::new(WielderId(2), WeaponTypeId(4));
    let held = WielderInput::new(Vec2::new(10.0, 5.0), true);
    let params = SpawnParams {
        attack_speed: 1.25,
        ..SpawnParams::default()
    };

    let mut authority = ComboController::new(EngineConfig::default());
    let handle = authority.activate(key, &blade, params).unwrap();
    authority.tick_wielder(key, &held, &[], &mut NoHooks);

    let swing = authority.get(handle).unwrap();
    let mut packet = [0u8; 16];
    assert!(encode_swing(swing, &mut packet));

    let mut peer = ComboController::new(EngineConfig::default());
    let mirrored = peer
        .spawn_remote(key, &blade, params, swing.combo_step(), decode_swing(&packet).unwrap())
        .unwrap();
    peer.tick_wielder(key, &held, &[], &mut NoHooks);

    let copy = peer.get(mirrored).unwrap();
    assert_eq!(copy.swing_time_ticks(), swing.swing_time_ticks());
    assert_eq!(copy.squish_factor(), swing.squish_factor());
    assert_eq!(copy.progression().to_bits(), swing.progression().to_bits());
    assert_eq!(copy.pose().tip, swing.pose().tip);
}

#[test]
fn test_correction_packet_retimes_live_swing() {
    let blade = blade();
    let key = ComboKey::new(WielderId(3), WeaponTypeId(4));
    let held = WielderInput::new(Vec2::ZERO, true);
    let mut controller = ComboController::new(EngineConfig::default());
    let handle = controller.activate(key, &blade, SpawnParams::default()).unwrap();
    for _ in 0..12 {
        controller.tick_wielder(key, &held, &[], &mut NoHooks);
    }

    let mut packet = [0u8; SwingSync::SIZE];
    assert!(SwingSync::new(24, 0.8).write_to(&mut packet));
    assert!(apply_packet(controller.get_mut(handle).unwrap(), &packet));

    let swing = controller.get(handle).unwrap();
    assert_eq!(swing.swing_time_ticks(), 24);
    assert_eq!(swing.elapsed_ticks(), 12);
    assert_eq!(swing.remaining_lifetime(), 12);
}
