//! Host callbacks.
//!
//! One [`SwingHooks`] implementation can serve every weapon: the
//! [`SwingContext`] passed to each call says which wielder, weapon and combo
//! step it is for, so per-weapon behavior is a table lookup on the host side.

use bladeworks_core::InstanceHandle;
use bladeworks_rendering::DrawList;
use bladeworks_shared::{Aabb, Vec2};

use crate::id::{TargetId, WeaponTypeId, WielderId};

/// Identifies the swing a hook call is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwingContext {
    /// Who is swinging.
    pub wielder: WielderId,
    /// Which weapon.
    pub weapon: WeaponTypeId,
    /// Combo step the swing was spawned with (before clamping).
    pub combo_step: usize,
    /// The swing instance.
    pub handle: InstanceHandle,
}

/// A candidate for blade hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTarget {
    /// Host id.
    pub id: TargetId,
    /// World-space bounds.
    pub bounds: Aabb,
}

/// What a hit delivers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// Damage after the phase multiplier.
    pub damage: f32,
    /// Combo step of the swing.
    pub combo_step: usize,
    /// Progression at the moment of the hit.
    pub progression: f32,
    /// First blade point inside the target.
    pub contact: Vec2,
    /// Unit push direction, away from the wielder.
    pub knockback: Vec2,
}

/// Host capabilities the engine calls into. Every method defaults to a
/// no-op, so hosts implement only what a weapon needs.
#[allow(unused_variables)]
pub trait SwingHooks {
    /// The swing left `Uninitialized` (windup sound, dust).
    fn on_swing_start(&mut self, ctx: &SwingContext) {}

    /// Progression reached the weapon's special threshold. Fires once per
    /// swing.
    fn on_combo_special(&mut self, ctx: &SwingContext, combo_step: usize, progression: f32) {}

    /// Per-target hit cooldown owned by the host. Return false to skip
    /// `target` this tick.
    fn can_hit_target(&mut self, ctx: &SwingContext, target: TargetId) -> bool {
        true
    }

    /// The blade touched `target`.
    fn on_hit_target(&mut self, ctx: &SwingContext, target: TargetId, hit: &HitInfo) {}

    /// Draws theme effects on top of the swing, last in the frame.
    fn draw_extra_vfx(&self, ctx: &SwingContext, progression: f32, draw: &mut DrawList) {}
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl SwingHooks for NoHooks {}
