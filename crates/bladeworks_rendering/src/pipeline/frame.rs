//! Per-frame swing data consumed by the pipeline.
//!
//! Everything here is read-only: the simulation finalized it for this tick.

use bladeworks_core::TrailRingBuffer;
use bladeworks_shared::{SwingPalette, Vec2};

use crate::visuals::WeaponVisuals;

/// Snapshot of one swing for drawing.
///
/// Borrowed from the swing instance and its weapon definition, so building
/// one per frame costs nothing.
#[derive(Debug, Clone, Copy)]
pub struct SwingFrame<'a> {
    /// Combo step the swing was spawned with.
    pub combo_step: usize,
    /// Normalized swing time in `[0, 1]`.
    pub progression: f32,
    /// Hilt position.
    pub anchor: Vec2,
    /// Tip position.
    pub tip: Vec2,
    /// Blade rotation (radians).
    pub rotation: f32,
    /// Angular offset from the aim direction (radians).
    pub angle_shift: f32,
    /// Squish applied along the blade.
    pub squish: f32,
    /// Unsquished blade length.
    pub blade_length: f32,
    /// Swing direction (+1 or -1).
    pub direction: f32,
    /// Tip history, most recent first.
    pub trail: &'a TrailRingBuffer,
    /// Weapon colors.
    pub palette: &'a SwingPalette,
    /// Weapon textures and shaping.
    pub visuals: &'a WeaponVisuals,
}

impl SwingFrame<'_> {
    /// Blade length after squish.
    #[inline]
    #[must_use]
    pub fn drawn_length(&self) -> f32 {
        self.blade_length * self.squish
    }

    /// Rotation change since the previous tick, or 0 without history.
    #[must_use]
    pub fn angular_velocity(&self) -> f32 {
        match (self.trail.get(0), self.trail.get(1)) {
            (Some(now), Some(before)) => now.rotation - before.rotation,
            _ => 0.0,
        }
    }
}
