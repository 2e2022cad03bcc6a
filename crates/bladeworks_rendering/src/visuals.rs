//! Per-weapon visual data.
//!
//! Only data lives here. The pipeline is the same for every weapon; a new
//! weapon look is a new `WeaponVisuals` value, usually loaded from TOML.

use serde::{Deserialize, Serialize};

use crate::command::{TextureId, TrailStyle};

/// A progression window with a rise/fall envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageWindow {
    /// Window start (progression).
    pub start: f32,
    /// Window end (progression).
    pub end: f32,
}

impl StageWindow {
    /// Creates a window. Reversed bounds are swapped.
    #[must_use]
    pub fn new(start: f32, end: f32) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// True if `progression` lies inside the window (inclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, progression: f32) -> bool {
        progression >= self.start && progression <= self.end
    }

    /// Half-sine envelope: 0 at both edges, 1 in the middle, 0 outside.
    #[must_use]
    pub fn envelope(&self, progression: f32) -> f32 {
        let span = self.end - self.start;
        if !self.contains(progression) || span <= f32::EPSILON {
            return 0.0;
        }
        let local = (progression - self.start) / span;
        (local * std::f32::consts::PI).sin()
    }
}

/// Textures and shaping parameters for one weapon's swing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponVisuals {
    /// Blade sprite. Pivot is the hilt (left edge, vertical center).
    pub blade_texture: TextureId,
    /// Blade sprite height in world units.
    pub blade_width: f32,
    /// Host trail shader tag.
    pub trail_style: TrailStyle,
    /// Optional trail texture.
    pub trail_texture: Option<TextureId>,
    /// Smear texture per combo step. `None` (or a missing entry) skips the
    /// smear for that step. Not read from config tables, which cannot hold
    /// holes; weapon configs list these separately.
    #[serde(skip)]
    pub smear_textures: Vec<Option<TextureId>>,
    /// Lens flare texture.
    pub flare_texture: TextureId,
    /// Trail width at the newest sample, combo step 0.
    pub trail_width: f32,
    /// Extra trail width per combo step.
    pub trail_width_per_step: f32,
    /// Trail opacity at the newest sample, combo step 0.
    pub trail_opacity: f32,
    /// Extra trail opacity per combo step.
    pub trail_opacity_per_step: f32,
    /// Progression window where the smear shows.
    pub smear_window: StageWindow,
    /// Peak smear opacity.
    pub smear_opacity: f32,
    /// Progression window where motion blur shows.
    pub motion_blur_window: StageWindow,
    /// Blade copies drawn for motion blur.
    pub motion_blur_samples: u32,
    /// Glow duplicates in the additive batch.
    pub glow_layers: u32,
    /// Scale added per glow layer.
    pub glow_scale_step: f32,
    /// Lens flare layers at the tip.
    pub flare_layers: u32,
    /// Lens flare size in world units.
    pub flare_scale: f32,
}

impl Default for WeaponVisuals {
    fn default() -> Self {
        Self {
            blade_texture: TextureId(0),
            blade_width: 18.0,
            trail_style: TrailStyle(0),
            trail_texture: None,
            smear_textures: Vec::new(),
            flare_texture: TextureId(0),
            trail_width: 28.0,
            trail_width_per_step: 4.0,
            trail_opacity: 0.7,
            trail_opacity_per_step: 0.1,
            smear_window: StageWindow::new(0.10, 0.92),
            smear_opacity: 0.8,
            motion_blur_window: StageWindow::new(0.25, 0.75),
            motion_blur_samples: 3,
            glow_layers: 2,
            glow_scale_step: 0.08,
            flare_layers: 3,
            flare_scale: 48.0,
        }
    }
}

impl WeaponVisuals {
    /// Smear texture for `combo_step`, clamped to the last entry.
    #[must_use]
    pub fn smear_texture(&self, combo_step: usize) -> Option<TextureId> {
        let last = self.smear_textures.len().checked_sub(1)?;
        self.smear_textures[combo_step.min(last)]
    }

    /// Trail width for `combo_step`.
    #[must_use]
    pub fn trail_width_for(&self, combo_step: usize) -> f32 {
        self.trail_width + self.trail_width_per_step * combo_step as f32
    }

    /// Trail opacity for `combo_step`, capped at 1.
    #[must_use]
    pub fn trail_opacity_for(&self, combo_step: usize) -> f32 {
        (self.trail_opacity + self.trail_opacity_per_step * combo_step as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_silent_outside_window() {
        let window = StageWindow::new(0.10, 0.92);
        assert_eq!(window.envelope(0.05), 0.0);
        assert_eq!(window.envelope(0.95), 0.0);
        assert!(window.envelope(0.51) > 0.99);
    }

    #[test]
    fn test_reversed_window_is_swapped() {
        let window = StageWindow::new(0.8, 0.2);
        assert_eq!(window.start, 0.2);
        assert!(window.contains(0.5));
    }

    #[test]
    fn test_smear_texture_clamps_step() {
        let visuals = WeaponVisuals {
            smear_textures: vec![Some(TextureId(4)), None, Some(TextureId(6))],
            ..WeaponVisuals::default()
        };
        assert_eq!(visuals.smear_texture(0), Some(TextureId(4)));
        assert_eq!(visuals.smear_texture(1), None);
        assert_eq!(visuals.smear_texture(9), Some(TextureId(6)));
        assert_eq!(WeaponVisuals::default().smear_texture(0), None);
    }

    #[test]
    fn test_trail_shaping_grows_with_step() {
        let visuals = WeaponVisuals::default();
        assert!(visuals.trail_width_for(2) > visuals.trail_width_for(0));
        assert!(visuals.trail_opacity_for(10) <= 1.0);
    }
}
