//! Draw commands recorded by the swing pipeline.

use bladeworks_shared::{Color, Vec2};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Host texture handle. The engine never loads textures itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureId(pub u32);

/// Host trail shader/style tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrailStyle(pub u16);

/// Blend state for subsequent draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Normal alpha blending.
    #[default]
    Alpha,
    /// Additive (color-only contribution when alpha is 0).
    Additive,
}

/// The fixed pipeline stages, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderStage {
    /// Trail ribbon from the ring buffer.
    Trail,
    /// Per-combo-step smear texture behind the blade.
    Smear,
    /// The blade sprite itself.
    Blade,
    /// Glow duplicates and lens flare.
    Additive,
    /// Directional copies of the blade during the fast part of the swing.
    MotionBlur,
    /// Caller-supplied effects drawn last.
    ExtraVfx,
}

impl RenderStage {
    /// Every stage, in draw order.
    pub const ALL: [Self; 6] = [
        Self::Trail,
        Self::Smear,
        Self::Blade,
        Self::Additive,
        Self::MotionBlur,
        Self::ExtraVfx,
    ];
}

/// One textured quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    /// Stage that issued the draw.
    pub stage: RenderStage,
    /// Texture to sample.
    pub texture: TextureId,
    /// World position of the pivot.
    pub position: Vec2,
    /// Pivot inside the quad, normalized (0,0 top-left, 1,1 bottom-right).
    pub origin: Vec2,
    /// Rotation around the pivot (radians).
    pub rotation: f32,
    /// World-space size of the quad (before rotation).
    pub size: Vec2,
    /// Tint.
    pub color: Color,
}

/// Ribbon vertex, laid out for direct GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct RibbonVertex {
    /// World position.
    pub position: [f32; 2],
    /// Texture coordinates (u along the trail, v across it).
    pub uv: [f32; 2],
    /// RGBA tint.
    pub color: [f32; 4],
}

impl RibbonVertex {
    /// Size of a vertex in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Creates a vertex.
    #[must_use]
    pub fn new(position: Vec2, uv: [f32; 2], color: Color) -> Self {
        Self {
            position: position.to_array(),
            uv,
            color: color.to_array(),
        }
    }
}

/// A recorded draw command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Switch blend state.
    SetBlend(BlendMode),
    /// Draw a sprite.
    Sprite(SpriteDraw),
    /// Draw a triangle-strip ribbon from the list's vertex buffer.
    Ribbon {
        /// Stage that issued the draw.
        stage: RenderStage,
        /// Optional trail texture.
        texture: Option<TextureId>,
        /// Trail style tag.
        style: TrailStyle,
        /// First vertex in the list's vertex buffer.
        first_vertex: u32,
        /// Number of vertices (two per trail sample).
        vertex_count: u32,
    },
}

impl DrawCommand {
    /// Stage that issued this command (`None` for blend switches).
    #[must_use]
    pub fn stage(&self) -> Option<RenderStage> {
        match self {
            Self::SetBlend(_) => None,
            Self::Sprite(sprite) => Some(sprite.stage),
            Self::Ribbon { stage, .. } => Some(*stage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ribbon_vertex_layout() {
        assert_eq!(RibbonVertex::SIZE, 32);
        let v = RibbonVertex::new(Vec2::new(1.0, 2.0), [0.5, 1.0], Color::WHITE);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), RibbonVertex::SIZE);
    }

    #[test]
    fn test_stage_order() {
        let mut sorted = RenderStage::ALL;
        sorted.sort();
        assert_eq!(sorted, RenderStage::ALL);
    }
}
