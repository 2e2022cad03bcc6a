//! Pre-allocated command list with scoped blend state.

use std::ops::{Deref, DerefMut};

use crate::command::{BlendMode, DrawCommand, RenderStage, RibbonVertex, SpriteDraw, TextureId, TrailStyle};
use crate::pipeline::RenderStats;

/// Command slots kept back for blend switches, so closing a scope still
/// records even when content filled the list.
const BLEND_RESERVE: usize = 8;

/// Recorded draw commands for one frame.
///
/// Sized once; recording never grows the buffers. Content that does not fit
/// is dropped and counted in [`RenderStats::dropped_commands`].
#[derive(Debug)]
pub struct DrawList {
    /// Commands in submission order.
    commands: Vec<DrawCommand>,
    /// Ribbon vertices referenced by `DrawCommand::Ribbon`.
    vertices: Vec<RibbonVertex>,
    /// Maximum content (non-blend) commands.
    content_capacity: usize,
    /// Blend state in effect at the end of the list.
    blend: BlendMode,
    /// Frame statistics.
    stats: RenderStats,
}

impl DrawList {
    /// Creates a list holding `commands` content commands and `vertices`
    /// ribbon vertices.
    #[must_use]
    pub fn with_capacity(commands: usize, vertices: usize) -> Self {
        Self {
            commands: Vec::with_capacity(commands + BLEND_RESERVE),
            vertices: Vec::with_capacity(vertices),
            content_capacity: commands,
            blend: BlendMode::Alpha,
            stats: RenderStats::default(),
        }
    }

    /// Clears the list for a new frame. Keeps all memory.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.vertices.clear();
        self.blend = BlendMode::Alpha;
        self.stats = RenderStats::default();
    }

    /// Blend state in effect for the next draw.
    #[inline]
    #[must_use]
    pub const fn blend(&self) -> BlendMode {
        self.blend
    }

    /// Enters `mode` until the returned guard drops, then restores the
    /// previous mode.
    pub fn scoped(&mut self, mode: BlendMode) -> BlendScope<'_> {
        let restore = self.blend;
        self.set_blend(mode);
        BlendScope { list: self, restore }
    }

    fn set_blend(&mut self, mode: BlendMode) {
        if mode == self.blend {
            return;
        }
        self.blend = mode;
        if self.commands.len() < self.commands.capacity() {
            self.commands.push(DrawCommand::SetBlend(mode));
            self.stats.blend_changes += 1;
        } else {
            self.stats.dropped_commands += 1;
        }
    }

    fn has_content_room(&self) -> bool {
        self.commands.len() < self.content_capacity
            && self.commands.len() + 1 < self.commands.capacity()
    }

    /// Records a sprite. Returns false if the list is full.
    pub fn sprite(&mut self, sprite: SpriteDraw) -> bool {
        if !self.has_content_room() {
            self.stats.dropped_commands += 1;
            return false;
        }
        self.commands.push(DrawCommand::Sprite(sprite));
        self.stats.draw_calls += 1;
        self.stats.sprites += 1;
        true
    }

    /// Records a triangle-strip ribbon.
    ///
    /// Vertices past the vertex capacity are cut off. Returns false if
    /// nothing was drawn (full list or fewer than 4 vertices).
    pub fn ribbon<I>(&mut self, stage: RenderStage, texture: Option<TextureId>, style: TrailStyle, vertices: I) -> bool
    where
        I: IntoIterator<Item = RibbonVertex>,
    {
        if !self.has_content_room() {
            self.stats.dropped_commands += 1;
            return false;
        }

        let first = self.vertices.len();
        for vertex in vertices {
            if self.vertices.len() == self.vertices.capacity() {
                break;
            }
            self.vertices.push(vertex);
        }
        let count = self.vertices.len() - first;
        if count < 4 {
            self.vertices.truncate(first);
            return false;
        }

        #[allow(clippy::cast_possible_truncation)]
        let (first_vertex, vertex_count) = (first as u32, count as u32);
        self.commands.push(DrawCommand::Ribbon {
            stage,
            texture,
            style,
            first_vertex,
            vertex_count,
        });
        self.stats.draw_calls += 1;
        self.stats.ribbon_vertices += vertex_count;
        true
    }

    /// Recorded commands in submission order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Ribbon vertex buffer.
    #[must_use]
    pub fn vertices(&self) -> &[RibbonVertex] {
        &self.vertices
    }

    /// Ribbon vertex buffer as raw bytes for GPU upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Statistics for the frame recorded so far.
    #[must_use]
    pub const fn stats(&self) -> RenderStats {
        self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut RenderStats {
        &mut self.stats
    }
}

/// Guard returned by [`DrawList::scoped`].
///
/// Derefs to the list, so draws go through the guard. Dropping it restores
/// the blend mode that was active when the scope was entered.
#[derive(Debug)]
pub struct BlendScope<'a> {
    list: &'a mut DrawList,
    restore: BlendMode,
}

impl Deref for BlendScope<'_> {
    type Target = DrawList;

    fn deref(&self) -> &DrawList {
        &*self.list
    }
}

impl DerefMut for BlendScope<'_> {
    fn deref_mut(&mut self) -> &mut DrawList {
        &mut *self.list
    }
}

impl Drop for BlendScope<'_> {
    fn drop(&mut self) {
        self.list.set_blend(self.restore);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bladeworks_shared::{Color, Vec2};

    fn sprite(stage: RenderStage) -> SpriteDraw {
        SpriteDraw {
            stage,
            texture: TextureId(1),
            position: Vec2::ZERO,
            origin: Vec2::splat(0.5),
            rotation: 0.0,
            size: Vec2::splat(16.0),
            color: Color::WHITE,
        }
    }

    #[test]
    fn test_scope_pairs_enter_and_exit() {
        let mut list = DrawList::with_capacity(16, 16);
        list.begin_frame();
        {
            let mut additive = list.scoped(BlendMode::Additive);
            assert_eq!(additive.blend(), BlendMode::Additive);
            additive.sprite(sprite(RenderStage::Additive));
        }
        assert_eq!(list.blend(), BlendMode::Alpha);
        assert_eq!(
            list.commands()[0],
            DrawCommand::SetBlend(BlendMode::Additive)
        );
        assert_eq!(list.commands()[2], DrawCommand::SetBlend(BlendMode::Alpha));
        assert_eq!(list.stats().blend_changes, 2);
    }

    #[test]
    fn test_nested_same_mode_scope_is_free() {
        let mut list = DrawList::with_capacity(16, 16);
        {
            let mut outer = list.scoped(BlendMode::Additive);
            {
                let _inner = outer.scoped(BlendMode::Additive);
            }
            assert_eq!(outer.blend(), BlendMode::Additive);
        }
        assert_eq!(list.stats().blend_changes, 2);
        assert_eq!(list.blend(), BlendMode::Alpha);
    }

    #[test]
    fn test_full_list_drops_content_but_closes_scope() {
        let mut list = DrawList::with_capacity(2, 0);
        {
            let mut scope = list.scoped(BlendMode::Additive);
            for _ in 0..5 {
                scope.sprite(sprite(RenderStage::Additive));
            }
        }
        let stats = list.stats();
        assert!(stats.dropped_commands > 0);
        assert_eq!(list.blend(), BlendMode::Alpha);
        assert_eq!(*list.commands().last().unwrap(), DrawCommand::SetBlend(BlendMode::Alpha));
    }

    #[test]
    fn test_short_ribbon_is_rejected() {
        let mut list = DrawList::with_capacity(4, 16);
        let verts = [RibbonVertex::default(); 2];
        assert!(!list.ribbon(RenderStage::Trail, None, TrailStyle(0), verts));
        assert!(list.vertices().is_empty());
        assert!(list.commands().is_empty());
    }

    #[test]
    fn test_ribbon_cut_at_vertex_capacity() {
        let mut list = DrawList::with_capacity(4, 6);
        let verts = [RibbonVertex::default(); 10];
        assert!(list.ribbon(RenderStage::Trail, Some(TextureId(3)), TrailStyle(1), verts));
        assert_eq!(list.vertices().len(), 6);
        assert_eq!(list.vertex_bytes().len(), 6 * RibbonVertex::SIZE);
    }
}
