//! Render pipeline orchestration.
//!
//! Records one swing frame as an ordered command list. Stage order is fixed;
//! callers can only switch stages off through a [`StageGate`].

mod frame;
mod stats;

pub use frame::SwingFrame;
pub use stats::RenderStats;

use std::f32::consts::{FRAC_PI_4, PI};

use bladeworks_shared::{Color, Vec2};

use crate::command::{BlendMode, RenderStage, RibbonVertex, SpriteDraw};
use crate::draw_list::DrawList;

/// Decides per frame which stages run.
pub trait StageGate {
    /// True if `stage` should be drawn for `frame`.
    fn enabled(&self, stage: RenderStage, frame: &SwingFrame<'_>) -> bool;
}

/// Gate that lets every stage through.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllStages;

impl StageGate for AllStages {
    #[inline]
    fn enabled(&self, _stage: RenderStage, _frame: &SwingFrame<'_>) -> bool {
        true
    }
}

impl<F> StageGate for F
where
    F: Fn(RenderStage, &SwingFrame<'_>) -> bool,
{
    #[inline]
    fn enabled(&self, stage: RenderStage, frame: &SwingFrame<'_>) -> bool {
        self(stage, frame)
    }
}

/// Hilt pivot for blade sprites: left edge, vertical center.
const BLADE_ORIGIN: Vec2 = Vec2::new(0.0, 0.5);
/// Centered pivot for smears and flares.
const CENTER_ORIGIN: Vec2 = Vec2::new(0.5, 0.5);
/// Palette position the glow layers take their tint from.
const GLOW_PALETTE_POINT: f32 = 0.8;

/// Swing render pipeline.
///
/// Owns one pre-sized [`DrawList`] and re-records it every frame.
#[derive(Debug)]
pub struct RenderPipeline {
    /// Command list reused every frame.
    draw: DrawList,
}

impl RenderPipeline {
    /// Creates a pipeline whose list holds `command_capacity` draws and
    /// `vertex_capacity` ribbon vertices.
    #[must_use]
    pub fn new(command_capacity: usize, vertex_capacity: usize) -> Self {
        Self {
            draw: DrawList::with_capacity(command_capacity, vertex_capacity),
        }
    }

    /// The list recorded by the last [`RenderPipeline::render`].
    #[must_use]
    pub fn draw_list(&self) -> &DrawList {
        &self.draw
    }

    /// Records `frame`.
    ///
    /// `extra` runs last, only if the gate allows [`RenderStage::ExtraVfx`].
    /// It may open its own blend scopes; the frame still ends in alpha blend.
    pub fn render<G, F>(&mut self, frame: &SwingFrame<'_>, gate: &G, extra: F) -> &DrawList
    where
        G: StageGate + ?Sized,
        F: FnOnce(&mut DrawList),
    {
        self.draw.begin_frame();
        let mut extra = Some(extra);

        for stage in RenderStage::ALL {
            if !gate.enabled(stage, frame) {
                continue;
            }
            self.draw.stats_mut().stages_drawn += 1;
            match stage {
                RenderStage::Trail => draw_trail(&mut self.draw, frame),
                RenderStage::Smear => draw_smear(&mut self.draw, frame),
                RenderStage::Blade => draw_blade(&mut self.draw, frame),
                RenderStage::Additive => draw_additive(&mut self.draw, frame),
                RenderStage::MotionBlur => draw_motion_blur(&mut self.draw, frame),
                RenderStage::ExtraVfx => {
                    if let Some(extra) = extra.take() {
                        extra(&mut self.draw);
                    }
                }
            }
        }

        let stats = self.draw.stats();
        if stats.dropped_commands > 0 {
            tracing::warn!(
                dropped = stats.dropped_commands,
                combo_step = frame.combo_step,
                "Swing draw list full, commands dropped"
            );
        }
        &self.draw
    }
}

fn blade_sprite(frame: &SwingFrame<'_>, stage: RenderStage, rotation: f32, scale: f32, color: Color) -> SpriteDraw {
    SpriteDraw {
        stage,
        texture: frame.visuals.blade_texture,
        position: frame.anchor,
        origin: BLADE_ORIGIN,
        rotation,
        size: Vec2::new(frame.drawn_length() * scale, frame.visuals.blade_width * scale),
        color,
    }
}

/// Ribbon from newest to oldest sample. Width and opacity fall with age.
fn draw_trail(draw: &mut DrawList, frame: &SwingFrame<'_>) {
    let count = frame.trail.len();
    if count < 2 {
        return;
    }
    let visuals = frame.visuals;
    let width = visuals.trail_width_for(frame.combo_step);
    let opacity = visuals.trail_opacity_for(frame.combo_step);
    let last = (count - 1) as f32;
    let palette = frame.palette;

    let vertices = frame.trail.read_ordered().enumerate().flat_map(move |(age, sample)| {
        let u = age as f32 / last;
        let recency = 1.0 - u;
        let color = palette.sample(recency).scale(opacity * recency);
        let inward = Vec2::from_angle(sample.rotation) * (width * recency);
        [
            RibbonVertex::new(sample.position, [u, 0.0], color),
            RibbonVertex::new(sample.position - inward, [u, 1.0], color),
        ]
    });
    draw.ribbon(RenderStage::Trail, visuals.trail_texture, visuals.trail_style, vertices);
}

/// Per-step smear behind the blade, faded in and out over its window.
fn draw_smear(draw: &mut DrawList, frame: &SwingFrame<'_>) {
    let visuals = frame.visuals;
    let Some(texture) = visuals.smear_texture(frame.combo_step) else {
        return;
    };
    let opacity = visuals.smear_window.envelope(frame.progression) * visuals.smear_opacity;
    if opacity <= 0.0 {
        return;
    }
    draw.sprite(SpriteDraw {
        stage: RenderStage::Smear,
        texture,
        position: frame.anchor,
        origin: CENTER_ORIGIN,
        rotation: frame.rotation,
        size: Vec2::splat(2.0 * frame.drawn_length()),
        color: frame.palette.sample(frame.progression).with_alpha(opacity),
    });
}

fn draw_blade(draw: &mut DrawList, frame: &SwingFrame<'_>) {
    draw.sprite(blade_sprite(frame, RenderStage::Blade, frame.rotation, 1.0, Color::WHITE));
}

/// Glow duplicates and tip flare, inside one additive scope.
fn draw_additive(draw: &mut DrawList, frame: &SwingFrame<'_>) {
    let visuals = frame.visuals;
    let mut additive = draw.scoped(BlendMode::Additive);

    let glow = frame.palette.sample(GLOW_PALETTE_POINT);
    for layer in 1..=visuals.glow_layers {
        let k = layer as f32;
        let color = glow.scale(0.5 / k).with_alpha(0.0);
        let scale = 1.0 + visuals.glow_scale_step * k;
        additive.sprite(blade_sprite(frame, RenderStage::Additive, frame.rotation, scale, color));
    }

    let intensity = (frame.progression * PI).sin();
    if intensity <= 0.0 {
        return;
    }
    let palette_len = frame.palette.len();
    for layer in 0..visuals.flare_layers {
        let k = layer as usize;
        let color = frame
            .palette
            .get(palette_len.saturating_sub(1 + k))
            .scale(intensity / (k + 1) as f32)
            .with_alpha(0.0);
        additive.sprite(SpriteDraw {
            stage: RenderStage::Additive,
            texture: visuals.flare_texture,
            position: frame.tip,
            origin: CENTER_ORIGIN,
            rotation: frame.rotation + FRAC_PI_4 * k as f32,
            size: Vec2::splat(visuals.flare_scale * (1.0 + 0.5 * k as f32)),
            color,
        });
    }
}

/// Fading blade copies trailing behind the current rotation.
fn draw_motion_blur(draw: &mut DrawList, frame: &SwingFrame<'_>) {
    let visuals = frame.visuals;
    if !visuals.motion_blur_window.contains(frame.progression) || visuals.motion_blur_samples == 0 {
        return;
    }
    let delta = frame.angular_velocity();
    if delta.abs() <= f32::EPSILON || !delta.is_finite() {
        return;
    }
    let samples = visuals.motion_blur_samples as f32;
    for copy in 1..=visuals.motion_blur_samples {
        let k = copy as f32;
        let alpha = 0.5 * (1.0 - k / (samples + 1.0));
        let rotation = frame.rotation - delta * k / samples;
        draw.sprite(blade_sprite(frame, RenderStage::MotionBlur, rotation, 1.0, Color::WHITE.with_alpha(alpha)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{DrawCommand, TextureId};
    use crate::visuals::WeaponVisuals;
    use bladeworks_core::{TrailRingBuffer, TrailSample};
    use bladeworks_shared::SwingPalette;

    struct Fixture {
        trail: TrailRingBuffer,
        palette: SwingPalette,
        visuals: WeaponVisuals,
    }

    impl Fixture {
        fn new() -> Self {
            let mut trail = TrailRingBuffer::new(60);
            for i in 0..10 {
                let rotation = i as f32 * 0.1;
                trail.push(TrailSample::new(Vec2::from_angle(rotation) * 80.0, rotation));
            }
            Self {
                trail,
                palette: SwingPalette::from_hex(&[0x20_10_40_FF, 0x80_40_C0_FF, 0xFF_E0_FF_FF]).unwrap(),
                visuals: WeaponVisuals {
                    smear_textures: vec![Some(TextureId(7)), None],
                    ..WeaponVisuals::default()
                },
            }
        }

        fn frame(&self, combo_step: usize, progression: f32) -> SwingFrame<'_> {
            SwingFrame {
                combo_step,
                progression,
                anchor: Vec2::ZERO,
                tip: Vec2::from_angle(0.9) * 80.0,
                rotation: 0.9,
                angle_shift: 0.9,
                squish: 1.0,
                blade_length: 80.0,
                direction: 1.0,
                trail: &self.trail,
                palette: &self.palette,
                visuals: &self.visuals,
            }
        }
    }

    fn stages(list: &DrawList) -> Vec<RenderStage> {
        let mut out: Vec<RenderStage> = list.commands().iter().filter_map(DrawCommand::stage).collect();
        out.dedup();
        out
    }

    #[test]
    fn test_full_frame_stage_order() {
        let fixture = Fixture::new();
        let mut pipeline = RenderPipeline::new(64, 256);
        let list = pipeline.render(&fixture.frame(0, 0.5), &AllStages, |draw| {
            draw.sprite(SpriteDraw {
                stage: RenderStage::ExtraVfx,
                texture: TextureId(99),
                position: Vec2::ZERO,
                origin: CENTER_ORIGIN,
                rotation: 0.0,
                size: Vec2::splat(4.0),
                color: Color::WHITE,
            });
        });

        assert_eq!(stages(list), RenderStage::ALL.to_vec());
        assert_eq!(list.blend(), BlendMode::Alpha);
        assert_eq!(list.stats().stages_drawn, 6);
    }

    #[test]
    fn test_additive_batch_is_one_scope() {
        let fixture = Fixture::new();
        let mut pipeline = RenderPipeline::new(64, 256);
        let list = pipeline.render(&fixture.frame(0, 0.5), &AllStages, |_| {});

        let commands = list.commands();
        let enter = commands
            .iter()
            .position(|c| *c == DrawCommand::SetBlend(BlendMode::Additive))
            .unwrap();
        let exit = commands
            .iter()
            .position(|c| *c == DrawCommand::SetBlend(BlendMode::Alpha))
            .unwrap();
        assert!(enter < exit);
        assert!(commands[enter + 1..exit]
            .iter()
            .all(|c| c.stage() == Some(RenderStage::Additive)));
        assert_eq!(list.stats().blend_changes, 2);

        for command in &commands[enter + 1..exit] {
            if let DrawCommand::Sprite(sprite) = command {
                assert_eq!(sprite.color.a, 0.0);
            }
        }
    }

    #[test]
    fn test_smear_skipped_without_texture_or_outside_window() {
        let fixture = Fixture::new();
        let mut pipeline = RenderPipeline::new(64, 256);

        let list = pipeline.render(&fixture.frame(1, 0.5), &AllStages, |_| {});
        assert!(!stages(list).contains(&RenderStage::Smear));

        let list = pipeline.render(&fixture.frame(0, 0.05), &AllStages, |_| {});
        assert!(!stages(list).contains(&RenderStage::Smear));

        let list = pipeline.render(&fixture.frame(0, 0.5), &AllStages, |_| {});
        assert!(stages(list).contains(&RenderStage::Smear));
    }

    #[test]
    fn test_trail_fades_with_age() {
        let fixture = Fixture::new();
        let mut pipeline = RenderPipeline::new(64, 256);
        let list = pipeline.render(&fixture.frame(0, 0.5), &AllStages, |_| {});

        let vertices = list.vertices();
        assert_eq!(vertices.len(), 20);
        assert!(vertices[0].color[3] > vertices[18].color[3]);
        assert_eq!(vertices[19].color[3], 0.0);
    }

    #[test]
    fn test_gate_disables_stages() {
        let fixture = Fixture::new();
        let mut pipeline = RenderPipeline::new(64, 256);
        let blade_only = |stage: RenderStage, _: &SwingFrame<'_>| stage == RenderStage::Blade;
        let mut extra_ran = false;
        let list = pipeline.render(&fixture.frame(0, 0.5), &blade_only, |_| extra_ran = true);

        assert_eq!(stages(list), vec![RenderStage::Blade]);
        assert_eq!(list.stats().blend_changes, 0);
        assert!(!extra_ran);
    }

    #[test]
    fn test_motion_blur_only_in_fast_window() {
        let fixture = Fixture::new();
        let mut pipeline = RenderPipeline::new(64, 256);

        let list = pipeline.render(&fixture.frame(0, 0.1), &AllStages, |_| {});
        assert!(!stages(list).contains(&RenderStage::MotionBlur));

        let list = pipeline.render(&fixture.frame(0, 0.5), &AllStages, |_| {});
        let blur = list
            .commands()
            .iter()
            .filter(|c| c.stage() == Some(RenderStage::MotionBlur))
            .count();
        assert_eq!(blur, 3);
    }

    #[test]
    fn test_overflow_still_ends_in_alpha() {
        let fixture = Fixture::new();
        let mut pipeline = RenderPipeline::new(3, 256);
        let list = pipeline.render(&fixture.frame(0, 0.5), &AllStages, |_| {});
        assert!(list.stats().dropped_commands > 0);
        assert_eq!(list.blend(), BlendMode::Alpha);
        assert_eq!(*list.commands().last().unwrap(), DrawCommand::SetBlend(BlendMode::Alpha));
    }
}
