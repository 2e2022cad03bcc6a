//! # BLADEWORKS Rendering
//!
//! Turns one swing's pose, trail history and palette into an ordered list of
//! draw commands. The host backend (sprite batch, wgpu, anything) replays
//! the list; this crate never touches a GPU.
//!
//! ## Stage Order
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      SWING FRAME                              │
//! ├──────────────────────────────────────────────────────────────┤
//! │  1. Trail ribbon           (alpha)                            │
//! │  2. Smear underlay         (alpha)                            │
//! │  3. Blade sprite           (alpha)                            │
//! │  4. Glow + lens flare      (ADDITIVE scope, one enter/exit)   │
//! │  5. Motion blur            (alpha)                            │
//! │  6. Caller extra VFX       (alpha, may open its own scopes)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Blend modes can only be changed through [`BlendScope`] guards, so every
//! enter is paired with an exit and every frame ends in alpha blend.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod command;
pub mod draw_list;
pub mod pipeline;
pub mod visuals;

pub use command::{BlendMode, DrawCommand, RenderStage, RibbonVertex, SpriteDraw, TextureId, TrailStyle};
pub use draw_list::{BlendScope, DrawList};
pub use pipeline::{AllStages, RenderPipeline, RenderStats, StageGate, SwingFrame};
pub use visuals::{StageWindow, WeaponVisuals};
