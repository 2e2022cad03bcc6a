//! # BLADEWORKS Shared
//!
//! Common types used by both the simulation side and the presentation side
//! of the swing engine.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on rendering code. If you need draw
//! commands or blend modes, put them in `bladeworks_rendering`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod constants;
pub mod math;
pub mod protocol;

pub use color::{Color, SwingPalette};
pub use constants::{
    COMBO_RESET_TICKS, COLLISION_THICKNESS, MIN_PALETTE_COLORS, MIN_SWING_TICKS, PALETTE_SIZE,
    SQUISH_STRETCH, STASIS_LINGER_TICKS, STASIS_TERMINAL_TICKS, TICK_RATE, TRAIL_CAPACITY,
};
pub use math::{Aabb, Vec2};
pub use protocol::SwingSync;
