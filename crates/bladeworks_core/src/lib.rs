//! # BLADEWORKS Core
//!
//! Zero-allocation primitives the swing engine is built from:
//! - Piecewise easing curves that turn normalized swing time into motion
//! - Fixed-capacity trail history with O(1) append
//! - Blade line versus hitbox collision
//! - Pre-allocated generational pools for live swing instances
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations in hot path** - buffers are sized at construction
//! 2. **Pure evaluation** - curves are data, evaluated without state
//! 3. **Never panic on bad data** - inputs are clamped, not rejected
//!
//! ## Example
//!
//! ```rust
//! use bladeworks_core::{evaluate, CurveSegment, EasingKind};
//!
//! let curve = [
//!     CurveSegment::new(EasingKind::SineOut, 0.0, -1.0, 0.2),
//!     CurveSegment::new(EasingKind::PolyIn, 0.3, -0.8, 1.8).with_exponent(3.0),
//! ];
//! assert_eq!(evaluate(0.0, &curve), -1.0);
//! assert!((evaluate(1.0, &curve) - 1.0).abs() < 1e-6);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod collision;
pub mod curve;
pub mod memory;
pub mod trail;

pub use collision::{blade_contact, BladeSegment};
pub use curve::{evaluate, is_monotonic, CurveSegment, EasingKind};
pub use memory::{InstanceHandle, InstancePool};
pub use trail::{TrailIter, TrailRingBuffer, TrailSample};
