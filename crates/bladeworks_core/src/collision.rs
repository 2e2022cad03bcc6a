//! Blade versus hitbox collision.
//!
//! The swept blade is approximated by a single line per tick, from the
//! wielder's anchor to the current tip, with a fixed perpendicular
//! thickness. Very thin, very fast targets can be tunneled between ticks;
//! hosts mitigate that by running several sub-ticks per frame.

use bladeworks_shared::{Aabb, Vec2};

/// The blade line for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BladeSegment {
    /// Hilt end (wielder anchor).
    pub anchor: Vec2,
    /// Tip end.
    pub tip: Vec2,
}

impl BladeSegment {
    /// Creates a blade segment.
    #[must_use]
    pub const fn new(anchor: Vec2, tip: Vec2) -> Self {
        Self { anchor, tip }
    }

    /// First contact point with `bounds`, if the blade touches it.
    #[inline]
    #[must_use]
    pub fn contact(&self, bounds: &Aabb, thickness: f32) -> Option<Vec2> {
        blade_contact(self.anchor, self.tip, bounds, thickness)
    }
}

/// Tests the segment `start → end` against `bounds` grown by half of
/// `thickness` on every side.
///
/// Returns the first point along the segment inside the grown box. Non-finite
/// endpoints never collide; a negative thickness counts as zero.
#[must_use]
pub fn blade_contact(start: Vec2, end: Vec2, bounds: &Aabb, thickness: f32) -> Option<Vec2> {
    if !start.is_finite() || !end.is_finite() {
        return None;
    }
    let grown = bounds.inflate(thickness.max(0.0) * 0.5);
    let delta = end - start;

    // Slab test over both axes.
    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;
    for (origin, dir, lo, hi) in [
        (start.x, delta.x, grown.min.x, grown.max.x),
        (start.y, delta.y, grown.min.y, grown.max.y),
    ] {
        if dir.abs() < f32::EPSILON {
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / dir;
        let (near, far) = {
            let a = (lo - origin) * inv;
            let b = (hi - origin) * inv;
            if a <= b { (a, b) } else { (b, a) }
        };
        t_enter = t_enter.max(near);
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return None;
        }
    }

    Some(start + delta * t_enter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Aabb {
        Aabb::from_position_size(Vec2::new(100.0, -10.0), Vec2::new(20.0, 20.0))
    }

    #[test]
    fn test_blade_through_box_hits_at_entry() {
        let hit = blade_contact(Vec2::ZERO, Vec2::new(200.0, 0.0), &target(), 0.0).unwrap();
        assert!((hit.x - 100.0).abs() < 1e-4);
        assert!(hit.y.abs() < 1e-4);
    }

    #[test]
    fn test_blade_short_of_box_misses() {
        assert!(blade_contact(Vec2::ZERO, Vec2::new(90.0, 0.0), &target(), 0.0).is_none());
    }

    #[test]
    fn test_thickness_reaches_near_miss() {
        let start = Vec2::new(0.0, 20.0);
        let end = Vec2::new(200.0, 20.0);
        assert!(blade_contact(start, end, &target(), 0.0).is_none());
        assert!(blade_contact(start, end, &target(), 24.0).is_some());
    }

    #[test]
    fn test_tip_inside_box_hits() {
        let blade = BladeSegment::new(Vec2::ZERO, Vec2::new(110.0, 0.0));
        assert!(blade.contact(&target(), 0.0).is_some());
    }

    #[test]
    fn test_anchor_inside_box_hits_at_anchor() {
        let start = Vec2::new(105.0, 0.0);
        let hit = blade_contact(start, Vec2::new(300.0, 50.0), &target(), 0.0).unwrap();
        assert_eq!(hit, start);
    }

    #[test]
    fn test_non_finite_never_hits() {
        let bad = Vec2::new(f32::NAN, 0.0);
        assert!(blade_contact(bad, Vec2::new(200.0, 0.0), &target(), 24.0).is_none());
    }

    #[test]
    fn test_vertical_blade() {
        let start = Vec2::new(110.0, -100.0);
        let end = Vec2::new(110.0, 100.0);
        let hit = blade_contact(start, end, &target(), 0.0).unwrap();
        assert!((hit.y + 10.0).abs() < 1e-4);
    }
}
