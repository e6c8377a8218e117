//! Shape tessellation.
//!
//! Pure functions turning one logical shape into [`Primitive`]s. Degenerate or
//! non-finite input yields no primitives; nothing here touches a batch.
//! Shapes made of several primitives return them separately so the batcher
//! can re-check capacity between them.

mod primitive;
pub mod shapes2d;
pub mod shapes3d;

use glam::Vec2;

use crate::paint::Color;

pub use primitive::{Primitive, QUAD_INDICES};

pub const MIN_SEGMENTS: u32 = 3;
pub const MAX_SEGMENTS: u32 = 64;

/// Clamps a requested segment count into `[MIN_SEGMENTS, MAX_SEGMENTS]`.
#[inline]
pub fn clamp_segments(segments: u32) -> u32 {
    segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

/// Unit quad corners, counter-clockwise from bottom-left.
pub(crate) const UNIT_QUAD: [Vec2; 4] = [
    Vec2::new(-0.5, -0.5),
    Vec2::new(0.5, -0.5),
    Vec2::new(0.5, 0.5),
    Vec2::new(-0.5, 0.5),
];

pub(crate) const UNIT_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

#[inline]
pub(crate) fn all_finite(values: &[f32]) -> bool {
    values.iter().all(|v| v.is_finite())
}

#[inline]
pub(crate) fn colors_finite(colors: &[Color]) -> bool {
    colors.iter().all(|c| c.is_finite())
}

/// Maps a point on the unit circle to texture space.
#[inline]
pub(crate) fn disc_uv(cos: f32, sin: f32) -> Vec2 {
    Vec2::new(0.5 + 0.5 * cos, 0.5 + 0.5 * sin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_clamped() {
        assert_eq!(clamp_segments(0), 3);
        assert_eq!(clamp_segments(2), 3);
        assert_eq!(clamp_segments(32), 32);
        assert_eq!(clamp_segments(100), 64);
    }
}
