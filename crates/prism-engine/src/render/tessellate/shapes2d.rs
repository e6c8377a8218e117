//! 2D shapes in the XY plane.

use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::paint::Color;
use crate::render::vertex::QuadVertex;

use super::{all_finite, clamp_segments, colors_finite, disc_uv, Primitive, UNIT_QUAD, UNIT_UVS};

/// Lines shorter than this are dropped.
pub const LINE_EPSILON: f32 = 1e-6;

/// Unit quad mapped through `transform`. `colors` are per corner: bottom-left,
/// bottom-right, top-right, top-left.
pub fn quad_transform(transform: Mat4, colors: [Color; 4], tiling: f32) -> Option<Primitive<QuadVertex>> {
    if !transform.is_finite() || !colors_finite(&colors) || !tiling.is_finite() {
        log::trace!("skipping quad with non-finite input");
        return None;
    }
    Some(Primitive::Quad(std::array::from_fn(|i| {
        let position = (transform * UNIT_QUAD[i].extend(0.0).extend(1.0)).truncate();
        QuadVertex::new(position, colors[i], UNIT_UVS[i] * tiling)
    })))
}

/// Quad centered at `position`, rotated `rotation` radians about Z.
pub fn quad(
    position: Vec3,
    size: Vec2,
    rotation: f32,
    colors: [Color; 4],
    tiling: f32,
) -> Option<Primitive<QuadVertex>> {
    if !position.is_finite() || !size.is_finite() || !rotation.is_finite() {
        log::trace!("skipping quad with non-finite geometry");
        return None;
    }
    let transform = Mat4::from_scale_rotation_translation(
        size.extend(1.0),
        Quat::from_rotation_z(rotation),
        position,
    );
    quad_transform(transform, colors, tiling)
}

/// Quad of height `thickness` spanning `p0` to `p1`.
pub fn line(p0: Vec2, p1: Vec2, color: Color, thickness: f32) -> Option<Primitive<QuadVertex>> {
    if !p0.is_finite() || !p1.is_finite() || !thickness.is_finite() {
        log::trace!("skipping line with non-finite input");
        return None;
    }
    if thickness <= 0.0 {
        log::trace!("skipping line with thickness {thickness}");
        return None;
    }
    let delta = p1 - p0;
    let length = delta.length();
    if length < LINE_EPSILON {
        log::trace!("skipping zero-length line");
        return None;
    }
    let midpoint = (p0 + p1) * 0.5;
    quad(
        midpoint.extend(0.0),
        Vec2::new(length, thickness),
        delta.y.atan2(delta.x),
        [color; 4],
        1.0,
    )
}

/// Three-vertex triangle.
pub fn triangle(points: [Vec3; 3], color: Color, tiling: f32) -> Option<Primitive<QuadVertex>> {
    if !points.iter().all(|p| p.is_finite()) || !color.is_finite() || !tiling.is_finite() {
        log::trace!("skipping triangle with non-finite input");
        return None;
    }
    const UVS: [Vec2; 3] = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)];
    Some(Primitive::Triangle(std::array::from_fn(|i| {
        QuadVertex::new(points[i], color, UVS[i] * tiling)
    })))
}

/// Filled ellipse as `segments` sectors.
///
/// Each sector is the degenerate quad `[center, v(a_i), v(a_{i+1}), center]`,
/// so it shares the quad index pattern and an `S`-segment ellipse is an `S`-gon.
pub fn ellipse(center: Vec2, radii: Vec2, color: Color, segments: u32) -> Vec<Primitive<QuadVertex>> {
    if !center.is_finite() || !radii.is_finite() || !color.is_finite() {
        log::trace!("skipping ellipse with non-finite input");
        return Vec::new();
    }
    if radii.x <= 0.0 || radii.y <= 0.0 {
        log::trace!("skipping ellipse with radii {radii}");
        return Vec::new();
    }

    let segments = clamp_segments(segments);
    let step = TAU / segments as f32;
    let rim = |angle: f32| {
        let (sin, cos) = angle.sin_cos();
        let position = center + Vec2::new(cos, sin) * radii;
        QuadVertex::new(position.extend(0.0), color, disc_uv(cos, sin))
    };
    let hub = QuadVertex::new(center.extend(0.0), color, Vec2::splat(0.5));

    (0..segments)
        .map(|i| {
            let a0 = i as f32 * step;
            Primitive::Quad([hub, rim(a0), rim(a0 + step), hub])
        })
        .collect()
}

/// Ellipse outline as `segments` lines.
pub fn ellipse_outline(
    center: Vec2,
    radii: Vec2,
    color: Color,
    thickness: f32,
    segments: u32,
) -> Vec<Primitive<QuadVertex>> {
    if !center.is_finite() || !radii.is_finite() {
        log::trace!("skipping ellipse outline with non-finite input");
        return Vec::new();
    }
    if radii.x <= 0.0 || radii.y <= 0.0 {
        log::trace!("skipping ellipse outline with radii {radii}");
        return Vec::new();
    }
    let segments = clamp_segments(segments);
    polyline(center, radii, 0.0, TAU / segments as f32, segments, color, thickness)
}

/// Circular arc from `start` to `end` radians, counter-clockwise.
///
/// A negative sweep is wrapped forward by whole turns. A zero sweep draws nothing.
pub fn arc(
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    color: Color,
    thickness: f32,
    segments: u32,
) -> Vec<Primitive<QuadVertex>> {
    if !center.is_finite() || !all_finite(&[radius, start, end]) {
        log::trace!("skipping arc with non-finite input");
        return Vec::new();
    }
    if radius <= 0.0 {
        log::trace!("skipping arc with radius {radius}");
        return Vec::new();
    }

    let sweep = normalize_sweep(end - start);
    if sweep == 0.0 {
        log::trace!("skipping arc with empty sweep");
        return Vec::new();
    }
    let segments = clamp_segments(segments);
    polyline(center, Vec2::splat(radius), start, sweep / segments as f32, segments, color, thickness)
}

/// Sweep with whole turns added until it is non-negative.
pub fn normalize_sweep(sweep: f32) -> f32 {
    if sweep < 0.0 { sweep.rem_euclid(TAU) } else { sweep }
}

fn polyline(
    center: Vec2,
    radii: Vec2,
    start: f32,
    step: f32,
    segments: u32,
    color: Color,
    thickness: f32,
) -> Vec<Primitive<QuadVertex>> {
    let point = |angle: f32| {
        let (sin, cos) = angle.sin_cos();
        center + Vec2::new(cos, sin) * radii
    };
    (0..segments)
        .filter_map(|i| {
            let a0 = start + i as f32 * step;
            line(point(a0), point(a0 + step), color, thickness)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(p: &Primitive<QuadVertex>) -> Vec<Vec3> {
        let mut out = Vec::new();
        let mut p = p.clone();
        p.for_each_vertex_mut(|v| out.push(Vec3::from(v.position)));
        out
    }

    #[test]
    fn unit_quad_at_origin() {
        let q = quad(Vec3::ZERO, Vec2::ONE, 0.0, [Color::RED; 4], 1.0).unwrap();
        assert_eq!(
            positions(&q),
            vec![
                Vec3::new(-0.5, -0.5, 0.0),
                Vec3::new(0.5, -0.5, 0.0),
                Vec3::new(0.5, 0.5, 0.0),
                Vec3::new(-0.5, 0.5, 0.0),
            ]
        );
    }

    #[test]
    fn gradient_colors_follow_corner_order() {
        let colors = [Color::RED, Color::GREEN, Color::BLUE, Color::WHITE];
        let Some(Primitive::Quad(vs)) = quad(Vec3::ZERO, Vec2::ONE, 0.0, colors, 1.0) else {
            panic!("expected a quad");
        };
        assert_eq!(vs[0].color, Color::RED.to_array());
        assert_eq!(vs[3].color, Color::WHITE.to_array());
    }

    #[test]
    fn tiling_scales_uvs() {
        let Some(Primitive::Quad(vs)) = quad(Vec3::ZERO, Vec2::ONE, 0.0, [Color::WHITE; 4], 3.0) else {
            panic!("expected a quad");
        };
        assert_eq!(vs[2].tex_coord, [3.0, 3.0]);
    }

    #[test]
    fn line_spans_endpoints() {
        let l = line(Vec2::ZERO, Vec2::new(0.0, 2.0), Color::WHITE, 0.5).unwrap();
        let ps = positions(&l);
        let min_y = ps.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        let max_y = ps.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert!((min_y - 0.0).abs() < 1e-5 && (max_y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_lines_are_skipped() {
        let p = Vec2::new(1.0, 1.0);
        assert!(line(p, p, Color::WHITE, 1.0).is_none());
        assert!(line(p, p + Vec2::X, Color::WHITE, 0.0).is_none());
        assert!(line(p, Vec2::new(f32::NAN, 0.0), Color::WHITE, 1.0).is_none());
    }

    #[test]
    fn nan_color_is_skipped() {
        let bad = Color::rgba(f32::NAN, 0.0, 0.0, 1.0);
        assert!(quad(Vec3::ZERO, Vec2::ONE, 0.0, [bad; 4], 1.0).is_none());
        assert!(ellipse(Vec2::ZERO, Vec2::ONE, bad, 8).is_empty());
    }

    #[test]
    fn ellipse_rim_stays_on_curve() {
        let sectors = ellipse(Vec2::ZERO, Vec2::new(2.0, 1.0), Color::WHITE, 8);
        assert_eq!(sectors.len(), 8);
        for sector in &sectors {
            for p in positions(sector).into_iter().skip(1).take(2) {
                let r = (p.x / 2.0).powi(2) + p.y.powi(2);
                assert!((r - 1.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn sector_closes_on_its_center() {
        let sectors = ellipse(Vec2::new(2.0, 3.0), Vec2::ONE, Color::WHITE, 4);
        let ps = positions(&sectors[0]);
        assert_eq!(ps[0], ps[3]);
        assert_eq!(ps[0], Vec3::new(2.0, 3.0, 0.0));
        assert!((ps[1] - Vec3::new(3.0, 3.0, 0.0)).length() < 1e-5);
        assert!((ps[2] - Vec3::new(2.0, 4.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn non_positive_radius_draws_nothing() {
        assert!(ellipse(Vec2::ZERO, Vec2::new(0.0, 1.0), Color::WHITE, 8).is_empty());
        assert!(arc(Vec2::ZERO, -1.0, 0.0, 1.0, Color::WHITE, 0.1, 8).is_empty());
    }

    #[test]
    fn negative_sweep_wraps_forward() {
        let sweep = normalize_sweep(-std::f32::consts::FRAC_PI_2);
        assert!((sweep - 1.5 * std::f32::consts::PI).abs() < 1e-5);
        assert_eq!(normalize_sweep(1.0), 1.0);
    }

    #[test]
    fn zero_sweep_arc_is_empty() {
        assert!(arc(Vec2::ZERO, 1.0, 1.0, 1.0, Color::WHITE, 0.1, 16).is_empty());
    }

    #[test]
    fn outline_emits_one_line_per_segment() {
        assert_eq!(ellipse_outline(Vec2::ZERO, Vec2::ONE, Color::WHITE, 0.1, 12).len(), 12);
    }
}
