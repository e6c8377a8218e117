//! 3D shapes with per-vertex normals.

use std::f32::consts::{PI, TAU};

use glam::{Mat3, Mat4, Vec2, Vec3};

use crate::paint::Color;
use crate::render::vertex::MeshVertex;

use super::{all_finite, clamp_segments, disc_uv, Primitive, UNIT_UVS};

/// Unit cube faces: outward normal and corners wound counter-clockwise seen from outside.
const CUBE_FACES: [(Vec3, [Vec3; 4]); 6] = [
    (
        Vec3::X,
        [
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(0.5, 0.5, 0.5),
        ],
    ),
    (
        Vec3::NEG_X,
        [
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, -0.5),
        ],
    ),
    (
        Vec3::Y,
        [
            Vec3::new(-0.5, 0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
        ],
    ),
    (
        Vec3::NEG_Y,
        [
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(-0.5, -0.5, 0.5),
        ],
    ),
    (
        Vec3::Z,
        [
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
        ],
    ),
    (
        Vec3::NEG_Z,
        [
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
        ],
    ),
];

/// Unit cube mapped through `transform`: 24 vertices, one quad per face.
///
/// Normals go through the inverse-transpose of the linear part, so
/// non-uniform scale keeps them perpendicular to their faces.
pub fn cube(transform: Mat4, color: Color, tiling: f32) -> Option<Primitive<MeshVertex>> {
    if !transform.is_finite() || !color.is_finite() || !tiling.is_finite() {
        log::trace!("skipping cube with non-finite input");
        return None;
    }
    let linear = Mat3::from_mat4(transform);
    let det = linear.determinant();
    if det == 0.0 || !det.is_finite() {
        log::trace!("skipping cube with singular transform");
        return None;
    }
    let normal_matrix = linear.inverse().transpose();

    let faces = CUBE_FACES
        .iter()
        .map(|(normal, corners)| {
            let normal = (normal_matrix * *normal).normalize_or_zero();
            std::array::from_fn(|i| {
                MeshVertex::new(
                    transform.transform_point3(corners[i]),
                    color,
                    UNIT_UVS[i] * tiling,
                    normal,
                )
            })
        })
        .collect();
    Some(Primitive::QuadList(faces))
}

/// Axis-aligned cube centered at `position`.
pub fn cube_at(position: Vec3, size: Vec3, color: Color, tiling: f32) -> Option<Primitive<MeshVertex>> {
    if !position.is_finite() || !size.is_finite() {
        log::trace!("skipping cube with non-finite geometry");
        return None;
    }
    cube(Mat4::from_translation(position) * Mat4::from_scale(size), color, tiling)
}

/// UV sphere: `segments` latitude rings by `segments` longitude steps, one quad per cell.
///
/// Texture coordinates are `(ring, step) / segments`.
pub fn sphere(center: Vec3, radius: f32, color: Color, segments: u32, tiling: f32) -> Vec<Primitive<MeshVertex>> {
    if !center.is_finite() || !all_finite(&[radius, tiling]) || !color.is_finite() {
        log::trace!("skipping sphere with non-finite input");
        return Vec::new();
    }
    if radius <= 0.0 {
        log::trace!("skipping sphere with radius {radius}");
        return Vec::new();
    }

    let segments = clamp_segments(segments);
    let s = segments as f32;
    let direction = |ring: u32, step: u32| {
        let theta = PI * ring as f32 / s;
        let phi = TAU * step as f32 / s;
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_p, cos_p) = phi.sin_cos();
        Vec3::new(sin_t * cos_p, cos_t, sin_t * sin_p)
    };

    let mut cells = Vec::with_capacity((segments * segments) as usize);
    for i in 0..segments {
        for j in 0..segments {
            let grid = [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)];
            let dirs = grid.map(|(ring, step)| direction(ring, step));
            let normal = dirs.iter().copied().sum::<Vec3>().normalize_or_zero();
            cells.push(Primitive::Quad(std::array::from_fn(|k| {
                let (ring, step) = grid[k];
                let uv = Vec2::new(ring as f32 / s, step as f32 / s);
                MeshVertex::new(center + dirs[k] * radius, color, uv * tiling, normal)
            })));
        }
    }
    cells
}

/// Flat quad on the XZ plane facing +Y.
pub fn plane(position: Vec3, size: Vec2, color: Color, tiling: f32) -> Option<Primitive<MeshVertex>> {
    if !position.is_finite() || !size.is_finite() || !color.is_finite() || !tiling.is_finite() {
        log::trace!("skipping plane with non-finite input");
        return None;
    }
    const CORNERS: [Vec2; 4] = [
        Vec2::new(-0.5, 0.5),
        Vec2::new(0.5, 0.5),
        Vec2::new(0.5, -0.5),
        Vec2::new(-0.5, -0.5),
    ];
    Some(Primitive::Quad(std::array::from_fn(|i| {
        let offset = CORNERS[i] * size;
        MeshVertex::new(
            position + Vec3::new(offset.x, 0.0, offset.y),
            color,
            UNIT_UVS[i] * tiling,
            Vec3::Y,
        )
    })))
}

/// Capped cylinder centered at `center` along Y: `segments` top cap wedges,
/// `segments` bottom cap wedges, then `segments` side quads.
///
/// Each cap wedge is its own triangle, so a cap can straddle batches.
pub fn cylinder(
    center: Vec3,
    radius: f32,
    height: f32,
    color: Color,
    segments: u32,
    tiling: f32,
) -> Vec<Primitive<MeshVertex>> {
    if !center.is_finite() || !all_finite(&[radius, height, tiling]) || !color.is_finite() {
        log::trace!("skipping cylinder with non-finite input");
        return Vec::new();
    }
    if radius <= 0.0 || height <= 0.0 {
        log::trace!("skipping cylinder with radius {radius}, height {height}");
        return Vec::new();
    }

    let segments = clamp_segments(segments);
    let half = height * 0.5;
    let angles: Vec<(f32, f32)> = (0..=segments)
        .map(|k| (TAU * k as f32 / segments as f32).sin_cos())
        .collect();
    let rim_point = |(sin, cos): (f32, f32), y: f32| center + Vec3::new(cos * radius, y, sin * radius);

    let mut out = Vec::with_capacity(3 * segments as usize);
    // Top wedges wind counter-clockwise seen from +Y, bottom ones from -Y.
    for (y, normal) in [(half, Vec3::Y), (-half, Vec3::NEG_Y)] {
        let hub = MeshVertex::new(center + Vec3::Y * y, color, Vec2::splat(0.5) * tiling, normal);
        let edge = |a: (f32, f32)| MeshVertex::new(rim_point(a, y), color, disc_uv(a.1, a.0) * tiling, normal);
        for w in angles.windows(2) {
            let (a0, a1) = if normal.y > 0.0 { (w[1], w[0]) } else { (w[0], w[1]) };
            out.push(Primitive::Triangle([hub, edge(a0), edge(a1)]));
        }
    }

    for k in 0..segments as usize {
        let (a0, a1) = (angles[k], angles[k + 1]);
        let n0 = Vec3::new(a0.1, 0.0, a0.0);
        let n1 = Vec3::new(a1.1, 0.0, a1.0);
        let u0 = k as f32 / segments as f32;
        let u1 = (k + 1) as f32 / segments as f32;
        out.push(Primitive::Quad([
            MeshVertex::new(rim_point(a0, -half), color, Vec2::new(u0, 0.0) * tiling, n0),
            MeshVertex::new(rim_point(a1, -half), color, Vec2::new(u1, 0.0) * tiling, n1),
            MeshVertex::new(rim_point(a1, half), color, Vec2::new(u1, 1.0) * tiling, n1),
            MeshVertex::new(rim_point(a0, half), color, Vec2::new(u0, 1.0) * tiling, n0),
        ]));
    }
    out
}
