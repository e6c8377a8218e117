use glam::{Mat4, Vec2};

use crate::device::GraphicsDevice;
use crate::paint::Color;
use crate::render::{Renderer2D, ShapeKind, Texture};

/// Texture applied to a recorded shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextureFill {
    pub texture: Texture,
    pub tiling: f32,
}

impl TextureFill {
    pub const fn new(texture: Texture) -> Self {
        Self { texture, tiling: 1.0 }
    }

    pub const fn tiled(texture: Texture, tiling: f32) -> Self {
        Self { texture, tiling }
    }
}

/// One recorded 2D draw call.
///
/// Each variant replays as exactly one `Renderer2D::draw_*` call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Quad with per-corner colors (bottom-left, bottom-right, top-right,
    /// top-left). With a fill, the first color is the tint.
    Quad {
        position: Vec2,
        size: Vec2,
        rotation: f32,
        colors: [Color; 4],
        fill: Option<TextureFill>,
    },
    QuadTransform {
        transform: Mat4,
        color: Color,
        fill: Option<TextureFill>,
    },
    Line {
        p0: Vec2,
        p1: Vec2,
        color: Color,
        thickness: f32,
    },
    Triangle {
        points: [Vec2; 3],
        color: Color,
        fill: Option<TextureFill>,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
        segments: u32,
    },
    EllipseOutline {
        center: Vec2,
        radii: Vec2,
        color: Color,
        thickness: f32,
        segments: u32,
    },
    Arc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: Color,
        thickness: f32,
        segments: u32,
    },
}

impl DrawCmd {
    pub fn quad(position: Vec2, size: Vec2, color: Color) -> Self {
        DrawCmd::Quad { position, size, rotation: 0.0, colors: [color; 4], fill: None }
    }

    pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Self {
        DrawCmd::Ellipse { center, radii: Vec2::splat(radius), color, segments }
    }

    pub fn line(p0: Vec2, p1: Vec2, color: Color, thickness: f32) -> Self {
        DrawCmd::Line { p0, p1, color, thickness }
    }

    /// Shape family the command counts toward.
    pub fn kind(&self) -> ShapeKind {
        match self {
            DrawCmd::Quad { .. } | DrawCmd::QuadTransform { .. } => ShapeKind::Quad,
            DrawCmd::Line { .. } => ShapeKind::Line,
            DrawCmd::Triangle { .. } => ShapeKind::Triangle,
            DrawCmd::Ellipse { .. } | DrawCmd::EllipseOutline { .. } | DrawCmd::Arc { .. } => ShapeKind::Circle,
        }
    }

    /// Issues the command against `renderer`.
    pub fn replay<D: GraphicsDevice>(&self, renderer: &mut Renderer2D<D>) {
        match *self {
            DrawCmd::Quad { position, size, rotation, colors, fill: None } => {
                if colors.iter().all(|c| *c == colors[0]) {
                    renderer.draw_rotated_quad(position, size, rotation, colors[0]);
                } else {
                    renderer.draw_rotated_quad_gradient(position, size, rotation, colors);
                }
            }
            DrawCmd::Quad { position, size, rotation, colors, fill: Some(fill) } => {
                renderer.draw_rotated_quad_textured(position, size, rotation, &fill.texture, fill.tiling, colors[0]);
            }
            DrawCmd::QuadTransform { transform, color, fill: None } => {
                renderer.draw_quad_transform(transform, color);
            }
            DrawCmd::QuadTransform { transform, color, fill: Some(fill) } => {
                renderer.draw_quad_transform_textured(transform, &fill.texture, fill.tiling, color);
            }
            DrawCmd::Line { p0, p1, color, thickness } => renderer.draw_line(p0, p1, color, thickness),
            DrawCmd::Triangle { points: [p0, p1, p2], color, fill: None } => {
                renderer.draw_triangle(p0, p1, p2, color);
            }
            DrawCmd::Triangle { points: [p0, p1, p2], color, fill: Some(fill) } => {
                renderer.draw_triangle_textured(p0, p1, p2, &fill.texture, fill.tiling, color);
            }
            DrawCmd::Ellipse { center, radii, color, segments } => {
                renderer.draw_ellipse(center, radii, color, segments);
            }
            DrawCmd::EllipseOutline { center, radii, color, thickness, segments } => {
                renderer.draw_ellipse_outline(center, radii, color, thickness, segments);
            }
            DrawCmd::Arc { center, radius, start, end, color, thickness, segments } => {
                renderer.draw_arc(center, radius, start, end, color, thickness, segments);
            }
        }
    }
}
