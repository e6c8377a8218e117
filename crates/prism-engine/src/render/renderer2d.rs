//! Immediate-mode 2D renderer.

use glam::{Mat4, Vec2};

use crate::device::{GraphicsDevice, ShaderDesc, TextureDesc, WgpuDevice};
use crate::paint::Color;

use super::batch::{BatchState, Batcher};
use super::camera::Camera;
use super::limits::BatchLimits;
use super::stats::{RenderStats, ShapeKind};
use super::tessellate::{shapes2d, Primitive};
use super::texture::Texture;
use super::vertex::QuadVertex;

/// Batch shader for [`QuadVertex`] geometry.
pub const SHADER_2D: ShaderDesc = ShaderDesc {
    label: "prism batch 2d",
    source: include_str!("shaders/batch2d.wgsl"),
    depth_test: false,
};

/// Quads, lines, triangles, circles, ellipses and arcs, batched.
///
/// Rotations are radians counter-clockwise. Positions live in the XY plane
/// at `z = 0` unless a transform says otherwise.
pub struct Renderer2D<D: GraphicsDevice = WgpuDevice> {
    batcher: Batcher<QuadVertex, D>,
}

impl<D: GraphicsDevice> Renderer2D<D> {
    pub fn new(device: D) -> Self {
        Self::with_limits(device, BatchLimits::default())
    }

    pub fn with_limits(device: D, limits: BatchLimits) -> Self {
        Self {
            batcher: Batcher::new("renderer2d", device, SHADER_2D, limits),
        }
    }

    pub fn init(&mut self) -> anyhow::Result<()> {
        self.batcher.init()
    }

    pub fn shutdown(&mut self) {
        self.batcher.shutdown();
    }

    pub fn begin_scene(&mut self, camera: &impl Camera) {
        self.batcher.begin_scene(camera);
    }

    pub fn end_scene(&mut self) {
        self.batcher.end_scene();
    }

    pub fn flush(&mut self) {
        self.batcher.flush();
    }

    pub fn state(&self) -> BatchState {
        self.batcher.state()
    }

    pub fn stats(&self) -> RenderStats {
        self.batcher.stats()
    }

    pub fn reset_stats(&mut self) {
        self.batcher.reset_stats();
    }

    pub fn device(&self) -> &D {
        self.batcher.device()
    }

    pub fn device_mut(&mut self) -> &mut D {
        self.batcher.device_mut()
    }

    pub fn create_texture(&mut self, desc: &TextureDesc<'_>, pixels: &[u8]) -> Option<Texture> {
        self.batcher.create_texture(desc, pixels)
    }

    pub fn destroy_texture(&mut self, texture: Texture) {
        self.batcher.destroy_texture(texture);
    }

    pub fn white_texture(&self) -> Option<Texture> {
        self.batcher.white_texture()
    }

    // --- quads -------------------------------------------------------------

    pub fn draw_quad(&mut self, position: Vec2, size: Vec2, color: impl Into<Color>) {
        self.quad("draw_quad", position, size, 0.0, [color.into(); 4], None, 1.0);
    }

    pub fn draw_quad_textured(
        &mut self,
        position: Vec2,
        size: Vec2,
        texture: &Texture,
        tiling: f32,
        tint: impl Into<Color>,
    ) {
        self.quad("draw_quad_textured", position, size, 0.0, [tint.into(); 4], Some(texture), tiling);
    }

    pub fn draw_rotated_quad(&mut self, position: Vec2, size: Vec2, rotation: f32, color: impl Into<Color>) {
        self.quad("draw_rotated_quad", position, size, rotation, [color.into(); 4], None, 1.0);
    }

    pub fn draw_rotated_quad_textured(
        &mut self,
        position: Vec2,
        size: Vec2,
        rotation: f32,
        texture: &Texture,
        tiling: f32,
        tint: impl Into<Color>,
    ) {
        self.quad(
            "draw_rotated_quad_textured",
            position,
            size,
            rotation,
            [tint.into(); 4],
            Some(texture),
            tiling,
        );
    }

    /// Unit quad centered on the origin, mapped through `transform`.
    pub fn draw_quad_transform(&mut self, transform: Mat4, color: impl Into<Color>) {
        if !self.batcher.accepts_draws("draw_quad_transform") {
            return;
        }
        let primitive = shapes2d::quad_transform(transform, [color.into(); 4], 1.0);
        self.emit(ShapeKind::Quad, primitive, None);
    }

    pub fn draw_quad_transform_textured(
        &mut self,
        transform: Mat4,
        texture: &Texture,
        tiling: f32,
        tint: impl Into<Color>,
    ) {
        if !self.batcher.accepts_draws("draw_quad_transform_textured") {
            return;
        }
        let primitive = shapes2d::quad_transform(transform, [tint.into(); 4], tiling);
        self.emit(ShapeKind::Quad, primitive, Some(texture));
    }

    /// Corner colors in order: bottom-left, bottom-right, top-right, top-left.
    pub fn draw_quad_gradient(&mut self, position: Vec2, size: Vec2, colors: [Color; 4]) {
        self.quad("draw_quad_gradient", position, size, 0.0, colors, None, 1.0);
    }

    pub fn draw_rotated_quad_gradient(&mut self, position: Vec2, size: Vec2, rotation: f32, colors: [Color; 4]) {
        self.quad("draw_rotated_quad_gradient", position, size, rotation, colors, None, 1.0);
    }

    // --- lines and triangles -----------------------------------------------

    /// Line of `thickness` from `p0` to `p1`. Zero-length lines draw nothing.
    pub fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: impl Into<Color>, thickness: f32) {
        if !self.batcher.accepts_draws("draw_line") {
            return;
        }
        let primitive = shapes2d::line(p0, p1, color.into(), thickness);
        self.emit(ShapeKind::Line, primitive, None);
    }

    pub fn draw_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: impl Into<Color>) {
        if !self.batcher.accepts_draws("draw_triangle") {
            return;
        }
        let points = [p0.extend(0.0), p1.extend(0.0), p2.extend(0.0)];
        let primitive = shapes2d::triangle(points, color.into(), 1.0);
        self.emit(ShapeKind::Triangle, primitive, None);
    }

    pub fn draw_triangle_textured(
        &mut self,
        p0: Vec2,
        p1: Vec2,
        p2: Vec2,
        texture: &Texture,
        tiling: f32,
        tint: impl Into<Color>,
    ) {
        if !self.batcher.accepts_draws("draw_triangle_textured") {
            return;
        }
        let points = [p0.extend(0.0), p1.extend(0.0), p2.extend(0.0)];
        let primitive = shapes2d::triangle(points, tint.into(), tiling);
        self.emit(ShapeKind::Triangle, primitive, Some(texture));
    }

    // --- round shapes ------------------------------------------------------

    /// Filled circle of `segments` wedges, clamped to `[3, 64]`.
    pub fn draw_circle(&mut self, center: Vec2, radius: f32, color: impl Into<Color>, segments: u32) {
        if !self.batcher.accepts_draws("draw_circle") {
            return;
        }
        let parts = shapes2d::ellipse(center, Vec2::splat(radius), color.into(), segments);
        self.emit_all(ShapeKind::Circle, parts);
    }

    pub fn draw_ellipse(&mut self, center: Vec2, radii: Vec2, color: impl Into<Color>, segments: u32) {
        if !self.batcher.accepts_draws("draw_ellipse") {
            return;
        }
        let parts = shapes2d::ellipse(center, radii, color.into(), segments);
        self.emit_all(ShapeKind::Circle, parts);
    }

    pub fn draw_circle_outline(
        &mut self,
        center: Vec2,
        radius: f32,
        color: impl Into<Color>,
        thickness: f32,
        segments: u32,
    ) {
        if !self.batcher.accepts_draws("draw_circle_outline") {
            return;
        }
        let parts = shapes2d::ellipse_outline(center, Vec2::splat(radius), color.into(), thickness, segments);
        self.emit_all(ShapeKind::Circle, parts);
    }

    pub fn draw_ellipse_outline(
        &mut self,
        center: Vec2,
        radii: Vec2,
        color: impl Into<Color>,
        thickness: f32,
        segments: u32,
    ) {
        if !self.batcher.accepts_draws("draw_ellipse_outline") {
            return;
        }
        let parts = shapes2d::ellipse_outline(center, radii, color.into(), thickness, segments);
        self.emit_all(ShapeKind::Circle, parts);
    }

    /// Arc from `start` to `end` radians. A negative sweep wraps forward.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: impl Into<Color>,
        thickness: f32,
        segments: u32,
    ) {
        if !self.batcher.accepts_draws("draw_arc") {
            return;
        }
        let parts = shapes2d::arc(center, radius, start, end, color.into(), thickness, segments);
        self.emit_all(ShapeKind::Circle, parts);
    }

    // --- internals ---------------------------------------------------------

    #[allow(clippy::too_many_arguments)]
    fn quad(
        &mut self,
        op: &str,
        position: Vec2,
        size: Vec2,
        rotation: f32,
        colors: [Color; 4],
        texture: Option<&Texture>,
        tiling: f32,
    ) {
        if !self.batcher.accepts_draws(op) {
            return;
        }
        let primitive = shapes2d::quad(position.extend(0.0), size, rotation, colors, tiling);
        self.emit(ShapeKind::Quad, primitive, texture);
    }

    fn emit(&mut self, kind: ShapeKind, primitive: Option<Primitive<QuadVertex>>, texture: Option<&Texture>) {
        let Some(primitive) = primitive else {
            return;
        };
        if self.batcher.submit(primitive, texture.map(Texture::id)) {
            self.batcher.record_shape(kind);
        }
    }

    fn emit_all(&mut self, kind: ShapeKind, parts: Vec<Primitive<QuadVertex>>) {
        let mut written = false;
        for part in parts {
            written |= self.batcher.submit(part, None);
        }
        if written {
            self.batcher.record_shape(kind);
        }
    }
}
