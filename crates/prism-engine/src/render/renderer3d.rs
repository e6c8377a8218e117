//! Immediate-mode 3D renderer.

use glam::{Mat4, Vec2, Vec3};

use crate::device::{GraphicsDevice, ShaderDesc, TextureDesc, WgpuDevice};
use crate::paint::Color;

use super::batch::{BatchState, Batcher};
use super::camera::Camera;
use super::limits::BatchLimits;
use super::stats::{RenderStats, ShapeKind};
use super::tessellate::{shapes3d, Primitive};
use super::texture::Texture;
use super::vertex::MeshVertex;

/// Depth-tested batch shader for [`MeshVertex`] geometry.
pub const SHADER_3D: ShaderDesc = ShaderDesc {
    label: "prism batch 3d",
    source: include_str!("shaders/batch3d.wgsl"),
    depth_test: true,
};

/// Cubes, spheres, planes and cylinders, batched.
///
/// Round solids take a segment count clamped to `[3, 64]`.
pub struct Renderer3D<D: GraphicsDevice = WgpuDevice> {
    batcher: Batcher<MeshVertex, D>,
}

impl<D: GraphicsDevice> Renderer3D<D> {
    pub fn new(device: D) -> Self {
        Self::with_limits(device, BatchLimits::default())
    }

    pub fn with_limits(device: D, limits: BatchLimits) -> Self {
        Self {
            batcher: Batcher::new("renderer3d", device, SHADER_3D, limits),
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

    /// Axis-aligned cube centered at `position`.
    pub fn draw_cube(&mut self, position: Vec3, size: Vec3, color: impl Into<Color>) {
        if !self.batcher.accepts_draws("draw_cube") {
            return;
        }
        let primitive = shapes3d::cube_at(position, size, color.into(), 1.0);
        self.emit(ShapeKind::Cube, primitive, None);
    }

    pub fn draw_cube_textured(
        &mut self,
        position: Vec3,
        size: Vec3,
        texture: &Texture,
        tiling: f32,
        tint: impl Into<Color>,
    ) {
        if !self.batcher.accepts_draws("draw_cube_textured") {
            return;
        }
        let primitive = shapes3d::cube_at(position, size, tint.into(), tiling);
        self.emit(ShapeKind::Cube, primitive, Some(texture));
    }

    /// Unit cube mapped through `transform`.
    pub fn draw_cube_transform(&mut self, transform: Mat4, color: impl Into<Color>) {
        if !self.batcher.accepts_draws("draw_cube_transform") {
            return;
        }
        let primitive = shapes3d::cube(transform, color.into(), 1.0);
        self.emit(ShapeKind::Cube, primitive, None);
    }

    pub fn draw_sphere(&mut self, center: Vec3, radius: f32, color: impl Into<Color>, segments: u32) {
        if !self.batcher.accepts_draws("draw_sphere") {
            return;
        }
        let parts = shapes3d::sphere(center, radius, color.into(), segments, 1.0);
        self.emit_all(ShapeKind::Sphere, parts, None);
    }

    pub fn draw_sphere_textured(
        &mut self,
        center: Vec3,
        radius: f32,
        texture: &Texture,
        tiling: f32,
        tint: impl Into<Color>,
        segments: u32,
    ) {
        if !self.batcher.accepts_draws("draw_sphere_textured") {
            return;
        }
        let parts = shapes3d::sphere(center, radius, tint.into(), segments, tiling);
        self.emit_all(ShapeKind::Sphere, parts, Some(texture));
    }

    /// Flat quad on the XZ plane, facing +Y.
    pub fn draw_plane(&mut self, position: Vec3, size: Vec2, color: impl Into<Color>) {
        if !self.batcher.accepts_draws("draw_plane") {
            return;
        }
        let primitive = shapes3d::plane(position, size, color.into(), 1.0);
        self.emit(ShapeKind::Plane, primitive, None);
    }

    pub fn draw_plane_textured(
        &mut self,
        position: Vec3,
        size: Vec2,
        texture: &Texture,
        tiling: f32,
        tint: impl Into<Color>,
    ) {
        if !self.batcher.accepts_draws("draw_plane_textured") {
            return;
        }
        let primitive = shapes3d::plane(position, size, tint.into(), tiling);
        self.emit(ShapeKind::Plane, primitive, Some(texture));
    }

    /// Y-aligned cylinder centered at `center`.
    pub fn draw_cylinder(
        &mut self,
        center: Vec3,
        radius: f32,
        height: f32,
        color: impl Into<Color>,
        segments: u32,
    ) {
        if !self.batcher.accepts_draws("draw_cylinder") {
            return;
        }
        let parts = shapes3d::cylinder(center, radius, height, color.into(), segments, 1.0);
        self.emit_all(ShapeKind::Cylinder, parts, None);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_cylinder_textured(
        &mut self,
        center: Vec3,
        radius: f32,
        height: f32,
        texture: &Texture,
        tiling: f32,
        tint: impl Into<Color>,
        segments: u32,
    ) {
        if !self.batcher.accepts_draws("draw_cylinder_textured") {
            return;
        }
        let parts = shapes3d::cylinder(center, radius, height, tint.into(), segments, tiling);
        self.emit_all(ShapeKind::Cylinder, parts, Some(texture));
    }

    fn emit(&mut self, kind: ShapeKind, primitive: Option<Primitive<MeshVertex>>, texture: Option<&Texture>) {
        let Some(primitive) = primitive else {
            return;
        };
        if self.batcher.submit(primitive, texture.map(Texture::id)) {
            self.batcher.record_shape(kind);
        }
    }

    fn emit_all(&mut self, kind: ShapeKind, parts: Vec<Primitive<MeshVertex>>, texture: Option<&Texture>) {
        let texture = texture.map(Texture::id);
        let mut written = false;
        for part in parts {
            written |= self.batcher.submit(part, texture);
        }
        if written {
            self.batcher.record_shape(kind);
        }
    }
}
