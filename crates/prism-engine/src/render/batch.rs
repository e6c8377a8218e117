//! Batch controller.
//!
//! [`Batcher`] owns the staging arena, the texture slot table and the device
//! resources of one renderer. Shapes are submitted as [`Primitive`]s; the
//! batcher splits into a new batch whenever a primitive would overflow the
//! arena or the slot table, so callers never see capacity.
//!
//! Lifecycle:
//! `Uninitialized --init--> Initialized --begin_scene--> SceneActive --end_scene--> Initialized`,
//! and `shutdown` from any state to `ShutDown`, which is terminal.

use anyhow::{Context, Result};

use crate::device::{
    BufferId, DeviceError, GraphicsDevice, ShaderDesc, ShaderId, TextureDesc, TextureId,
    VertexArrayId, TEXTURES_UNIFORM, VIEW_PROJECTION_UNIFORM,
};

use super::arena::VertexArena;
use super::camera::Camera;
use super::limits::{BatchLimits, MAX_TEXTURE_SLOTS};
use super::slots::TextureSlotTable;
use super::stats::{RenderStats, ShapeKind};
use super::tessellate::Primitive;
use super::texture::Texture;
use super::vertex::BatchVertex;

/// Batcher lifecycle state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BatchState {
    Uninitialized,
    Initialized,
    SceneActive,
    ShutDown,
}

#[derive(Debug, Copy, Clone)]
struct Resources {
    vertex_buffer: BufferId,
    index_buffer: BufferId,
    vertex_array: VertexArrayId,
    shader: ShaderId,
    white_texture: TextureId,
}

/// Handles created so far during `init`, released if a later step fails.
#[derive(Debug, Default)]
struct PartialResources {
    vertex_buffer: Option<BufferId>,
    index_buffer: Option<BufferId>,
    vertex_array: Option<VertexArrayId>,
    shader: Option<ShaderId>,
    white_texture: Option<TextureId>,
}

impl PartialResources {
    fn release<D: GraphicsDevice>(self, device: &mut D) {
        if let Some(id) = self.shader {
            device.destroy_shader(id);
        }
        if let Some(id) = self.white_texture {
            device.destroy_texture(id);
        }
        if let Some(id) = self.vertex_array {
            device.destroy_vertex_array(id);
        }
        if let Some(id) = self.index_buffer {
            device.destroy_buffer(id);
        }
        if let Some(id) = self.vertex_buffer {
            device.destroy_buffer(id);
        }
    }
}

impl From<Resources> for PartialResources {
    fn from(r: Resources) -> Self {
        Self {
            vertex_buffer: Some(r.vertex_buffer),
            index_buffer: Some(r.index_buffer),
            vertex_array: Some(r.vertex_array),
            shader: Some(r.shader),
            white_texture: Some(r.white_texture),
        }
    }
}

/// Everything that exists only between `init` and `shutdown`.
struct Live<V> {
    resources: Resources,
    arena: VertexArena<V>,
    slots: TextureSlotTable,
}

/// Batching state machine generic over the vertex record and the device.
pub struct Batcher<V, D> {
    name: &'static str,
    device: D,
    shader: ShaderDesc,
    limits: BatchLimits,
    state: BatchState,
    live: Option<Live<V>>,
    stats: RenderStats,
}

impl<V: BatchVertex, D: GraphicsDevice> Batcher<V, D> {
    /// Creates an uninitialized batcher. No device work happens until [`init`](Self::init).
    pub fn new(name: &'static str, device: D, shader: ShaderDesc, limits: BatchLimits) -> Self {
        Self {
            name,
            device,
            shader,
            limits,
            state: BatchState::Uninitialized,
            live: None,
            stats: RenderStats::default(),
        }
    }

    #[inline]
    pub fn state(&self) -> BatchState {
        self.state
    }

    #[inline]
    pub fn limits(&self) -> BatchLimits {
        self.limits
    }

    #[inline]
    pub fn device(&self) -> &D {
        &self.device
    }

    #[inline]
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    #[inline]
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub(crate) fn record_shape(&mut self, kind: ShapeKind) {
        self.stats.record_shape(kind);
    }

    /// Vertices written into the current batch.
    pub fn pending_vertices(&self) -> usize {
        self.live.as_ref().map_or(0, |l| l.arena.vertex_count())
    }

    /// Indices written into the current batch.
    pub fn pending_indices(&self) -> usize {
        self.live.as_ref().map_or(0, |l| l.arena.index_count())
    }

    /// The shared white texture in slot 0, once initialized.
    pub fn white_texture(&self) -> Option<Texture> {
        self.live
            .as_ref()
            .map(|l| Texture::new(l.resources.white_texture, 1, 1))
    }

    /// Creates device resources and the staging arena.
    ///
    /// On failure every resource created so far is released and the batcher
    /// stays uninitialized. Repeated calls, or calls after shutdown, are ignored.
    pub fn init(&mut self) -> Result<()> {
        match self.state {
            BatchState::Uninitialized => {}
            BatchState::ShutDown => {
                log::warn!("{}: init called after shutdown", self.name);
                return Ok(());
            }
            BatchState::Initialized | BatchState::SceneActive => {
                log::warn!("{}: init called twice", self.name);
                return Ok(());
            }
        }

        let mut partial = PartialResources::default();
        let resources = match Self::create_resources(&mut self.device, &self.shader, self.limits, &mut partial) {
            Ok(resources) => resources,
            Err(err) => {
                partial.release(&mut self.device);
                return Err(err.context(format!("{}: initialization failed", self.name)));
            }
        };

        self.live = Some(Live {
            resources,
            arena: VertexArena::new(self.limits),
            slots: TextureSlotTable::new(resources.white_texture),
        });
        self.state = BatchState::Initialized;
        log::debug!(
            "{}: initialized ({} quads, {} vertices, {} indices per batch)",
            self.name,
            self.limits.max_quads(),
            self.limits.max_vertices(),
            self.limits.max_indices()
        );
        Ok(())
    }

    fn create_resources(
        device: &mut D,
        shader: &ShaderDesc,
        limits: BatchLimits,
        partial: &mut PartialResources,
    ) -> Result<Resources> {
        let vertex_bytes = (limits.max_vertices() * std::mem::size_of::<V>()) as u64;
        let index_bytes = (limits.max_indices() * std::mem::size_of::<u32>()) as u64;

        let vertex_buffer = device
            .create_vertex_buffer(vertex_bytes)
            .context("failed to create vertex buffer")?;
        partial.vertex_buffer = Some(vertex_buffer);

        let index_buffer = device
            .create_index_buffer(index_bytes)
            .context("failed to create index buffer")?;
        partial.index_buffer = Some(index_buffer);

        let vertex_array = device
            .create_vertex_array(vertex_buffer, index_buffer, V::LAYOUT)
            .context("failed to create vertex array")?;
        partial.vertex_array = Some(vertex_array);

        let white_texture = device
            .create_texture(
                &TextureDesc { label: Some("white"), width: 1, height: 1 },
                &[0xff; 4],
            )
            .context("failed to create white texture")?;
        partial.white_texture = Some(white_texture);

        let shader = device
            .create_shader(shader)
            .with_context(|| format!("failed to compile shader `{}`", shader.label))?;
        partial.shader = Some(shader);

        let samplers: Vec<i32> = (0..MAX_TEXTURE_SLOTS as i32).collect();
        device
            .bind_shader(shader)
            .and_then(|()| device.set_uniform_int_array(TEXTURES_UNIFORM, &samplers))
            .context("failed to upload sampler indices")?;

        Ok(Resources {
            vertex_buffer,
            index_buffer,
            vertex_array,
            shader,
            white_texture,
        })
    }

    /// Releases every device resource. Terminal: later calls are rejected.
    ///
    /// An active scene is flushed first.
    pub fn shutdown(&mut self) {
        match self.state {
            BatchState::ShutDown => {
                log::warn!("{}: shutdown called twice", self.name);
                return;
            }
            BatchState::SceneActive => self.flush_batch(),
            BatchState::Uninitialized | BatchState::Initialized => {}
        }

        if let Some(live) = self.live.take() {
            PartialResources::from(live.resources).release(&mut self.device);
        }
        self.state = BatchState::ShutDown;
        log::debug!("{}: shut down", self.name);
    }

    /// Binds the batch shader, uploads the camera and opens the first batch.
    pub fn begin_scene(&mut self, camera: &impl Camera) {
        match self.state {
            BatchState::ShutDown => {
                log::warn!("{}: begin_scene called after shutdown", self.name);
                return;
            }
            BatchState::Uninitialized => {
                log::warn!("{}: begin_scene called before init", self.name);
                return;
            }
            BatchState::SceneActive => {
                log::warn!("{}: begin_scene called while a scene is active", self.name);
                return;
            }
            BatchState::Initialized => {}
        }
        let Some(shader) = self.live.as_ref().map(|l| l.resources.shader) else {
            log::warn!("{}: begin_scene called without a shader", self.name);
            return;
        };

        let view_projection = camera.view_projection();
        if let Err(err) = self
            .device
            .bind_shader(shader)
            .and_then(|()| self.device.set_uniform_mat4(VIEW_PROJECTION_UNIFORM, view_projection))
        {
            log::error!("{}: failed to set up scene: {err}", self.name);
            return;
        }

        self.start_batch();
        self.state = BatchState::SceneActive;
    }

    /// Flushes the last batch and closes the scene.
    pub fn end_scene(&mut self) {
        if self.state != BatchState::SceneActive {
            log::warn!("{}: end_scene called without an active scene", self.name);
            return;
        }
        self.flush_batch();
        self.start_batch();
        self.state = BatchState::Initialized;
    }

    /// Submits the current batch now and starts a new one.
    pub fn flush(&mut self) {
        if self.state != BatchState::SceneActive {
            log::warn!("{}: flush called without an active scene", self.name);
            return;
        }
        self.next_batch();
    }

    /// Whether draws are accepted right now. Logs why not.
    pub(crate) fn accepts_draws(&self, op: &str) -> bool {
        match self.state {
            BatchState::SceneActive => true,
            BatchState::Uninitialized => {
                log::warn!("{}: {op} called before init", self.name);
                false
            }
            BatchState::Initialized => {
                log::warn!("{}: {op} called outside begin_scene/end_scene", self.name);
                false
            }
            BatchState::ShutDown => {
                log::warn!("{}: {op} called after shutdown", self.name);
                false
            }
        }
    }

    /// Writes one primitive into the current batch, splitting first if it
    /// would not fit. `texture` of `None` samples the white texture.
    ///
    /// Returns whether the primitive was written.
    pub fn submit(&mut self, mut primitive: Primitive<V>, texture: Option<TextureId>) -> bool {
        if self.state != BatchState::SceneActive {
            return false;
        }
        let Some(live) = self.live.as_ref() else {
            return false;
        };

        if !live.arena.fits_empty(&primitive) {
            log::warn!(
                "{}: dropping primitive of {} vertices / {} indices, larger than a whole batch",
                self.name,
                primitive.vertex_count(),
                primitive.index_count()
            );
            return false;
        }
        if !live.arena.fits(&primitive) {
            log::debug!("{}: batch full, splitting", self.name);
            self.next_batch();
        }

        let slot = match texture {
            None => 0,
            Some(texture) => match self.resolve_slot(texture) {
                Some(slot) => slot,
                None => return false,
            },
        };
        primitive.for_each_vertex_mut(|v| v.set_tex_index(slot));

        let Some(live) = self.live.as_mut() else {
            return false;
        };
        match live.arena.append(&primitive) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("{}: {err}", self.name);
                false
            }
        }
    }

    fn resolve_slot(&mut self, texture: TextureId) -> Option<u32> {
        let live = self.live.as_mut()?;
        if let Ok(slot) = live.slots.get_or_assign(texture) {
            return Some(slot);
        }

        log::debug!("{}: texture slots full, splitting", self.name);
        self.next_batch();
        let live = self.live.as_mut()?;
        match live.slots.get_or_assign(texture) {
            Ok(slot) => Some(slot),
            Err(err) => {
                log::warn!("{}: {err} after a fresh batch", self.name);
                None
            }
        }
    }

    fn start_batch(&mut self) {
        if let Some(live) = self.live.as_mut() {
            live.arena.reset();
            live.slots.reset();
        }
    }

    fn next_batch(&mut self) {
        self.flush_batch();
        self.start_batch();
    }

    /// Uploads and draws the current batch. Does not reset it.
    fn flush_batch(&mut self) {
        let Some(live) = self.live.as_ref() else {
            return;
        };
        if live.arena.is_empty() {
            return;
        }

        let vertices = live.arena.vertex_count();
        let indices = live.arena.index_count();
        match Self::submit_batch(&mut self.device, live) {
            Ok(()) => {
                self.stats.record_flush(vertices, indices);
                log::trace!(
                    "{}: flushed {vertices} vertices, {indices} indices, {} textures",
                    self.name,
                    live.slots.active_count()
                );
            }
            Err(err) => {
                log::error!("{}: dropping batch of {indices} indices: {err}", self.name);
            }
        }
    }

    fn submit_batch(device: &mut D, live: &Live<V>) -> Result<(), DeviceError> {
        let r = &live.resources;
        device.write_buffer(r.vertex_buffer, 0, bytemuck::cast_slice(live.arena.vertices()))?;
        device.write_buffer(r.index_buffer, 0, bytemuck::cast_slice(live.arena.indices()))?;
        for (slot, texture) in live.slots.iter_active() {
            device.bind_texture(slot, texture)?;
        }
        device.draw_indexed(r.vertex_array, live.arena.index_count() as u32)
    }

    /// Creates an RGBA8 texture. `pixels` is `width * height * 4` bytes.
    ///
    /// Rejected after shutdown.
    pub fn create_texture(&mut self, desc: &TextureDesc<'_>, pixels: &[u8]) -> Option<Texture> {
        if self.state == BatchState::ShutDown {
            log::warn!("{}: create_texture called after shutdown", self.name);
            return None;
        }
        match self.device.create_texture(desc, pixels) {
            Ok(id) => Some(Texture::new(id, desc.width, desc.height)),
            Err(err) => {
                log::error!("{}: failed to create texture: {err}", self.name);
                None
            }
        }
    }

    /// Destroys a texture. If the current batch samples it, the batch is
    /// flushed first. The white texture cannot be destroyed this way.
    pub fn destroy_texture(&mut self, texture: Texture) {
        if self.state == BatchState::ShutDown {
            log::warn!("{}: destroy_texture called after shutdown", self.name);
            return;
        }
        if let Some(live) = self.live.as_ref() {
            if texture.id() == live.resources.white_texture {
                log::warn!("{}: refusing to destroy the white texture", self.name);
                return;
            }
            if self.state == BatchState::SceneActive && live.slots.contains(texture.id()) {
                self.next_batch();
            }
        }
        self.device.destroy_texture(texture.id());
    }
}

impl<V, D> Drop for Batcher<V, D> {
    fn drop(&mut self) {
        if matches!(self.state, BatchState::Initialized | BatchState::SceneActive) {
            log::debug!("{}: dropped without shutdown; device resources are left to the device", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceCall, HeadlessDevice};
    use crate::render::vertex::QuadVertex;
    use glam::{Mat4, Vec3};

    const SHADER: ShaderDesc = ShaderDesc { label: "test", source: "", depth_test: false };

    fn batcher(max_quads: usize) -> Batcher<QuadVertex, HeadlessDevice> {
        let mut b = Batcher::new("test", HeadlessDevice::new(), SHADER, BatchLimits::new(max_quads));
        b.init().unwrap();
        b
    }

    fn quad() -> Primitive<QuadVertex> {
        Primitive::Quad([QuadVertex::new(Vec3::ZERO, Default::default(), Default::default()); 4])
    }

    #[test]
    fn init_uploads_sampler_indices() {
        let b = batcher(4);
        let expected: Vec<i32> = (0..32).collect();
        assert!(b.device().calls().contains(&DeviceCall::SetUniformIntArray {
            name: TEXTURES_UNIFORM.to_string(),
            values: expected,
        }));
        assert_eq!(b.state(), BatchState::Initialized);
    }

    #[test]
    fn second_init_is_ignored() {
        let mut b = batcher(4);
        let live = b.device().live_resources();
        b.init().unwrap();
        assert_eq!(b.device().live_resources(), live);
    }

    #[test]
    fn failed_init_releases_everything() {
        let mut b: Batcher<QuadVertex, _> =
            Batcher::new("test", HeadlessDevice::with_failing_shaders(), SHADER, BatchLimits::new(4));
        let err = b.init().unwrap_err();
        assert!(format!("{err:#}").contains("failed to compile shader"));
        assert_eq!(b.device().live_resources(), 0);
        assert_eq!(b.state(), BatchState::Uninitialized);
    }

    #[test]
    fn empty_scene_issues_no_draw() {
        let mut b = batcher(4);
        b.begin_scene(&Mat4::IDENTITY);
        b.end_scene();
        assert!(b.device().draws().is_empty());
        assert_eq!(b.stats().draw_calls, 0);
    }

    #[test]
    fn overflow_splits_before_writing() {
        let mut b = batcher(2);
        b.begin_scene(&Mat4::IDENTITY);
        for _ in 0..5 {
            assert!(b.submit(quad(), None));
        }
        b.end_scene();
        let counts: Vec<u32> = b.device().draws().iter().map(|d| d.index_count).collect();
        assert_eq!(counts, vec![12, 12, 6]);
    }

    #[test]
    fn oversize_primitive_is_dropped() {
        let mut b = batcher(1);
        b.begin_scene(&Mat4::IDENTITY);
        let big = Primitive::QuadList(vec![[QuadVertex::new(Vec3::ZERO, Default::default(), Default::default()); 4]; 2]);
        assert!(!b.submit(big, None));
        b.end_scene();
        assert!(b.device().draws().is_empty());
    }

    #[test]
    fn submit_outside_scene_is_rejected() {
        let mut b = batcher(4);
        assert!(!b.submit(quad(), None));
        assert_eq!(b.pending_indices(), 0);
    }

    #[test]
    fn shutdown_flushes_active_scene() {
        let mut b = batcher(4);
        b.begin_scene(&Mat4::IDENTITY);
        b.submit(quad(), None);
        b.shutdown();
        assert_eq!(b.device().draws().len(), 1);
        assert_eq!(b.device().live_resources(), 0);
        assert_eq!(b.state(), BatchState::ShutDown);
    }

    #[test]
    fn begin_scene_twice_keeps_pending_geometry() {
        let mut b = batcher(4);
        b.begin_scene(&Mat4::IDENTITY);
        b.submit(quad(), None);
        b.begin_scene(&Mat4::IDENTITY);
        assert_eq!(b.pending_vertices(), 4);
    }

    #[test]
    fn destroying_a_sampled_texture_flushes() {
        let mut b = batcher(4);
        let tex = b
            .create_texture(&TextureDesc { label: None, width: 1, height: 1 }, &[0; 4])
            .unwrap();
        b.begin_scene(&Mat4::IDENTITY);
        b.submit(quad(), Some(tex.id()));
        b.destroy_texture(tex);
        assert_eq!(b.device().draws().len(), 1);
        assert_eq!(b.device().draws()[0].textures.get(&1), Some(&tex.id()));
    }
}
