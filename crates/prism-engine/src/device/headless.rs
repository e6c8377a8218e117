//! Headless graphics device.
//!
//! Performs no GPU work. Every call is recorded and buffer contents are kept
//! on the CPU, so the batch engine can be driven and inspected without
//! graphics hardware.

use std::collections::{BTreeMap, HashMap};

use bytemuck::Pod;
use glam::Mat4;

use super::graphics::{
    BufferId, GraphicsDevice, ShaderDesc, ShaderId, TextureDesc, TextureId, VertexArrayId,
    VertexLayout,
};
use super::DeviceError;

/// One recorded device call.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CreateVertexBuffer { id: BufferId, size: u64 },
    CreateIndexBuffer { id: BufferId, size: u64 },
    CreateVertexArray { id: VertexArrayId },
    CreateShader { id: ShaderId, label: String },
    CreateTexture { id: TextureId, width: u32, height: u32 },
    DestroyBuffer(BufferId),
    DestroyVertexArray(VertexArrayId),
    DestroyShader(ShaderId),
    DestroyTexture(TextureId),
    WriteBuffer { id: BufferId, offset: u64, len: usize },
    BindShader(ShaderId),
    SetUniformMat4 { name: String, value: Mat4 },
    SetUniformInt { name: String, value: i32 },
    SetUniformIntArray { name: String, values: Vec<i32> },
    BindTexture { slot: u32, texture: TextureId },
    DrawIndexed { vertex_array: VertexArrayId, index_count: u32 },
}

/// Snapshot of one indexed draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub shader: Option<ShaderId>,
    pub index_count: u32,
    /// Bytes of the most recent write into the vertex buffer.
    pub vertex_data: Vec<u8>,
    /// Indices consumed by the draw.
    pub indices: Vec<u32>,
    /// Texture bindings issued since the previous draw, by slot.
    pub textures: BTreeMap<u32, TextureId>,
}

impl DrawRecord {
    /// Decodes the uploaded vertex bytes as records of type `V`.
    pub fn vertices<V: Pod>(&self) -> Vec<V> {
        bytemuck::pod_collect_to_vec(&self.vertex_data)
    }
}

struct BufferState {
    data: Vec<u8>,
    last_write_len: usize,
}

struct VertexArrayState {
    vertex_buffer: BufferId,
    index_buffer: BufferId,
}

/// Recording device with no GPU behind it.
#[derive(Default)]
pub struct HeadlessDevice {
    next_id: u32,
    buffers: HashMap<BufferId, BufferState>,
    vertex_arrays: HashMap<VertexArrayId, VertexArrayState>,
    shaders: HashMap<ShaderId, ShaderDesc>,
    textures: HashMap<TextureId, (u32, u32)>,
    bound_shader: Option<ShaderId>,
    pending_textures: BTreeMap<u32, TextureId>,
    calls: Vec<DeviceCall>,
    draws: Vec<DrawRecord>,
    fail_shader_compilation: bool,
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// A device whose shader compiler rejects every program.
    pub fn with_failing_shaders() -> Self {
        Self {
            fail_shader_compilation: true,
            ..Self::default()
        }
    }

    /// Every call in issue order.
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    /// Every indexed draw in issue order.
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    /// Forgets recorded calls and draws. Resources stay alive.
    pub fn clear_history(&mut self) {
        self.calls.clear();
        self.draws.clear();
    }

    /// Number of resources created and not yet destroyed.
    pub fn live_resources(&self) -> usize {
        self.buffers.len() + self.vertex_arrays.len() + self.shaders.len() + self.textures.len()
    }

    pub fn buffer_contents(&self, id: BufferId) -> Option<&[u8]> {
        self.buffers.get(&id).map(|b| b.data.as_slice())
    }

    pub fn texture_size(&self, id: TextureId) -> Option<(u32, u32)> {
        self.textures.get(&id).copied()
    }

    fn next_raw_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn create_buffer(&mut self, size: u64) -> BufferId {
        let id = BufferId(self.next_raw_id());
        self.buffers.insert(
            id,
            BufferState {
                data: vec![0; size as usize],
                last_write_len: 0,
            },
        );
        id
    }

    fn require_shader(&self) -> Result<ShaderId, DeviceError> {
        self.bound_shader.ok_or(DeviceError::NoShaderBound)
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn create_vertex_buffer(&mut self, size: u64) -> Result<BufferId, DeviceError> {
        let id = self.create_buffer(size);
        self.calls.push(DeviceCall::CreateVertexBuffer { id, size });
        Ok(id)
    }

    fn create_index_buffer(&mut self, size: u64) -> Result<BufferId, DeviceError> {
        let id = self.create_buffer(size);
        self.calls.push(DeviceCall::CreateIndexBuffer { id, size });
        Ok(id)
    }

    fn create_vertex_array(
        &mut self,
        vertex_buffer: BufferId,
        index_buffer: BufferId,
        layout: VertexLayout,
    ) -> Result<VertexArrayId, DeviceError> {
        for buffer in [vertex_buffer, index_buffer] {
            if !self.buffers.contains_key(&buffer) {
                return Err(DeviceError::UnknownHandle { kind: "buffer", id: buffer.0 });
            }
        }
        log::trace!("HeadlessDevice: vertex array with stride {}", layout.stride);

        let id = VertexArrayId(self.next_raw_id());
        self.vertex_arrays.insert(id, VertexArrayState { vertex_buffer, index_buffer });
        self.calls.push(DeviceCall::CreateVertexArray { id });
        Ok(id)
    }

    fn create_shader(&mut self, desc: &ShaderDesc) -> Result<ShaderId, DeviceError> {
        if self.fail_shader_compilation {
            return Err(DeviceError::ShaderCompilation {
                label: desc.label.to_string(),
                message: "headless device configured to reject shaders".to_string(),
            });
        }
        let id = ShaderId(self.next_raw_id());
        self.shaders.insert(id, *desc);
        self.calls.push(DeviceCall::CreateShader { id, label: desc.label.to_string() });
        Ok(id)
    }

    fn create_texture(&mut self, desc: &TextureDesc<'_>, pixels: &[u8]) -> Result<TextureId, DeviceError> {
        if pixels.len() != desc.byte_len() {
            return Err(DeviceError::TextureDataSize {
                expected: desc.byte_len(),
                actual: pixels.len(),
            });
        }
        let id = TextureId(self.next_raw_id());
        self.textures.insert(id, (desc.width, desc.height));
        self.calls.push(DeviceCall::CreateTexture { id, width: desc.width, height: desc.height });
        Ok(id)
    }

    fn destroy_buffer(&mut self, id: BufferId) {
        self.buffers.remove(&id);
        self.calls.push(DeviceCall::DestroyBuffer(id));
    }

    fn destroy_vertex_array(&mut self, id: VertexArrayId) {
        self.vertex_arrays.remove(&id);
        self.calls.push(DeviceCall::DestroyVertexArray(id));
    }

    fn destroy_shader(&mut self, id: ShaderId) {
        self.shaders.remove(&id);
        if self.bound_shader == Some(id) {
            self.bound_shader = None;
        }
        self.calls.push(DeviceCall::DestroyShader(id));
    }

    fn destroy_texture(&mut self, id: TextureId) {
        self.textures.remove(&id);
        self.calls.push(DeviceCall::DestroyTexture(id));
    }

    fn write_buffer(&mut self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), DeviceError> {
        let buffer = self
            .buffers
            .get_mut(&id)
            .ok_or(DeviceError::UnknownHandle { kind: "buffer", id: id.0 })?;

        let size = buffer.data.len() as u64;
        let end = offset + data.len() as u64;
        if end > size {
            return Err(DeviceError::BufferOverflow { offset, len: data.len() as u64, size });
        }
        buffer.data[offset as usize..end as usize].copy_from_slice(data);
        buffer.last_write_len = end as usize;

        self.calls.push(DeviceCall::WriteBuffer { id, offset, len: data.len() });
        Ok(())
    }

    fn bind_shader(&mut self, id: ShaderId) -> Result<(), DeviceError> {
        if !self.shaders.contains_key(&id) {
            return Err(DeviceError::UnknownHandle { kind: "shader", id: id.0 });
        }
        self.bound_shader = Some(id);
        self.calls.push(DeviceCall::BindShader(id));
        Ok(())
    }

    fn set_uniform_mat4(&mut self, name: &str, value: Mat4) -> Result<(), DeviceError> {
        self.require_shader()?;
        self.calls.push(DeviceCall::SetUniformMat4 { name: name.to_string(), value });
        Ok(())
    }

    fn set_uniform_int(&mut self, name: &str, value: i32) -> Result<(), DeviceError> {
        self.require_shader()?;
        self.calls.push(DeviceCall::SetUniformInt { name: name.to_string(), value });
        Ok(())
    }

    fn set_uniform_int_array(&mut self, name: &str, values: &[i32]) -> Result<(), DeviceError> {
        self.require_shader()?;
        self.calls.push(DeviceCall::SetUniformIntArray {
            name: name.to_string(),
            values: values.to_vec(),
        });
        Ok(())
    }

    fn bind_texture(&mut self, slot: u32, texture: TextureId) -> Result<(), DeviceError> {
        if !self.textures.contains_key(&texture) {
            return Err(DeviceError::UnknownHandle { kind: "texture", id: texture.0 });
        }
        self.pending_textures.insert(slot, texture);
        self.calls.push(DeviceCall::BindTexture { slot, texture });
        Ok(())
    }

    fn draw_indexed(&mut self, vertex_array: VertexArrayId, index_count: u32) -> Result<(), DeviceError> {
        let shader = self.require_shader()?;
        let va = self
            .vertex_arrays
            .get(&vertex_array)
            .ok_or(DeviceError::UnknownHandle { kind: "vertex array", id: vertex_array.0 })?;

        let vertex_data = self
            .buffers
            .get(&va.vertex_buffer)
            .map(|b| b.data[..b.last_write_len].to_vec())
            .unwrap_or_default();

        let index_bytes = index_count as usize * std::mem::size_of::<u32>();
        let indices = self
            .buffers
            .get(&va.index_buffer)
            .filter(|b| b.data.len() >= index_bytes)
            .map(|b| bytemuck::pod_collect_to_vec::<u8, u32>(&b.data[..index_bytes]))
            .unwrap_or_default();

        self.draws.push(DrawRecord {
            shader: Some(shader),
            index_count,
            vertex_data,
            indices,
            textures: std::mem::take(&mut self.pending_textures),
        });
        self.calls.push(DeviceCall::DrawIndexed { vertex_array, index_count });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::device::graphics::{VertexAttribute, VertexFormat};

    const LAYOUT: VertexLayout = VertexLayout {
        stride: 4,
        attributes: &[VertexAttribute { location: 0, format: VertexFormat::Float32, offset: 0 }],
    };

    const SHADER: ShaderDesc = ShaderDesc { label: "test", source: "", depth_test: false };

    #[test]
    fn write_past_end_is_rejected() {
        let mut device = HeadlessDevice::new();
        let vb = device.create_vertex_buffer(8).unwrap();
        let err = device.write_buffer(vb, 4, &[0u8; 8]).unwrap_err();
        assert_eq!(err, DeviceError::BufferOverflow { offset: 4, len: 8, size: 8 });
    }

    #[test]
    fn draw_requires_bound_shader() {
        let mut device = HeadlessDevice::new();
        let vb = device.create_vertex_buffer(16).unwrap();
        let ib = device.create_index_buffer(16).unwrap();
        let va = device.create_vertex_array(vb, ib, LAYOUT).unwrap();
        assert_eq!(device.draw_indexed(va, 3), Err(DeviceError::NoShaderBound));
    }

    #[test]
    fn draw_snapshots_uploaded_data() {
        let mut device = HeadlessDevice::new();
        let vb = device.create_vertex_buffer(16).unwrap();
        let ib = device.create_index_buffer(16).unwrap();
        let va = device.create_vertex_array(vb, ib, LAYOUT).unwrap();
        let shader = device.create_shader(&SHADER).unwrap();
        let tex = device.create_texture(&TextureDesc { label: None, width: 1, height: 1 }, &[255; 4]).unwrap();

        device.bind_shader(shader).unwrap();
        device.write_buffer(vb, 0, bytemuck::cast_slice(&[1.0f32, 2.0])).unwrap();
        device.write_buffer(ib, 0, bytemuck::cast_slice(&[0u32, 1, 0])).unwrap();
        device.bind_texture(0, tex).unwrap();
        device.draw_indexed(va, 3).unwrap();

        let draw = &device.draws()[0];
        assert_eq!(draw.vertices::<f32>(), vec![1.0, 2.0]);
        assert_eq!(draw.indices, vec![0, 1, 0]);
        assert_eq!(draw.textures.get(&0), Some(&tex));
    }

    #[test]
    fn failing_shaders_report_compilation_error() {
        let mut device = HeadlessDevice::with_failing_shaders();
        let err = device.create_shader(&SHADER).unwrap_err();
        assert!(matches!(err, DeviceError::ShaderCompilation { .. }));
        assert_eq!(device.live_resources(), 0);
    }

    #[test]
    fn destroy_releases_resources() {
        let mut device = HeadlessDevice::new();
        let vb = device.create_vertex_buffer(4).unwrap();
        assert_eq!(device.live_resources(), 1);
        device.destroy_buffer(vb);
        assert_eq!(device.live_resources(), 0);
    }
}
