//! Opaque graphics-device boundary consumed by the batchers.
//!
//! The batch engine never talks to a GPU API directly. It creates buffers,
//! textures and shaders through [`GraphicsDevice`] and refers to them only by
//! the small copyable handles defined here.

use glam::Mat4;

use super::DeviceError;

/// Name of the view-projection uniform every batch shader declares.
pub const VIEW_PROJECTION_UNIFORM: &str = "u_view_projection";

/// Name of the sampler-index array uniform every batch shader declares.
pub const TEXTURES_UNIFORM: &str = "u_textures";

/// Vertex buffer or index buffer handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u32);

/// Vertex-array handle: a vertex buffer, an index buffer and a vertex layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexArrayId(pub u32);

/// Compiled shader program handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderId(pub u32);

/// Texture handle.
///
/// Texture identity in the batcher is identity of this handle, never
/// equality of texture contents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Component format of a single vertex attribute.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    Float32,
    Float32x2,
    Float32x3,
    Float32x4,
}

impl VertexFormat {
    /// Size of the attribute in bytes.
    pub const fn size(self) -> u32 {
        match self {
            VertexFormat::Float32 => 4,
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
            VertexFormat::Float32x4 => 16,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    pub location: u32,
    pub format: VertexFormat,
    pub offset: u32,
}

/// Interleaved layout of one vertex record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    pub stride: u32,
    pub attributes: &'static [VertexAttribute],
}

/// Shader program description.
///
/// `source` is WGSL. `depth_test` selects whether draws with this shader
/// read and write the depth attachment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShaderDesc {
    pub label: &'static str,
    pub source: &'static str,
    pub depth_test: bool,
}

/// RGBA8 texture description. Pixel data is tightly packed rows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextureDesc<'a> {
    pub label: Option<&'a str>,
    pub width: u32,
    pub height: u32,
}

impl TextureDesc<'_> {
    /// Number of bytes expected for the texture's pixel data.
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Minimal device surface the batch engine depends on.
///
/// Calls are synchronous from the caller's point of view: a `draw_indexed`
/// observes every `write_buffer` and `bind_texture` issued before it.
pub trait GraphicsDevice {
    fn create_vertex_buffer(&mut self, size: u64) -> Result<BufferId, DeviceError>;

    fn create_index_buffer(&mut self, size: u64) -> Result<BufferId, DeviceError>;

    /// Bundles a vertex buffer, an index buffer and the layout describing the vertex buffer.
    fn create_vertex_array(
        &mut self,
        vertex_buffer: BufferId,
        index_buffer: BufferId,
        layout: VertexLayout,
    ) -> Result<VertexArrayId, DeviceError>;

    /// Compiles a shader. Compilation failure is reported as
    /// [`DeviceError::ShaderCompilation`].
    fn create_shader(&mut self, desc: &ShaderDesc) -> Result<ShaderId, DeviceError>;

    fn create_texture(&mut self, desc: &TextureDesc<'_>, pixels: &[u8]) -> Result<TextureId, DeviceError>;

    fn destroy_buffer(&mut self, id: BufferId);

    fn destroy_vertex_array(&mut self, id: VertexArrayId);

    fn destroy_shader(&mut self, id: ShaderId);

    fn destroy_texture(&mut self, id: TextureId);

    fn write_buffer(&mut self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), DeviceError>;

    fn bind_shader(&mut self, id: ShaderId) -> Result<(), DeviceError>;

    fn set_uniform_mat4(&mut self, name: &str, value: Mat4) -> Result<(), DeviceError>;

    /// Backends whose shaders declare no scalar int uniform return
    /// [`DeviceError::UnknownUniform`]; the batchers never set one.
    fn set_uniform_int(&mut self, name: &str, value: i32) -> Result<(), DeviceError>;

    fn set_uniform_int_array(&mut self, name: &str, values: &[i32]) -> Result<(), DeviceError>;

    /// Binds `texture` to sampler unit `slot` for subsequent draws.
    fn bind_texture(&mut self, slot: u32, texture: TextureId) -> Result<(), DeviceError>;

    /// Draws `index_count` indices from the start of the vertex array's index buffer.
    fn draw_indexed(&mut self, vertex_array: VertexArrayId, index_count: u32) -> Result<(), DeviceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_format_sizes() {
        assert_eq!(VertexFormat::Float32.size(), 4);
        assert_eq!(VertexFormat::Float32x3.size(), 12);
        assert_eq!(VertexFormat::Float32x4.size(), 16);
    }

    #[test]
    fn texture_desc_byte_len_is_rgba8() {
        let desc = TextureDesc { label: None, width: 3, height: 2 };
        assert_eq!(desc.byte_len(), 24);
    }
}
