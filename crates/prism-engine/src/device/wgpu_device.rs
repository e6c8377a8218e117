//! wgpu implementation of [`GraphicsDevice`].
//!
//! Each `draw_indexed` is encoded into its own command buffer and submitted
//! immediately, so buffer writes issued between draws are observed in order.
//! Textures are exposed to shaders as a binding array of
//! [`MAX_TEXTURE_SLOTS`] views; unbound slots see a 1x1 fallback texture.

use std::collections::HashMap;
use std::num::{NonZeroU32, NonZeroU64};

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::render::MAX_TEXTURE_SLOTS;

use super::graphics::{
    BufferId, GraphicsDevice, ShaderDesc, ShaderId, TextureDesc, TextureId, VertexArrayId,
    VertexFormat, VertexLayout, TEXTURES_UNIFORM, VIEW_PROJECTION_UNIFORM,
};
use super::DeviceError;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewProjectionUniform {
    view_projection: [[f32; 4]; 4],
}

struct BufferEntry {
    buffer: wgpu::Buffer,
    size: u64,
}

struct VertexArrayEntry {
    vertex_buffer: BufferId,
    index_buffer: BufferId,
    stride: u64,
    attributes: Vec<wgpu::VertexAttribute>,
}

struct ShaderEntry {
    desc: ShaderDesc,
    module: wgpu::ShaderModule,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

struct TextureEntry {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

struct ColorTarget {
    view: wgpu::TextureView,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

struct DepthTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
    needs_clear: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct PipelineKey {
    shader: ShaderId,
    vertex_array: VertexArrayId,
    format: wgpu::TextureFormat,
}

/// wgpu-backed graphics device.
///
/// Draws go to the color target attached with [`set_target`](Self::set_target).
pub struct WgpuDevice {
    device: wgpu::Device,
    queue: wgpu::Queue,
    next_id: u32,

    buffers: HashMap<BufferId, BufferEntry>,
    vertex_arrays: HashMap<VertexArrayId, VertexArrayEntry>,
    shaders: HashMap<ShaderId, ShaderEntry>,
    textures: HashMap<TextureId, TextureEntry>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,

    uniform_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    sampler: wgpu::Sampler,
    fallback: TextureEntry,

    bound_shader: Option<ShaderId>,
    bound_textures: [Option<TextureId>; MAX_TEXTURE_SLOTS],

    target: Option<ColorTarget>,
    depth: Option<DepthTarget>,
}

impl WgpuDevice {
    /// Wraps a device and queue. The device must have been created with the
    /// features from [`GpuInit::for_batching`](super::GpuInit::for_batching).
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism uniform bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(
                            std::mem::size_of::<ViewProjectionUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism texture array bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: NonZeroU32::new(MAX_TEXTURE_SLOTS as u32),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism batch pipeline layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            immediate_size: 0,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("prism batch sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let fallback = upload_rgba8(&device, &queue, Some("prism fallback texture"), 1, 1, &[255; 4]);

        Self {
            device,
            queue,
            next_id: 0,
            buffers: HashMap::new(),
            vertex_arrays: HashMap::new(),
            shaders: HashMap::new(),
            textures: HashMap::new(),
            pipelines: HashMap::new(),
            uniform_layout,
            texture_layout,
            pipeline_layout,
            sampler,
            fallback,
            bound_shader: None,
            bound_textures: [None; MAX_TEXTURE_SLOTS],
            target: None,
            depth: None,
        }
    }

    /// Attaches the color target for subsequent draws.
    ///
    /// The depth attachment is (re)created to match and cleared by the first
    /// depth-tested draw.
    pub fn set_target(&mut self, view: wgpu::TextureView, format: wgpu::TextureFormat, size: (u32, u32)) {
        let (width, height) = (size.0.max(1), size.1.max(1));
        if self
            .depth
            .as_ref()
            .is_some_and(|d| d.width != width || d.height != height)
        {
            self.depth = None;
        }
        if let Some(depth) = self.depth.as_mut() {
            depth.needs_clear = true;
        }
        self.target = Some(ColorTarget { view, format, width, height });
    }

    /// Detaches the color target. Draws fail with [`DeviceError::NoRenderTarget`] until the next
    /// [`set_target`](Self::set_target).
    pub fn clear_target(&mut self) {
        self.target = None;
    }

    fn next_raw_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn create_buffer(&mut self, size: u64, usage: wgpu::BufferUsages, label: &str) -> BufferId {
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let id = BufferId(self.next_raw_id());
        self.buffers.insert(id, BufferEntry { buffer, size });
        id
    }

    fn ensure_pipeline(&mut self, key: PipelineKey) -> Result<(), DeviceError> {
        if self.pipelines.contains_key(&key) {
            return Ok(());
        }

        let shader = self
            .shaders
            .get(&key.shader)
            .ok_or(DeviceError::UnknownHandle { kind: "shader", id: key.shader.0 })?;
        let va = self
            .vertex_arrays
            .get(&key.vertex_array)
            .ok_or(DeviceError::UnknownHandle { kind: "vertex array", id: key.vertex_array.0 })?;

        let depth_stencil = shader.desc.depth_test.then(|| wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(shader.desc.label),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader.module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: va.stride,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &va.attributes,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader.module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: key.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("created pipeline for shader `{}` ({:?})", shader.desc.label, key.format);
        self.pipelines.insert(key, pipeline);
        Ok(())
    }

    fn ensure_depth(&mut self, width: u32, height: u32) {
        if self.depth.is_some() {
            return;
        }
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("prism depth"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.depth = Some(DepthTarget {
            _texture: texture,
            view,
            width,
            height,
            needs_clear: true,
        });
    }

    fn texture_bind_group(&self) -> wgpu::BindGroup {
        let views: Vec<&wgpu::TextureView> = self
            .bound_textures
            .iter()
            .map(|slot| {
                slot.and_then(|id| self.textures.get(&id))
                    .map_or(&self.fallback.view, |entry| &entry.view)
            })
            .collect();

        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism texture array"),
            layout: &self.texture_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureViewArray(&views),
            }],
        })
    }
}

impl GraphicsDevice for WgpuDevice {
    fn create_vertex_buffer(&mut self, size: u64) -> Result<BufferId, DeviceError> {
        Ok(self.create_buffer(size, wgpu::BufferUsages::VERTEX, "prism batch vbo"))
    }

    fn create_index_buffer(&mut self, size: u64) -> Result<BufferId, DeviceError> {
        Ok(self.create_buffer(size, wgpu::BufferUsages::INDEX, "prism batch ibo"))
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

        let attributes = layout
            .attributes
            .iter()
            .map(|a| wgpu::VertexAttribute {
                format: to_wgpu_format(a.format),
                offset: a.offset as u64,
                shader_location: a.location,
            })
            .collect();

        let id = VertexArrayId(self.next_raw_id());
        self.vertex_arrays.insert(
            id,
            VertexArrayEntry {
                vertex_buffer,
                index_buffer,
                stride: layout.stride as u64,
                attributes,
            },
        );
        Ok(id)
    }

    fn create_shader(&mut self, desc: &ShaderDesc) -> Result<ShaderId, DeviceError> {
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(desc.label),
            source: wgpu::ShaderSource::Wgsl(desc.source.into()),
        });
        let info = pollster::block_on(module.get_compilation_info());
        let errors: Vec<String> = info
            .messages
            .iter()
            .filter(|m| m.message_type == wgpu::CompilationMessageType::Error)
            .map(|m| m.message.clone())
            .collect();
        if !errors.is_empty() {
            return Err(DeviceError::ShaderCompilation {
                label: desc.label.to_string(),
                message: errors.join("; "),
            });
        }

        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism view-projection ubo"),
            size: std::mem::size_of::<ViewProjectionUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism uniform bind group"),
            layout: &self.uniform_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let id = ShaderId(self.next_raw_id());
        self.shaders.insert(
            id,
            ShaderEntry {
                desc: *desc,
                module,
                uniform_buffer,
                uniform_bind_group,
            },
        );
        Ok(id)
    }

    fn create_texture(&mut self, desc: &TextureDesc<'_>, pixels: &[u8]) -> Result<TextureId, DeviceError> {
        if pixels.len() != desc.byte_len() {
            return Err(DeviceError::TextureDataSize {
                expected: desc.byte_len(),
                actual: pixels.len(),
            });
        }
        let entry = upload_rgba8(&self.device, &self.queue, desc.label, desc.width, desc.height, pixels);
        let id = TextureId(self.next_raw_id());
        self.textures.insert(id, entry);
        Ok(id)
    }

    fn destroy_buffer(&mut self, id: BufferId) {
        if let Some(entry) = self.buffers.remove(&id) {
            entry.buffer.destroy();
        }
    }

    fn destroy_vertex_array(&mut self, id: VertexArrayId) {
        self.vertex_arrays.remove(&id);
        self.pipelines.retain(|key, _| key.vertex_array != id);
    }

    fn destroy_shader(&mut self, id: ShaderId) {
        if let Some(entry) = self.shaders.remove(&id) {
            entry.uniform_buffer.destroy();
        }
        self.pipelines.retain(|key, _| key.shader != id);
        if self.bound_shader == Some(id) {
            self.bound_shader = None;
        }
    }

    fn destroy_texture(&mut self, id: TextureId) {
        if let Some(entry) = self.textures.remove(&id) {
            entry.texture.destroy();
        }
        for slot in self.bound_textures.iter_mut().filter(|s| **s == Some(id)) {
            *slot = None;
        }
    }

    fn write_buffer(&mut self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), DeviceError> {
        let entry = self
            .buffers
            .get(&id)
            .ok_or(DeviceError::UnknownHandle { kind: "buffer", id: id.0 })?;
        let len = data.len() as u64;
        if offset + len > entry.size {
            return Err(DeviceError::BufferOverflow { offset, len, size: entry.size });
        }
        if len > 0 {
            self.queue.write_buffer(&entry.buffer, offset, data);
        }
        Ok(())
    }

    fn bind_shader(&mut self, id: ShaderId) -> Result<(), DeviceError> {
        if !self.shaders.contains_key(&id) {
            return Err(DeviceError::UnknownHandle { kind: "shader", id: id.0 });
        }
        self.bound_shader = Some(id);
        Ok(())
    }

    fn set_uniform_mat4(&mut self, name: &str, value: Mat4) -> Result<(), DeviceError> {
        let shader = self.bound_shader.ok_or(DeviceError::NoShaderBound)?;
        if name != VIEW_PROJECTION_UNIFORM {
            return Err(DeviceError::UnknownUniform(name.to_string()));
        }
        let entry = self
            .shaders
            .get(&shader)
            .ok_or(DeviceError::UnknownHandle { kind: "shader", id: shader.0 })?;
        let uniform = ViewProjectionUniform {
            view_projection: value.to_cols_array_2d(),
        };
        self.queue.write_buffer(&entry.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
        Ok(())
    }

    /// The batch shaders declare no scalar int uniforms, so every name is unknown here.
    fn set_uniform_int(&mut self, name: &str, _value: i32) -> Result<(), DeviceError> {
        self.bound_shader.ok_or(DeviceError::NoShaderBound)?;
        scalar_int_uniform(name)
    }

    fn set_uniform_int_array(&mut self, name: &str, values: &[i32]) -> Result<(), DeviceError> {
        self.bound_shader.ok_or(DeviceError::NoShaderBound)?;
        if name != TEXTURES_UNIFORM {
            return Err(DeviceError::UnknownUniform(name.to_string()));
        }
        // Binding-array element i is always sampler unit i.
        if values.iter().enumerate().any(|(i, &v)| v != i as i32) {
            log::warn!("`{TEXTURES_UNIFORM}` remapping is not supported by the wgpu backend; slots map 1:1");
        }
        Ok(())
    }

    fn bind_texture(&mut self, slot: u32, texture: TextureId) -> Result<(), DeviceError> {
        if slot as usize >= MAX_TEXTURE_SLOTS {
            return Err(DeviceError::SlotOutOfRange { slot, max: MAX_TEXTURE_SLOTS as u32 });
        }
        if !self.textures.contains_key(&texture) {
            return Err(DeviceError::UnknownHandle { kind: "texture", id: texture.0 });
        }
        self.bound_textures[slot as usize] = Some(texture);
        Ok(())
    }

    fn draw_indexed(&mut self, vertex_array: VertexArrayId, index_count: u32) -> Result<(), DeviceError> {
        let shader_id = self.bound_shader.ok_or(DeviceError::NoShaderBound)?;
        let (format, width, height) = self
            .target
            .as_ref()
            .map(|t| (t.format, t.width, t.height))
            .ok_or(DeviceError::NoRenderTarget)?;

        let key = PipelineKey { shader: shader_id, vertex_array, format };
        self.ensure_pipeline(key)?;

        let depth_test = self.shaders.get(&shader_id).is_some_and(|s| s.desc.depth_test);
        if depth_test {
            self.ensure_depth(width, height);
        }

        let texture_bind_group = self.texture_bind_group();

        let (Some(target), Some(pipeline), Some(shader), Some(va)) = (
            self.target.as_ref(),
            self.pipelines.get(&key),
            self.shaders.get(&shader_id),
            self.vertex_arrays.get(&vertex_array),
        ) else {
            return Err(DeviceError::UnknownHandle { kind: "vertex array", id: vertex_array.0 });
        };
        let vbo = self
            .buffers
            .get(&va.vertex_buffer)
            .ok_or(DeviceError::UnknownHandle { kind: "buffer", id: va.vertex_buffer.0 })?;
        let ibo = self
            .buffers
            .get(&va.index_buffer)
            .ok_or(DeviceError::UnknownHandle { kind: "buffer", id: va.index_buffer.0 })?;

        let depth_attachment = self
            .depth
            .as_ref()
            .filter(|_| depth_test)
            .map(|depth| wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: if depth.needs_clear {
                        wgpu::LoadOp::Clear(1.0)
                    } else {
                        wgpu::LoadOp::Load
                    },
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("prism batch encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("prism batch pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: depth_attachment,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &shader.uniform_bind_group, &[]);
            rpass.set_bind_group(1, &texture_bind_group, &[]);
            rpass.set_vertex_buffer(0, vbo.buffer.slice(..));
            rpass.set_index_buffer(ibo.buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..index_count, 0, 0..1);
        }
        self.queue.submit(std::iter::once(encoder.finish()));

        if depth_test {
            if let Some(depth) = self.depth.as_mut() {
                depth.needs_clear = false;
            }
        }
        Ok(())
    }
}

fn to_wgpu_format(format: VertexFormat) -> wgpu::VertexFormat {
    match format {
        VertexFormat::Float32 => wgpu::VertexFormat::Float32,
        VertexFormat::Float32x2 => wgpu::VertexFormat::Float32x2,
        VertexFormat::Float32x3 => wgpu::VertexFormat::Float32x3,
        VertexFormat::Float32x4 => wgpu::VertexFormat::Float32x4,
    }
}

fn upload_rgba8(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: Option<&str>,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> TextureEntry {
    let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label,
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    TextureEntry { texture, view }
}

fn scalar_int_uniform(name: &str) -> Result<(), DeviceError> {
    Err(DeviceError::UnknownUniform(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_int_uniforms_are_unknown() {
        for name in [TEXTURES_UNIFORM, VIEW_PROJECTION_UNIFORM, "u_anything"] {
            assert_eq!(scalar_int_uniform(name), Err(DeviceError::UnknownUniform(name.to_string())));
        }
    }

    #[test]
    fn vertex_formats_map_one_to_one() {
        assert_eq!(to_wgpu_format(VertexFormat::Float32), wgpu::VertexFormat::Float32);
        assert_eq!(to_wgpu_format(VertexFormat::Float32x2), wgpu::VertexFormat::Float32x2);
        assert_eq!(to_wgpu_format(VertexFormat::Float32x3), wgpu::VertexFormat::Float32x3);
        assert_eq!(to_wgpu_format(VertexFormat::Float32x4), wgpu::VertexFormat::Float32x4);
    }

    #[test]
    fn vertex_format_sizes_match_wgpu() {
        for format in [
            VertexFormat::Float32,
            VertexFormat::Float32x2,
            VertexFormat::Float32x3,
            VertexFormat::Float32x4,
        ] {
            assert_eq!(format.size() as u64, to_wgpu_format(format).size());
        }
    }
}
