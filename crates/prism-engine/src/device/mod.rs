//! GPU device boundary.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue and the window surface
//! - the [`GraphicsDevice`] trait the batchers draw through
//! - the wgpu-backed and headless implementations of that trait

mod error;
mod gpu;
mod graphics;
mod headless;
mod wgpu_device;

pub use error::{DeviceError, SurfaceErrorAction};
pub use gpu::{Gpu, GpuFrame, GpuInit};
pub use graphics::{
    BufferId, GraphicsDevice, ShaderDesc, ShaderId, TextureDesc, TextureId, VertexArrayId,
    VertexAttribute, VertexFormat, VertexLayout, TEXTURES_UNIFORM, VIEW_PROJECTION_UNIFORM,
};
pub use headless::{DeviceCall, DrawRecord, HeadlessDevice};
pub use wgpu_device::WgpuDevice;
