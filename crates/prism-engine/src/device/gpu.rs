use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::paint::Color;
use crate::render::MAX_TEXTURE_SLOTS;

use super::SurfaceErrorAction;

/// Adapter, device and surface preferences.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when the surface offers one.
    pub prefer_srgb: bool,
    pub present_mode: wgpu::PresentMode,
    /// Ignored when the surface does not support it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,
    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Defaults plus what the batch shaders need: a binding array of
    /// [`MAX_TEXTURE_SLOTS`] textures indexed per fragment.
    pub fn for_batching() -> Self {
        let slots = MAX_TEXTURE_SLOTS as u32;
        Self {
            required_features: wgpu::Features::TEXTURE_BINDING_ARRAY
                | wgpu::Features::SAMPLED_TEXTURE_AND_STORAGE_BUFFER_ARRAY_NON_UNIFORM_INDEXING,
            required_limits: wgpu::Limits {
                max_sampled_textures_per_shader_stage: slots,
                max_binding_array_elements_per_shader_stage: slots,
                ..wgpu::Limits::default()
            },
            ..Self::default()
        }
    }
}

/// Window surface plus the device and queue that draw into it.
///
/// Batchers get their own [`WgpuDevice`](super::WgpuDevice) built from clones
/// of [`device`](Self::device) and [`queue`](Self::queue).
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
}

/// An acquired swapchain image. Hand it back through [`Gpu::present`].
pub struct GpuFrame {
    texture: wgpu::SurfaceTexture,
    format: wgpu::TextureFormat,
}

impl GpuFrame {
    /// A new view of the color target. Each device drawing into the frame takes its own.
    pub fn create_view(&self) -> wgpu::TextureView {
        self.texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.texture.texture.width(), self.texture.texture.height())
    }
}

impl<'w> Gpu<'w> {
    /// Creates a surface for `window` and a device that satisfies `init`.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;
        let adapter_name = adapter.get_info().name;

        let missing = init.required_features.difference(adapter.features());
        anyhow::ensure!(
            missing.is_empty(),
            "adapter `{adapter_name}` lacks required features: {missing:?}"
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("prism device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .with_context(|| format!("adapter `{adapter_name}` refused the device request"))?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_format(&caps.formats, init.prefer_srgb).context("surface reports no formats")?;
        let alpha_mode = match init.alpha_mode {
            Some(mode) if caps.alpha_modes.contains(&mode) => mode,
            _ => caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: Vec::new(),
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);
        log::info!("gpu ready: adapter `{adapter_name}`, surface {format:?}, {}x{}", size.width, size.height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Physical pixels. May be zero while minimized.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Tracks the new size. The surface is only reconfigured for a non-empty area.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.size = size;
        if size.width > 0 && size.height > 0 {
            self.config.width = size.width;
            self.config.height = size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn begin_frame(&self) -> Result<GpuFrame, SurfaceError> {
        Ok(GpuFrame {
            texture: self.surface.get_current_texture()?,
            format: self.config.format,
        })
    }

    /// Clears the frame and submits at once, so later draws land on top.
    pub fn clear(&self, frame: &GpuFrame, color: Color) {
        let view = frame.create_view();
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("prism clear encoder"),
            });
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("prism clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: color.r as f64,
                        g: color.g as f64,
                        b: color.b as f64,
                        a: color.a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Presents `frame`. Every draw into it must already be submitted.
    pub fn present(&self, frame: GpuFrame) {
        frame.texture.present();
    }

    /// Reconfigures the surface when the error calls for it and says what to do next.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = surface_error_action(&err);
        if action == SurfaceErrorAction::Reconfigured && self.size.width > 0 && self.size.height > 0 {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}

fn surface_error_action(err: &SurfaceError) -> SurfaceErrorAction {
    match err {
        SurfaceError::Lost | SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

/// First sRGB BGRA/RGBA format when preferred and offered, else the surface's first.
fn pick_format(formats: &[wgpu::TextureFormat], prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    const SRGB: [wgpu::TextureFormat; 2] = [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ];
    prefer_srgb
        .then(|| SRGB.into_iter().find(|f| formats.contains(f)))
        .flatten()
        .or_else(|| formats.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn srgb_preferred_when_offered() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Rgba8UnormSrgb];
        assert_eq!(pick_format(&formats, true), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(pick_format(&formats, false), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn no_formats_no_pick() {
        assert_eq!(pick_format(&[], true), None);
    }

    #[test]
    fn lost_surface_is_reconfigured() {
        assert_eq!(surface_error_action(&SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(surface_error_action(&SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
        assert_eq!(surface_error_action(&SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
    }

    #[test]
    fn batching_init_requests_texture_arrays() {
        let init = GpuInit::for_batching();
        assert!(init.required_features.contains(wgpu::Features::TEXTURE_BINDING_ARRAY));
        assert_eq!(
            init.required_limits.max_sampled_textures_per_shader_stage,
            MAX_TEXTURE_SLOTS as u32
        );
    }
}
