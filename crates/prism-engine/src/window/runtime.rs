use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Requests an app can make from inside a frame. Applied once the frame returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    exit: bool,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.exit = true;
    }
}

/// Owns the event loop and the single render window.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until it exits or the window is closed.
    ///
    /// Returns the window or GPU startup error, if any.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut host = Host {
            config,
            gpu_init,
            app,
            surface: None,
            exiting: false,
            startup_error: None,
        };
        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        host.startup_error.map_or(Ok(()), Err)
    }
}

/// Window plus the GPU surface borrowing it.
#[self_referencing]
struct Surface {
    clock: FrameClock,
    window: Window,
    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Host<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    surface: Option<Surface>,
    exiting: bool,
    startup_error: Option<anyhow::Error>,
}

impl<A: App> Host<A> {
    fn open(&self, event_loop: &ActiveEventLoop) -> Result<Surface> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        SurfaceTryBuilder {
            clock: FrameClock::new(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    /// Lets the app release GPU resources, then drops the surface and stops the loop.
    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        if !self.exiting {
            self.exiting = true;
            self.app.on_exit();
            self.surface = None;
        }
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, id: WindowId) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let mut runtime = RuntimeCtx::default();
        let app = &mut self.app;
        let control = surface.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id,
                    window: fields.window,
                },
                gpu: fields.gpu,
                time: fields.clock.tick(),
                runtime: &mut runtime,
            };
            app.on_frame(&mut ctx)
        });

        if control == AppControl::Exit || runtime.exit {
            self.shut_down(event_loop);
        }
    }
}

impl<A: App> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() || self.exiting {
            return;
        }
        match self.open(event_loop) {
            Ok(surface) => {
                surface.with_window(|w| w.request_redraw());
                self.surface = Some(surface);
            }
            Err(err) => {
                log::error!("startup failed: {err:#}");
                self.startup_error = Some(err);
                self.shut_down(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(surface) = &self.surface {
            surface.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.exiting || self.surface.is_none() {
            return;
        }
        if self.app.on_window_event(id, &event) == AppControl::Exit {
            self.shut_down(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shut_down(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(surface) = self.surface.as_mut() {
                    surface.with_gpu_mut(|gpu| gpu.resize(size));
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(surface) = self.surface.as_mut() {
                    let size = surface.with_window(|w| w.inner_size());
                    surface.with_gpu_mut(|gpu| gpu.resize(size));
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop, id),
            _ => {}
        }
    }
}
