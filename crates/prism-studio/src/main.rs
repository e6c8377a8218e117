//! Demo scene for the prism batch renderers.
//!
//! `PRISM_MAX_QUADS` overrides the per-batch capacity; `RUST_LOG` the log filter.

use std::cell::RefCell;
use std::f32::consts::{PI, TAU};
use std::rc::Rc;

use anyhow::{Context, Result};
use glam::{Mat4, Quat, Vec2, Vec3};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::device::{Gpu, GpuInit, TextureDesc, WgpuDevice};
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::paint::Color;
use prism_engine::render::{
    BatchLimits, OrthographicCamera, PerspectiveCamera, Renderer2D, Renderer3D, Texture,
};
use prism_engine::scene::{DrawCmd, DrawList, ReplayOrder, TextureFill, ZIndex};
use prism_engine::window::{Runtime, RuntimeConfig};

/// Frames between two stats reports.
const STATS_INTERVAL: u64 = 300;

/// Side of the background quad grid.
const GRID: u32 = 60;

const CLEAR: Color = Color::rgb(0.06, 0.07, 0.09);

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let failure = Rc::new(RefCell::new(None));
    let studio = Studio::new(limits_from_env(), Rc::clone(&failure));

    Runtime::run(
        RuntimeConfig {
            title: "prism studio".to_string(),
            ..RuntimeConfig::default()
        },
        GpuInit::for_batching(),
        studio,
    )?;

    let failure = failure.borrow_mut().take();
    failure.map_or(Ok(()), Err)
}

fn limits_from_env() -> BatchLimits {
    let Ok(raw) = std::env::var("PRISM_MAX_QUADS") else {
        return BatchLimits::default();
    };
    match raw.trim().parse::<usize>() {
        Ok(max_quads) => {
            log::info!("batch capacity: {max_quads} quads");
            BatchLimits::new(max_quads)
        }
        Err(err) => {
            log::warn!("ignoring PRISM_MAX_QUADS={raw:?}: {err}");
            BatchLimits::default()
        }
    }
}

/// 2x2-cell checkerboard, RGBA8.
fn checker_pixels(size: u32) -> Vec<u8> {
    let cell = (size / 2).max(1);
    (0..size * size)
        .flat_map(|i| {
            let (x, y) = (i % size, i / size);
            if ((x / cell) + (y / cell)) % 2 == 0 {
                [0xff, 0xff, 0xff, 0xff]
            } else {
                [0x30, 0x30, 0x40, 0xff]
            }
        })
        .collect()
}

struct Renderers {
    r2d: Renderer2D,
    r3d: Renderer3D,
    // Textures live on the device that created them.
    checker_2d: Texture,
    checker_3d: Texture,
}

impl Renderers {
    fn new(gpu: &Gpu<'_>, limits: BatchLimits) -> Result<Self> {
        let device = || WgpuDevice::new(gpu.device().clone(), gpu.queue().clone());

        let mut r2d = Renderer2D::with_limits(device(), limits);
        r2d.init().context("2D renderer")?;
        let mut r3d = Renderer3D::with_limits(device(), limits);
        r3d.init().context("3D renderer")?;

        let desc = TextureDesc {
            label: Some("checker"),
            width: 8,
            height: 8,
        };
        let pixels = checker_pixels(desc.width);
        let checker_2d = r2d
            .create_texture(&desc, &pixels)
            .context("failed to create 2D checker texture")?;
        let checker_3d = r3d
            .create_texture(&desc, &pixels)
            .context("failed to create 3D checker texture")?;

        Ok(Self {
            r2d,
            r3d,
            checker_2d,
            checker_3d,
        })
    }

    fn shutdown(&mut self) {
        self.r2d.shutdown();
        self.r3d.shutdown();
    }
}

struct Studio {
    limits: BatchLimits,
    renderers: Option<Renderers>,
    overlay: DrawList,
    failure: Rc<RefCell<Option<anyhow::Error>>>,
}

impl Studio {
    fn new(limits: BatchLimits, failure: Rc<RefCell<Option<anyhow::Error>>>) -> Self {
        Self {
            limits,
            renderers: None,
            overlay: DrawList::new(),
            failure,
        }
    }

    fn report_stats(r: &mut Renderers, frames: u64) {
        for (name, stats) in [("2d", r.r2d.stats()), ("3d", r.r3d.stats())] {
            log::info!(
                "{name}: {:.1} draw calls/frame, {} vertices, {} indices over {frames} frames",
                stats.draw_calls as f64 / frames as f64,
                stats.vertex_count,
                stats.index_count,
            );
        }
        r.r2d.reset_stats();
        r.r3d.reset_stats();
    }
}

impl App for Studio {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.renderers.is_none() {
            match Renderers::new(ctx.gpu, self.limits) {
                Ok(r) => self.renderers = Some(r),
                Err(err) => {
                    log::error!("{err:#}");
                    *self.failure.borrow_mut() = Some(err);
                    return AppControl::Exit;
                }
            }
        }
        let Some(r) = self.renderers.as_mut() else {
            return AppControl::Exit;
        };

        let t = ctx.time.elapsed;
        let aspect = ctx.window.aspect_ratio();
        build_overlay(&mut self.overlay, r.checker_2d, t);

        let overlay = &mut self.overlay;
        let control = ctx.render(CLEAR, |frame| {
            let (format, size) = (frame.format(), frame.size());

            r.r3d.device_mut().set_target(frame.create_view(), format, size);
            let camera = PerspectiveCamera::new(PI / 4.0, aspect, 0.1, 100.0)
                .look_at(Vec3::new(6.0 * (t * 0.2).cos(), 4.0, 6.0 * (t * 0.2).sin()), Vec3::ZERO);
            r.r3d.begin_scene(&camera);
            draw_world(&mut r.r3d, r.checker_3d, t);
            r.r3d.end_scene();
            r.r3d.device_mut().clear_target();

            r.r2d.device_mut().set_target(frame.create_view(), format, size);
            r.r2d.begin_scene(&OrthographicCamera::from_aspect(aspect, 10.0));
            overlay.replay(&mut r.r2d, ReplayOrder::PaintOrder);
            r.r2d.end_scene();
            r.r2d.device_mut().clear_target();
        });

        let frame_index = ctx.time.frame_index;
        if frame_index > 0 && frame_index % STATS_INTERVAL == 0 {
            Self::report_stats(r, STATS_INTERVAL);
        }
        control
    }

    fn on_exit(&mut self) {
        if let Some(mut r) = self.renderers.take() {
            r.shutdown();
        }
    }
}

fn draw_world(r: &mut Renderer3D, checker: Texture, t: f32) {
    r.draw_plane_textured(Vec3::new(0.0, -1.0, 0.0), Vec2::splat(12.0), &checker, 6.0, Color::WHITE);

    let spin = Mat4::from_rotation_translation(
        Quat::from_euler(glam::EulerRot::YXZ, t, t * 0.5, 0.0),
        Vec3::new(0.0, 0.5, 0.0),
    );
    r.draw_cube_transform(spin, Color::rgb(0.9, 0.35, 0.2));
    r.draw_cube_textured(Vec3::new(-2.5, 0.0, 0.0), Vec3::ONE, &checker, 1.0, Color::WHITE);
    r.draw_sphere(Vec3::new(2.5, 0.0, 0.0), 0.8, Color::rgb(0.2, 0.6, 0.9), 24);
    r.draw_cylinder(Vec3::new(0.0, 0.0, -2.5), 0.6, 2.0, Color::rgb(0.3, 0.8, 0.4), 32);
}

fn build_overlay(list: &mut DrawList, checker: Texture, t: f32) {
    list.clear();

    let cell = 8.0 / GRID as f32;
    for y in 0..GRID {
        for x in 0..GRID {
            let shade = 0.12 + 0.06 * ((x + y) % 2) as f32;
            let position = Vec2::new(-8.0 + cell * (x as f32 + 0.5), -4.0 + cell * (y as f32 + 0.5));
            list.push(ZIndex(-1), DrawCmd::quad(position, Vec2::splat(cell * 0.9), Color::rgb(shade, shade, shade * 1.2)));
        }
    }

    list.push(
        ZIndex(0),
        DrawCmd::Quad {
            position: Vec2::new(5.5, 2.5),
            size: Vec2::splat(1.5),
            rotation: t,
            colors: [Color::RED, Color::GREEN, Color::BLUE, Color::WHITE],
            fill: None,
        },
    );
    list.push(
        ZIndex(0),
        DrawCmd::Quad {
            position: Vec2::new(5.5, 0.0),
            size: Vec2::splat(1.5),
            rotation: 0.0,
            colors: [Color::WHITE; 4],
            fill: Some(TextureFill::tiled(checker, 2.0)),
        },
    );
    list.push(ZIndex(0), DrawCmd::circle(Vec2::new(5.5, -2.5), 0.8, Color::rgb(0.95, 0.75, 0.2), 48));
    list.push(
        ZIndex(1),
        DrawCmd::Arc {
            center: Vec2::new(5.5, -2.5),
            radius: 1.0,
            start: 0.0,
            end: (t % TAU).max(0.1),
            color: Color::WHITE,
            thickness: 0.08,
            segments: 48,
        },
    );
    list.push(
        ZIndex(0),
        DrawCmd::Triangle {
            points: [Vec2::new(-7.5, 3.0), Vec2::new(-6.0, 3.0), Vec2::new(-6.75, 4.2)],
            color: Color::rgb(0.7, 0.3, 0.9),
            fill: None,
        },
    );
    list.push(
        ZIndex(1),
        DrawCmd::line(Vec2::new(-8.0, -4.5), Vec2::new(0.0, -4.5), Color::WHITE.with_alpha(0.6), 0.05),
    );
}
