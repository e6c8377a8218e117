#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Once;

use prism_engine::device::{DrawRecord, HeadlessDevice, TextureDesc};
use prism_engine::render::{BatchLimits, MeshVertex, QuadVertex, Renderer2D, Renderer3D, Texture};

pub fn renderer2d(max_quads: usize) -> Renderer2D<HeadlessDevice> {
    let mut r = Renderer2D::with_limits(HeadlessDevice::new(), BatchLimits::new(max_quads));
    r.init().expect("headless init");
    r
}

pub fn renderer3d(max_quads: usize) -> Renderer3D<HeadlessDevice> {
    let mut r = Renderer3D::with_limits(HeadlessDevice::new(), BatchLimits::new(max_quads));
    r.init().expect("headless init");
    r
}

pub fn texture2d(r: &mut Renderer2D<HeadlessDevice>) -> Texture {
    r.create_texture(&TextureDesc { label: None, width: 2, height: 2 }, &[255; 16])
        .expect("texture")
}

pub fn texture3d(r: &mut Renderer3D<HeadlessDevice>) -> Texture {
    r.create_texture(&TextureDesc { label: None, width: 2, height: 2 }, &[255; 16])
        .expect("texture")
}

pub fn quad_vertices(draw: &DrawRecord) -> Vec<QuadVertex> {
    draw.vertices::<QuadVertex>()
}

pub fn mesh_vertices(draw: &DrawRecord) -> Vec<MeshVertex> {
    draw.vertices::<MeshVertex>()
}

pub fn total_indices(draws: &[DrawRecord]) -> u32 {
    draws.iter().map(|d| d.index_count).sum()
}

// --- log capture ------------------------------------------------------------
//
// Each test runs on its own thread, so records are kept per thread.

thread_local! {
    static CAPTURED: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        CAPTURED.with(|c| c.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Installs the capturing logger (once per binary) and clears this thread's records.
pub fn capture_logs() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
}

pub fn warnings() -> Vec<String> {
    CAPTURED.with(|c| {
        c.borrow()
            .iter()
            .filter(|(level, _)| *level == log::Level::Warn)
            .map(|(_, msg)| msg.clone())
            .collect()
    })
}
