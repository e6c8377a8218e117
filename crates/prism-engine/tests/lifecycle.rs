mod common;

use glam::{Mat4, Vec2};
use rstest::rstest;

use prism_engine::device::{DeviceCall, HeadlessDevice, TextureDesc, TEXTURES_UNIFORM};
use prism_engine::paint::Color;
use prism_engine::render::{BatchState, Renderer2D, MAX_TEXTURE_SLOTS};

use common::*;

#[test]
fn init_uploads_sampler_table() {
    let r = renderer2d(8);
    assert_eq!(r.state(), BatchState::Initialized);
    let expected: Vec<i32> = (0..MAX_TEXTURE_SLOTS as i32).collect();
    assert!(r.device().calls().contains(&DeviceCall::SetUniformIntArray {
        name: TEXTURES_UNIFORM.to_string(),
        values: expected,
    }));
}

#[test]
fn failed_shader_releases_partial_resources() {
    let mut r = Renderer2D::new(HeadlessDevice::with_failing_shaders());
    let err = r.init().expect_err("shader compilation must fail");

    let chain = format!("{err:#}");
    assert!(chain.contains("renderer2d: initialization failed"), "{chain}");
    assert!(chain.contains("failed to compile shader"), "{chain}");
    assert_eq!(r.device().live_resources(), 0);
    assert_eq!(r.state(), BatchState::Uninitialized);
}

#[test]
fn shutdown_releases_everything() {
    let mut r = renderer2d(8);
    assert!(r.device().live_resources() > 0);
    r.shutdown();
    assert_eq!(r.state(), BatchState::ShutDown);
    assert_eq!(r.device().live_resources(), 0);
    assert!(r.white_texture().is_none());
}

#[test]
fn draws_after_shutdown_touch_nothing() {
    capture_logs();
    let mut r = renderer2d(8);
    r.shutdown();
    r.device_mut().clear_history();

    r.begin_scene(&Mat4::IDENTITY);
    r.draw_quad(Vec2::ZERO, Vec2::ONE, Color::WHITE);
    r.end_scene();

    assert!(r.device().calls().is_empty());
    let warnings = warnings();
    assert!(warnings.iter().any(|w| w.contains("draw_quad called after shutdown")), "{warnings:?}");
}

#[test]
fn shutdown_flushes_an_open_scene() {
    let mut r = renderer2d(8);
    r.begin_scene(&Mat4::IDENTITY);
    r.draw_quad(Vec2::ZERO, Vec2::ONE, Color::WHITE);
    r.shutdown();
    assert_eq!(r.device().draws().len(), 1);
}

#[test]
fn second_init_and_shutdown_are_ignored() {
    capture_logs();
    let mut r = renderer2d(8);
    let live = r.device().live_resources();
    r.init().expect("repeated init is not an error");
    assert_eq!(r.device().live_resources(), live);

    r.shutdown();
    r.shutdown();
    assert_eq!(r.device().live_resources(), 0);
    let warnings = warnings();
    assert!(warnings.iter().any(|w| w.contains("init called twice")));
    assert!(warnings.iter().any(|w| w.contains("shutdown called twice")));
}

#[rstest]
#[case::before_init(false)]
#[case::outside_scene(true)]
fn draws_outside_a_scene_are_dropped(#[case] initialized: bool) {
    let mut r = Renderer2D::new(HeadlessDevice::new());
    if initialized {
        r.init().expect("headless init");
    }
    r.draw_quad(Vec2::ZERO, Vec2::ONE, Color::WHITE);
    r.draw_circle(Vec2::ZERO, 1.0, Color::WHITE, 8);
    assert!(r.device().draws().is_empty());
    assert_eq!(r.stats().quad_count, 0);
}

#[test]
fn end_scene_without_begin_warns() {
    capture_logs();
    let mut r = renderer2d(8);
    r.end_scene();
    assert!(r.device().draws().is_empty());
    assert!(warnings().iter().any(|w| w.contains("end_scene called without an active scene")));
}

#[test]
fn create_texture_after_shutdown_is_rejected() {
    let mut r = renderer2d(8);
    r.shutdown();
    let desc = TextureDesc { label: None, width: 1, height: 1 };
    assert!(r.create_texture(&desc, &[0; 4]).is_none());
}

#[test]
fn create_texture_checks_pixel_length() {
    let mut r = renderer2d(8);
    let desc = TextureDesc { label: None, width: 2, height: 2 };
    assert!(r.create_texture(&desc, &[0; 4]).is_none());
    let tex = r.create_texture(&desc, &[0; 16]).expect("texture");
    assert_eq!((tex.width(), tex.height()), (2, 2));
}

#[test]
fn destroying_a_batched_texture_flushes_first() {
    let mut r = renderer2d(8);
    let tex = texture2d(&mut r);
    r.begin_scene(&Mat4::IDENTITY);
    r.draw_quad_textured(Vec2::ZERO, Vec2::ONE, &tex, 1.0, Color::WHITE);
    r.destroy_texture(tex);
    r.draw_quad(Vec2::ZERO, Vec2::ONE, Color::WHITE);
    r.end_scene();

    let calls = r.device().calls();
    let draw_at = calls.iter().position(|c| matches!(c, DeviceCall::DrawIndexed { .. }));
    let destroy_at = calls.iter().position(|c| *c == DeviceCall::DestroyTexture(tex.id()));
    assert!(draw_at.expect("a draw") < destroy_at.expect("a destroy"));
    assert_eq!(r.device().draws().len(), 2);
}

#[test]
fn white_texture_cannot_be_destroyed() {
    let mut r = renderer2d(8);
    let white = r.white_texture().expect("white texture");
    r.destroy_texture(white);
    assert!(r.device().texture_size(white.id()).is_some());
}
