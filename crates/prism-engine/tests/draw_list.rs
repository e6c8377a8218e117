mod common;

use glam::{Mat4, Vec2};
use rstest::rstest;

use prism_engine::device::HeadlessDevice;
use prism_engine::paint::Color;
use prism_engine::render::{BatchLimits, Renderer2D};
use prism_engine::scene::{DrawCmd, DrawList, ReplayOrder, TextureFill, ZIndex};

use common::*;

/// Red circle (3 sectors) then a green quad, both on layer 0.
fn circle_then_quad() -> DrawList {
    let mut list = DrawList::new();
    list.push(ZIndex(0), DrawCmd::circle(Vec2::ZERO, 1.0, Color::RED, 3));
    list.push(ZIndex(0), DrawCmd::quad(Vec2::ZERO, Vec2::ONE, Color::GREEN));
    list
}

fn first_color(r: &Renderer2D<HeadlessDevice>) -> [f32; 4] {
    quad_vertices(&r.device().draws()[0])[0].color
}

#[rstest]
#[case(ReplayOrder::PaintOrder, Color::RED)]
#[case(ReplayOrder::GroupByShape, Color::GREEN)]
fn replay_order_decides_what_is_drawn_first(#[case] order: ReplayOrder, #[case] first: Color) {
    let mut list = circle_then_quad();
    let mut r = renderer2d(BatchLimits::DEFAULT_MAX_QUADS);
    r.begin_scene(&Mat4::IDENTITY);
    list.replay(&mut r, order);
    r.end_scene();

    assert_eq!(first_color(&r), first.to_array());
    let stats = r.stats();
    assert_eq!((stats.quad_count, stats.circle_count), (1, 1));
    assert_eq!(stats.vertex_count, 4 + 4 * 3);
}

#[test]
fn z_index_wins_over_insertion_order() {
    let mut list = DrawList::new();
    list.push(ZIndex(5), DrawCmd::quad(Vec2::ZERO, Vec2::ONE, Color::BLUE));
    list.push(ZIndex(-1), DrawCmd::quad(Vec2::ZERO, Vec2::ONE, Color::RED));

    let mut r = renderer2d(16);
    r.begin_scene(&Mat4::IDENTITY);
    list.replay(&mut r, ReplayOrder::default());
    r.end_scene();

    assert_eq!(first_color(&r), Color::RED.to_array());
}

#[test]
fn replay_leaves_the_list_intact() {
    let mut list = circle_then_quad();
    let mut r = renderer2d(16);
    for _ in 0..2 {
        r.begin_scene(&Mat4::IDENTITY);
        list.replay(&mut r, ReplayOrder::PaintOrder);
        r.end_scene();
    }
    assert_eq!(list.len(), 2);
    assert_eq!(r.stats().quad_count, 2);
    assert_eq!(r.stats().draw_calls, 2);
}

#[test]
fn textured_command_replays_with_its_texture() {
    let mut r = renderer2d(16);
    let tex = texture2d(&mut r);
    let mut list = DrawList::new();
    list.push(
        ZIndex(0),
        DrawCmd::Triangle {
            points: [Vec2::ZERO, Vec2::X, Vec2::Y],
            color: Color::WHITE,
            fill: Some(TextureFill::tiled(tex, 4.0)),
        },
    );

    r.begin_scene(&Mat4::IDENTITY);
    list.replay(&mut r, ReplayOrder::PaintOrder);
    r.end_scene();

    let draw = &r.device().draws()[0];
    assert_eq!(draw.textures.get(&1), Some(&tex.id()));
    assert_eq!(quad_vertices(draw)[1].tex_coord, [4.0, 0.0]);
    assert_eq!(r.stats().triangle_count, 1);
}
