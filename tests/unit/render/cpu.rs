use super::*;
use crate::assets::fonts::FontRole;
use crate::assets::text::TextAnchor;
use crate::compile::plan::TextSlot;
use crate::compile::shapes::compile_shapes;
use crate::foundation::core::{Canvas, Frame, Point};
use crate::foundation::math::premul_channel;
use crate::layout::metrics::LayoutMetrics;
use crate::scene::style::{LayoutRatios, Palette};

#[path = "../../support/blocks.rs"]
mod blocks;

use blocks::BlockText;

fn close(a: [u8; 4], b: [u8; 4], tol: u8) -> bool {
    a.iter().zip(b).all(|(&x, y)| x.abs_diff(y) <= tol)
}

fn grey_surface(width: u32, height: u32) -> Surface {
    Surface::normalize(&Frame::solid(width, height, Rgba8::rgb(128, 128, 128)), false).unwrap()
}

fn text_op(anchor: TextAnchor, origin: Point, shadow: Option<TextShadow>) -> TextOp {
    TextOp {
        slot: TextSlot::Date,
        role: FontRole::Date,
        text: "H".to_owned(),
        size_px: 40.0,
        origin,
        anchor,
        color: Rgba8::WHITE,
        shadow,
    }
}

const SHADOW: TextShadow = TextShadow {
    color: Rgba8::rgba(0, 0, 0, 204),
    sigma: 2.0,
    radius: 6,
};

#[test]
fn shapes_land_where_the_layout_puts_them() {
    let canvas = Canvas {
        width: 640,
        height: 360,
    };
    let m = LayoutMetrics::compute(canvas, 5.0 * 0.6 * 57.6, 2, &LayoutRatios::default()).unwrap();
    let palette = Palette::default();
    let mut surface = Surface::normalize(&Frame::solid(640, 360, Rgba8::BLACK), false).unwrap();
    draw_shapes(&mut surface, &compile_shapes(&m, &palette)).unwrap();

    let at = |p: Point| surface.pixel(p.x as u32, p.y as u32).unwrap();
    let box_inside = Point::new(m.info_box.x0 + m.box_pad_x, m.info_box.center().y);
    // The translucent box over black leaves its premultiplied color.
    let b = palette.box_fill;
    let expected = [
        premul_channel(b.r, b.a),
        premul_channel(b.g, b.a),
        premul_channel(b.b, b.a),
        255,
    ];
    assert!(close(at(box_inside), expected, 3), "{:?}", at(box_inside));

    let accent = palette.accent;
    assert!(close(at(m.icon.center()), [accent.r, accent.g, accent.b, 255], 3));
    assert!(close(at(m.bar.center()), [accent.r, accent.g, accent.b, 255], 3));

    let s = palette.check_stroke;
    assert!(close(at(m.check_points[1]), [s.r, s.g, s.b, 255], 3));

    assert_eq!(surface.pixel(600, 20).unwrap(), [0, 0, 0, 255]);
}

#[test]
fn top_anchored_text_fills_its_glyph_box() {
    let mut surface = grey_surface(160, 80);
    let op = text_op(TextAnchor::Top, Point::new(20.0, 20.0), None);
    draw_text(&mut surface, &[op], &mut BlockText::default()).unwrap();

    assert!(close(surface.pixel(30, 38).unwrap(), [255, 255, 255, 255], 2));
    assert!(close(surface.pixel(43, 38).unwrap(), [128, 128, 128, 255], 1));
    assert!(close(surface.pixel(30, 21).unwrap(), [128, 128, 128, 255], 1));
}

#[test]
fn bottom_anchor_hangs_the_line_above_the_origin() {
    let mut top = grey_surface(160, 80);
    let mut bottom = grey_surface(160, 80);
    draw_text(
        &mut top,
        &[text_op(TextAnchor::Top, Point::new(20.0, 20.0), None)],
        &mut BlockText::default(),
    )
    .unwrap();
    draw_text(
        &mut bottom,
        &[text_op(TextAnchor::Bottom, Point::new(20.0, 60.0), None)],
        &mut BlockText::default(),
    )
    .unwrap();
    assert_eq!(top.data(), bottom.data());
}

#[test]
fn shadow_darkens_around_the_glyphs() {
    let mut plain = grey_surface(160, 80);
    let mut shadowed = grey_surface(160, 80);
    let origin = Point::new(20.0, 20.0);
    draw_text(&mut plain, &[text_op(TextAnchor::Top, origin, None)], &mut BlockText::default()).unwrap();
    draw_text(
        &mut shadowed,
        &[text_op(TextAnchor::Top, origin, Some(SHADOW))],
        &mut BlockText::default(),
    )
    .unwrap();

    let near = shadowed.pixel(41, 38).unwrap();
    assert!(near[0] < 120, "shadow should spill past the glyph edge: {near:?}");
    assert!(close(plain.pixel(41, 38).unwrap(), [128, 128, 128, 255], 1));
    assert!(close(shadowed.pixel(120, 38).unwrap(), [128, 128, 128, 255], 1));
    assert!(close(shadowed.pixel(30, 38).unwrap(), [255, 255, 255, 255], 2));
}

#[test]
fn offscreen_text_is_skipped() {
    let mut surface = grey_surface(32, 32);
    let before = surface.data().to_vec();
    let op = text_op(TextAnchor::Top, Point::new(-1000.0, -1000.0), Some(SHADOW));
    draw_text(&mut surface, &[op], &mut BlockText::default()).unwrap();
    assert_eq!(surface.data(), &before[..]);
}
