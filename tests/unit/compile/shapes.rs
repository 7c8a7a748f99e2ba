use super::*;
use crate::foundation::core::Canvas;
use crate::scene::style::LayoutRatios;
use kurbo::PathEl;

fn metrics() -> LayoutMetrics {
    LayoutMetrics::compute(
        Canvas {
            width: 1920,
            height: 1080,
        },
        480.0,
        2,
        &LayoutRatios::default(),
    )
    .unwrap()
}

#[test]
fn radius_clamps_to_half_the_shorter_side() {
    assert_eq!(effective_radius(100.0, 20.0, 50.0), 10.0);
    assert_eq!(effective_radius(20.0, 100.0, 50.0), 10.0);
    assert_eq!(effective_radius(100.0, 40.0, 5.0), 5.0);
    assert_eq!(effective_radius(100.0, 40.0, -3.0), 0.0);
}

#[test]
fn rounded_rect_is_closed_and_fills_its_bounds() {
    let rect = Rect::new(10.0, 20.0, 110.0, 60.0);
    let path = rounded_rect(rect, 8.0);
    assert!(matches!(path.elements().last(), Some(PathEl::ClosePath)));

    let bb = path.bounding_box();
    assert!((bb.x0 - rect.x0).abs() < 1e-6 && (bb.x1 - rect.x1).abs() < 1e-6);
    assert!((bb.y0 - rect.y0).abs() < 1e-6 && (bb.y1 - rect.y1).abs() < 1e-6);
}

#[test]
fn oversized_radius_gives_a_pill() {
    let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
    let r = 10.0;
    let expected = 100.0 * 20.0 - (4.0 - std::f64::consts::PI) * r * r;
    let area = rounded_rect(rect, 500.0).area().abs();
    assert!((area - expected).abs() < 0.5, "area {area} vs {expected}");
}

#[test]
fn shapes_paint_box_icon_check_then_bar() {
    let m = metrics();
    let palette = Palette::default();
    let ops = compile_shapes(&m, &palette);
    assert_eq!(ops.len(), 4);

    let DrawOp::FillPath { path, color } = &ops[0] else {
        panic!("box must be a filled path");
    };
    assert_eq!(*color, palette.box_fill);
    assert!((path.bounding_box().width() - m.info_box.width()).abs() < 1e-6);

    let DrawOp::FillPath { path, color } = &ops[1] else {
        panic!("icon must be a filled path");
    };
    assert_eq!(*color, palette.accent);
    assert!((path.bounding_box().x0 - m.icon.x0).abs() < 1e-6);

    let DrawOp::StrokePath { path, color, width } = &ops[2] else {
        panic!("checkmark must be stroked");
    };
    assert_eq!(*color, palette.check_stroke);
    assert_eq!(*width, m.check_stroke_width);
    let els = path.elements();
    assert_eq!(els.len(), 3);
    assert_eq!(els[0], PathEl::MoveTo(m.check_points[0]));
    assert_eq!(els[2], PathEl::LineTo(m.check_points[2]));

    assert_eq!(
        ops[3],
        DrawOp::FillRect {
            rect: m.bar,
            color: palette.accent
        }
    );
}
