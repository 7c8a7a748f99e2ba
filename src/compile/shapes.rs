use kurbo::{RoundedRect, Shape};

use crate::compile::plan::DrawOp;
use crate::foundation::core::{BezPath, Rect};
use crate::layout::metrics::LayoutMetrics;
use crate::scene::style::Palette;

const PATH_TOLERANCE: f64 = 0.1;

/// Corner radius actually used for a `width` x `height` box; never more than half the
/// shorter side.
pub fn effective_radius(width: f64, height: f64, radius: f64) -> f64 {
    radius.min(width / 2.0).min(height / 2.0).max(0.0)
}

/// Closed path of four quarter-arc corners joined by straight edges.
pub fn rounded_rect(rect: Rect, radius: f64) -> BezPath {
    let r = effective_radius(rect.width(), rect.height(), radius);
    RoundedRect::from_rect(rect, r).to_path(PATH_TOLERANCE)
}

/// Three-vertex open polyline.
pub fn polyline(points: &[kurbo::Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        path.move_to(*first);
        for p in it {
            path.line_to(*p);
        }
    }
    path
}

/// Info box, amber icon, checkmark and accent bar, in paint order.
pub fn compile_shapes(m: &LayoutMetrics, palette: &Palette) -> Vec<DrawOp> {
    vec![
        DrawOp::FillPath {
            path: rounded_rect(m.info_box, m.box_corner),
            color: palette.box_fill,
        },
        DrawOp::FillPath {
            path: rounded_rect(m.icon, m.icon_corner),
            color: palette.accent,
        },
        DrawOp::StrokePath {
            path: polyline(&m.check_points),
            color: palette.check_stroke,
            width: m.check_stroke_width,
        },
        DrawOp::FillRect {
            rect: m.bar,
            color: palette.accent,
        },
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/compile/shapes.rs"]
mod tests;
