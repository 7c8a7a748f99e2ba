use crate::assets::fonts::FontRole;
use crate::assets::text::TextAnchor;
use crate::compile::{shapes::compile_shapes, text::compile_text};
use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8};
use crate::layout::metrics::LayoutMetrics;
use crate::scene::metadata::WatermarkMetadata;
use crate::scene::style::StampStyle;

/// Everything painted over one frame, in paint order.
///
/// All coordinates are surface pixels in unmirrored space and come from [`LayoutMetrics`].
#[derive(Clone, Debug)]
pub struct StampPlan {
    pub canvas: Canvas,
    /// Shape stage output: box, icon, checkmark, accent bar.
    pub shapes: Vec<DrawOp>,
    /// Text stage output: time, date, then location lines in declared order.
    pub text: Vec<TextOp>,
}

impl StampPlan {
    pub fn compile(metrics: &LayoutMetrics, meta: &WatermarkMetadata, style: &StampStyle) -> Self {
        Self {
            canvas: metrics.canvas,
            shapes: compile_shapes(metrics, &style.palette),
            text: compile_text(metrics, meta, style),
        }
    }
}

/// Vector draw operation emitted by the shape stage.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillPath {
        path: BezPath,
        color: Rgba8,
    },
    /// Stroked with round caps and round joins.
    StrokePath {
        path: BezPath,
        color: Rgba8,
        width: f64,
    },
    FillRect {
        rect: Rect,
        color: Rgba8,
    },
}

/// Which text run an op paints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSlot {
    Time,
    Date,
    Location(usize),
}

/// Gaussian drop shadow painted under a text run, with no offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextShadow {
    pub color: Rgba8,
    pub sigma: f32,
    pub radius: u32,
}

/// One single-line text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOp {
    pub slot: TextSlot,
    pub role: FontRole,
    pub text: String,
    pub size_px: f64,
    /// Left edge and anchored y.
    pub origin: Point,
    pub anchor: TextAnchor,
    pub color: Rgba8,
    pub shadow: Option<TextShadow>,
}
