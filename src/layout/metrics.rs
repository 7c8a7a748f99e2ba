use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{StampError, StampResult};
use crate::scene::style::LayoutRatios;

// Checkmark vertices as multiples of the arm length, relative to the icon center.
const CHECK_VERTICES: [(f64, f64); 3] = [(-1.0, 0.0), (-0.2, 0.8), (1.2, -0.8)];

/// Geometry of one watermark, derived from the frame width and the measured time text.
///
/// Recomputed for every call; identical inputs give bit-identical values.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayoutMetrics {
    pub canvas: Canvas,
    pub time_size: f64,
    pub date_size: f64,
    pub location_size: f64,
    /// Measured glyph-advance width of the time string.
    pub time_advance: f64,
    pub location_lines: usize,
    pub box_pad_x: f64,
    pub box_pad_y: f64,
    /// Reference line the box hangs from and the time text sits on.
    pub anchor_y: f64,
    pub info_box: Rect,
    /// Requested corner radius, before clamping to the box.
    pub box_corner: f64,
    /// Bottom-anchored origin of the time text.
    pub time_origin: Point,
    pub icon: Rect,
    pub icon_corner: f64,
    pub icon_inset: f64,
    pub check_points: [Point; 3],
    pub check_stroke_width: f64,
    /// Accent bar; its height is the text block height.
    pub bar: Rect,
    /// Height reserved below the box when positioning it, using the wider location spacing.
    pub reserved_block_height: f64,
    /// Left x of the date and location lines.
    pub text_x: f64,
    /// Top-anchored y of the date line.
    pub date_y: f64,
    /// Top-anchored y of the first location line.
    pub location_top: f64,
    /// Vertical step between location lines.
    pub location_step: f64,
}

impl LayoutMetrics {
    /// Lay out a watermark for a `canvas`-sized frame.
    pub fn compute(
        canvas: Canvas,
        time_advance: f64,
        location_lines: usize,
        ratios: &LayoutRatios,
    ) -> StampResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(StampError::invalid_frame(format!(
                "cannot lay out a {}x{} frame",
                canvas.width, canvas.height
            )));
        }
        if !time_advance.is_finite() || time_advance < 0.0 {
            return Err(StampError::measurement(format!(
                "time advance must be finite and >= 0, got {time_advance}"
            )));
        }

        let fw = f64::from(canvas.width);
        let fh = f64::from(canvas.height);
        let n = location_lines as f64;

        let left = fw * ratios.left_margin;
        let bottom = fw * ratios.bottom_margin;
        let time_size = fw * ratios.time_size;
        let date_size = fw * ratios.date_size;
        let location_size = fw * ratios.location_size;

        let icon_side = time_size * ratios.icon_side;
        let icon_inset = time_size * ratios.icon_inset;
        let pad_x = time_size * ratios.box_pad_x;
        let pad_y = time_size * ratios.box_pad_y;

        let box_w = pad_x + time_advance + pad_x + icon_side + pad_x;
        let box_h = time_size + pad_y * 2.0;

        let reserved_block_height =
            date_size * ratios.date_line + n * location_size * ratios.location_gap_line;
        let anchor_y = fh - bottom - reserved_block_height - box_h * 0.5;

        let box_top = anchor_y - time_size + pad_y;
        let info_box = Rect::new(left, box_top, left + box_w, box_top + box_h);

        let icon_x = left + pad_x + time_advance + pad_x;
        let icon_y = box_top + (box_h - icon_side) / 2.0;
        let icon = Rect::new(icon_x, icon_y, icon_x + icon_side, icon_y + icon_side);

        let center = icon.center();
        let arm = icon_side * ratios.check_arm;
        let check_points =
            CHECK_VERTICES.map(|(dx, dy)| Point::new(center.x + dx * arm, center.y + dy * arm));

        let bar_w = fw * ratios.bar_thickness;
        let bar_y = anchor_y + pad_y * 2.0;
        let location_step = location_size * ratios.location_line;
        let bar_h = date_size * ratios.date_line + n * location_step;
        let bar = Rect::new(left, bar_y, left + bar_w, bar_y + bar_h);

        Ok(Self {
            canvas,
            time_size,
            date_size,
            location_size,
            time_advance,
            location_lines,
            box_pad_x: pad_x,
            box_pad_y: pad_y,
            anchor_y,
            info_box,
            box_corner: fw * ratios.box_corner,
            time_origin: Point::new(left + pad_x, anchor_y + pad_y * 0.5),
            icon,
            icon_corner: fw * ratios.icon_corner,
            icon_inset,
            check_points,
            check_stroke_width: icon_side * ratios.check_stroke,
            bar,
            reserved_block_height,
            text_x: left + bar_w + fw * ratios.text_gap,
            date_y: bar_y,
            location_top: bar_y + date_size * ratios.date_line,
            location_step,
        })
    }

    /// Height of the date + location block, which the accent bar spans.
    pub fn text_block_height(&self) -> f64 {
        self.bar.height()
    }

    /// Top-anchored y of location line `i`.
    pub fn location_y(&self, i: usize) -> f64 {
        self.location_top + (i as f64) * self.location_step
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/metrics.rs"]
mod tests;
