use crate::assets::fonts::FontRole;
use crate::assets::text::TextAnchor;
use crate::compile::plan::{TextOp, TextShadow, TextSlot};
use crate::foundation::core::Point;
use crate::layout::metrics::LayoutMetrics;
use crate::scene::metadata::WatermarkMetadata;
use crate::scene::style::{ShadowStyle, StampStyle};

/// Time, date and location runs in paint order.
///
/// The time is bottom-anchored inside the box and never shadowed; date and location lines
/// are top-anchored beside the accent bar and carry the configured shadow.
pub fn compile_text(m: &LayoutMetrics, meta: &WatermarkMetadata, style: &StampStyle) -> Vec<TextOp> {
    let color = style.palette.text;
    let shadow = text_shadow(&style.shadow);

    let mut ops = Vec::with_capacity(2 + meta.location_lines.len());
    ops.push(TextOp {
        slot: TextSlot::Time,
        role: FontRole::Time,
        text: meta.time.clone(),
        size_px: m.time_size,
        origin: m.time_origin,
        anchor: TextAnchor::Bottom,
        color,
        shadow: None,
    });
    ops.push(TextOp {
        slot: TextSlot::Date,
        role: FontRole::Date,
        text: meta.date.clone(),
        size_px: m.date_size,
        origin: Point::new(m.text_x, m.date_y),
        anchor: TextAnchor::Top,
        color,
        shadow,
    });
    for (i, line) in meta.location_lines.iter().enumerate() {
        ops.push(TextOp {
            slot: TextSlot::Location(i),
            role: FontRole::Location,
            text: line.clone(),
            size_px: m.location_size,
            origin: Point::new(m.text_x, m.location_y(i)),
            anchor: TextAnchor::Top,
            color,
            shadow,
        });
    }
    ops
}

fn text_shadow(s: &ShadowStyle) -> Option<TextShadow> {
    if !s.enabled || s.color.a == 0 {
        return None;
    }
    Some(TextShadow {
        color: s.color,
        sigma: s.sigma(),
        radius: s.kernel_radius(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/text.rs"]
mod tests;
