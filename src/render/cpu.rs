use crate::assets::text::{GlyphPaint, ShapedText, TextBackend};
use crate::compile::plan::{DrawOp, TextOp, TextShadow};
use crate::foundation::core::{Affine, BezPath, Rect, Rgba8};
use crate::foundation::error::StampResult;
use crate::render::blur::blur_rgba8_premul;
use crate::render::composite::{Region, over_in_place, over_region_in_place};
use crate::render::surface::{Surface, TransformScope, render_layer};

const STROKE_TOLERANCE: f64 = 0.1;

/// Paint the shape stage onto the surface as one layer.
pub fn draw_shapes(surface: &mut Surface, ops: &[DrawOp]) -> StampResult<()> {
    let (width, height) = surface.dims();
    let layer = render_layer(width, height, |ctx| {
        for op in ops {
            draw_op(ctx, op);
        }
    });
    over_in_place(surface.data_mut(), layer.data_as_u8_slice())
}

/// Shape and paint every text op in order; each shadow goes down just before its own fill.
pub fn draw_text<T: TextBackend + ?Sized>(
    surface: &mut Surface,
    ops: &[TextOp],
    backend: &mut T,
) -> StampResult<()> {
    let width = surface.canvas().width;
    for op in ops {
        let shaped = backend.shape(op.role, &op.text, op.size_px)?;
        let pad = op.shadow.map_or(0, |s| s.radius);
        let Some(region) = text_region(surface, op, &shaped, pad) else {
            tracing::trace!(slot = ?op.slot, "text run falls outside the surface");
            continue;
        };

        if let Some(shadow) = op.shadow {
            paint_shadow(surface, op, &shaped, region, shadow)?;
        }
        let fill = text_layer(op, &shaped, region, op.color);
        over_region_in_place(surface.data_mut(), width, fill.data_as_u8_slice(), region)?;
    }
    Ok(())
}

fn paint_shadow(
    surface: &mut Surface,
    op: &TextOp,
    shaped: &ShapedText,
    region: Region,
    shadow: TextShadow,
) -> StampResult<()> {
    let layer = text_layer(op, shaped, region, shadow.color);
    let blurred = blur_rgba8_premul(
        layer.data_as_u8_slice(),
        region.width,
        region.height,
        shadow.radius,
        shadow.sigma,
    )?;
    let width = surface.canvas().width;
    over_region_in_place(surface.data_mut(), width, &blurred, region)
}

/// Render one text run in `color` into a region-sized layer.
fn text_layer(op: &TextOp, shaped: &ShapedText, region: Region, color: Rgba8) -> vello_cpu::Pixmap {
    let top = op.origin.y - shaped.anchor_y(op.anchor);
    let transform = Affine::translate((
        op.origin.x - f64::from(region.x),
        top - f64::from(region.y),
    ));
    // Region sides are bounded by the surface, which is at most u16::MAX wide.
    render_layer(region.width as u16, region.height as u16, |ctx| {
        let mut scoped = TransformScope::new(ctx, transform);
        scoped.set_paint(cpu_color(color));
        match &shaped.paint {
            GlyphPaint::Run {
                font,
                size_px,
                glyphs,
            } => {
                let glyphs = glyphs.iter().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                scoped
                    .glyph_run(font)
                    .font_size(*size_px)
                    .fill_glyphs(glyphs);
            }
            GlyphPaint::Outline(path) => scoped.fill_path(&bezpath_to_cpu(path)),
        }
    })
}

/// Surface pixels a text run can touch, grown by `pad` for blur spill and clamped.
fn text_region(surface: &Surface, op: &TextOp, shaped: &ShapedText, pad: u32) -> Option<Region> {
    let top = op.origin.y - shaped.anchor_y(op.anchor);
    // Glyph ink may overhang the advance box; allow a quarter em on every side.
    let slack = op.size_px * 0.25 + f64::from(pad) + 1.0;
    let line_h = shaped.height().max(shaped.baseline + shaped.descent);
    let ink = Rect::new(
        op.origin.x - slack,
        top - slack,
        op.origin.x + shaped.advance + slack,
        top + line_h + slack,
    );

    let canvas = surface.canvas();
    let x0 = ink.x0.floor().max(0.0);
    let y0 = ink.y0.floor().max(0.0);
    let x1 = ink.x1.ceil().min(f64::from(canvas.width));
    let y1 = ink.y1.ceil().min(f64::from(canvas.height));
    if !(x1 > x0 && y1 > y0) {
        return None;
    }
    Some(Region {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) {
    match op {
        DrawOp::FillPath { path, color } => {
            ctx.set_paint(cpu_color(*color));
            ctx.fill_path(&bezpath_to_cpu(path));
        }
        DrawOp::StrokePath { path, color, width } => {
            let style = kurbo::Stroke::new(*width)
                .with_caps(kurbo::Cap::Round)
                .with_join(kurbo::Join::Round);
            let outline = kurbo::stroke(
                path.iter(),
                &style,
                &kurbo::StrokeOpts::default(),
                STROKE_TOLERANCE,
            );
            ctx.set_paint(cpu_color(*color));
            ctx.fill_path(&bezpath_to_cpu(&outline));
        }
        DrawOp::FillRect { rect, color } => {
            ctx.set_paint(cpu_color(*color));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                rect.x0, rect.y0, rect.x1, rect.y1,
            ));
        }
    }
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
