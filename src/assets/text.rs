use std::borrow::Cow;

use crate::assets::fonts::{FontRole, FontSet};
use crate::foundation::core::BezPath;
use crate::foundation::error::{StampError, StampResult};
use crate::scene::style::FontWeights;

/// Which edge of the em box is pinned to a text op's origin y, as canvas `textBaseline` does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    /// `baseline - ascent` sits on the origin.
    Top,
    /// `baseline + descent` sits on the origin.
    Bottom,
}

/// A glyph positioned in line-local coordinates (y grows down, line top at 0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPos {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// How the shaped line is painted.
#[derive(Clone, Debug)]
pub enum GlyphPaint {
    /// Font glyph run rasterized by the CPU backend.
    Run {
        font: vello_cpu::peniko::FontData,
        size_px: f32,
        glyphs: Vec<GlyphPos>,
    },
    /// Pre-outlined glyph geometry in line-local coordinates.
    Outline(BezPath),
}

/// One shaped physical line of text.
#[derive(Clone, Debug)]
pub struct ShapedText {
    /// Glyph-advance width.
    pub advance: f64,
    pub ascent: f64,
    pub descent: f64,
    /// Baseline offset from the line top.
    pub baseline: f64,
    pub paint: GlyphPaint,
}

impl ShapedText {
    /// Line-local y of the edge named by `anchor`.
    pub fn anchor_y(&self, anchor: TextAnchor) -> f64 {
        match anchor {
            TextAnchor::Top => self.baseline - self.ascent,
            TextAnchor::Bottom => self.baseline + self.descent,
        }
    }

    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Shapes and measures text for one [`FontRole`].
///
/// This is the only seam between the compositor and font handling, so every stage can run
/// against a deterministic backend in tests.
pub trait TextBackend {
    /// Shape `text` as a single line at `size_px`.
    fn shape(&mut self, role: FontRole, text: &str, size_px: f64) -> StampResult<ShapedText>;

    /// Glyph-advance width of `text`.
    fn measure(&mut self, role: FontRole, text: &str, size_px: f64) -> StampResult<f64> {
        Ok(self.shape(role, text, size_px)?.advance)
    }
}

struct RoleFonts {
    font_ctx: parley::FontContext,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    weight: parley::style::FontWeight,
    style: parley::style::FontStyle,
    width: parley::style::FontWidth,
}

/// [`TextBackend`] built on Parley shaping and `vello_cpu` glyph runs.
///
/// Every role gets its own font collection holding only its font file. Shaping asks for the
/// family and attributes of the face at the role's collection index, so the face Parley
/// shapes with is the face the rasterizer paints with, also inside `.ttc` collections.
pub struct ParleyTextBackend {
    layout_ctx: parley::LayoutContext<()>,
    roles: Vec<RoleFonts>,
}

impl ParleyTextBackend {
    pub fn new(fonts: &FontSet, weights: &FontWeights) -> StampResult<Self> {
        let mut roles = Vec::with_capacity(FontRole::ALL.len());
        for role in FontRole::ALL {
            let face = fonts.face(role);
            let mut font_ctx = parley::FontContext::default();
            let families = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(face.bytes.to_vec()), None);
            let (family_id, info) = face_at_index(&families, face.index, |i| i.index())
                .ok_or_else(|| {
                    StampError::measurement(format!(
                        "font file has no face {} for {role} text",
                        face.index
                    ))
                })?;
            let family_name = font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| {
                    StampError::measurement(format!("{role} font family has no name"))
                })?
                .to_string();
            let font = vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(face.bytes.to_vec()),
                face.index,
            );
            tracing::debug!(
                %role,
                family = %family_name,
                index = face.index,
                requested_weight = role.weight(weights),
                weight = info.weight().value(),
                "registered font"
            );
            roles.push(RoleFonts {
                weight: info.weight(),
                style: info.style(),
                width: info.width(),
                font_ctx,
                family_name,
                font,
            });
        }
        Ok(Self {
            layout_ctx: parley::LayoutContext::new(),
            roles,
        })
    }

    /// Resolved family name for a role.
    pub fn family_name(&self, role: FontRole) -> &str {
        &self.roles[role.index()].family_name
    }
}

impl TextBackend for ParleyTextBackend {
    fn shape(&mut self, role: FontRole, text: &str, size_px: f64) -> StampResult<ShapedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(StampError::measurement(format!(
                "{role} text size must be finite and > 0, got {size_px}"
            )));
        }
        let Self { layout_ctx, roles } = self;
        let rf = &mut roles[role.index()];
        let text = single_line(text);

        let mut builder = layout_ctx.ranged_builder(&mut rf.font_ctx, &text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(rf.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px as f32));
        builder.push_default(parley::style::StyleProperty::FontWeight(rf.weight));
        builder.push_default(parley::style::StyleProperty::FontStyle(rf.style));
        builder.push_default(parley::style::StyleProperty::FontWidth(rf.width));

        let mut layout: parley::Layout<()> = builder.build(&text);
        layout.break_all_lines(None);

        let line = layout
            .lines()
            .next()
            .ok_or_else(|| StampError::measurement(format!("{role} text produced no line")))?;
        let m = line.metrics();
        let mut glyphs = Vec::new();
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            glyphs.extend(run.positioned_glyphs().map(|g| GlyphPos {
                id: g.id.into(),
                x: g.x,
                y: g.y,
            }));
        }

        Ok(ShapedText {
            advance: f64::from(layout.width()),
            ascent: f64::from(m.ascent),
            descent: f64::from(m.descent),
            baseline: f64::from(m.baseline),
            paint: GlyphPaint::Run {
                font: rf.font.clone(),
                size_px: size_px as f32,
                glyphs,
            },
        })
    }
}

/// Family and face registered for collection index `index` of a font file.
fn face_at_index<F: Copy, I>(
    families: &[(F, Vec<I>)],
    index: u32,
    face_index: impl Fn(&I) -> u32,
) -> Option<(F, &I)> {
    families.iter().find_map(|(family, faces)| {
        faces
            .iter()
            .find(|f| face_index(f) == index)
            .map(|f| (*family, f))
    })
}

/// Replace control characters so one entry always stays one physical line.
pub(crate) fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
