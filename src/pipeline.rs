use std::fmt;

use crate::assets::fonts::{FontRole, FontSet};
use crate::assets::text::{ParleyTextBackend, TextBackend};
use crate::compile::plan::StampPlan;
use crate::encode::jpeg::{CompositedImage, encode_jpeg};
use crate::foundation::core::{Canvas, Frame};
use crate::foundation::error::{StampError, StampResult};
use crate::layout::metrics::LayoutMetrics;
use crate::render::cpu::{draw_shapes, draw_text};
use crate::render::surface::Surface;
use crate::scene::metadata::WatermarkMetadata;
use crate::scene::style::StampStyle;

/// The compositing stages, in the only order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Normalize,
    Layout,
    Shapes,
    Text,
    Encode,
}

impl Stage {
    pub const ORDER: [Stage; 5] = [
        Stage::Normalize,
        Stage::Layout,
        Stage::Shapes,
        Stage::Text,
        Stage::Encode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Normalize => "normalize",
            Stage::Layout => "layout",
            Stage::Shapes => "shapes",
            Stage::Text => "text",
            Stage::Encode => "encode",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Burns a watermark into camera frames.
///
/// A compositor holds only its style and text backend; each [`Compositor::composite`] call
/// owns its own surface, so nothing carries over between captures.
pub struct Compositor<T: TextBackend = ParleyTextBackend> {
    style: StampStyle,
    text: T,
}

impl Compositor<ParleyTextBackend> {
    /// Compositor using faces discovered in the system font database.
    pub fn with_system_fonts(style: StampStyle) -> StampResult<Self> {
        let fonts = FontSet::from_system(&style.weights)?;
        Self::with_fonts(style, &fonts)
    }

    pub fn with_fonts(style: StampStyle, fonts: &FontSet) -> StampResult<Self> {
        let text = ParleyTextBackend::new(fonts, &style.weights)?;
        Self::new(style, text)
    }
}

impl<T: TextBackend> Compositor<T> {
    pub fn new(style: StampStyle, text: T) -> StampResult<Self> {
        style.validate()?;
        Ok(Self { style, text })
    }

    pub fn style(&self) -> &StampStyle {
        &self.style
    }

    pub fn text_backend(&mut self) -> &mut T {
        &mut self.text
    }

    /// Lay out a watermark for a `canvas`-sized frame without painting anything.
    pub fn layout(&mut self, canvas: Canvas, meta: &WatermarkMetadata) -> StampResult<LayoutMetrics> {
        let ratios = &self.style.ratios;
        let time_size = f64::from(canvas.width) * ratios.time_size;
        let time_advance = self.text.measure(FontRole::Time, &meta.time, time_size)?;
        LayoutMetrics::compute(canvas, time_advance, meta.location_lines.len(), ratios)
    }

    /// Run every stage over one frame and return the encoded result.
    #[tracing::instrument(
        skip_all,
        fields(width = frame.width, height = frame.height, mirror = meta.mirror)
    )]
    pub fn composite(
        &mut self,
        frame: &Frame,
        meta: &WatermarkMetadata,
    ) -> StampResult<CompositedImage> {
        let mut run = StageRun::new(frame, meta);
        self.run_stages(&mut run)?;
        let out = run
            .output
            .ok_or_else(|| StampError::encode("pipeline finished without encoded output"))?;
        tracing::debug!(bytes = out.bytes.len(), "composited");
        Ok(out)
    }

    fn run_stages(&mut self, run: &mut StageRun<'_>) -> StampResult<()> {
        for stage in Stage::ORDER {
            tracing::debug!(%stage, "start");
            self.run_stage(stage, run)?;
            run.completed.push(stage);
        }
        Ok(())
    }

    fn run_stage(&mut self, stage: Stage, run: &mut StageRun<'_>) -> StampResult<()> {
        match stage {
            Stage::Normalize => {
                run.surface = Some(Surface::normalize(run.frame, run.meta.mirror)?);
            }
            Stage::Layout => {
                let canvas = run.surface(stage)?.canvas();
                let metrics = self.layout(canvas, run.meta)?;
                run.plan = Some(StampPlan::compile(&metrics, run.meta, &self.style));
            }
            Stage::Shapes => {
                let (surface, plan) = run.painting(stage)?;
                tracing::debug!(ops = plan.shapes.len(), "shapes");
                draw_shapes(surface, &plan.shapes)?;
            }
            Stage::Text => {
                let (surface, plan) = run.painting(stage)?;
                tracing::debug!(runs = plan.text.len(), "text");
                draw_text(surface, &plan.text, &mut self.text)?;
            }
            Stage::Encode => {
                let surface = run.surface(stage)?;
                run.output = Some(encode_jpeg(surface.data(), surface.canvas())?);
            }
        }
        Ok(())
    }
}

/// State handed from one stage to the next during a single composite call.
struct StageRun<'a> {
    frame: &'a Frame,
    meta: &'a WatermarkMetadata,
    surface: Option<Surface>,
    plan: Option<StampPlan>,
    output: Option<CompositedImage>,
    completed: Vec<Stage>,
}

impl<'a> StageRun<'a> {
    fn new(frame: &'a Frame, meta: &'a WatermarkMetadata) -> Self {
        Self {
            frame,
            meta,
            surface: None,
            plan: None,
            output: None,
            completed: Vec::with_capacity(Stage::ORDER.len()),
        }
    }

    fn surface(&self, stage: Stage) -> StampResult<&Surface> {
        self.surface
            .as_ref()
            .ok_or_else(|| out_of_order(stage, Stage::Normalize))
    }

    fn painting(&mut self, stage: Stage) -> StampResult<(&mut Surface, &StampPlan)> {
        match (self.surface.as_mut(), self.plan.as_ref()) {
            (Some(surface), Some(plan)) => Ok((surface, plan)),
            (None, _) => Err(out_of_order(stage, Stage::Normalize)),
            (Some(_), None) => Err(out_of_order(stage, Stage::Layout)),
        }
    }
}

fn out_of_order(stage: Stage, needs: Stage) -> StampError {
    StampError::validation(format!("stage {stage} ran before {needs}"))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
