use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::foundation::core::{Affine, Canvas, Frame};
use crate::foundation::error::{StampError, StampResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Working surface owned by one composite call: premultiplied RGBA8, frame-sized.
pub struct Surface {
    canvas: Canvas,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl Surface {
    /// Put the frame on a fresh surface in true left-right orientation.
    ///
    /// With `mirror` the frame is drawn once through a horizontal flip; the flip is scoped to
    /// that draw, so everything painted afterwards lands in unflipped space.
    #[tracing::instrument(level = "trace", skip(frame), fields(width = frame.width, height = frame.height))]
    pub fn normalize(frame: &Frame, mirror: bool) -> StampResult<Self> {
        let canvas = frame.validate()?;
        let (width, height) = surface_dims(canvas)?;

        let mut premul = frame.data.clone();
        premultiply_rgba8_in_place(&mut premul);
        let image = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(premul_bytes_to_pixmap(
                &premul, width, height,
            ))),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        let transform = if mirror {
            mirror_transform(canvas.width)
        } else {
            Affine::IDENTITY
        };
        let pixmap = render_layer(width, height, |ctx| {
            let mut scoped = TransformScope::new(ctx, transform);
            scoped.set_paint(image);
            scoped.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        });

        Ok(Self {
            canvas,
            width,
            height,
            pixmap,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Premultiplied RGBA8 rows, top to bottom.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    pub(crate) fn dims(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Premultiplied pixel at `(x, y)`, if inside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = (y as usize * self.canvas.width as usize + x as usize) * 4;
        let d = self.data();
        Some([d[i], d[i + 1], d[i + 2], d[i + 3]])
    }
}

/// Horizontal flip about the surface's vertical center line.
pub fn mirror_transform(width: u32) -> Affine {
    Affine::new([-1.0, 0.0, 0.0, 1.0, f64::from(width), 0.0])
}

/// A render context with a transform applied until the scope ends.
///
/// Dropping the scope resets the transform to identity, so an early return or `?` inside
/// the scope cannot leave later drawing transformed.
pub(crate) struct TransformScope<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
}

impl<'a> TransformScope<'a> {
    pub(crate) fn new(ctx: &'a mut vello_cpu::RenderContext, transform: Affine) -> Self {
        ctx.set_transform(affine_to_cpu(transform));
        Self { ctx }
    }
}

impl Deref for TransformScope<'_> {
    type Target = vello_cpu::RenderContext;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }
}

/// Paint into a fresh transparent `width` x `height` pixmap.
pub(crate) fn render_layer(
    width: u16,
    height: u16,
    paint: impl FnOnce(&mut vello_cpu::RenderContext),
) -> vello_cpu::Pixmap {
    let mut ctx = vello_cpu::RenderContext::new(width, height);
    paint(&mut ctx);
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);
    pixmap
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn surface_dims(canvas: Canvas) -> StampResult<(u16, u16)> {
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| StampError::invalid_frame("surface width exceeds u16"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| StampError::invalid_frame("surface height exceeds u16"))?;
    Ok((width, height))
}

fn premul_bytes_to_pixmap(rgba8_premul: &[u8], width: u16, height: u16) -> vello_cpu::Pixmap {
    let mut may_have_opacities = false;
    let pixels: Vec<_> = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();
    vello_cpu::Pixmap::from_parts_with_opacity(pixels, width, height, may_have_opacities)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
