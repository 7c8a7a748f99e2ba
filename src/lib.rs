//! Geostamp burns a time, date and location watermark into captured camera frames.
//!
//! One call runs a fixed linear pipeline over a frame and a small metadata record:
//!
//! - Normalize the frame onto a working surface, undoing front-camera mirroring
//! - Lay out the watermark from the frame width and the measured time text
//! - Paint the info box, accent icon, checkmark and accent bar
//! - Paint the time, date and location text (date and location with a soft shadow)
//! - Encode the surface as JPEG at quality 95
//!
//! Start with [`Compositor`].
#![forbid(unsafe_code)]

mod assets;
mod compile;
mod encode;
mod foundation;
mod layout;
mod pipeline;
mod render;
mod scene;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Frame, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{StampError, StampResult};

pub use crate::assets::decode::decode_frame;
pub use crate::assets::fonts::{FontFace, FontRole, FontSet};
pub use crate::assets::text::{
    GlyphPaint, GlyphPos, ParleyTextBackend, ShapedText, TextAnchor, TextBackend,
};
pub use crate::compile::plan::{DrawOp, StampPlan, TextOp, TextShadow, TextSlot};
pub use crate::compile::shapes::{effective_radius, rounded_rect};
pub use crate::encode::jpeg::{CompositedImage, JPEG_QUALITY, encode_jpeg};
pub use crate::layout::metrics::LayoutMetrics;
pub use crate::pipeline::{Compositor, Stage};
pub use crate::render::blur::blur_rgba8_premul;
pub use crate::render::surface::{Surface, mirror_transform};
pub use crate::scene::metadata::{LocationStatus, WatermarkMetadata};
pub use crate::scene::style::{
    FontWeights, LayoutRatios, LocationLabels, Palette, ShadowStyle, StampStyle,
};
