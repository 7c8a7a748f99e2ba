use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::ImageEncoder as _;
use image::codecs::jpeg::JpegEncoder;

use crate::foundation::core::Canvas;
use crate::foundation::error::{StampError, StampResult};

/// JPEG quality, 0.95 of maximum.
pub const JPEG_QUALITY: u8 = 95;

const MIME_TYPE: &str = "image/jpeg";

/// The flattened, encoded watermarked frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Quality as a fraction of maximum.
    pub quality: f32,
}

impl CompositedImage {
    pub fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    /// Self-contained `data:` URL embedding of the encoded bytes.
    pub fn to_data_url(&self) -> String {
        format!("data:{MIME_TYPE};base64,{}", STANDARD.encode(&self.bytes))
    }
}

/// Encode a premultiplied RGBA8 surface as baseline JPEG.
///
/// JPEG has no alpha, so color channels are written as-is; translucent pixels come out as
/// if composited over black.
pub fn encode_jpeg(rgba8_premul: &[u8], canvas: Canvas) -> StampResult<CompositedImage> {
    if canvas.area() == 0 {
        return Err(StampError::encode(format!(
            "cannot encode a {}x{} surface",
            canvas.width, canvas.height
        )));
    }
    let expected = canvas.area() as usize * 4;
    if rgba8_premul.len() != expected {
        return Err(StampError::encode(format!(
            "surface holds {} bytes, expected {expected}",
            rgba8_premul.len()
        )));
    }

    let rgb: Vec<u8> = rgba8_premul
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .write_image(
            &rgb,
            canvas.width,
            canvas.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| StampError::encode(format!("jpeg: {e}")))?;

    Ok(CompositedImage {
        bytes: out.into_inner(),
        width: canvas.width,
        height: canvas.height,
        quality: f32::from(JPEG_QUALITY) / 100.0,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
