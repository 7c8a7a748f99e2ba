use crate::foundation::core::Frame;
use crate::foundation::error::{StampError, StampResult};

/// Decode encoded image bytes (PNG, JPEG, ...) into a straight RGBA8 [`Frame`].
pub fn decode_frame(bytes: &[u8]) -> StampResult<Frame> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| StampError::invalid_frame(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Frame::from_rgba8(width, height, rgba.into_raw()))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
