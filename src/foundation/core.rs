use crate::foundation::error::{StampError, StampResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Pixel dimensions of a frame and of the surface painted from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 8-bit channels and a unit-range alpha, the way CSS `rgba()` reads.
    pub fn with_unit_alpha(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b, a }
    }
}

/// A captured camera frame: straight RGBA8, tightly packed, row-major.
///
/// The compositor only reads it; ownership stays with the caller.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl Frame {
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// A frame filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> Self {
        let px = [color.r, color.g, color.b, color.a];
        let data = px.repeat((width as usize).saturating_mul(height as usize));
        Self::from_rgba8(width, height, data)
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Check dimensions and buffer length. Surfaces are limited to `u16` per side.
    pub fn validate(&self) -> StampResult<Canvas> {
        if self.width == 0 || self.height == 0 {
            return Err(StampError::invalid_frame(format!(
                "frame dimensions must be > 0, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(StampError::invalid_frame(format!(
                "frame dimensions exceed {}: {}x{}",
                u16::MAX,
                self.width,
                self.height
            )));
        }
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if self.data.len() != expected {
            return Err(StampError::invalid_frame(format!(
                "frame buffer holds {} bytes, expected {expected}",
                self.data.len()
            )));
        }
        Ok(self.canvas())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
