use crate::foundation::error::{StampError, StampResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8};

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over on premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = 255u16 - u16::from(sa);
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] = add_sat_u8(src[i], mul_div255_u8(u16::from(dst[i]), inv));
            }
            out
        }
    }
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> StampResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(StampError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Pixel rectangle of a surface, in whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Composite a `region`-sized layer over the matching rectangle of a `dst_width`-wide surface.
pub fn over_region_in_place(
    dst: &mut [u8],
    dst_width: u32,
    src: &[u8],
    region: Region,
) -> StampResult<()> {
    let src_len = region.width as usize * region.height as usize * 4;
    if src.len() != src_len {
        return Err(StampError::validation(format!(
            "region layer holds {} bytes, expected {src_len}",
            src.len()
        )));
    }
    let dst_rows = dst.len() / (dst_width as usize * 4).max(1);
    if region.x + region.width > dst_width || (region.y + region.height) as usize > dst_rows {
        return Err(StampError::validation(format!(
            "region {region:?} falls outside a {dst_width}x{dst_rows} surface"
        )));
    }
    if region.is_empty() {
        return Ok(());
    }

    let row_bytes = region.width as usize * 4;
    for (row, s) in src.chunks_exact(row_bytes).enumerate() {
        let start = ((region.y as usize + row) * dst_width as usize + region.x as usize) * 4;
        over_in_place(&mut dst[start..start + row_bytes], s)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
