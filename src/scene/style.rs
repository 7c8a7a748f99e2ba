use crate::foundation::core::Rgba8;
use crate::foundation::error::{StampError, StampResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Proportional layout policy. Every field is a fraction of the frame width unless its doc
/// says it is a multiple of another size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutRatios {
    pub left_margin: f64,
    pub bottom_margin: f64,
    pub time_size: f64,
    pub date_size: f64,
    pub location_size: f64,
    /// Multiple of the time size.
    pub icon_side: f64,
    /// Multiple of the time size.
    pub icon_inset: f64,
    /// Multiple of the time size.
    pub box_pad_x: f64,
    /// Multiple of the time size.
    pub box_pad_y: f64,
    pub bar_thickness: f64,
    pub text_gap: f64,
    pub box_corner: f64,
    pub icon_corner: f64,
    /// Multiple of the icon side.
    pub check_stroke: f64,
    /// Multiple of the icon side.
    pub check_arm: f64,
    /// Multiple of the date size reserved for the date line.
    pub date_line: f64,
    /// Multiple of the location size per line when placing the box above the text block.
    pub location_gap_line: f64,
    /// Multiple of the location size between consecutive location lines.
    pub location_line: f64,
}

impl Default for LayoutRatios {
    fn default() -> Self {
        Self {
            left_margin: 0.04,
            bottom_margin: 0.05,
            time_size: 0.09,
            date_size: 0.035,
            location_size: 0.03,
            icon_side: 0.8,
            icon_inset: 0.2,
            box_pad_x: 0.3,
            box_pad_y: 0.15,
            bar_thickness: 0.008,
            text_gap: 0.02,
            // 15px and 8px on a 1920px-wide capture.
            box_corner: 15.0 / 1920.0,
            icon_corner: 8.0 / 1920.0,
            check_stroke: 0.1,
            check_arm: 0.25,
            date_line: 1.5,
            location_gap_line: 1.4,
            location_line: 1.3,
        }
    }
}

impl LayoutRatios {
    pub fn validate(&self) -> StampResult<()> {
        let named = [
            ("left_margin", self.left_margin),
            ("bottom_margin", self.bottom_margin),
            ("time_size", self.time_size),
            ("date_size", self.date_size),
            ("location_size", self.location_size),
            ("icon_side", self.icon_side),
            ("icon_inset", self.icon_inset),
            ("box_pad_x", self.box_pad_x),
            ("box_pad_y", self.box_pad_y),
            ("bar_thickness", self.bar_thickness),
            ("text_gap", self.text_gap),
            ("box_corner", self.box_corner),
            ("icon_corner", self.icon_corner),
            ("check_stroke", self.check_stroke),
            ("check_arm", self.check_arm),
            ("date_line", self.date_line),
            ("location_gap_line", self.location_gap_line),
            ("location_line", self.location_line),
        ];
        for (name, v) in named {
            if !v.is_finite() || v < 0.0 {
                return Err(StampError::validation(format!(
                    "ratio {name} must be finite and >= 0, got {v}"
                )));
            }
        }
        for (name, v) in [
            ("time_size", self.time_size),
            ("date_size", self.date_size),
            ("location_size", self.location_size),
        ] {
            if v == 0.0 {
                return Err(StampError::validation(format!("ratio {name} must be > 0")));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub box_fill: Rgba8,
    pub accent: Rgba8,
    pub check_stroke: Rgba8,
    pub text: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            box_fill: Rgba8::with_unit_alpha(35, 25, 25, 0.85),
            accent: Rgba8::rgb(0xf5, 0x9e, 0x0b),
            check_stroke: Rgba8::rgb(0x33, 0x2b, 0x2b),
            text: Rgba8::WHITE,
        }
    }
}

/// Drop shadow behind the date and location lines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowStyle {
    pub enabled: bool,
    /// Blur extent in pixels, as in a canvas `shadowBlur`.
    pub blur_px: f64,
    pub color: Rgba8,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            blur_px: 4.0,
            color: Rgba8::with_unit_alpha(0, 0, 0, 0.8),
        }
    }
}

impl ShadowStyle {
    /// Gaussian sigma equivalent to the blur extent.
    pub fn sigma(&self) -> f32 {
        (self.blur_px * 0.5) as f32
    }

    /// Kernel half-width covering three sigmas.
    pub fn kernel_radius(&self) -> u32 {
        (f64::from(self.sigma()) * 3.0).ceil().max(0.0) as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontWeights {
    pub time: f32,
    pub date: f32,
    pub location: f32,
}

impl Default for FontWeights {
    fn default() -> Self {
        Self {
            time: 700.0,
            date: 600.0,
            location: 300.0,
        }
    }
}

/// Strings used by [`crate::LocationStatus::to_lines`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationLabels {
    pub searching: String,
    pub unavailable: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for LocationLabels {
    fn default() -> Self {
        Self {
            searching: "Mencari Lokasi...".to_owned(),
            unavailable: "Lokasi Tidak Tersedia".to_owned(),
            latitude: "Lat".to_owned(),
            longitude: "Long".to_owned(),
        }
    }
}

/// Complete look of the watermark. `Default` is the reference design.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StampStyle {
    pub ratios: LayoutRatios,
    pub palette: Palette,
    pub shadow: ShadowStyle,
    pub weights: FontWeights,
    pub labels: LocationLabels,
}

impl StampStyle {
    /// Parse a style document from a JSON reader. Missing fields keep their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> StampResult<Self> {
        let style: StampStyle = serde_json::from_reader(r)
            .map_err(|e| StampError::validation(format!("parse style JSON: {e}")))?;
        style.validate()?;
        Ok(style)
    }

    /// Parse a style document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StampResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StampError::validation(format!("open style JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> StampResult<()> {
        self.ratios.validate()?;
        if !self.shadow.blur_px.is_finite() || self.shadow.blur_px < 0.0 {
            return Err(StampError::validation(
                "shadow blur_px must be finite and >= 0",
            ));
        }
        for (name, w) in [
            ("time", self.weights.time),
            ("date", self.weights.date),
            ("location", self.weights.location),
        ] {
            if !w.is_finite() || !(1.0..=1000.0).contains(&w) {
                return Err(StampError::validation(format!(
                    "font weight {name} must be within 1..=1000, got {w}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/style.rs"]
mod tests;
