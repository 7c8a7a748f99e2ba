use crate::foundation::core::Rgba8;
use serde::{Deserialize, Serialize};

// Style documents write colors the way CSS does: 8-bit RGB channels with a unit-range alpha.
//
// Accepted forms:
// - "#RRGGBB" / "#RRGGBBAA"
// - {"r": 35, "g": 25, "b": 25, "a": 0.85}
// - [35, 25, 25] / [35, 25, 25, 0.85]

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => from_css(r, g, b, a).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => from_css(*r, *g, *b, 1.0).map_err(serde::de::Error::custom),
                [r, g, b, a] => from_css(*r, *g, *b, *a).map_err(serde::de::Error::custom),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&to_hex(*self))
    }
}

pub(crate) fn to_hex(c: Rgba8) -> String {
    format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
}

fn from_css(r: f64, g: f64, b: f64, a: f64) -> Result<Rgba8, String> {
    fn channel(v: f64) -> Result<u8, String> {
        if !v.is_finite() || !(0.0..=255.0).contains(&v) {
            return Err(format!("color channel {v} must be within 0..=255"));
        }
        Ok(v.round() as u8)
    }

    if !a.is_finite() || !(0.0..=1.0).contains(&a) {
        return Err(format!("alpha {a} must be within 0..=1"));
    }
    Ok(Rgba8::with_unit_alpha(channel(r)?, channel(g)?, channel(b)?, a))
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    match s.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/color.rs"]
mod tests;
