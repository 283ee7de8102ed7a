//! Color model: conversions between RGB, HSL and HEX.
//!
//! RGB channels are 8-bit integers, HSL uses hue in degrees `[0, 360)` and
//! saturation/lightness in `[0, 1]`, HEX is six hex digits written as
//! `#RRGGBB`. All conversions are pure functions; intermediate math is `f64`
//! and rounding happens only when producing integer channels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PickerError;

/// sRGB color with 8-bit channels.
///
/// Serializes as its `#RRGGBB` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL color: hue in degrees, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }

    pub fn from_hex(hex: &str) -> Result<Self, PickerError> {
        hex_to_rgb(hex)
    }
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&rgb_to_hex(*self))
    }
}

impl FromStr for Rgb {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&rgb_to_hex(*self))
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex_to_rgb(&s).map_err(serde::de::Error::custom)
    }
}

/// Wraps a hue into `[0, 360)`.
///
/// `rem_euclid` can round up to exactly 360.0 for tiny negative inputs, which
/// is folded back onto the seam.
pub fn normalize_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Formats a color as `#RRGGBB`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// Parses `#RRGGBB` or `RRGGBB`, case insensitive.
///
/// Returns `PickerError::InvalidFormat` unless the input is exactly six hex
/// digits after an optional leading `#`. No trimming or other coercion is done.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, PickerError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(PickerError::InvalidFormat(hex.to_owned()));
    }
    let n = u32::from_str_radix(digits, 16)
        .map_err(|_| PickerError::InvalidFormat(hex.to_owned()))?;
    Ok(Rgb {
        r: ((n >> 16) & 0xff) as u8,
        g: ((n >> 8) & 0xff) as u8,
        b: (n & 0xff) as u8,
    })
}

/// Converts RGB to HSL.
///
/// Achromatic colors (all channels equal) get `s = 0` and a placeholder
/// hue of 0.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;
    if d == 0.0 {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    // Hue in sextant units.
    let sextant = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: normalize_hue(sextant * 60.0),
        s,
        l,
    }
}

/// Converts HSL to RGB.
///
/// The hue is wrapped into `[0, 360)` first and output channels are clamped
/// to `[0, 255]`, so out-of-range input never panics or wraps a channel.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = normalize_hue(hsl.h);
    let Hsl { s, l, .. } = hsl;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r1, g1, b1) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb {
        r: to_channel(r1 + m),
        g: to_channel(g1 + m),
        b: to_channel(b1 + m),
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Parses a hex string straight into HSL.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, PickerError> {
    hex_to_rgb(hex).map(rgb_to_hsl)
}

/// The three textual representations shown to the user, plus the accent
/// color they describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorDisplay {
    /// `"r, g, b"`
    pub rgb: String,
    /// `"h, s%, l%"`, each rounded to an integer.
    pub hsl: String,
    /// `#RRGGBB`
    pub hex: String,
    pub accent: Rgb,
}

impl ColorDisplay {
    pub fn from_rgb(rgb: Rgb) -> Self {
        let hsl = rgb_to_hsl(rgb);
        Self {
            rgb: format!("{}, {}, {}", rgb.r, rgb.g, rgb.b),
            hsl: format!(
                "{}, {}%, {}%",
                rounded_hue(hsl.h),
                (hsl.s * 100.0).round() as u32,
                (hsl.l * 100.0).round() as u32
            ),
            hex: rgb_to_hex(rgb),
            accent: rgb,
        }
    }
}

/// Rounds a hue for display; 359.5 and up reads as 0 rather than 360.
pub fn rounded_hue(h: f64) -> u16 {
    (normalize_hue(h).round() as u16) % 360
}
