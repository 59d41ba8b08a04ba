//! Color types for theme palettes and draw calls.
//!
//! Theme colors travel as `"R G B"` triplets of 0–255 integers (the form the
//! page stores in its custom properties). The animator composes them into
//! semi-transparent [`Rgba`] draw colors.

use crate::error::ConstellationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque 8-bit RGB color.
///
/// Serializes as an `"R G B"` triplet string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// RGB color with a floating point alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `"R G B"` triplet. Components may be separated by spaces,
    /// commas, or both (`"139 92 246"`, `"139,92,246"`, `"139, 92, 246"`).
    ///
    /// Returns `ConstellationError::InvalidColor` unless there are exactly
    /// three integer components in 0..=255.
    pub fn from_triplet(s: &str) -> Result<Self, ConstellationError> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        let [r, g, b] = parts[..] else {
            return Err(ConstellationError::InvalidColor(format!(
                "expected 3 components in {s:?}, got {}",
                parts.len()
            )));
        };
        let parse = |p: &str| {
            p.parse::<u8>()
                .map_err(|e| ConstellationError::InvalidColor(format!("bad component {p:?}: {e}")))
        };
        Ok(Self::new(parse(r)?, parse(g)?, parse(b)?))
    }

    /// Parses a hex color like `"#8b5cf6"` or `"8b5cf6"` (case insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, ConstellationError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ConstellationError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| ConstellationError::InvalidColor(format!("invalid hex digit: {e}")))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Formats as an `"R G B"` triplet.
    pub fn to_triplet(self) -> String {
        format!("{} {} {}", self.r, self.g, self.b)
    }

    /// Formats as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Attaches an alpha, clamped to [0, 1].
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: clamp_alpha(a),
        }
    }
}

impl Rgba {
    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// CSS color string, e.g. `"rgba(139, 92, 246, 0.7)"`.
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

fn clamp_alpha(a: f64) -> f64 {
    if a.is_nan() {
        0.0
    } else {
        a.clamp(0.0, 1.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_triplet())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.trim_start().starts_with('#') {
            Rgb::from_hex(s.trim()).map_err(serde::de::Error::custom)
        } else {
            Rgb::from_triplet(&s).map_err(serde::de::Error::custom)
        }
    }
}
