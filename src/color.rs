//! Colour helpers
//!
//! 24-bit RGB values, perceptual luminance, readable-foreground choice and the
//! alpha blend used by the font preview. All functions are pure.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::consts::LUMINANCE_THRESHOLD;

/// Rec. 709 luma weights over 8-bit channels
const LUMA_WEIGHTS: DVec3 = DVec3::new(0.2126, 0.7152, 0.0722);

/// A 24-bit colour, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the `#` is optional, hex digits are case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.r as f64, self.g as f64, self.b as f64)
    }

    fn from_dvec3(v: DVec3) -> Self {
        let v = v.round().clamp(DVec3::ZERO, DVec3::splat(255.0));
        Self::new(v.x as u8, v.y as u8, v.z as u8)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Rejected colour string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColor(pub String);

impl fmt::Display for InvalidColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid colour '{}', expected #rrggbb", self.0)
    }
}

impl std::error::Error for InvalidColor {}

impl TryFrom<String> for Rgb {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse(&value).ok_or(InvalidColor(value))
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// Foreground shade picked for text drawn over a coloured background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextShade {
    Black,
    White,
}

impl TextShade {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextShade::Black => "black",
            TextShade::White => "white",
        }
    }

    pub fn rgb(&self) -> Rgb {
        match self {
            TextShade::Black => Rgb::BLACK,
            TextShade::White => Rgb::WHITE,
        }
    }
}

/// Weighted channel sum `0.2126·R + 0.7152·G + 0.0722·B`
pub fn luminance(color: Rgb) -> f64 {
    color.as_dvec3().dot(LUMA_WEIGHTS)
}

/// Black text on bright backgrounds, white otherwise
pub fn readable_text_color(background: Rgb) -> TextShade {
    if luminance(background) > LUMINANCE_THRESHOLD {
        TextShade::Black
    } else {
        TextShade::White
    }
}

/// Composite `fg` at `alpha` (0..=255) over `bg`, rounding per channel
pub fn blend(fg: Rgb, alpha: u8, bg: Rgb) -> Rgb {
    let a = alpha as f64 / 255.0;
    Rgb::from_dvec3(bg.as_dvec3().lerp(fg.as_dvec3(), a))
}
