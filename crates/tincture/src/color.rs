//! Color values and color space conversion.
//!
//! This module provides the value types the rest of the crate works with:
//! - [`Color`] - A validated `#rrggbb` color
//! - [`Rgb`] - An 8-bit RGB triple
//! - [`Hsl`] - Hue in degrees, saturation and lightness in percent
//!
//! Only the long `#rrggbb` form is accepted. The short `#rgb` form, named
//! colors and hex without the leading `#` are all rejected.
//!
//! # Example
//!
//! ```rust
//! use tincture::color::{Color, hex_to_hsl, hsl_to_hex};
//!
//! let blue: Color = "#3B82F6".parse().unwrap();
//! assert_eq!(blue.to_string(), "#3b82f6");
//!
//! let hsl = hex_to_hsl("#3b82f6").unwrap();
//! assert_eq!(hsl_to_hex(hsl.h, hsl.s, hsl.l), "#3b82f6");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced while parsing colors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The value is not `#` followed by exactly six hex digits.
    #[error("invalid color format '{value}': expected '#' followed by 6 hex digits")]
    InvalidFormat { value: String },
}

impl ColorError {
    fn invalid(value: &str) -> Self {
        Self::InvalidFormat {
            value: value.to_string(),
        }
    }
}

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Encode as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSL.
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn luminance(self) -> f64 {
        luminance(self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

/// A color in hue/saturation/lightness form.
///
/// `h` is in degrees `[0, 360)`, `s` and `l` are percentages `[0, 100]`.
/// Values are kept unrounded so that repeated manipulation does not drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert to an 8-bit RGB triple.
    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self)
    }

    /// Encode as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

/// A validated sRGB color, canonically written as lowercase `#rrggbb`.
///
/// A `Color` can only be obtained by parsing or from component values, so
/// every instance is well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(Rgb);

impl Color {
    /// Pure white (`#ffffff`).
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    /// Pure black (`#000000`).
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);

    /// Create a color from 8-bit channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(Rgb::new(r, g, b))
    }

    /// Parse a `#rrggbb` string (case-insensitive).
    ///
    /// # Errors
    /// Returns [`ColorError::InvalidFormat`] for anything else.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        hex_to_rgb(s).map(Self)
    }

    pub const fn from_rgb(rgb: Rgb) -> Self {
        Self(rgb)
    }

    pub fn from_hsl(hsl: Hsl) -> Self {
        Self(hsl.to_rgb())
    }

    pub const fn rgb(&self) -> Rgb {
        self.0
    }

    pub fn hsl(&self) -> Hsl {
        self.0.to_hsl()
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn luminance(&self) -> f64 {
        self.0.luminance()
    }

    /// Returns true when the luminance is above one half.
    pub fn is_light(&self) -> bool {
        self.luminance() > 0.5
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.r, self.0.g, self.0.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self(rgb)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ColorVisitor)
    }
}

struct ColorVisitor;

impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a '#rrggbb' string or an RGB map")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Color::parse(v).map_err(E::custom)
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let mut r: Option<u8> = None;
        let mut g: Option<u8> = None;
        let mut b: Option<u8> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "r" | "red" => r = Some(map.next_value()?),
                "g" | "green" => g = Some(map.next_value()?),
                "b" | "blue" => b = Some(map.next_value()?),
                _ => {
                    let _ = map.next_value::<de::IgnoredAny>()?;
                }
            }
        }

        match (r, g, b) {
            (Some(r), Some(g), Some(b)) => Ok(Color::new(r, g, b)),
            _ => Err(de::Error::custom("RGB color requires r, g, b fields")),
        }
    }
}

// Conversion functions

/// Parse `#rrggbb` (case-insensitive) into an RGB triple.
///
/// # Errors
/// Returns [`ColorError::InvalidFormat`] unless the input is `#` followed by
/// exactly six hex digits.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').ok_or_else(|| ColorError::invalid(hex))?;
    if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::invalid(hex));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::invalid(hex))
    };
    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Encode channels as lowercase `#rrggbb`, clamping each to `[0, 255]`.
pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> String {
    let clamp = |v: i32| v.clamp(0, 255) as u8;
    Rgb::new(clamp(r), clamp(g), clamp(b)).to_hex()
}

/// Parse `#rrggbb` and convert it to HSL.
///
/// # Errors
/// Returns [`ColorError::InvalidFormat`] for malformed input.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    hex_to_rgb(hex).map(rgb_to_hsl)
}

/// Convert HSL to lowercase `#rrggbb`.
///
/// Callers are expected to pass a hue already normalized into `[0, 360)`;
/// out-of-range hues are wrapped and saturation/lightness clamped anyway.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    Hsl::new(h, s, l).to_hex()
}

/// WCAG relative luminance of an sRGB color, in `[0, 1]`.
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    let linear = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };

    0.2126f64.mul_add(linear(r), 0.7152f64.mul_add(linear(g), 0.0722 * linear(b)))
}

#[allow(clippy::many_single_char_names)]
fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = f64::midpoint(max, min);

    if (max - min).abs() < f64::EPSILON {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let mut h = if (max - r).abs() < f64::EPSILON {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    h /= 6.0;
    Hsl::new((h * 360.0).rem_euclid(360.0), s * 100.0, l * 100.0)
}

#[allow(clippy::many_single_char_names, clippy::suboptimal_flops)]
fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0) / 360.0;
    let s = hsl.s.clamp(0.0, 100.0) / 100.0;
    let l = hsl.l.clamp(0.0, 100.0) / 100.0;

    let to_u8 = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;

    if s == 0.0 {
        let v = to_u8(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    Rgb::new(
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}
