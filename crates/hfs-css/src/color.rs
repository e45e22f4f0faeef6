//! CSS colors
//!
//! Parses the color strings `getComputedStyle` hands back
//! (`rgb(...)`, `rgba(...)`, hex, a few keywords).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CssError;

/// sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 (transparent) to 1.0 (opaque)
    pub a: f32,
}

impl Default for ColorRgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl ColorRgba {
    pub const TRANSPARENT: ColorRgba = ColorRgba { r: 0, g: 0, b: 0, a: 0.0 };
    pub const BLACK: ColorRgba = ColorRgba { r: 0, g: 0, b: 0, a: 1.0 };
    pub const WHITE: ColorRgba = ColorRgba { r: 255, g: 255, b: 255, a: 1.0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a: a.clamp(0.0, 1.0) }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Source-over composite of `self` onto `backdrop`
    pub fn composite_over(self, backdrop: ColorRgba) -> ColorRgba {
        if self.is_opaque() {
            return self;
        }
        let a = self.a as f64;
        let b = backdrop.a as f64 * (1.0 - a);
        let out_a = a + b;
        if out_a <= 0.0 {
            return ColorRgba::TRANSPARENT;
        }
        let mix = |s: u8, d: u8| ((s as f64 * a + d as f64 * b) / out_a).round().clamp(0.0, 255.0) as u8;
        ColorRgba {
            r: mix(self.r, backdrop.r),
            g: mix(self.g, backdrop.g),
            b: mix(self.b, backdrop.b),
            a: out_a as f32,
        }
    }

    /// Parse a hex color (#RGB, #RGBA, #RRGGBB, #RRGGBBAA)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)? as f32 / 255.0)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)? as f32 / 255.0)),
            _ => None,
        }
    }

    /// Parse a named color
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "transparent" => Self::TRANSPARENT,
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "cyan" | "aqua" => Self::rgb(0, 255, 255),
            "magenta" | "fuchsia" => Self::rgb(255, 0, 255),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "silver" => Self::rgb(192, 192, 192),
            "maroon" => Self::rgb(128, 0, 0),
            "olive" => Self::rgb(128, 128, 0),
            "lime" => Self::rgb(0, 255, 0),
            "navy" => Self::rgb(0, 0, 128),
            "purple" => Self::rgb(128, 0, 128),
            "teal" => Self::rgb(0, 128, 128),
            "orange" => Self::rgb(255, 165, 0),
            _ => return None,
        })
    }

    /// Parse `rgb(...)` / `rgba(...)`, comma or space/slash syntax
    pub fn from_functional(s: &str) -> Option<Self> {
        let inner = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))?
            .strip_suffix(')')?
            .trim();

        let (channels, alpha): (Vec<&str>, Option<&str>) = if inner.contains(',') {
            let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
            match parts.len() {
                3 => (parts, None),
                4 => (parts[..3].to_vec(), Some(parts[3])),
                _ => return None,
            }
        } else {
            let (rgb, alpha) = match inner.split_once('/') {
                Some((rgb, a)) => (rgb, Some(a.trim())),
                None => (inner, None),
            };
            (rgb.split_ascii_whitespace().collect(), alpha)
        };
        if channels.len() != 3 {
            return None;
        }

        let r = parse_channel(channels[0])?;
        let g = parse_channel(channels[1])?;
        let b = parse_channel(channels[2])?;
        let a = match alpha {
            Some(a) => parse_alpha(a)?,
            None => 1.0,
        };
        Some(Self::rgba(r, g, b, a))
    }
}

impl fmt::Display for ColorRgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

fn parse_channel(s: &str) -> Option<u8> {
    let value = match s.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().ok()? * 255.0 / 100.0,
        None => s.parse::<f64>().ok()?,
    };
    value.is_finite().then(|| value.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(s: &str) -> Option<f32> {
    let value = match s.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().ok()? / 100.0,
        None => s.parse::<f32>().ok()?,
    };
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

/// Parse a computed color string
pub fn try_parse_color(css: &str) -> Result<ColorRgba, CssError> {
    let s = css.trim().to_ascii_lowercase();
    let parsed = if s.starts_with('#') {
        ColorRgba::from_hex(&s)
    } else if s.starts_with("rgb") {
        ColorRgba::from_functional(&s)
    } else {
        ColorRgba::from_name(&s)
    };
    parsed.ok_or_else(|| CssError::InvalidColor(css.to_string()))
}

/// Parse a computed color string, falling back to opaque black.
///
/// The fallback is logged; use [`try_parse_color`] where an unreadable
/// value has to be told apart from a real black.
pub fn parse_color(css: &str) -> ColorRgba {
    match try_parse_color(css) {
        Ok(color) => color,
        Err(err) => {
            tracing::warn!("{err}; defaulting to opaque black");
            ColorRgba::BLACK
        }
    }
}
