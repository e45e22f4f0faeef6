//! Contrast
//!
//! WCAG 2.1 relative luminance and contrast ratio.

use hfs_css::ColorRgba;
use serde::{Deserialize, Serialize};

/// WCAG AA minimum for normal text (1.4.3)
pub const AA_NORMAL_TEXT: f64 = 4.5;
/// WCAG AA minimum for large text (1.4.3)
pub const AA_LARGE_TEXT: f64 = 3.0;
/// WCAG AAA minimum for normal text (1.4.6)
pub const AAA_NORMAL_TEXT: f64 = 7.0;
/// WCAG AAA minimum for large text (1.4.6)
pub const AAA_LARGE_TEXT: f64 = 4.5;

/// Large text: at least 18pt, or at least 14pt when bold
const LARGE_TEXT_PT: f64 = 18.0;
const LARGE_BOLD_TEXT_PT: f64 = 14.0;
const BOLD_WEIGHT: u16 = 700;
const PT_PER_PX: f64 = 0.75;

/// Result of comparing one foreground/background pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResult {
    pub ratio: f64,
    pub is_large_text: bool,
    #[serde(rename = "wcagAA")]
    pub wcag_aa: bool,
    #[serde(rename = "wcagAAA")]
    pub wcag_aaa: bool,
}

impl ContrastResult {
    /// The AA threshold this text was held to
    pub fn aa_threshold(&self) -> f64 {
        if self.is_large_text { AA_LARGE_TEXT } else { AA_NORMAL_TEXT }
    }
}

/// Calculate relative luminance (alpha ignored)
pub fn relative_luminance(c: ColorRgba) -> f64 {
    fn channel(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
    }
    0.2126 * channel(c.r) + 0.7152 * channel(c.g) + 0.0722 * channel(c.b)
}

/// Contrast ratio between two colors, 1.0 to 21.0
pub fn contrast_ratio(a: ColorRgba, b: ColorRgba) -> f64 {
    let (l1, l2) = (relative_luminance(a), relative_luminance(b));
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG large-text classification from computed px size and weight
pub fn is_large_text(font_px: f64, weight: u16) -> bool {
    let pt = font_px * PT_PER_PX;
    pt >= LARGE_TEXT_PT || (pt >= LARGE_BOLD_TEXT_PT && weight >= BOLD_WEIGHT)
}

/// Check if contrast meets WCAG AA
pub fn meets_aa(ratio: f64, large_text: bool) -> bool {
    if large_text { ratio >= AA_LARGE_TEXT } else { ratio >= AA_NORMAL_TEXT }
}

/// Check if contrast meets WCAG AAA
pub fn meets_aaa(ratio: f64, large_text: bool) -> bool {
    if large_text { ratio >= AAA_LARGE_TEXT } else { ratio >= AAA_NORMAL_TEXT }
}

/// Compare text color against its background. A translucent
/// foreground is composited over the background first.
pub fn check_contrast(fg: ColorRgba, bg: ColorRgba, large_text: bool) -> ContrastResult {
    let fg = fg.composite_over(bg);
    let ratio = contrast_ratio(fg, bg);
    ContrastResult {
        ratio,
        is_large_text: large_text,
        wcag_aa: meets_aa(ratio, large_text),
        wcag_aaa: meets_aaa(ratio, large_text),
    }
}
