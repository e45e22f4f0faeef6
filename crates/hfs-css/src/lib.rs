//! HFS CSS
//!
//! Reads the computed-style side of the page: color strings, lengths,
//! font weights, animation timings, media queries, and the resolver
//! that turns an element's declarations into computed values.

mod color;
mod values;
mod media;
mod resolver;

pub use color::{ColorRgba, parse_color, try_parse_color};
pub use values::{parse_px, parse_font_weight, parse_time_list, parse_opacity, is_none_keyword};
pub use media::{
    MediaQueryList, MediaQuery, MediaFeature, MediaType, MediaEnvironment,
    MotionPreference, Orientation,
};
pub use resolver::StyleResolver;

/// CSS value error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CssError {
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error("invalid length: {0:?}")]
    InvalidLength(String),

    #[error("invalid font weight: {0:?}")]
    InvalidFontWeight(String),

    #[error("invalid time: {0:?}")]
    InvalidTime(String),

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("invalid media query {query:?}: {message}")]
    InvalidMediaQuery { query: String, message: String },
}
