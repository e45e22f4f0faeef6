//! Media Queries
//!
//! Enough of Media Queries Level 4 to evaluate the breakpoints and
//! preference queries a marketing site uses: viewport width/height,
//! orientation, resolution and `prefers-reduced-motion`.

use hfs_dom::Window;

use crate::{CssError, parse_px};

/// Font size media queries resolve `em` against
const MEDIA_EM_PX: f64 = 16.0;
const CSS_DPI: f64 = 96.0;

/// Motion preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    #[default]
    NoPreference,
    Reduce,
}

/// Viewport orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Media type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    All,
    Screen,
    Print,
}

/// What media queries are evaluated against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaEnvironment {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
    pub motion: MotionPreference,
}

impl MediaEnvironment {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, device_pixel_ratio: 1.0, motion: MotionPreference::NoPreference }
    }

    /// Snapshot of the live window
    pub fn from_window(window: &Window) -> Self {
        Self {
            width: window.inner_width() as f64,
            height: window.inner_height() as f64,
            device_pixel_ratio: window.device_pixel_ratio(),
            motion: if window.prefers_reduced_motion() {
                MotionPreference::Reduce
            } else {
                MotionPreference::NoPreference
            },
        }
    }

    /// Same viewport with a different motion preference
    pub fn with_reduced_motion(mut self, reduce: bool) -> Self {
        self.motion = if reduce { MotionPreference::Reduce } else { MotionPreference::NoPreference };
        self
    }

    pub fn orientation(&self) -> Orientation {
        if self.height >= self.width { Orientation::Portrait } else { Orientation::Landscape }
    }
}

/// A single media feature test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaFeature {
    MinWidth(f64),
    MaxWidth(f64),
    MinHeight(f64),
    MaxHeight(f64),
    Orientation(Orientation),
    PrefersReducedMotion(MotionPreference),
    /// dppx
    MinResolution(f64),
    MaxResolution(f64),
}

impl MediaFeature {
    fn parse(group: &str, query: &str) -> Result<Self, CssError> {
        let err = |message: String| CssError::InvalidMediaQuery { query: query.to_string(), message };

        let Some((name, value)) = group.split_once(':') else {
            // Boolean context
            return match group.trim() {
                "prefers-reduced-motion" => Ok(Self::PrefersReducedMotion(MotionPreference::Reduce)),
                other => Err(err(format!("unsupported boolean feature `{other}`"))),
            };
        };
        let (name, value) = (name.trim(), value.trim());

        Ok(match name {
            "min-width" => Self::MinWidth(media_length(value).map_err(|e| err(e.to_string()))?),
            "max-width" => Self::MaxWidth(media_length(value).map_err(|e| err(e.to_string()))?),
            "min-height" => Self::MinHeight(media_length(value).map_err(|e| err(e.to_string()))?),
            "max-height" => Self::MaxHeight(media_length(value).map_err(|e| err(e.to_string()))?),
            "orientation" => Self::Orientation(match value {
                "portrait" => Orientation::Portrait,
                "landscape" => Orientation::Landscape,
                other => return Err(err(format!("bad orientation `{other}`"))),
            }),
            "prefers-reduced-motion" => Self::PrefersReducedMotion(match value {
                "reduce" => MotionPreference::Reduce,
                "no-preference" => MotionPreference::NoPreference,
                other => return Err(err(format!("bad motion preference `{other}`"))),
            }),
            "min-resolution" => Self::MinResolution(resolution(value).ok_or_else(|| err(format!("bad resolution `{value}`")))?),
            "max-resolution" => Self::MaxResolution(resolution(value).ok_or_else(|| err(format!("bad resolution `{value}`")))?),
            other => return Err(err(format!("unsupported feature `{other}`"))),
        })
    }

    pub fn matches(&self, env: &MediaEnvironment) -> bool {
        match *self {
            Self::MinWidth(px) => env.width >= px,
            Self::MaxWidth(px) => env.width <= px,
            Self::MinHeight(px) => env.height >= px,
            Self::MaxHeight(px) => env.height <= px,
            Self::Orientation(o) => env.orientation() == o,
            Self::PrefersReducedMotion(pref) => env.motion == pref,
            Self::MinResolution(dppx) => env.device_pixel_ratio >= dppx,
            Self::MaxResolution(dppx) => env.device_pixel_ratio <= dppx,
        }
    }
}

fn media_length(value: &str) -> Result<f64, CssError> {
    match value.strip_suffix("em") {
        Some(n) if !n.ends_with('r') => n
            .trim()
            .parse::<f64>()
            .map(|em| em * MEDIA_EM_PX)
            .map_err(|_| CssError::InvalidLength(value.to_string())),
        _ => parse_px(value),
    }
}

fn resolution(value: &str) -> Option<f64> {
    if let Some(n) = value.strip_suffix("dppx") {
        n.trim().parse().ok()
    } else if let Some(n) = value.strip_suffix("dpi") {
        n.trim().parse::<f64>().ok().map(|dpi| dpi / CSS_DPI)
    } else if let Some(n) = value.strip_suffix('x') {
        n.trim().parse().ok()
    } else {
        None
    }
}

/// One comma-separated branch of a media query list
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    pub negated: bool,
    pub media_type: Option<MediaType>,
    pub features: Vec<MediaFeature>,
}

impl MediaQuery {
    fn parse(text: &str) -> Result<Self, CssError> {
        let err = |message: &str| CssError::InvalidMediaQuery {
            query: text.to_string(),
            message: message.to_string(),
        };

        let tokens = tokenize(text).ok_or_else(|| err("unbalanced parentheses"))?;
        let mut tokens = tokens.into_iter().peekable();
        let mut query = MediaQuery { negated: false, media_type: None, features: Vec::new() };

        match tokens.peek() {
            Some(Token::Word(w)) if w == "not" => {
                query.negated = true;
                tokens.next();
            }
            Some(Token::Word(w)) if w == "only" => {
                tokens.next();
            }
            _ => {}
        }

        if let Some(Token::Word(w)) = tokens.peek() {
            query.media_type = Some(match w.as_str() {
                "all" => MediaType::All,
                "screen" => MediaType::Screen,
                "print" => MediaType::Print,
                _ => return Err(err("unknown media type")),
            });
            tokens.next();
        } else if query.negated {
            return Err(err("`not` requires a media type"));
        }

        let mut expect_and = query.media_type.is_some();
        while let Some(token) = tokens.next() {
            match token {
                Token::Word(w) if expect_and && w == "and" => {
                    match tokens.next() {
                        Some(Token::Group(group)) => query.features.push(MediaFeature::parse(&group, text)?),
                        _ => return Err(err("expected a feature after `and`")),
                    }
                }
                Token::Group(group) if !expect_and => {
                    query.features.push(MediaFeature::parse(&group, text)?);
                    expect_and = true;
                }
                _ => return Err(err("unexpected token")),
            }
        }

        if query.media_type.is_none() && query.features.is_empty() {
            return Err(err("empty query"));
        }
        Ok(query)
    }

    pub fn evaluate(&self, env: &MediaEnvironment) -> bool {
        let type_ok = !matches!(self.media_type, Some(MediaType::Print));
        let matched = type_ok && self.features.iter().all(|f| f.matches(env));
        matched != self.negated
    }
}

/// A full media query list (`@media a, b`)
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQueryList {
    pub queries: Vec<MediaQuery>,
}

impl MediaQueryList {
    /// Parse a query list; a leading `@media` is accepted
    pub fn parse(text: &str) -> Result<Self, CssError> {
        let lowered = text.trim().to_ascii_lowercase();
        let body = lowered.strip_prefix("@media").unwrap_or(&lowered).trim();
        if body.is_empty() {
            return Ok(Self { queries: Vec::new() });
        }
        let queries = body
            .split(',')
            .map(|q| MediaQuery::parse(q.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { queries })
    }

    /// An empty list matches everything
    pub fn evaluate(&self, env: &MediaEnvironment) -> bool {
        self.queries.is_empty() || self.queries.iter().any(|q| q.evaluate(env))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    /// Contents of a parenthesized group
    Group(String),
}

fn tokenize(text: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '(' {
            let mut depth = 0usize;
            let mut end = None;
            for (i, ch) in chars.by_ref() {
                match ch {
                    '(' => depth += 1,
                    ')' => {
                        depth -= 1;
                        if depth == 0 {
                            end = Some(i);
                            break;
                        }
                    }
                    _ => {}
                }
            }
            let end = end?;
            tokens.push(Token::Group(text[start + 1..end].trim().to_string()));
        } else if c == ')' {
            return None;
        } else {
            let mut end = text.len();
            while let Some(&(i, ch)) = chars.peek() {
                if ch.is_whitespace() || ch == '(' || ch == ')' {
                    end = i;
                    break;
                }
                chars.next();
            }
            tokens.push(Token::Word(text[start..end].to_string()));
        }
    }
    Some(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mobile() -> MediaEnvironment {
        MediaEnvironment::new(375.0, 667.0)
    }

    fn desktop() -> MediaEnvironment {
        MediaEnvironment::new(1440.0, 900.0)
    }

    #[test]
    fn test_width_breakpoints() {
        let q = MediaQueryList::parse("(max-width: 767px)").unwrap();
        assert!(q.evaluate(&mobile()));
        assert!(!q.evaluate(&desktop()));

        let q = MediaQueryList::parse("@media screen and (min-width: 48em)").unwrap();
        assert!(!q.evaluate(&mobile()));
        assert!(q.evaluate(&desktop()));
    }

    #[test]
    fn test_reduced_motion() {
        let q = MediaQueryList::parse("(prefers-reduced-motion: reduce)").unwrap();
        assert!(!q.evaluate(&desktop()));
        assert!(q.evaluate(&desktop().with_reduced_motion(true)));

        let q = MediaQueryList::parse("(prefers-reduced-motion: no-preference)").unwrap();
        assert!(q.evaluate(&desktop()));
        assert!(!q.evaluate(&desktop().with_reduced_motion(true)));

        let q = MediaQueryList::parse("(prefers-reduced-motion)").unwrap();
        assert!(q.evaluate(&mobile().with_reduced_motion(true)));
    }

    #[test]
    fn test_list_is_or_and_not_inverts() {
        let q = MediaQueryList::parse("(max-width: 400px), (min-width: 1400px)").unwrap();
        assert!(q.evaluate(&mobile()));
        assert!(q.evaluate(&desktop()));
        assert!(!q.evaluate(&MediaEnvironment::new(1024.0, 768.0)));

        let q = MediaQueryList::parse("not screen and (orientation: portrait)").unwrap();
        assert!(!q.evaluate(&mobile()));
        assert!(q.evaluate(&desktop()));
    }

    #[test]
    fn test_print_never_matches_screen() {
        let q = MediaQueryList::parse("print").unwrap();
        assert!(!q.evaluate(&desktop()));
    }

    #[test]
    fn test_resolution() {
        let mut env = mobile();
        env.device_pixel_ratio = 3.0;
        assert!(MediaQueryList::parse("(min-resolution: 2dppx)").unwrap().evaluate(&env));
        assert!(MediaQueryList::parse("(min-resolution: 192dpi)").unwrap().evaluate(&env));
        assert!(!MediaQueryList::parse("(max-resolution: 1x)").unwrap().evaluate(&env));
    }

    #[test]
    fn test_invalid_queries() {
        assert!(MediaQueryList::parse("(min-width: wide)").is_err());
        assert!(MediaQueryList::parse("(hover: hover)").is_err());
        assert!(MediaQueryList::parse("(max-width: 10px").is_err());
        assert!(MediaQueryList::parse("screen (min-width: 10px)").is_err());
        assert!(MediaQueryList::parse("tv").is_err());
    }
}
