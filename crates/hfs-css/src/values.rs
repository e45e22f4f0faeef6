//! Computed value parsing
//!
//! Computed styles come back as strings; these turn the ones the
//! auditors care about into numbers.

use crate::CssError;

const PX_PER_PT: f64 = 96.0 / 72.0;

/// Parse an absolute length to CSS pixels (`px`, `pt`, or unitless zero)
pub fn parse_px(value: &str) -> Result<f64, CssError> {
    let v = value.trim().to_ascii_lowercase();
    let err = || CssError::InvalidLength(value.to_string());

    let px = if let Some(n) = v.strip_suffix("px") {
        n.trim().parse::<f64>().map_err(|_| err())?
    } else if let Some(n) = v.strip_suffix("pt") {
        n.trim().parse::<f64>().map_err(|_| err())? * PX_PER_PT
    } else if v.parse::<f64>().ok() == Some(0.0) {
        0.0
    } else {
        return Err(err());
    };

    if px.is_finite() { Ok(px) } else { Err(err()) }
}

/// Parse `font-weight` to its numeric value
pub fn parse_font_weight(value: &str) -> Result<u16, CssError> {
    let v = value.trim().to_ascii_lowercase();
    match v.as_str() {
        "normal" => Ok(400),
        "bold" | "bolder" => Ok(700),
        "lighter" => Ok(300),
        _ => v
            .parse::<f64>()
            .ok()
            .filter(|w| (1.0..=1000.0).contains(w))
            .map(|w| w.round() as u16)
            .ok_or_else(|| CssError::InvalidFontWeight(value.to_string())),
    }
}

/// Parse a comma-separated `<time>` list (`animation-duration`) to milliseconds
pub fn parse_time_list(value: &str) -> Result<Vec<f64>, CssError> {
    value.split(',').map(parse_time).collect()
}

fn parse_time(item: &str) -> Result<f64, CssError> {
    let v = item.trim().to_ascii_lowercase();
    let err = || CssError::InvalidTime(item.trim().to_string());

    let ms = if let Some(n) = v.strip_suffix("ms") {
        n.parse::<f64>().map_err(|_| err())?
    } else if let Some(n) = v.strip_suffix('s') {
        n.parse::<f64>().map_err(|_| err())? * 1000.0
    } else if v == "0" {
        0.0
    } else {
        return Err(err());
    };

    if ms.is_finite() && ms >= 0.0 { Ok(ms) } else { Err(err()) }
}

/// Parse `opacity` (number or percentage), clamped to 0..=1
pub fn parse_opacity(value: &str) -> Result<f64, CssError> {
    let v = value.trim();
    let parsed = match v.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().map(|p| p / 100.0),
        None => v.parse::<f64>(),
    };
    parsed
        .ok()
        .filter(|o| o.is_finite())
        .map(|o| o.clamp(0.0, 1.0))
        .ok_or_else(|| CssError::InvalidNumber(value.to_string()))
}

/// True when every item of a (possibly comma-separated) value is `none`
pub fn is_none_keyword(value: &str) -> bool {
    value
        .split(',')
        .all(|item| item.trim().eq_ignore_ascii_case("none"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("16px"), Ok(16.0));
        assert_eq!(parse_px(" 18.5PX "), Ok(18.5));
        assert_eq!(parse_px("0"), Ok(0.0));
        assert!((parse_px("18pt").unwrap() - 24.0).abs() < 1e-9);
        assert!(parse_px("1.5rem").is_err());
        assert!(parse_px("auto").is_err());
    }

    #[test]
    fn test_parse_font_weight() {
        assert_eq!(parse_font_weight("normal"), Ok(400));
        assert_eq!(parse_font_weight("bold"), Ok(700));
        assert_eq!(parse_font_weight("600"), Ok(600));
        assert!(parse_font_weight("heavy").is_err());
        assert!(parse_font_weight("0").is_err());
    }

    #[test]
    fn test_parse_time_list() {
        assert_eq!(parse_time_list("0.3s"), Ok(vec![300.0]));
        assert_eq!(parse_time_list("0s, 150ms, 2s"), Ok(vec![0.0, 150.0, 2000.0]));
        assert_eq!(parse_time_list("0"), Ok(vec![0.0]));
        assert!(parse_time_list("fast").is_err());
        assert!(parse_time_list("-1s").is_err());
    }

    #[test]
    fn test_parse_opacity() {
        assert_eq!(parse_opacity("0.4"), Ok(0.4));
        assert_eq!(parse_opacity("50%"), Ok(0.5));
        assert_eq!(parse_opacity("3"), Ok(1.0));
        assert!(parse_opacity("half").is_err());
    }

    #[test]
    fn test_none_keyword() {
        assert!(is_none_keyword("none"));
        assert!(is_none_keyword("none, NONE"));
        assert!(!is_none_keyword("float, none"));
    }
}
