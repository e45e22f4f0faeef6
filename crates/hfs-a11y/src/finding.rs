//! Findings
//!
//! Plain result values every auditor returns. A finding is a measured
//! pass or fail; a skip is an element that could not be evaluated.

use std::fmt;
use std::str::FromStr;

use hfs_dom::ElementRef;
use serde::{Deserialize, Serialize};

use crate::A11yError;

/// Issue severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Minor issue, suggestion only
    Info,
    /// Should fix for better accessibility
    Warning,
    /// Must fix - fails WCAG AA
    Error,
    /// Critical - major a11y barrier
    Critical,
}

/// Audit rule
///
/// Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    ColorContrast,
    TouchTarget,
    AccessibleName,
    HeadingOrder,
    Landmarks,
    ReducedMotion,
    ViewportOverflow,
    ElementOverlap,
}

impl RuleId {
    pub const ALL: [RuleId; 8] = [
        Self::ColorContrast,
        Self::TouchTarget,
        Self::AccessibleName,
        Self::HeadingOrder,
        Self::Landmarks,
        Self::ReducedMotion,
        Self::ViewportOverflow,
        Self::ElementOverlap,
    ];

    /// Stable id used in reports and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ColorContrast => "color-contrast",
            Self::TouchTarget => "touch-target",
            Self::AccessibleName => "accessible-name",
            Self::HeadingOrder => "heading-order",
            Self::Landmarks => "landmarks",
            Self::ReducedMotion => "reduced-motion",
            Self::ViewportOverflow => "viewport-overflow",
            Self::ElementOverlap => "element-overlap",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ColorContrast => "Text contrast",
            Self::TouchTarget => "Touch target size",
            Self::AccessibleName => "Accessible names",
            Self::HeadingOrder => "Heading hierarchy",
            Self::Landmarks => "Page landmarks",
            Self::ReducedMotion => "Reduced motion",
            Self::ViewportOverflow => "Horizontal overflow",
            Self::ElementOverlap => "Overlapping content",
        }
    }

    /// WCAG success criterion this rule checks
    pub fn wcag_criterion(&self) -> &'static str {
        match self {
            Self::ColorContrast => "1.4.3 Contrast (Minimum)",
            Self::TouchTarget => "2.5.5 Target Size",
            Self::AccessibleName => "4.1.2 Name, Role, Value",
            Self::HeadingOrder => "1.3.1 Info and Relationships",
            Self::Landmarks => "2.4.1 Bypass Blocks",
            Self::ReducedMotion => "2.3.3 Animation from Interactions",
            Self::ViewportOverflow => "1.4.10 Reflow",
            Self::ElementOverlap => "1.4.10 Reflow",
        }
    }

    pub fn severity(&self) -> IssueSeverity {
        match self {
            Self::ColorContrast => IssueSeverity::Error,
            Self::TouchTarget => IssueSeverity::Warning,
            Self::AccessibleName => IssueSeverity::Critical,
            Self::HeadingOrder => IssueSeverity::Warning,
            Self::Landmarks => IssueSeverity::Warning,
            Self::ReducedMotion => IssueSeverity::Error,
            Self::ViewportOverflow => IssueSeverity::Error,
            Self::ElementOverlap => IssueSeverity::Warning,
        }
    }

    /// Fixed remedy text for recommendations
    pub fn remedy(&self) -> &'static str {
        match self {
            Self::ColorContrast => {
                "Increase the contrast between text and its background to at least 4.5:1 (3:1 for large text)."
            }
            Self::TouchTarget => {
                "Make interactive elements at least 44x44 CSS pixels, using padding if the visual size must stay small."
            }
            Self::AccessibleName => {
                "Give every interactive element a name with visible text, aria-label, aria-labelledby or an associated label."
            }
            Self::HeadingOrder => {
                "Do not skip heading levels; nest headings one level at a time starting from a single h1."
            }
            Self::Landmarks => {
                "Wrap page regions in header, nav, main and footer elements (or the matching ARIA roles)."
            }
            Self::ReducedMotion => {
                "Disable or shorten animations inside a prefers-reduced-motion: reduce media query."
            }
            Self::ViewportOverflow => {
                "Constrain element widths so content reflows at narrow viewports without horizontal scrolling."
            }
            Self::ElementOverlap => {
                "Keep text and controls from covering each other at every breakpoint; stack them instead of positioning them absolutely."
            }
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = A11yError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| A11yError::UnknownRule(s.to_string()))
    }
}

/// A measured value or the threshold it was held to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Number(f64),
    Text(String),
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for Measurement {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Measurement {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(t) => f.write_str(t),
        }
    }
}

/// One evaluated element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub target: ElementRef,
    pub rule: RuleId,
    pub passed: bool,
    pub measured: Measurement,
    pub threshold: Measurement,
    /// Simulated device the finding was produced under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Finding {
    pub fn new(
        target: ElementRef,
        rule: RuleId,
        passed: bool,
        measured: impl Into<Measurement>,
        threshold: impl Into<Measurement>,
    ) -> Self {
        Self {
            target,
            rule,
            passed,
            measured: measured.into(),
            threshold: threshold.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: &str) -> Self {
        self.context = Some(context.to_string());
        self
    }
}

/// An element a rule could not evaluate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skipped {
    pub target: ElementRef,
    pub rule: RuleId,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// What an auditor returns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditOutcome {
    pub findings: Vec<Finding>,
    pub skipped: Vec<Skipped>,
}

impl AuditOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Record an element that could not be evaluated
    pub fn skip(&mut self, target: ElementRef, rule: RuleId, reason: impl fmt::Display) {
        let reason = reason.to_string();
        tracing::warn!(rule = %rule, target = %target, "skipped: {reason}");
        self.skipped.push(Skipped { target, rule, reason, context: None });
    }

    /// Append another outcome
    pub fn merge(&mut self, other: AuditOutcome) {
        self.findings.extend(other.findings);
        self.skipped.extend(other.skipped);
    }

    /// Tag every entry with a device name
    pub fn with_context(mut self, context: &str) -> Self {
        for finding in &mut self.findings {
            finding.context = Some(context.to_string());
        }
        for skipped in &mut self.skipped {
            skipped.context = Some(context.to_string());
        }
        self
    }

    pub fn passed_count(&self) -> usize {
        self.findings.iter().filter(|f| f.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.findings.iter().filter(|f| !f.passed).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.passed)
    }
}

impl Extend<AuditOutcome> for AuditOutcome {
    fn extend<I: IntoIterator<Item = AuditOutcome>>(&mut self, iter: I) {
        for outcome in iter {
            self.merge(outcome);
        }
    }
}
