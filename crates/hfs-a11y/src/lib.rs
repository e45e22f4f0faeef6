//! HFS Accessibility
//!
//! Static accessibility audits over a rendered page.
//!
//! Features:
//! - WCAG 2.1 relative luminance and contrast ratio
//! - Effective background resolution through the ancestor chain
//! - ARIA roles (explicit and implicit) and accessible names
//! - Independent auditors, one rule each, returning plain findings

pub mod aria;
pub mod auditors;
mod background;
mod contrast;
mod finding;
mod name;

pub use aria::AriaRole;
pub use auditors::{
    Auditor, AuditScope, ContrastAuditor, TouchTargetAuditor, AccessibleNameAuditor,
    HeadingHierarchyAuditor, LandmarkAuditor, MotionAuditor, OverflowAuditor, OverlapAuditor,
    auditor_for,
};
pub use background::effective_background;
pub use contrast::{
    ContrastResult, relative_luminance, contrast_ratio, check_contrast, is_large_text,
    meets_aa, meets_aaa, AA_NORMAL_TEXT, AA_LARGE_TEXT, AAA_NORMAL_TEXT, AAA_LARGE_TEXT,
};
pub use finding::{AuditOutcome, Finding, IssueSeverity, Measurement, RuleId, Skipped};
pub use name::{AccessibleName, NameSource, accessible_name};

/// Accessibility error
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    #[error("unknown rule id: {0}")]
    UnknownRule(String),
}
