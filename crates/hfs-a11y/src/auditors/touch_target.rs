//! Touch target size (WCAG 2.5.5)

use super::{AuditScope, Auditor, is_interactive};
use crate::{AuditOutcome, Finding, RuleId};

/// Minimum touch target size in CSS px
pub const MIN_TOUCH_TARGET: f64 = 44.0;

#[derive(Debug, Clone, Copy)]
pub struct TouchTargetAuditor {
    pub min_size: f64,
}

impl Default for TouchTargetAuditor {
    fn default() -> Self {
        Self { min_size: MIN_TOUCH_TARGET }
    }
}

impl TouchTargetAuditor {
    pub fn new(min_size: f64) -> Self {
        Self { min_size }
    }
}

impl Auditor for TouchTargetAuditor {
    fn rule(&self) -> RuleId {
        RuleId::TouchTarget
    }

    fn audit(&self, scope: &AuditScope<'_>) -> AuditOutcome {
        let mut outcome = AuditOutcome::new();
        let threshold = format!("{0}x{0}", self.min_size);

        for id in scope.rendered_elements() {
            if !is_interactive(scope.tree, id) {
                continue;
            }
            let target = scope.element_ref(id);
            let rect = scope.tree.bounding_rect(id);
            if !rect.is_finite() {
                outcome.skip(target, self.rule(), "bounding box is not finite");
                continue;
            }
            let passed = rect.width >= self.min_size && rect.height >= self.min_size;
            let measured = format!("{}x{}", rect.width.round(), rect.height.round());
            outcome.push(Finding::new(target, self.rule(), passed, measured, threshold.as_str()));
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Measurement;
    use hfs_dom::{DOMRect, DomTree, Window};

    #[test]
    fn test_small_icon_link_fails() {
        let mut tree = DomTree::new();
        let cta = tree.create_element("button");
        let icon = tree.create_element("a");
        let text = tree.create_element("p");
        for node in [cta, icon, text] {
            tree.append_child(tree.root(), node);
        }
        tree.set_attribute(icon, "href", "https://facebook.com");
        tree.set_bounding_rect(cta, DOMRect::from_xywh(0.0, 0.0, 160.0, 48.0));
        tree.set_bounding_rect(icon, DOMRect::from_xywh(0.0, 60.0, 24.0, 24.0));
        tree.set_bounding_rect(text, DOMRect::from_xywh(0.0, 90.0, 10.0, 10.0));

        let window = Window::default();
        let outcome = TouchTargetAuditor::default().audit(&AuditScope::element(&tree, tree.root(), &window));

        assert_eq!(outcome.findings.len(), 2);
        assert!(outcome.findings[0].passed);
        assert!(!outcome.findings[1].passed);
        assert_eq!(outcome.findings[1].measured, Measurement::Text("24x24".into()));
        assert_eq!(outcome.findings[1].threshold, Measurement::Text("44x44".into()));
    }

    #[test]
    fn test_non_finite_box_is_skipped() {
        let mut tree = DomTree::new();
        let btn = tree.create_element("button");
        tree.append_child(tree.root(), btn);
        tree.set_bounding_rect(btn, DOMRect::from_xywh(0.0, 0.0, f64::NAN, 44.0));

        let window = Window::default();
        let outcome = TouchTargetAuditor::new(24.0).audit(&AuditScope::element(&tree, tree.root(), &window));
        assert!(outcome.findings.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
    }
}
