//! Horizontal overflow (WCAG 1.4.10)
//!
//! Anything painting past the right edge of the viewport forces
//! horizontal scrolling at that width, unless a clipping ancestor hides it.

use hfs_dom::NodeId;

use super::{AuditScope, Auditor};
use crate::{AuditOutcome, Finding, RuleId};

/// Sub-pixel layout rounding tolerated before calling it overflow
const TOLERANCE_PX: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default)]
pub struct OverflowAuditor;

impl OverflowAuditor {
    fn is_clipped(scope: &AuditScope<'_>, id: NodeId) -> bool {
        scope
            .tree
            .ancestors(id)
            .filter(|&a| scope.tree.is_element(a))
            .any(|a| {
                ["overflow", "overflow-x"].iter().any(|prop| {
                    matches!(
                        scope.styles.computed_value(scope.tree, a, prop).to_ascii_lowercase().as_str(),
                        "hidden" | "clip"
                    )
                })
            })
    }
}

impl Auditor for OverflowAuditor {
    fn rule(&self) -> RuleId {
        RuleId::ViewportOverflow
    }

    fn audit(&self, scope: &AuditScope<'_>) -> AuditOutcome {
        let mut outcome = AuditOutcome::new();
        let viewport = scope.env().width;

        for id in scope.rendered_elements() {
            let rect = scope.tree.bounding_rect(id);
            if rect.is_empty() {
                continue;
            }
            if !rect.is_finite() {
                outcome.skip(scope.element_ref(id), self.rule(), "bounding box is not finite");
                continue;
            }
            if Self::is_clipped(scope, id) {
                continue;
            }
            let right = rect.right();
            outcome.push(Finding::new(
                scope.element_ref(id),
                self.rule(),
                right <= viewport + TOLERANCE_PX,
                right.round(),
                viewport,
            ));
        }
        outcome
    }
}
