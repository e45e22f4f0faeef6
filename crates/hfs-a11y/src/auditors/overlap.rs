//! Overlapping content (WCAG 1.4.10)
//!
//! Text and controls laid out on top of one another at some breakpoint.
//! Only elements outside each other's subtree are compared, so a link
//! wrapping its label never counts as overlap.

use hfs_dom::{DOMRect, NodeId};

use super::{AuditScope, Auditor, is_interactive};
use crate::{AuditOutcome, Finding, RuleId};

/// Shared area below this is treated as layout rounding
const MIN_OVERLAP_PX2: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapAuditor;

impl Auditor for OverlapAuditor {
    fn rule(&self) -> RuleId {
        RuleId::ElementOverlap
    }

    fn audit(&self, scope: &AuditScope<'_>) -> AuditOutcome {
        let mut outcome = AuditOutcome::new();
        let tree = scope.tree;

        let mut boxes: Vec<(NodeId, DOMRect)> = Vec::new();
        for id in scope.rendered_elements() {
            if !is_interactive(tree, id) && tree.own_text(id).trim().is_empty() {
                continue;
            }
            let rect = tree.bounding_rect(id);
            if !rect.is_finite() {
                outcome.skip(scope.element_ref(id), self.rule(), "bounding box is not finite");
                continue;
            }
            if !rect.is_empty() {
                boxes.push((id, rect));
            }
        }

        for &(id, rect) in &boxes {
            let covered = boxes
                .iter()
                .filter(|&&(other, _)| !tree.contains(id, other) && !tree.contains(other, id))
                .filter(|(_, other_rect)| rect.intersection(other_rect).is_some_and(|r| r.area() >= MIN_OVERLAP_PX2))
                .inspect(|&&(other, _)| {
                    tracing::debug!("{} overlaps {}", scope.element_ref(id), scope.element_ref(other));
                })
                .count();
            outcome.push(Finding::new(scope.element_ref(id), self.rule(), covered == 0, covered as f64, 0.0));
        }
        outcome
    }
}
