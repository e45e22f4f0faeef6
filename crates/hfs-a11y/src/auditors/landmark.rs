//! Page landmarks (WCAG 2.4.1)

use hfs_dom::{ElementRef, NodeId};

use super::{AuditScope, Auditor};
use crate::{AriaRole, AuditOutcome, Finding, RuleId};

/// Required landmarks: element tag and its role
const REQUIRED: &[(&str, AriaRole)] = &[
    ("header", AriaRole::Banner),
    ("nav", AriaRole::Navigation),
    ("main", AriaRole::Main),
    ("footer", AriaRole::ContentInfo),
];

/// Presence checks for header, nav, main and footer
#[derive(Debug, Clone, Copy, Default)]
pub struct LandmarkAuditor;

impl Auditor for LandmarkAuditor {
    fn rule(&self) -> RuleId {
        RuleId::Landmarks
    }

    fn audit(&self, scope: &AuditScope<'_>) -> AuditOutcome {
        let mut outcome = AuditOutcome::new();
        // An explicit role overrides the tag's implicit one
        let landmarks: Vec<(NodeId, AriaRole)> = scope
            .elements()
            .into_iter()
            .filter_map(|id| AriaRole::of(scope.tree, id).map(|role| (id, role)))
            .filter(|(_, role)| role.is_landmark())
            .collect();
        tracing::debug!(count = landmarks.len(), "landmarks in scope");

        for &(tag, role) in REQUIRED {
            let matches: Vec<NodeId> = landmarks
                .iter()
                .filter(|&&(_, found)| found == role)
                .map(|&(id, _)| id)
                .collect();

            let finding = match matches.first() {
                Some(&first) => {
                    Finding::new(scope.element_ref(first), self.rule(), true, matches.len() as f64, 1.0)
                }
                None => {
                    tracing::debug!("no <{tag}> landmark");
                    Finding::new(ElementRef::missing(tag), self.rule(), false, 0.0, 1.0)
                }
            };
            outcome.push(finding);
        }
        outcome
    }
}
