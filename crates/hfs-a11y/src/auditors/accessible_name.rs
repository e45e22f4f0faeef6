//! Accessible names (WCAG 4.1.2)

use super::{AuditScope, Auditor, is_interactive};
use crate::{AuditOutcome, Finding, RuleId, accessible_name};

/// Every rendered interactive element needs a non-empty name
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessibleNameAuditor;

impl Auditor for AccessibleNameAuditor {
    fn rule(&self) -> RuleId {
        RuleId::AccessibleName
    }

    fn audit(&self, scope: &AuditScope<'_>) -> AuditOutcome {
        let mut outcome = AuditOutcome::new();
        for id in scope.rendered_elements() {
            if !is_interactive(scope.tree, id) {
                continue;
            }
            let name = accessible_name(scope.tree, id);
            let passed = !name.is_empty();
            let measured = if passed { name.text } else { "(none)".to_string() };
            outcome.push(Finding::new(scope.element_ref(id), self.rule(), passed, measured, "non-empty name"));
        }
        outcome
    }
}
