//! Reduced motion (WCAG 2.3.3)
//!
//! An element animates when it names an animation with a positive
//! duration. It is gated when the same element stops animating under
//! `prefers-reduced-motion: reduce`.

use hfs_css::{CssError, StyleResolver, is_none_keyword, parse_time_list};
use hfs_dom::{DomTree, NodeId};

use super::{AuditScope, Auditor};
use crate::{AuditOutcome, Finding, RuleId};

#[derive(Debug, Clone, Copy, Default)]
pub struct MotionAuditor;

fn is_animated(styles: &StyleResolver, tree: &DomTree, id: NodeId) -> Result<bool, CssError> {
    if is_none_keyword(styles.computed_value(tree, id, "animation-name")) {
        return Ok(false);
    }
    let durations = parse_time_list(styles.computed_value(tree, id, "animation-duration"))?;
    Ok(durations.iter().any(|&ms| ms > 0.0))
}

impl Auditor for MotionAuditor {
    fn rule(&self) -> RuleId {
        RuleId::ReducedMotion
    }

    fn audit(&self, scope: &AuditScope<'_>) -> AuditOutcome {
        let mut outcome = AuditOutcome::new();
        let reduced = StyleResolver::new(scope.env().with_reduced_motion(true));

        for id in scope.rendered_elements() {
            let target = scope.element_ref(id);
            let animated = match is_animated(&scope.styles, scope.tree, id) {
                Ok(animated) => animated,
                Err(err) => {
                    outcome.skip(target, self.rule(), err);
                    continue;
                }
            };
            if !animated {
                continue;
            }
            match is_animated(&reduced, scope.tree, id) {
                Ok(still_animated) => {
                    let measured = scope.styles.computed_value(scope.tree, id, "animation-name");
                    outcome.push(Finding::new(
                        target,
                        self.rule(),
                        !still_animated,
                        measured,
                        "gated by prefers-reduced-motion",
                    ));
                }
                Err(err) => outcome.skip(target, self.rule(), err),
            }
        }
        outcome
    }
}
