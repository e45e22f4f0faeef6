//! Heading hierarchy (WCAG 1.3.1)
//!
//! Headings may go up any number of levels but down only one at a time.
//! The running maximum starts at 0, so a page opening with an h2 fails.

use hfs_dom::{DomTree, NodeId};

use super::{AuditScope, Auditor};
use crate::{AriaRole, AuditOutcome, Finding, RuleId};

/// `aria-level` when a role=heading element omits it
const DEFAULT_ARIA_LEVEL: u8 = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingHierarchyAuditor;

/// Heading level, `Ok(None)` for non-headings
fn heading_level(tree: &DomTree, id: NodeId) -> Result<Option<u8>, String> {
    if let Some(tag) = tree.tag_name(id) {
        if let [b'h', digit @ b'1'..=b'6'] = tag.as_bytes() {
            return Ok(Some(digit - b'0'));
        }
    }
    let is_heading = tree
        .get_attribute(id, "role")
        .is_some_and(|role| AriaRole::parse(role) == Some(AriaRole::Heading));
    if !is_heading {
        return Ok(None);
    }
    match tree.get_attribute(id, "aria-level") {
        None => Ok(Some(DEFAULT_ARIA_LEVEL)),
        Some(level) => match level.trim().parse::<u8>() {
            Ok(level @ 1..=6) => Ok(Some(level)),
            _ => Err(format!("invalid aria-level {level:?}")),
        },
    }
}

impl Auditor for HeadingHierarchyAuditor {
    fn rule(&self) -> RuleId {
        RuleId::HeadingOrder
    }

    fn audit(&self, scope: &AuditScope<'_>) -> AuditOutcome {
        let mut outcome = AuditOutcome::new();
        let mut max_level = 0u8;

        for id in scope.rendered_elements() {
            let level = match heading_level(scope.tree, id) {
                Ok(Some(level)) => level,
                Ok(None) => continue,
                Err(reason) => {
                    outcome.skip(scope.element_ref(id), self.rule(), reason);
                    continue;
                }
            };
            let allowed = max_level + 1;
            outcome.push(Finding::new(
                scope.element_ref(id),
                self.rule(),
                level <= allowed,
                level as f64,
                allowed as f64,
            ));
            max_level = max_level.max(level);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Measurement;
    use hfs_dom::Window;

    fn headings(levels: &[&str]) -> DomTree {
        let mut tree = DomTree::new();
        for tag in levels {
            let h = tree.create_element(tag);
            tree.append_child(tree.root(), h);
        }
        tree
    }

    fn failures(tree: &DomTree) -> Vec<String> {
        let window = Window::default();
        HeadingHierarchyAuditor
            .audit(&AuditScope::element(tree, tree.root(), &window))
            .failures()
            .map(|f| f.target.tag.clone())
            .collect()
    }

    #[test]
    fn test_going_back_up_is_fine() {
        assert!(failures(&headings(&["h1", "h2", "h3", "h2", "h3", "h1", "h2"])).is_empty());
    }

    #[test]
    fn test_skipped_level_fails_once() {
        let tree = headings(&["h1", "h3", "h4"]);
        let window = Window::default();
        let outcome = HeadingHierarchyAuditor.audit(&AuditScope::element(&tree, tree.root(), &window));

        assert_eq!(outcome.failed_count(), 1);
        let failed = outcome.failures().next().unwrap();
        assert_eq!(failed.target.tag, "h3");
        assert_eq!(failed.measured, Measurement::Number(3.0));
        assert_eq!(failed.threshold, Measurement::Number(2.0));
    }

    #[test]
    fn test_first_heading_must_be_h1() {
        assert_eq!(failures(&headings(&["h2", "h3"])), vec!["h2".to_string()]);
    }

    #[test]
    fn test_aria_headings() {
        let mut tree = headings(&["h1"]);
        let div = tree.create_element("div");
        tree.append_child(tree.root(), div);
        tree.set_attribute(div, "role", "heading");
        tree.set_attribute(div, "aria-level", "4");
        let bad = tree.create_element("div");
        tree.append_child(tree.root(), bad);
        tree.set_attribute(bad, "role", "heading");
        tree.set_attribute(bad, "aria-level", "seven");

        let window = Window::default();
        let outcome = HeadingHierarchyAuditor.audit(&AuditScope::element(&tree, tree.root(), &window));
        assert_eq!(outcome.failed_count(), 1);
        assert_eq!(outcome.skipped.len(), 1);
    }
}
