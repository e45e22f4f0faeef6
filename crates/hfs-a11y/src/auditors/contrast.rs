//! Text contrast (WCAG 1.4.3)

use hfs_css::{CssError, parse_font_weight, parse_px, try_parse_color};
use hfs_dom::NodeId;

use super::{AuditScope, Auditor};
use crate::{AuditOutcome, ContrastResult, Finding, RuleId, check_contrast, effective_background, is_large_text, meets_aa};

/// Elements whose text never paints
const NON_VISUAL: &[&str] = &["script", "style", "noscript", "template", "title", "head"];

/// Ratio as reported, truncated to two decimals so that a reported
/// value never rounds up onto the threshold
fn reported_ratio(ratio: f64) -> f64 {
    // Absorbs float noise such as 20.999999999999996 for black on white
    ((ratio * 100.0) + 1e-9).floor() / 100.0
}

/// Checks every rendered element that carries text of its own
#[derive(Debug, Clone, Copy, Default)]
pub struct ContrastAuditor;

impl ContrastAuditor {
    fn measure(&self, scope: &AuditScope<'_>, id: NodeId) -> Result<ContrastResult, CssError> {
        let tree = scope.tree;
        let fg = try_parse_color(scope.styles.computed_value(tree, id, "color"))?;
        let bg = effective_background(tree, id, &scope.styles)?;
        let font_px = parse_px(scope.styles.computed_value(tree, id, "font-size"))?;
        let weight = parse_font_weight(scope.styles.computed_value(tree, id, "font-weight"))?;
        Ok(check_contrast(fg, bg, is_large_text(font_px, weight)))
    }
}

impl Auditor for ContrastAuditor {
    fn rule(&self) -> RuleId {
        RuleId::ColorContrast
    }

    fn audit(&self, scope: &AuditScope<'_>) -> AuditOutcome {
        let mut outcome = AuditOutcome::new();
        for id in scope.rendered_elements() {
            if scope.tree.tag_name(id).is_some_and(|tag| NON_VISUAL.contains(&tag)) {
                continue;
            }
            if scope.tree.own_text(id).trim().is_empty() {
                continue;
            }

            let target = scope.element_ref(id);
            match self.measure(scope, id) {
                Ok(result) => {
                    let ratio = reported_ratio(result.ratio);
                    let passed = meets_aa(ratio, result.is_large_text);
                    outcome.push(Finding::new(target, self.rule(), passed, ratio, result.aa_threshold()));
                }
                Err(err) => outcome.skip(target, self.rule(), err),
            }
        }
        tracing::debug!(
            passed = outcome.passed_count(),
            failed = outcome.failed_count(),
            skipped = outcome.skipped.len(),
            "contrast audit done"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Measurement, AA_LARGE_TEXT};
    use hfs_dom::{DomTree, Window};

    fn text_element(tree: &mut DomTree, tag: &str, text: &str) -> NodeId {
        let elem = tree.create_element(tag);
        tree.append_child(tree.root(), elem);
        let t = tree.create_text(text);
        tree.append_child(elem, t);
        elem
    }

    fn run(tree: &DomTree) -> AuditOutcome {
        let window = Window::default();
        ContrastAuditor.audit(&AuditScope::element(tree, tree.root(), &window))
    }

    #[test]
    fn test_dark_text_on_light_passes() {
        let mut tree = DomTree::new();
        let p = text_element(&mut tree, "p", "Sound healing sessions");
        tree.set_style(p, "color", "#1e1b4b");

        let outcome = run(&tree);
        assert_eq!(outcome.findings.len(), 1);
        assert!(outcome.findings[0].passed);
    }

    #[test]
    fn test_large_text_gets_lower_threshold() {
        let mut tree = DomTree::new();
        let h1 = text_element(&mut tree, "h1", "Welcome");
        tree.set_style(h1, "color", "rgb(130, 130, 130)");
        tree.set_style(h1, "font-size", "32px");

        let outcome = run(&tree);
        assert!(outcome.findings[0].passed);
        assert_eq!(outcome.findings[0].threshold, Measurement::Number(AA_LARGE_TEXT));
    }

    #[test]
    fn test_glass_card_uses_backdrop_under_translucent_layer() {
        let mut tree = DomTree::new();
        let section = tree.create_element("section");
        tree.append_child(tree.root(), section);
        let card = tree.create_element("div");
        tree.append_child(section, card);
        let p = tree.create_element("p");
        tree.append_child(card, p);
        let t = tree.create_text("Guided breathwork");
        tree.append_child(p, t);
        tree.set_style(section, "background-color", "#1e1b4b");
        tree.set_style(card, "background-color", "rgba(255, 255, 255, 0.1)");
        tree.set_style(p, "color", "#fff");

        let outcome = run(&tree);
        assert_eq!(outcome.findings.len(), 1);
        let finding = &outcome.findings[0];
        assert!(finding.passed);
        match finding.measured {
            Measurement::Number(ratio) => assert!(ratio > 10.0, "ratio {ratio}"),
            ref other => panic!("unexpected measurement {other:?}"),
        }
    }

    #[test]
    fn test_reported_ratio_never_rounds_onto_threshold() {
        assert_eq!(reported_ratio(4.496), 4.49);
        assert_eq!(reported_ratio(4.5), 4.5);
        assert_eq!(reported_ratio(20.999999999999996), 21.0);
    }

    #[test]
    fn test_verdict_agrees_with_reported_ratio() {
        for gray in (100..=140u8).step_by(2) {
            let mut tree = DomTree::new();
            let p = text_element(&mut tree, "p", "Reiki");
            tree.set_style(p, "color", &format!("rgb({gray}, {gray}, {gray})"));

            let outcome = run(&tree);
            let finding = &outcome.findings[0];
            let (Measurement::Number(measured), Measurement::Number(threshold)) = (&finding.measured, &finding.threshold)
            else {
                panic!("numeric contrast expected");
            };
            assert_eq!(finding.passed, measured >= threshold, "gray {gray}");
        }
    }

    #[test]
    fn test_unparsable_color_is_skipped_not_passed() {
        let mut tree = DomTree::new();
        let p = text_element(&mut tree, "p", "Gradient text");
        tree.set_style(p, "color", "var(--gradient)");

        let outcome = run(&tree);
        assert!(outcome.findings.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].rule, RuleId::ColorContrast);
    }

    #[test]
    fn test_elements_without_own_text_are_ignored() {
        let mut tree = DomTree::new();
        let wrapper = tree.create_element("div");
        tree.append_child(tree.root(), wrapper);
        let script = text_element(&mut tree, "script", "console.log('hi')");
        tree.set_style(script, "display", "block");

        let outcome = run(&tree);
        assert!(outcome.findings.is_empty());
        assert!(outcome.skipped.is_empty());
    }
}
