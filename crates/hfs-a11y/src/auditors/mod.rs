//! Auditors
//!
//! One auditor per rule. Auditors only read the tree; everything they
//! conclude goes into the returned [`AuditOutcome`].

mod accessible_name;
mod contrast;
mod heading;
mod landmark;
mod motion;
mod overflow;
mod overlap;
mod touch_target;

use std::fmt::Debug;

use hfs_css::{MediaEnvironment, StyleResolver};
use hfs_dom::{Document, DomTree, ElementRef, NodeId, Window};

use crate::{AriaRole, AuditOutcome, RuleId};

pub use accessible_name::AccessibleNameAuditor;
pub use contrast::ContrastAuditor;
pub use heading::HeadingHierarchyAuditor;
pub use landmark::LandmarkAuditor;
pub use motion::MotionAuditor;
pub use overflow::OverflowAuditor;
pub use overlap::OverlapAuditor;
pub use touch_target::TouchTargetAuditor;

/// A single accessibility rule
pub trait Auditor: Debug {
    fn rule(&self) -> RuleId;

    fn audit(&self, scope: &AuditScope<'_>) -> AuditOutcome;
}

/// What an auditor looks at: a subtree and the environment it renders in
#[derive(Debug, Clone)]
pub struct AuditScope<'a> {
    pub tree: &'a DomTree,
    pub root: NodeId,
    pub styles: StyleResolver,
}

impl<'a> AuditScope<'a> {
    /// Whole document at the window's current state
    pub fn document(document: &'a Document, window: &Window) -> Self {
        Self::element(document.tree(), document.tree().root(), window)
    }

    /// Subtree rooted at `root`
    pub fn element(tree: &'a DomTree, root: NodeId, window: &Window) -> Self {
        Self::with_env(tree, root, MediaEnvironment::from_window(window))
    }

    pub fn with_env(tree: &'a DomTree, root: NodeId, env: MediaEnvironment) -> Self {
        Self { tree, root, styles: StyleResolver::new(env) }
    }

    pub fn env(&self) -> &MediaEnvironment {
        self.styles.env()
    }

    /// Elements in scope, document order
    pub fn elements(&self) -> Vec<NodeId> {
        self.tree.elements_in_scope(self.root)
    }

    /// Rendered elements in scope, document order
    pub fn rendered_elements(&self) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|&id| self.styles.is_rendered(self.tree, id))
            .collect()
    }

    pub fn element_ref(&self, id: NodeId) -> ElementRef {
        ElementRef::from_node(self.tree, id)
    }
}

/// Elements users operate: anything whose role is a widget
pub(crate) fn is_interactive(tree: &DomTree, id: NodeId) -> bool {
    AriaRole::of(tree, id).is_some_and(|role| role.is_widget())
}

/// The built-in auditor for a rule
pub fn auditor_for(rule: RuleId) -> Box<dyn Auditor> {
    match rule {
        RuleId::ColorContrast => Box::new(ContrastAuditor),
        RuleId::TouchTarget => Box::new(TouchTargetAuditor::default()),
        RuleId::AccessibleName => Box::new(AccessibleNameAuditor),
        RuleId::HeadingOrder => Box::new(HeadingHierarchyAuditor),
        RuleId::Landmarks => Box::new(LandmarkAuditor),
        RuleId::ReducedMotion => Box::new(MotionAuditor),
        RuleId::ViewportOverflow => Box::new(OverflowAuditor),
        RuleId::ElementOverlap => Box::new(OverlapAuditor),
    }
}
