//! Style Resolver
//!
//! Computes the value `getComputedStyle` would report for one property
//! of one element:
//! 1. The last declaration whose media condition matches wins
//! 2. Inherited properties fall back to the parent element
//! 3. Everything else falls back to its initial value

use hfs_dom::{DomTree, NodeId};

use crate::{MediaEnvironment, MediaQueryList, parse_opacity};

/// Properties that inherit by default
const INHERITED: &[&str] = &[
    "color",
    "font-size",
    "font-weight",
    "font-family",
    "font-style",
    "line-height",
    "visibility",
    "cursor",
];

/// Style resolver for one media environment
#[derive(Debug, Clone)]
pub struct StyleResolver {
    env: MediaEnvironment,
}

impl StyleResolver {
    pub fn new(env: MediaEnvironment) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &MediaEnvironment {
        &self.env
    }

    /// Whether a property inherits
    pub fn is_inherited(property: &str) -> bool {
        INHERITED.contains(&property)
    }

    /// CSS initial value, serialized the way computed styles are
    pub fn initial_value(property: &str) -> &'static str {
        match property {
            "color" => "rgb(0, 0, 0)",
            "background-color" => "rgba(0, 0, 0, 0)",
            "font-size" => "16px",
            "font-weight" => "400",
            "font-style" => "normal",
            "line-height" => "normal",
            "display" => "inline",
            "visibility" => "visible",
            "opacity" => "1",
            "animation-name" => "none",
            "animation-duration" => "0s",
            "animation-iteration-count" => "1",
            "transition-duration" => "0s",
            "width" | "height" => "auto",
            "overflow-x" | "overflow-y" | "overflow" => "visible",
            _ => "",
        }
    }

    /// Last declaration for `property` that applies in this environment
    pub fn declared_value<'a>(&self, tree: &'a DomTree, id: NodeId, property: &str) -> Option<&'a str> {
        tree.styles(id)
            .iter()
            .rev()
            .filter(|decl| decl.property == property)
            .find(|decl| self.media_matches(decl.media.as_deref()))
            .map(|decl| decl.value.as_str())
    }

    fn media_matches(&self, media: Option<&str>) -> bool {
        let Some(media) = media else { return true };
        match MediaQueryList::parse(media) {
            Ok(list) => list.evaluate(&self.env),
            Err(err) => {
                tracing::debug!("ignoring declaration under unparsable media: {err}");
                false
            }
        }
    }

    /// Computed value of `property` for element `id`
    pub fn computed_value<'a>(&self, tree: &'a DomTree, id: NodeId, property: &str) -> &'a str {
        let mut current = id;
        loop {
            let declared = self.declared_value(tree, current, property);
            let inherit = match declared {
                Some("inherit") => true,
                Some("initial") => return Self::initial_value(property),
                Some("unset") => Self::is_inherited(property),
                Some(value) => return value,
                None => Self::is_inherited(property),
            };
            if !inherit {
                return Self::initial_value(property);
            }
            match tree.parent(current).filter(|&p| tree.is_element(p)) {
                Some(parent) => current = parent,
                None => return Self::initial_value(property),
            }
        }
    }

    /// Whether the element paints: no `display: none` on it or an
    /// ancestor, not `visibility: hidden`, and no fully transparent box
    pub fn is_rendered(&self, tree: &DomTree, id: NodeId) -> bool {
        if !tree.is_element(id) {
            return false;
        }
        let chain = std::iter::once(id).chain(tree.ancestors(id)).filter(|&n| tree.is_element(n));
        for node in chain {
            if self.computed_value(tree, node, "display").eq_ignore_ascii_case("none") {
                return false;
            }
            if parse_opacity(self.computed_value(tree, node, "opacity")).is_ok_and(|o| o <= 0.0) {
                return false;
            }
        }
        !matches!(
            self.computed_value(tree, id, "visibility").to_ascii_lowercase().as_str(),
            "hidden" | "collapse"
        )
    }
}
