//! Element references for reports
//!
//! A short, printable description of a node. Never resolved back into
//! a handle: the DOM may have changed by the time anyone reads it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DomTree, NodeId};

const DOCUMENT_TAG: &str = "#document";

/// Opaque description of a DOM node (`tag`, `tag#id` or `tag.class`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl ElementRef {
    /// Reference to the document as a whole
    pub fn document() -> Self {
        Self { tag: DOCUMENT_TAG.to_string(), id: None, class: None }
    }

    /// Reference to an element that should exist but does not
    pub fn missing(tag: &str) -> Self {
        Self { tag: tag.to_string(), id: None, class: None }
    }

    /// Describe a node of `tree`
    pub fn from_node(tree: &DomTree, node: NodeId) -> Self {
        match tree.element(node) {
            Some(elem) => Self {
                tag: elem.tag_name.clone(),
                id: elem.id().map(str::to_string),
                class: elem.classes().next().map(str::to_string),
            },
            None => Self::document(),
        }
    }

    pub fn is_document(&self) -> bool {
        self.tag == DOCUMENT_TAG
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.id, &self.class) {
            (Some(id), _) => write!(f, "{}#{}", self.tag, id),
            (None, Some(class)) => write!(f, "{}.{}", self.tag, class),
            (None, None) => f.write_str(&self.tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefers_id() {
        let mut tree = DomTree::new();
        let btn = tree.create_element("button");
        tree.set_attribute(btn, "id", "book-now");
        tree.set_attribute(btn, "class", "btn btn-primary");

        let r = ElementRef::from_node(&tree, btn);
        assert_eq!(r.to_string(), "button#book-now");
        assert_eq!(r.class.as_deref(), Some("btn"));
    }

    #[test]
    fn test_display_class_then_tag() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.set_attribute(div, "class", "orb");
        let span = tree.create_element("span");

        assert_eq!(ElementRef::from_node(&tree, div).to_string(), "div.orb");
        assert_eq!(ElementRef::from_node(&tree, span).to_string(), "span");
        assert!(ElementRef::from_node(&tree, tree.root()).is_document());
    }

    #[test]
    fn test_json_omits_absent_fields() {
        let json = serde_json::to_string(&ElementRef::missing("main")).unwrap();
        assert_eq!(json, r#"{"tag":"main"}"#);
    }
}
