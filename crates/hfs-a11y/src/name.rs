//! Accessible name computation
//!
//! Simplified accname: the first non-empty source in priority order
//! 1. aria-labelledby
//! 2. aria-label
//! 3. associated <label>
//! 4. alt / input value (for elements that use them)
//! 5. title
//! 6. text content

use hfs_dom::{DomTree, NodeId};

/// Where a name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    LabelledBy,
    AriaLabel,
    Label,
    Alt,
    Value,
    Title,
    Content,
    None,
}

/// A resolved accessible name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibleName {
    pub text: String,
    pub source: NameSource,
}

impl AccessibleName {
    fn new(text: String, source: NameSource) -> Self {
        Self { text, source }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Elements a <label> can be associated with
const LABELABLE: &[&str] = &["button", "input", "meter", "output", "progress", "select", "textarea"];

/// Elements whose text content is not their name
const NO_NAME_FROM_CONTENT: &[&str] = &["input", "select", "textarea", "img"];

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(text: String, source: NameSource) -> Option<AccessibleName> {
    (!text.is_empty()).then(|| AccessibleName::new(text, source))
}

/// Compute the accessible name of `id`
pub fn accessible_name(tree: &DomTree, id: NodeId) -> AccessibleName {
    let tag = tree.tag_name(id).unwrap_or("");
    let input_type = tree
        .get_attribute(id, "type")
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let found = labelled_by(tree, id)
        .or_else(|| {
            let label = tree.get_attribute(id, "aria-label").map(collapse)?;
            non_empty(label, NameSource::AriaLabel)
        })
        .or_else(|| associated_label(tree, id, tag))
        .or_else(|| {
            let uses_alt = tag == "img" || tag == "area" || (tag == "input" && input_type == "image");
            let alt = tree.get_attribute(id, "alt").filter(|_| uses_alt).map(collapse)?;
            non_empty(alt, NameSource::Alt)
        })
        .or_else(|| {
            if tag != "input" {
                return None;
            }
            let value = tree.get_attribute(id, "value").map(collapse).unwrap_or_default();
            match input_type.as_str() {
                "button" => non_empty(value, NameSource::Value),
                "submit" if value.is_empty() => non_empty("Submit".into(), NameSource::Value),
                "reset" if value.is_empty() => non_empty("Reset".into(), NameSource::Value),
                "submit" | "reset" => non_empty(value, NameSource::Value),
                _ => None,
            }
        })
        .or_else(|| {
            let title = tree.get_attribute(id, "title").map(collapse)?;
            non_empty(title, NameSource::Title)
        })
        .or_else(|| {
            if NO_NAME_FROM_CONTENT.contains(&tag) {
                return None;
            }
            non_empty(collapse(&tree.text_content(id)), NameSource::Content)
        });

    found.unwrap_or_else(|| AccessibleName::new(String::new(), NameSource::None))
}

fn labelled_by(tree: &DomTree, id: NodeId) -> Option<AccessibleName> {
    let ids = tree.get_attribute(id, "aria-labelledby")?;
    let text = ids
        .split_ascii_whitespace()
        .filter_map(|ref_id| tree.get_element_by_id(ref_id))
        .map(|node| {
            let label = tree.get_attribute(node, "aria-label").map(collapse).unwrap_or_default();
            if label.is_empty() { collapse(&tree.text_content(node)) } else { label }
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    non_empty(text, NameSource::LabelledBy)
}

fn associated_label(tree: &DomTree, id: NodeId, tag: &str) -> Option<AccessibleName> {
    if !LABELABLE.contains(&tag) {
        return None;
    }

    let mut parts = Vec::new();
    if let Some(elem_id) = tree.element(id).and_then(|e| e.id()) {
        for label in tree.elements_by_tag_name(tree.root(), "label") {
            if tree.get_attribute(label, "for") == Some(elem_id) {
                parts.push(collapse(&tree.text_content(label)));
            }
        }
    }
    if let Some(wrapping) = tree.ancestors(id).find(|&a| tree.tag_name(a) == Some("label")) {
        parts.push(collapse(&label_text_excluding(tree, wrapping, id)));
    }

    let text = parts.into_iter().filter(|p| !p.is_empty()).collect::<Vec<_>>().join(" ");
    non_empty(text, NameSource::Label)
}

/// Text of a wrapping label without the labelled control's own text
fn label_text_excluding(tree: &DomTree, label: NodeId, control: NodeId) -> String {
    let inside_control: Vec<NodeId> = tree.descendants(control).collect();
    tree.descendants(label)
        .filter(|node| !inside_control.contains(node))
        .filter_map(|node| tree.get(node).and_then(|n| n.as_text()))
        .collect()
}
