//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with `html`, `head` and `body`
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text of the first <title> in <head>
    pub fn title(&self) -> String {
        self.tree
            .elements_by_tag_name(self.head_element, "title")
            .first()
            .map(|&title| self.tree.text_content(title).trim().to_string())
            .unwrap_or_default()
    }

    /// Replace the document title
    pub fn set_title(&mut self, title: &str) {
        let existing = self.tree.elements_by_tag_name(self.head_element, "title");
        let elem = match existing.first() {
            Some(&elem) => {
                let old: Vec<NodeId> = self.tree.children(elem).map(|(id, _)| id).collect();
                for child in old {
                    self.tree.detach(child);
                }
                elem
            }
            None => {
                let elem = self.tree.create_element("title");
                self.tree.append_child(self.head_element, elem);
                elem
            }
        };
        let text = self.tree.create_text(title);
        self.tree.append_child(elem, text);
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Create an element and append it to `parent`
    pub fn create_element_in(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let elem = self.tree.create_element(tag);
        self.tree.append_child(parent, elem);
        elem
    }

    /// Append a text node to `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = self.tree.create_text(text);
        self.tree.append_child(parent, node);
        node
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffolding() {
        let doc = Document::new("https://example.test/");
        let tree = doc.tree();
        assert_eq!(tree.tag_name(doc.document_element()), Some("html"));
        assert_eq!(tree.parent(doc.body()), Some(doc.document_element()));
        assert_eq!(doc.url(), "https://example.test/");
    }

    #[test]
    fn test_set_title_replaces_text() {
        let mut doc = Document::default();
        doc.set_title("Healing");
        doc.set_title("The Healing Frequency Space");
        assert_eq!(doc.title(), "The Healing Frequency Space");
        assert_eq!(doc.tree().elements_by_tag_name(doc.head(), "title").len(), 1);
    }
}
