//! ARIA Support
//!
//! Explicit `role` attributes and the implicit roles HTML elements carry.

use hfs_dom::{DomTree, NodeId};

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    // Landmark roles
    Banner,
    Complementary,
    ContentInfo,
    Form,
    Main,
    Navigation,
    Region,
    Search,

    // Widget roles
    Button,
    Checkbox,
    ComboBox,
    Link,
    ListBox,
    MenuItem,
    Radio,
    Slider,
    SpinButton,
    Switch,
    Tab,
    TextBox,

    // Document structure
    Article,
    Heading,
    Img,
    List,
    ListItem,
    Presentation,
    Generic,
}

impl AriaRole {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "banner" => Self::Banner,
            "complementary" => Self::Complementary,
            "contentinfo" => Self::ContentInfo,
            "form" => Self::Form,
            "main" => Self::Main,
            "navigation" => Self::Navigation,
            "region" => Self::Region,
            "search" => Self::Search,
            "button" => Self::Button,
            "checkbox" => Self::Checkbox,
            "combobox" => Self::ComboBox,
            "link" => Self::Link,
            "listbox" => Self::ListBox,
            "menuitem" => Self::MenuItem,
            "radio" => Self::Radio,
            "slider" => Self::Slider,
            "spinbutton" => Self::SpinButton,
            "switch" => Self::Switch,
            "tab" => Self::Tab,
            "textbox" => Self::TextBox,
            "article" => Self::Article,
            "heading" => Self::Heading,
            "img" => Self::Img,
            "list" => Self::List,
            "listitem" => Self::ListItem,
            "generic" => Self::Generic,
            "none" | "presentation" => Self::Presentation,
            _ => return None,
        })
    }

    /// Check if role is widget
    pub fn is_widget(&self) -> bool {
        matches!(self,
            Self::Button | Self::Checkbox | Self::ComboBox | Self::Link | Self::ListBox |
            Self::MenuItem | Self::Radio | Self::Slider | Self::SpinButton |
            Self::Switch | Self::Tab | Self::TextBox
        )
    }

    /// Check if role is landmark
    pub fn is_landmark(&self) -> bool {
        matches!(self,
            Self::Banner | Self::Complementary | Self::ContentInfo |
            Self::Form | Self::Main | Self::Navigation | Self::Region | Self::Search
        )
    }

    /// Role an element has without a `role` attribute
    pub fn implicit_for(tree: &DomTree, id: NodeId) -> Option<Self> {
        let tag = tree.tag_name(id)?;
        Some(match tag {
            "a" | "area" if tree.get_attribute(id, "href").is_some() => Self::Link,
            "button" => Self::Button,
            "input" => {
                let kind = tree.get_attribute(id, "type").unwrap_or("text").to_ascii_lowercase();
                match kind.as_str() {
                    "hidden" => return None,
                    "checkbox" => Self::Checkbox,
                    "radio" => Self::Radio,
                    "range" => Self::Slider,
                    "number" => Self::SpinButton,
                    "button" | "submit" | "reset" | "image" => Self::Button,
                    _ => Self::TextBox,
                }
            }
            "textarea" => Self::TextBox,
            "select" => {
                if tree.get_attribute(id, "multiple").is_some() { Self::ListBox } else { Self::ComboBox }
            }
            "nav" => Self::Navigation,
            "main" => Self::Main,
            "header" => Self::Banner,
            "footer" => Self::ContentInfo,
            "aside" => Self::Complementary,
            "form" => Self::Form,
            "section" => Self::Region,
            "search" => Self::Search,
            "article" => Self::Article,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Self::Heading,
            "img" => Self::Img,
            "ul" | "ol" => Self::List,
            "li" => Self::ListItem,
            _ => return None,
        })
    }

    /// Explicit role if recognised, else the implicit one
    pub fn of(tree: &DomTree, id: NodeId) -> Option<Self> {
        tree.get_attribute(id, "role")
            .and_then(|roles| roles.split_ascii_whitespace().find_map(Self::parse))
            .or_else(|| Self::implicit_for(tree, id))
    }
}
