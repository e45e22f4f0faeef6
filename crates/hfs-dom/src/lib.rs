//! HFS DOM - Document Object Model
//!
//! The live page the auditor inspects: an arena DOM tree carrying
//! author styles and layout boxes, plus the `window` object whose
//! viewport the device emulation rewrites.

mod node;
mod tree;
mod document;
mod geometry;
mod element_ref;
pub mod window;

pub use node::{Node, NodeData, ElementData, Attribute, StyleDeclaration};
pub use tree::{DomTree, Children, Descendants, Ancestors};
pub use document::Document;
pub use geometry::DOMRect;
pub use element_ref::ElementRef;
pub use window::{Window, ResizeEvent, ListenerId, EmulationClaim};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a node
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Raw arena index
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// DOM error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomError {
    #[error("window.{0} is not configurable")]
    PropertyNotConfigurable(&'static str),

    #[error("invalid viewport dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("viewport emulation already in progress")]
    EmulationInProgress,
}
