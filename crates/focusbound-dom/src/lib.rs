//! focusbound DOM - host tree
//!
//! Arena-based DOM-like tree the focus engine operates over: elements with
//! attributes and inline style, open/closed shadow roots, and a document
//! with an active-element notion and host-level focus semantics.

mod document;
mod events;
mod node;
mod selector;
mod shadow;
mod style;
mod tree;

pub use document::Document;
pub use events::{Key, KeyEvent, ListenerId, ListenerKind};
pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use selector::Selector;
pub use shadow::ShadowRootMode;
pub use style::{Display, InlineStyle, Visibility};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Document root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Check this is not the NONE sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}

/// Errors from host tree mutation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomError {
    #[error("node {0:?} not found in arena")]
    NodeNotFound(NodeId),

    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("node {0:?} already hosts a shadow root")]
    ShadowAlreadyAttached(NodeId),

    #[error("appending {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle { parent: NodeId, child: NodeId },
}
