//! DOM Tree (arena-based allocation)
//!
//! Nodes live in a flat arena and refer to each other by `NodeId`.
//! Traversal never follows raw pointers, so walks can be bounded by the
//! arena length as a cycle guard.

use std::collections::HashMap;

use crate::node::{ElementData, Node, NodeData, TextData};
use crate::{DomError, NodeId, ShadowRootMode};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    /// host element -> shadow root node
    shadow_hosts: HashMap<NodeId, NodeId>,
}

impl DomTree {
    /// Create a tree containing only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            shadow_hosts: HashMap::new(),
        }
    }

    /// Document root ID
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes in the arena (including detached ones)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena holds only the document root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Get element data for an element node
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Get mutable element data for an element node
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Tag name of an element node
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Get an attribute of an element node
    pub fn get_attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    /// Set an attribute on an element node
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let node = self.get_mut(id).ok_or(DomError::NodeNotFound(id))?;
        let elem = node.as_element_mut().ok_or(DomError::NotAnElement(id))?;
        elem.set_attr(name, value);
        Ok(())
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::new(NodeData::Element(ElementData::new(tag))))
    }

    /// Create a detached element node with initial attributes
    pub fn create_element_with(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut elem = ElementData::new(tag);
        for (name, value) in attrs {
            elem.set_attr(name, value);
        }
        self.push(Node::new(NodeData::Element(elem)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Text(TextData {
            content: content.to_string(),
        })))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent`. Detaches the child
    /// from any previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.get(parent).is_none() {
            return Err(DomError::NodeNotFound(parent));
        }
        if self.get(child).is_none() {
            return Err(DomError::NodeNotFound(child));
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(DomError::WouldCreateCycle { parent, child });
        }

        self.detach(child);

        let old_last = self.nodes[parent.0 as usize].last_child;
        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = parent;
            node.prev_sibling = old_last;
        }
        if old_last.is_valid() {
            self.nodes[old_last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;
        Ok(())
    }

    /// Unlink a node from its parent and siblings. The subtree below it
    /// stays intact; the node remains in the arena, detached.
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else if parent.is_valid() {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else if parent.is_valid() {
            self.nodes[parent.0 as usize].last_child = prev;
        }

        let node = &mut self.nodes[id.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Attach a shadow root to a host element. Returns the shadow root
    /// node; children appended under it form the shadow subtree.
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowRootMode) -> Result<NodeId, DomError> {
        let node = self.get(host).ok_or(DomError::NodeNotFound(host))?;
        if !node.is_element() {
            return Err(DomError::NotAnElement(host));
        }
        if self.shadow_hosts.contains_key(&host) {
            return Err(DomError::ShadowAlreadyAttached(host));
        }
        let root = self.push(Node::new(NodeData::ShadowRoot { host, mode }));
        // Parent link crosses the shadow boundary host-ward; the host's
        // child list does not include the shadow root.
        self.nodes[root.0 as usize].parent = host;
        self.shadow_hosts.insert(host, root);
        Ok(root)
    }

    /// Shadow root node and mode for a host element, if one is attached
    pub fn shadow_root(&self, host: NodeId) -> Option<(NodeId, ShadowRootMode)> {
        let root = *self.shadow_hosts.get(&host)?;
        match self.get(root)?.data {
            NodeData::ShadowRoot { mode, .. } => Some((root, mode)),
            _ => None,
        }
    }

    /// Iterate over direct children, in document order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// Iterate over the subtree below `id` in pre-order, excluding `id`
    /// itself. Does not descend into shadow roots; that traversal is the
    /// caller's explicit choice via [`DomTree::shadow_root`].
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.get(id) {
            let mut child = node.last_child;
            while child.is_valid() {
                stack.push(child);
                child = self.nodes[child.0 as usize].prev_sibling;
            }
        }
        Descendants { tree: self, stack }
    }

    /// Iterate over ancestors following parent links, nearest first.
    /// Crosses shadow boundaries toward the document (a shadow root's
    /// parent is its host). Bounded by arena size against cycles.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).map(|n| n.parent).unwrap_or(NodeId::NONE),
            remaining: self.nodes.len(),
        }
    }

    /// Check whether `id` is `container` or lies inside it (crossing
    /// shadow boundaries host-ward)
    pub fn contains(&self, container: NodeId, id: NodeId) -> bool {
        id == container || self.ancestors(id).any(|a| a == container)
    }

    /// Check whether a node is connected to the document root
    pub fn is_attached(&self, id: NodeId) -> bool {
        if id == NodeId::ROOT {
            return true;
        }
        self.ancestors(id).any(|a| a == NodeId::ROOT)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        self.next = self.tree.get(id)?.next_sibling;
        Some(id)
    }
}

/// Pre-order subtree iterator
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Some(node) = self.tree.get(id) {
            let mut child = node.last_child;
            while child.is_valid() {
                self.stack.push(child);
                child = self.tree.get(child)?.prev_sibling;
            }
        }
        Some(id)
    }
}

/// Ancestor chain iterator, bounded against cycles
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let id = self.next;
        self.next = self.tree.get(id)?.parent;
        Some(id)
    }
}
