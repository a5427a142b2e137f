//! Document
//!
//! High-level document API: html/body skeleton, the active element, and
//! host-level focus semantics. A focus request on an ineligible target
//! fails silently: it returns false and leaves the active element
//! unchanged, the same contract a browser's `focus()` gives. Callers
//! verify success by re-reading the active element.

use tracing::debug;

use crate::node::Node;
use crate::selector::Selector;
use crate::tree::DomTree;
use crate::{DomError, ListenerId, ListenerKind, NodeId};

/// Document over an arena DOM tree
pub struct Document {
    tree: DomTree,
    html: NodeId,
    body: NodeId,
    active: Option<NodeId>,
    scrolled_to: Option<NodeId>,
    listeners: Vec<(ListenerId, ListenerKind)>,
    next_listener: u64,
}

impl Document {
    /// Create a document with the html/body skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let body = tree.create_element("body");
        // Skeleton construction cannot cycle
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, body);
        Self {
            tree,
            html,
            body,
            active: None,
            scrolled_to: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Get the `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.html
    }

    /// Get the `<body>` element
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Currently focused element, if any
    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    /// Last element scrolled into view by a focus call that did not
    /// suppress scrolling
    pub fn last_scroll_target(&self) -> Option<NodeId> {
        self.scrolled_to
    }

    /// Host-level focus eligibility: an attached element that is neither
    /// disabled nor hidden anywhere along its ancestor chain. This is the
    /// host's own rule; the engine layers its stricter classifier on top.
    pub fn is_host_focusable(&self, id: NodeId) -> bool {
        let Some(elem) = self.tree.element(id) else {
            return false;
        };
        if !self.tree.is_attached(id) {
            return false;
        }
        if elem.disabled() || elem.hidden() || elem.inline_style().is_hidden() {
            return false;
        }
        for ancestor in self.tree.ancestors(id) {
            if let Some(anc) = self.tree.element(ancestor) {
                if anc.hidden() || anc.inline_style().is_hidden() {
                    return false;
                }
            }
        }
        true
    }

    /// Attempt to move focus to `id`. Returns true when the element
    /// actually became the active element; an ineligible target fails
    /// silently.
    pub fn focus(&mut self, id: NodeId, prevent_scroll: bool) -> bool {
        if !self.is_host_focusable(id) {
            debug!(?id, "focus request refused by host");
            return false;
        }
        self.active = Some(id);
        if !prevent_scroll {
            self.scrolled_to = Some(id);
        }
        true
    }

    /// Clear focus
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// Detach a node; if the active element was inside the removed
    /// subtree, focus is cleared (as when a browser removes the focused
    /// element).
    pub fn remove(&mut self, id: NodeId) {
        if let Some(active) = self.active {
            if self.tree.contains(id, active) {
                self.active = None;
            }
        }
        self.tree.detach(id);
    }

    /// All descendants of `container` matching `selector`, document order.
    /// Shadow subtrees are not descended into.
    pub fn query_all(&self, container: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.tree
            .descendants(container)
            .filter(|&id| {
                self.tree
                    .get(id)
                    .and_then(Node::as_element)
                    .map(|e| selector.matches(e))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Register a listener marker
    pub fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, kind));
        id
    }

    /// Remove a listener marker; returns whether it was registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Count registered listeners of a kind
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners.iter().filter(|(_, k)| *k == kind).count()
    }

    /// Append a new element under a parent (convenience for building)
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> Result<NodeId, DomError> {
        let id = self.tree.create_element_with(tag, attrs);
        self.tree.append_child(parent, id)?;
        Ok(id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
