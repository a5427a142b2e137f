//! Focusable Enumerator
//!
//! Collects and orders every focusable (or tabbable) element inside a
//! container, descending into open shadow roots. Candidates come from a
//! fixed allow-list pre-filter; correctness is always re-verified by the
//! classifier, never trusted from the pre-filter alone.
//!
//! Known, accepted limitations: closed shadow roots are opaque and
//! skipped, and an element made focusable purely by script heuristics
//! without matching the allow-list is not discovered.

use focusbound_dom::{Document, ElementData, NodeData, NodeId};
use tracing::{debug, warn};

use crate::classify::{is_focusable, is_tabbable};

/// Tags the pre-filter considers likely focusable
const CANDIDATE_TAGS: &[&str] = &[
    "a", "area", "audio", "button", "details", "input", "select", "summary", "textarea", "video",
];

/// Stateless enumeration options, passed by value into every query
#[derive(Debug, Clone, Copy)]
pub struct FocusabilityOptions {
    /// Keep only elements reachable by sequential Tab navigation
    pub only_tabbable: bool,
    /// Descend into open shadow roots of descendant hosts
    pub include_shadow_dom: bool,
}

impl Default for FocusabilityOptions {
    fn default() -> Self {
        Self {
            only_tabbable: false,
            include_shadow_dom: true,
        }
    }
}

impl FocusabilityOptions {
    pub fn only_tabbable(mut self, value: bool) -> Self {
        self.only_tabbable = value;
        self
    }

    pub fn include_shadow_dom(mut self, value: bool) -> Self {
        self.include_shadow_dom = value;
        self
    }
}

/// Ordered list of focusable elements within `container`.
///
/// Ordering follows native Tab semantics: elements with a positive tab
/// index come first, ascending by that index; everything with an implicit
/// or zero tab index follows in document order. An invalid or non-element
/// container yields an empty list, never an error.
pub fn focusable_elements(
    doc: &Document,
    container: NodeId,
    options: FocusabilityOptions,
) -> Vec<NodeId> {
    let Some(node) = doc.tree().get(container) else {
        warn!(?container, "focusable query against a missing container");
        return Vec::new();
    };
    if !matches!(
        node.data,
        NodeData::Element(_) | NodeData::Document | NodeData::ShadowRoot { .. }
    ) {
        warn!(?container, "focusable query against a non-element container");
        return Vec::new();
    }

    let mut candidates = Vec::new();
    collect_candidates(doc, container, options.include_shadow_dom, &mut candidates);

    let mut result: Vec<NodeId> = candidates
        .into_iter()
        .filter(|&id| {
            if options.only_tabbable {
                is_tabbable(doc, id)
            } else {
                is_focusable(doc, id)
            }
        })
        .collect();

    // Stable sort: positive tab indices first, ascending; the implicit/zero
    // bucket keeps its pre-filter relative order.
    result.sort_by_key(|&id| match tab_index_of(doc, id) {
        Some(t) if t > 0 => (0, t),
        _ => (1, 0),
    });
    result
}

fn tab_index_of(doc: &Document, id: NodeId) -> Option<i32> {
    doc.tree().element(id).and_then(ElementData::tab_index)
}

fn is_candidate(elem: &ElementData) -> bool {
    CANDIDATE_TAGS.contains(&elem.tag.as_str())
        || elem.has_attr("tabindex")
        || elem.content_editable()
}

/// Depth-first candidate collection: the light tree below `scope` first,
/// then each open shadow root of a descendant host, appended in host
/// document order.
fn collect_candidates(doc: &Document, scope: NodeId, include_shadow: bool, out: &mut Vec<NodeId>) {
    let tree = doc.tree();
    for id in tree.descendants(scope) {
        if let Some(elem) = tree.element(id) {
            if is_candidate(elem) {
                out.push(id);
            }
        }
    }
    if !include_shadow {
        return;
    }
    for id in tree.descendants(scope) {
        if let Some((root, mode)) = tree.shadow_root(id) {
            if mode.is_open() {
                collect_candidates(doc, root, include_shadow, out);
            } else {
                debug!(host = ?id, "skipping closed shadow root");
            }
        }
    }
}
