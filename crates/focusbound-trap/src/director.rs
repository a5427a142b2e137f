//! First-Focus Director
//!
//! Places focus on the first eligible element inside a container, or on a
//! specific element matched by selector. Failures are absorbed and logged;
//! callers see `None`, never an error.

use focusbound_dom::{Document, NodeId, Selector};
use tracing::{debug, warn};

use crate::enumerate::{FocusabilityOptions, focusable_elements};

/// Options for first-focus placement
#[derive(Debug, Clone, Copy)]
pub struct FirstFocusOptions {
    /// Consider only tabbable elements (the default: the trap wants the
    /// element a Tab press would reach first)
    pub only_tabbable: bool,
    /// Descend into open shadow roots
    pub include_shadow_dom: bool,
    /// Suppress scroll-into-view on the focus call
    pub prevent_scroll: bool,
}

impl Default for FirstFocusOptions {
    fn default() -> Self {
        Self {
            only_tabbable: true,
            include_shadow_dom: true,
            prevent_scroll: true,
        }
    }
}

impl FirstFocusOptions {
    pub fn only_tabbable(mut self, value: bool) -> Self {
        self.only_tabbable = value;
        self
    }

    pub fn include_shadow_dom(mut self, value: bool) -> Self {
        self.include_shadow_dom = value;
        self
    }

    pub fn prevent_scroll(mut self, value: bool) -> Self {
        self.prevent_scroll = value;
        self
    }
}

/// Focus the first eligible element in `container`. Returns the element
/// on success, `None` when the container holds none or the attempt fails.
pub fn focus_first_element(
    doc: &mut Document,
    container: NodeId,
    options: FirstFocusOptions,
) -> Option<NodeId> {
    let enumeration = FocusabilityOptions {
        only_tabbable: options.only_tabbable,
        include_shadow_dom: options.include_shadow_dom,
    };
    let list = focusable_elements(doc, container, enumeration);
    let Some(&first) = list.first() else {
        debug!(?container, "no eligible element for first focus");
        return None;
    };
    if doc.focus(first, options.prevent_scroll) && doc.active_element() == Some(first) {
        Some(first)
    } else {
        warn!(?first, "first-focus attempt did not take");
        None
    }
}

/// Focus the first descendant of `container` matching `selector`,
/// unfiltered by the classifier: candidates are tried in document order
/// until one actually becomes the active element. Lets a caller target a
/// semantic element ("the submit button") regardless of Tab-order
/// position.
pub fn focus_first_by_selector(
    doc: &mut Document,
    container: NodeId,
    selector: &str,
    prevent_scroll: bool,
) -> Option<NodeId> {
    let Some(parsed) = Selector::parse(selector) else {
        warn!(selector, "unparsable selector");
        return None;
    };
    for id in doc.query_all(container, &parsed) {
        if doc.focus(id, prevent_scroll) && doc.active_element() == Some(id) {
            return Some(id);
        }
    }
    debug!(selector, "no selector match accepted focus");
    None
}
