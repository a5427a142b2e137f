//! Focusability Classifier
//!
//! Two pure predicates over a single element: can it receive focus at all,
//! and is it additionally reachable by sequential Tab navigation. The
//! second is a strict subset of the first; callers building a keyboard
//! trap pick the narrower guarantee.

use focusbound_dom::{Document, ElementData, NodeId};

/// Form control tags honoring the `disabled` attribute
const FORM_CONTROLS: &[&str] = &[
    "button", "input", "select", "textarea", "fieldset", "optgroup", "option",
];

/// Check whether an element can currently receive focus by any means
/// (script or keyboard).
///
/// Hidden state propagates down the ancestor chain: an element inside a
/// `hidden`, `display:none`, `visibility:hidden`, or `aria-hidden="true"`
/// subtree is never focusable, whatever its own markers say.
pub fn is_focusable(doc: &Document, id: NodeId) -> bool {
    let tree = doc.tree();
    let Some(elem) = tree.element(id) else {
        return false;
    };
    if !tree.is_attached(id) {
        return false;
    }
    if elem.tab_index() == Some(-1) {
        return false;
    }
    if hidden_here(elem) {
        return false;
    }
    if FORM_CONTROLS.contains(&elem.tag.as_str()) && elem.disabled() {
        return false;
    }
    for ancestor in tree.ancestors(id) {
        if let Some(anc) = tree.element(ancestor) {
            if hidden_here(anc) {
                return false;
            }
        }
    }
    if matches!(elem.tab_index(), Some(t) if t >= 0) {
        return true;
    }
    naturally_focusable(elem)
}

/// Check whether an element is reachable via sequential (Tab-key)
/// navigation. Always implies [`is_focusable`]; a negative tab index
/// keeps an element focusable programmatically but out of the Tab order.
pub fn is_tabbable(doc: &Document, id: NodeId) -> bool {
    if !is_focusable(doc, id) {
        return false;
    }
    let negative = doc
        .tree()
        .element(id)
        .and_then(ElementData::tab_index)
        .is_some_and(|t| t < 0);
    !negative
}

fn hidden_here(elem: &ElementData) -> bool {
    elem.hidden() || elem.inline_style().is_hidden() || elem.aria_hidden()
}

/// Eligibility rules for the closed set of natively focusable kinds
fn naturally_focusable(elem: &ElementData) -> bool {
    if elem.content_editable() {
        return true;
    }
    match elem.tag.as_str() {
        "a" | "area" => elem.has_attr("href"),
        "input" => elem.get_attr("type") != Some("hidden"),
        "button" | "select" | "textarea" | "summary" => true,
        "audio" | "video" => elem.has_attr("controls"),
        "details" => elem.has_attr("open"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(attrs: &[(&str, &str)], tag: &str) -> (Document, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let id = doc.append_element(body, tag, attrs).unwrap();
        (doc, id)
    }

    #[test]
    fn test_native_kinds() {
        let (doc, a) = doc_with(&[("href", "/home")], "a");
        assert!(is_focusable(&doc, a));
        assert!(is_tabbable(&doc, a));

        let (doc, a) = doc_with(&[], "a");
        assert!(!is_focusable(&doc, a));

        let (doc, input) = doc_with(&[("type", "hidden")], "input");
        assert!(!is_focusable(&doc, input));

        let (doc, video) = doc_with(&[("controls", "")], "video");
        assert!(is_focusable(&doc, video));
        let (doc, video) = doc_with(&[], "video");
        assert!(!is_focusable(&doc, video));

        let (doc, div) = doc_with(&[("contenteditable", "")], "div");
        assert!(is_focusable(&doc, div));
    }

    #[test]
    fn test_disabled_control() {
        let (doc, btn) = doc_with(&[("disabled", "")], "button");
        assert!(!is_focusable(&doc, btn));
        // `disabled` means nothing on a non-form element with a tabindex
        let (doc, div) = doc_with(&[("disabled", ""), ("tabindex", "0")], "div");
        assert!(is_focusable(&doc, div));
    }

    #[test]
    fn test_negative_tab_index() {
        let (doc, btn) = doc_with(&[("tabindex", "-1")], "button");
        assert!(!is_focusable(&doc, btn));
        assert!(!is_tabbable(&doc, btn));
    }

    #[test]
    fn test_tab_index_promotes_any_element() {
        let (doc, div) = doc_with(&[("tabindex", "0")], "div");
        assert!(is_focusable(&doc, div));
        assert!(is_tabbable(&doc, div));
        let (doc, div) = doc_with(&[], "div");
        assert!(!is_focusable(&doc, div));
    }

    #[test]
    fn test_hidden_ancestor_propagates() {
        let mut doc = Document::new();
        let body = doc.body();
        let wrap = doc
            .append_element(body, "div", &[("aria-hidden", "true")])
            .unwrap();
        let btn = doc.append_element(wrap, "button", &[]).unwrap();
        assert!(!is_focusable(&doc, btn));
    }

    #[test]
    fn test_detached_element() {
        let mut doc = Document::new();
        let loose = doc.tree_mut().create_element("button");
        assert!(!is_focusable(&doc, loose));
    }
}
