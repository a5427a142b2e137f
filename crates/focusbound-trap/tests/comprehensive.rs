//! Comprehensive tests for focusbound-trap
//!
//! End-to-end scenarios: a modal trap over a page, tab-order semantics,
//! nested traps with scoped keepers, and the advisory Escape contract.

use std::cell::Cell;
use std::rc::Rc;

use focusbound_dom::{Document, KeyEvent, NodeId, ShadowRootMode};
use focusbound_trap::{
    EventOutcome, FocusTrap, FocusabilityOptions, TrapOptions, focusable_elements,
};

fn page_with_modal(doc: &mut Document) -> (NodeId, NodeId, Vec<NodeId>) {
    let body = doc.body();
    let opener = doc
        .append_element(body, "button", &[("id", "open-settings")])
        .unwrap();
    let modal = doc
        .append_element(body, "div", &[("role", "dialog")])
        .unwrap();
    let close = doc
        .append_element(modal, "button", &[("class", "close")])
        .unwrap();
    let name = doc
        .append_element(modal, "input", &[("type", "text")])
        .unwrap();
    let save = doc
        .append_element(modal, "button", &[("type", "submit")])
        .unwrap();
    (opener, modal, vec![close, name, save])
}

#[test]
fn test_modal_session_end_to_end() {
    let mut doc = Document::new();
    let (opener, modal, controls) = page_with_modal(&mut doc);
    doc.focus(opener, true);

    let mut trap = FocusTrap::new(modal);
    trap.activate(&mut doc);
    trap.tick(&mut doc);
    assert_eq!(doc.active_element(), Some(controls[0]));

    // Forward wrap from the last control.
    doc.focus(controls[2], true);
    assert_eq!(
        trap.handle_key(&mut doc, &KeyEvent::tab()),
        EventOutcome::Consumed
    );
    assert_eq!(doc.active_element(), Some(controls[0]));

    // Backward wrap from the first control.
    assert_eq!(
        trap.handle_key(&mut doc, &KeyEvent::tab().shift()),
        EventOutcome::Consumed
    );
    assert_eq!(doc.active_element(), Some(controls[2]));

    trap.deactivate(&mut doc);
    trap.tick(&mut doc);
    assert_eq!(doc.active_element(), Some(opener));
}

#[test]
fn test_tab_reenumerates_after_dom_mutation() {
    let mut doc = Document::new();
    let (_, modal, controls) = page_with_modal(&mut doc);
    let mut trap = FocusTrap::new(modal);
    trap.activate(&mut doc);
    trap.tick(&mut doc);

    // A control disappears while the trap is active; the next Tab press
    // sees the new boundary.
    doc.remove(controls[2]);
    doc.focus(controls[1], true);
    assert_eq!(
        trap.handle_key(&mut doc, &KeyEvent::tab()),
        EventOutcome::Consumed
    );
    assert_eq!(doc.active_element(), Some(controls[0]));
}

#[test]
fn test_ordering_positive_indices_before_document_order() {
    let mut doc = Document::new();
    let body = doc.body();
    let panel = doc.append_element(body, "div", &[]).unwrap();
    // Document order with tab indices [2, implicit, 1, implicit].
    let two = doc
        .append_element(panel, "button", &[("tabindex", "2")])
        .unwrap();
    let imp_a = doc.append_element(panel, "button", &[]).unwrap();
    let one = doc
        .append_element(panel, "a", &[("href", "/x"), ("tabindex", "1")])
        .unwrap();
    let imp_b = doc
        .append_element(panel, "input", &[("type", "email")])
        .unwrap();

    let order = focusable_elements(&doc, panel, FocusabilityOptions::default());
    assert_eq!(order, vec![one, two, imp_a, imp_b]);
}

#[test]
fn test_shadow_content_participates_in_trap() {
    let mut doc = Document::new();
    let body = doc.body();
    let modal = doc.append_element(body, "div", &[]).unwrap();
    let host = doc.append_element(modal, "x-picker", &[]).unwrap();
    let root = doc
        .tree_mut()
        .attach_shadow(host, ShadowRootMode::Open)
        .unwrap();
    let inner = doc.tree_mut().create_element("button");
    doc.tree_mut().append_child(root, inner).unwrap();

    let mut trap = FocusTrap::new(modal);
    trap.activate(&mut doc);
    trap.tick(&mut doc);
    assert_eq!(doc.active_element(), Some(inner));

    // The shadow element counts as inside the container: no pullback.
    assert!(!trap.handle_focus_in(&mut doc));
}

#[test]
fn test_nested_traps_restore_to_their_own_prior_focus() {
    let mut doc = Document::new();
    let body = doc.body();
    let page_btn = doc.append_element(body, "button", &[]).unwrap();
    let outer = doc.append_element(body, "div", &[]).unwrap();
    let outer_btn = doc.append_element(outer, "button", &[]).unwrap();
    let inner = doc.append_element(body, "div", &[]).unwrap();
    let inner_btn = doc.append_element(inner, "button", &[]).unwrap();

    doc.focus(page_btn, true);
    let mut trap_outer = FocusTrap::new(outer);
    trap_outer.activate(&mut doc);
    trap_outer.tick(&mut doc);
    assert_eq!(doc.active_element(), Some(outer_btn));

    // Inner trap opens from within the outer one; each owns its keeper.
    let mut trap_inner = FocusTrap::new(inner);
    trap_inner.activate(&mut doc);
    trap_inner.tick(&mut doc);
    assert_eq!(doc.active_element(), Some(inner_btn));

    // Closing the inner trap returns to the outer trap's control, not to
    // the page's original element.
    trap_inner.deactivate(&mut doc);
    trap_inner.tick(&mut doc);
    assert_eq!(doc.active_element(), Some(outer_btn));

    trap_outer.deactivate(&mut doc);
    trap_outer.tick(&mut doc);
    assert_eq!(doc.active_element(), Some(page_btn));
}

#[test]
fn test_escape_is_advisory_only() {
    let mut doc = Document::new();
    let (_, modal, _) = page_with_modal(&mut doc);
    let count = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&count);

    let mut trap = FocusTrap::new(modal).on_escape(move |_| seen.set(seen.get() + 1));
    trap.activate(&mut doc);
    trap.tick(&mut doc);

    assert_eq!(
        trap.handle_key(&mut doc, &KeyEvent::escape()),
        EventOutcome::Consumed
    );
    assert_eq!(count.get(), 1);
    // The trap did not release itself.
    assert!(trap.is_active());

    // The host decides to close; only then does the trap wind down.
    trap.deactivate(&mut doc);
    assert!(!trap.is_active());
    assert_eq!(
        trap.handle_key(&mut doc, &KeyEvent::escape()),
        EventOutcome::Ignored
    );
    assert_eq!(count.get(), 1);
}

#[test]
fn test_restore_completion_callback_fires_after_restore() {
    let mut doc = Document::new();
    let (opener, modal, _) = page_with_modal(&mut doc);
    doc.focus(opener, true);

    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    let mut trap = FocusTrap::new(modal).on_focus_restore(move || flag.set(true));

    trap.activate(&mut doc);
    trap.tick(&mut doc);
    trap.deactivate(&mut doc);
    assert!(!fired.get()); // restore is deferred, not synchronous
    trap.tick(&mut doc);
    assert!(fired.get());
    assert_eq!(doc.active_element(), Some(opener));
}

#[test]
fn test_rerender_flips_active_flag() {
    let mut doc = Document::new();
    let (opener, modal, controls) = page_with_modal(&mut doc);
    doc.focus(opener, true);

    let mut trap = FocusTrap::with_options(modal, TrapOptions::default());
    trap.mount(&mut doc);
    trap.tick(&mut doc);
    assert_eq!(doc.active_element(), Some(controls[0]));

    // Re-render with active still true: no double save, no extra listeners.
    trap.set_active(&mut doc, true);
    trap.set_active(&mut doc, false);
    trap.tick(&mut doc);
    assert_eq!(doc.active_element(), Some(opener));
}
