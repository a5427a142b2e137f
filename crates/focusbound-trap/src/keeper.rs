//! Focus-State Keeper
//!
//! Captures the currently focused element and restores it later. All logic
//! lives on the [`FocusKeeper`] instance; the process-wide default slot is
//! a thin thread-local instance behind the [`save_focus`] /
//! [`return_focus`] free functions. Nested overlays that must not clobber
//! each other's saved element each take their own instance via
//! [`create_focus_manager`].

use std::cell::RefCell;

use focusbound_dom::{Document, NodeId};
use tracing::{debug, warn};

/// Options for a restore attempt
#[derive(Debug, Clone, Copy)]
pub struct ReturnFocusOptions {
    /// Suppress scroll-into-view on the restoring focus call
    pub prevent_scroll: bool,
    /// Element to fall back to; the document body when `None`
    pub fallback: Option<NodeId>,
}

impl Default for ReturnFocusOptions {
    fn default() -> Self {
        Self {
            prevent_scroll: true,
            fallback: None,
        }
    }
}

impl ReturnFocusOptions {
    pub fn prevent_scroll(mut self, value: bool) -> Self {
        self.prevent_scroll = value;
        self
    }

    pub fn fallback(mut self, element: NodeId) -> Self {
        self.fallback = Some(element);
        self
    }
}

/// A single saved-focus slot: set by save, consumed by restore
#[derive(Debug, Default)]
pub struct FocusKeeper {
    slot: Option<NodeId>,
}

impl FocusKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element currently held in the slot
    pub fn saved(&self) -> Option<NodeId> {
        self.slot
    }

    /// Record the document's active element into the slot and return it
    pub fn save_focus(&mut self, doc: &Document) -> Option<NodeId> {
        self.slot = doc.active_element();
        self.slot
    }

    /// Restore focus to the saved element, or to the fallback when nothing
    /// is saved or the saved element no longer takes focus. A focus call
    /// can fail silently when its target became ineligible, so success is
    /// verified by re-reading the active element. The slot is cleared
    /// whichever branch runs: at most one restore per save.
    pub fn return_focus(
        &mut self,
        doc: &mut Document,
        options: ReturnFocusOptions,
    ) -> Option<NodeId> {
        let fallback = options.fallback.unwrap_or_else(|| doc.body());
        let saved = self.slot.take();

        if let Some(target) = saved {
            if doc.focus(target, options.prevent_scroll) && doc.active_element() == Some(target) {
                return Some(target);
            }
            warn!(?target, "saved element no longer takes focus; using fallback");
        } else {
            debug!("no saved focus; using fallback");
        }

        if doc.focus(fallback, options.prevent_scroll) && doc.active_element() == Some(fallback) {
            Some(fallback)
        } else {
            warn!(?fallback, "fallback element refused focus");
            None
        }
    }
}

thread_local! {
    static DEFAULT_KEEPER: RefCell<FocusKeeper> = RefCell::new(FocusKeeper::new());
}

/// Save the active element into the process-wide default slot
pub fn save_focus(doc: &Document) -> Option<NodeId> {
    DEFAULT_KEEPER.with(|keeper| keeper.borrow_mut().save_focus(doc))
}

/// Restore from the process-wide default slot
pub fn return_focus(doc: &mut Document, options: ReturnFocusOptions) -> Option<NodeId> {
    DEFAULT_KEEPER.with(|keeper| keeper.borrow_mut().return_focus(doc, options))
}

/// An independent keeper with its own private slot and identical
/// save/restore/fallback semantics
pub fn create_focus_manager() -> FocusKeeper {
    FocusKeeper::new()
}
