//! Trap Controller
//!
//! A small state machine bound to one container. While active it wraps Tab
//! navigation at the container boundary, pulls back focus that escapes by
//! non-keyboard means, and reports Escape to the host; activation saves
//! the previously focused element and deactivation restores it on the next
//! turn. Escape never releases the trap by itself: the trap reports the
//! intent, the host decides.

use focusbound_dom::{Document, Key, KeyEvent, ListenerId, ListenerKind, NodeId};
use tracing::{debug, warn};

use crate::director::{FirstFocusOptions, focus_first_element};
use crate::enumerate::{FocusabilityOptions, focusable_elements};
use crate::keeper::{FocusKeeper, ReturnFocusOptions};
use crate::schedule::{DeferredAction, Scheduler, TaskHandle};

/// What a key handler did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Default behavior prevented; the trap acted on the event
    Consumed,
    /// Left to native handling
    Ignored,
}

/// Trap behavior flags
#[derive(Debug, Clone, Copy)]
pub struct TrapOptions {
    /// Activate on mount
    pub active: bool,
    /// Focus the first eligible element after activation settles
    pub auto_focus: bool,
    /// Save the previously focused element on activation
    pub restore_focus: bool,
    /// Pull focus back when it arrives outside the container
    pub lock_focus: bool,
    /// Restore the saved element when the trap deactivates
    pub return_focus_on_deactivate: bool,
}

impl Default for TrapOptions {
    fn default() -> Self {
        Self {
            active: true,
            auto_focus: true,
            restore_focus: true,
            lock_focus: true,
            return_focus_on_deactivate: true,
        }
    }
}

/// Key and focus-arrival listeners held exactly for the Active state
#[derive(Debug)]
struct ListenerGuard {
    key: ListenerId,
    focus_in: ListenerId,
}

impl ListenerGuard {
    fn install(doc: &mut Document) -> Self {
        Self {
            key: doc.add_listener(ListenerKind::Key),
            focus_in: doc.add_listener(ListenerKind::FocusIn),
        }
    }

    fn release(self, doc: &mut Document) {
        doc.remove_listener(self.key);
        doc.remove_listener(self.focus_in);
    }
}

/// Focus trap bound to one container for its session's lifetime.
///
/// Each trap owns a scoped [`FocusKeeper`], so nested traps restore to
/// their own prior focus without clobbering an outer trap's saved state.
pub struct FocusTrap {
    container: NodeId,
    options: TrapOptions,
    keeper: FocusKeeper,
    active: bool,
    saved: bool,
    listeners: Option<ListenerGuard>,
    scheduler: Scheduler,
    pending_auto_focus: Option<TaskHandle>,
    pending_restore: Option<TaskHandle>,
    on_escape: Option<Box<dyn FnMut(&KeyEvent)>>,
    on_focus_restore: Option<Box<dyn FnMut()>>,
}

impl FocusTrap {
    /// Bind a trap to a container with default options
    pub fn new(container: NodeId) -> Self {
        Self::with_options(container, TrapOptions::default())
    }

    pub fn with_options(container: NodeId, options: TrapOptions) -> Self {
        Self {
            container,
            options,
            keeper: FocusKeeper::new(),
            active: false,
            saved: false,
            listeners: None,
            scheduler: Scheduler::new(),
            pending_auto_focus: None,
            pending_restore: None,
            on_escape: None,
            on_focus_restore: None,
        }
    }

    /// Callback invoked on Escape while active. The trap does not change
    /// state on Escape; closing is the host's call.
    pub fn on_escape(mut self, callback: impl FnMut(&KeyEvent) + 'static) -> Self {
        self.on_escape = Some(Box::new(callback));
        self
    }

    /// Callback fired after the deferred restore completes
    pub fn on_focus_restore(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_focus_restore = Some(Box::new(callback));
        self
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Apply the configured `active` flag: activate or deactivate to match
    /// (what a host does on mount and on every re-render).
    pub fn mount(&mut self, doc: &mut Document) {
        self.set_active(doc, self.options.active);
    }

    pub fn set_active(&mut self, doc: &mut Document, active: bool) {
        if active {
            self.activate(doc);
        } else {
            self.deactivate(doc);
        }
    }

    /// Transition Inactive -> Active. Idempotent: re-activating an active
    /// trap neither double-saves nor re-installs listeners.
    pub fn activate(&mut self, doc: &mut Document) {
        if self.active {
            return;
        }
        // A deactivate->reactivate flip within one turn voids the restore
        // scheduled by the deactivation; the saved element stays held for
        // the session's eventual real teardown.
        if let Some(handle) = self.pending_restore.take() {
            self.scheduler.cancel(handle);
        }
        if self.options.restore_focus && !self.saved {
            self.keeper.save_focus(doc);
            self.saved = true;
        }
        self.listeners = Some(ListenerGuard::install(doc));
        if self.options.auto_focus {
            self.pending_auto_focus = Some(self.scheduler.defer(DeferredAction::AutoFocus));
        }
        self.active = true;
        debug!(container = ?self.container, "focus trap activated");
    }

    /// Transition Active -> Inactive. Listeners are removed on every exit
    /// path; a pending auto-focus is voided; restore is deferred to the
    /// next turn so teardown-triggered DOM mutations resolve first.
    pub fn deactivate(&mut self, doc: &mut Document) {
        if !self.active {
            return;
        }
        if let Some(handle) = self.pending_auto_focus.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(guard) = self.listeners.take() {
            guard.release(doc);
        }
        if self.options.return_focus_on_deactivate && self.saved {
            self.pending_restore = Some(self.scheduler.defer(DeferredAction::RestoreFocus));
        }
        self.active = false;
        debug!(container = ?self.container, "focus trap deactivated");
    }

    /// Run work deferred to the host's next turn: auto-focus after
    /// activation, restore after deactivation.
    pub fn tick(&mut self, doc: &mut Document) {
        for action in self.scheduler.drain() {
            match action {
                DeferredAction::AutoFocus => {
                    self.pending_auto_focus = None;
                    if self.active {
                        self.apply_auto_focus(doc);
                    }
                }
                DeferredAction::RestoreFocus => {
                    self.pending_restore = None;
                    self.apply_restore(doc);
                }
            }
        }
    }

    /// Key handling while active. Tab wraps at the container boundary,
    /// re-enumerating on every press since the DOM may have mutated;
    /// Escape is advisory only.
    pub fn handle_key(&mut self, doc: &mut Document, event: &KeyEvent) -> EventOutcome {
        if !self.active {
            return EventOutcome::Ignored;
        }
        match event.key {
            Key::Escape => {
                if let Some(callback) = &mut self.on_escape {
                    callback(event);
                    EventOutcome::Consumed
                } else {
                    EventOutcome::Ignored
                }
            }
            Key::Tab => self.handle_tab(doc, event.shift),
            _ => EventOutcome::Ignored,
        }
    }

    fn handle_tab(&mut self, doc: &mut Document, shift: bool) -> EventOutcome {
        let tabbables = focusable_elements(
            doc,
            self.container,
            FocusabilityOptions::default().only_tabbable(true),
        );
        let Some((&first, &last)) = tabbables.first().zip(tabbables.last()) else {
            // Nothing tabbable: keep keyboard input from escaping to the
            // page body.
            self.focus_container(doc);
            return EventOutcome::Consumed;
        };

        let active = doc.active_element();
        if shift && active == Some(first) {
            self.try_focus(doc, last);
            EventOutcome::Consumed
        } else if !shift && active == Some(last) {
            self.try_focus(doc, first);
            EventOutcome::Consumed
        } else {
            EventOutcome::Ignored
        }
    }

    /// Focus-arrival handling: when focus lands outside the container (or
    /// is lost entirely), pull it back to the first eligible element.
    /// Returns whether a pullback happened.
    pub fn handle_focus_in(&mut self, doc: &mut Document) -> bool {
        if !self.active || !self.options.lock_focus {
            return false;
        }
        if let Some(active) = doc.active_element() {
            if doc.tree().contains(self.container, active) {
                return false;
            }
        }
        if focus_first_element(doc, self.container, FirstFocusOptions::default()).is_none() {
            self.focus_container(doc);
        }
        true
    }

    fn apply_auto_focus(&mut self, doc: &mut Document) {
        if focus_first_element(doc, self.container, FirstFocusOptions::default()).is_none() {
            warn!(
                container = ?self.container,
                "container has no tabbable elements; focusing the container itself"
            );
            self.focus_container(doc);
        }
    }

    /// Terminal fallback: make the container itself focusable and focus it
    /// so keyboard input is never lost to the page body.
    fn focus_container(&mut self, doc: &mut Document) {
        if doc.tree().get_attr(self.container, "tabindex").is_none() {
            if let Err(err) = doc.tree_mut().set_attr(self.container, "tabindex", "-1") {
                warn!(%err, "could not make container focusable");
                return;
            }
        }
        self.try_focus(doc, self.container);
    }

    fn try_focus(&mut self, doc: &mut Document, target: NodeId) {
        if !doc.focus(target, true) {
            warn!(?target, "trap focus attempt refused");
        }
    }

    fn apply_restore(&mut self, doc: &mut Document) {
        let restored = self.keeper.return_focus(doc, ReturnFocusOptions::default());
        self.saved = false;
        debug!(?restored, "focus restored after trap deactivation");
        if let Some(callback) = &mut self.on_focus_restore {
            callback();
        }
    }
}
