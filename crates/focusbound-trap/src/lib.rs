//! focusbound trap - keyboard focus confinement
//!
//! The focus-trap engine: decides which elements can receive focus and
//! which are reachable by Tab ([`classify`]), enumerates them in tab order
//! within a container ([`enumerate`]), saves and restores the previously
//! focused element ([`keeper`]), places first focus ([`director`]), and
//! confines keyboard focus to a container for the lifetime of an overlay
//! ([`trap`]).
//!
//! Nothing here is a fatal error: failed focus attempts, hostile
//! containers, and missing nodes degrade to empty/`None` results with a
//! `tracing` diagnostic.

pub mod classify;
pub mod director;
pub mod enumerate;
pub mod keeper;
pub mod schedule;
pub mod trap;

pub use classify::{is_focusable, is_tabbable};
pub use director::{FirstFocusOptions, focus_first_by_selector, focus_first_element};
pub use enumerate::{FocusabilityOptions, focusable_elements};
pub use keeper::{FocusKeeper, ReturnFocusOptions, create_focus_manager, return_focus, save_focus};
pub use schedule::{DeferredAction, Scheduler, TaskHandle};
pub use trap::{EventOutcome, FocusTrap, TrapOptions};
