//! Events and Listeners
//!
//! Keyboard event types and the document's listener registry. Dispatch is
//! host-driven (the embedder calls into the engine); registrations are
//! markers that make scoped listener acquisition observable.

/// Key identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Enter,
    Char(char),
}

/// Keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
            alt: false,
        }
    }

    pub fn tab() -> Self {
        Self::new(Key::Tab)
    }

    pub fn escape() -> Self {
        Self::new(Key::Escape)
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

/// Listener registration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    /// Keyboard events
    Key,
    /// Focus arriving at any element
    FocusIn,
}

/// Handle to one listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
