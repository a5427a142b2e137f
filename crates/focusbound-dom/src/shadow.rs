//! Shadow DOM
//!
//! Shadow root mode and host bookkeeping. A shadow subtree lives under a
//! dedicated `NodeData::ShadowRoot` arena node whose parent link points at
//! the host element, so ancestor walks cross the boundary toward the
//! document while plain child traversal never descends into it.

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

impl ShadowRootMode {
    /// Open roots are traversable from outside the host; closed roots are
    /// opaque.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}
