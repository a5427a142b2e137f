//! Deferred Work
//!
//! Single-threaded stand-in for the host's timer/microtask queue. The trap
//! defers auto-focus (content must finish attaching before the first
//! tabbable element is computed) and restore (teardown-triggered DOM
//! mutations must resolve first); both carry cancellation handles so a
//! deactivation can void work that has not fired yet. The host drives the
//! queue by ticking the trap on its next turn.

/// What a deferred task will do when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Place first focus inside the trap container
    AutoFocus,
    /// Restore focus to the element saved at activation
    RestoreFocus,
}

/// Handle to one scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(u64);

/// FIFO deferral queue with cancellation
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: Vec<(TaskHandle, DeferredAction)>,
    next: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an action for the next drain
    pub fn defer(&mut self, action: DeferredAction) -> TaskHandle {
        let handle = TaskHandle(self.next);
        self.next += 1;
        self.queue.push((handle, action));
        handle
    }

    /// Void a pending task. Returns whether it was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.queue.len();
        self.queue.retain(|(h, _)| *h != handle);
        self.queue.len() != before
    }

    /// Take every pending action, in schedule order
    pub fn drain(&mut self) -> Vec<DeferredAction> {
        self.queue.drain(..).map(|(_, action)| action).collect()
    }

    /// Number of pending tasks
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
