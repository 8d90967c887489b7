//! Shared, ordered record of side effects

use std::sync::{Arc, Mutex};

/// Append-only log shared between test doubles
///
/// [`MemoryFileSystem`](crate::core::fs::MemoryFileSystem) and
/// [`ScriptedRunner`](crate::core::process::ScriptedRunner) both write to it,
/// so the relative order of deletions and subprocesses can be asserted.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.into());
    }

    /// Snapshot of everything recorded so far
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
