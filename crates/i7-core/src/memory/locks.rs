use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One mutex per target process name.
///
/// Accessors run each logical scan+write inside [`ProcessLocks::with_lock`],
/// so two commands can never pick the same free slot. A single caller sees
/// no difference.
#[derive(Debug, Default)]
pub struct ProcessLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ProcessLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, process: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(process.to_ascii_lowercase())
            .or_default()
            .clone()
    }

    /// Run `f` while holding the lock for `process`
    pub fn with_lock<T>(&self, process: &str, f: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(process);
        // A panic inside a previous critical section leaves no state behind
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        f()
    }
}
