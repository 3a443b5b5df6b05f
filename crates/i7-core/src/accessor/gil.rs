use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::memory::layout::address;
use crate::memory::{MemoryAccessor, ProcessLocks};

/// The party's in-game gil counter
pub struct GilAccessor<M> {
    memory: M,
    process: String,
    locks: Arc<ProcessLocks>,
}

impl<M: MemoryAccessor> GilAccessor<M> {
    pub fn new(memory: M, process: impl Into<String>, locks: Arc<ProcessLocks>) -> Self {
        Self {
            memory,
            process: process.into(),
            locks,
        }
    }

    pub fn get(&self) -> Result<u32> {
        self.memory.read_u32(&self.process, address::GIL)
    }

    fn update(&self, f: impl FnOnce(u32) -> u32) -> Result<u32> {
        self.locks.with_lock(&self.process, || {
            let current = self.get()?;
            let updated = f(current);
            self.memory.write_u32(&self.process, address::GIL, updated)?;
            info!("Party gil {} -> {}", current, updated);
            Ok(updated)
        })
    }

    /// Returns the new total
    pub fn add(&self, amount: u32) -> Result<u32> {
        self.update(|gil| gil.saturating_add(amount))
    }

    /// Returns the new total; never goes below zero
    pub fn remove(&self, amount: u32) -> Result<u32> {
        self.update(|gil| gil.saturating_sub(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockMemoryBuilder;

    #[test]
    fn test_add_and_remove_saturate() {
        let memory = MockMemoryBuilder::new()
            .base(address::GIL)
            .data(1000u32.to_le_bytes().to_vec())
            .build();
        let gil = GilAccessor::new(&memory, "ff7.exe", Arc::new(ProcessLocks::new()));

        assert_eq!(gil.get().unwrap(), 1000);
        assert_eq!(gil.add(500).unwrap(), 1500);
        assert_eq!(gil.remove(2000).unwrap(), 0);
        assert_eq!(gil.add(u32::MAX).unwrap(), u32::MAX);
        assert_eq!(gil.add(1).unwrap(), u32::MAX);
    }
}
