//! In-memory process used by unit tests.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::memory::MemoryAccessor;

/// A fake process: one contiguous mapped range starting at `base`.
pub struct MockMemory {
    process: Option<String>,
    base: u64,
    read_delay: Option<Duration>,
    data: Mutex<Vec<u8>>,
    writes: Mutex<Vec<(u64, Vec<u8>)>>,
}

impl MockMemory {
    fn check_process(&self, process: &str) -> Result<()> {
        match &self.process {
            Some(name) if !name.eq_ignore_ascii_case(process) => {
                Err(Error::ProcessNotFound(process.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn range(&self, address: u64, size: usize, len: usize) -> Option<std::ops::Range<usize>> {
        let start = usize::try_from(address.checked_sub(self.base)?).ok()?;
        let end = start.checked_add(size)?;
        (end <= len).then_some(start..end)
    }

    /// Copy of `size` bytes at `address`; panics outside the mapped range.
    pub fn slice(&self, address: u64, size: usize) -> Vec<u8> {
        let data = self.data.lock().unwrap();
        let range = self.range(address, size, data.len()).expect("address mapped");
        data[range].to_vec()
    }

    /// Every successful write, in order
    pub fn writes(&self) -> Vec<(u64, Vec<u8>)> {
        self.writes.lock().unwrap().clone()
    }
}

impl MemoryAccessor for MockMemory {
    fn read_bytes(&self, process: &str, address: u64, size: usize) -> Result<Vec<u8>> {
        self.check_process(process)?;
        if let Some(delay) = self.read_delay {
            thread::sleep(delay);
        }
        let data = self.data.lock().unwrap();
        let range = self
            .range(address, size, data.len())
            .ok_or_else(|| Error::MemoryReadFailed {
                address,
                message: format!("range of {} bytes not mapped", size),
            })?;
        Ok(data[range].to_vec())
    }

    fn write_bytes(&self, process: &str, address: u64, bytes: &[u8]) -> Result<()> {
        self.check_process(process)?;
        let mut data = self.data.lock().unwrap();
        let range = self
            .range(address, bytes.len(), data.len())
            .ok_or_else(|| Error::MemoryWriteFailed {
                address,
                message: format!("range of {} bytes not mapped", bytes.len()),
            })?;
        data[range].copy_from_slice(bytes);
        self.writes.lock().unwrap().push((address, bytes.to_vec()));
        Ok(())
    }
}

/// Builder for [`MockMemory`]
#[derive(Default)]
pub struct MockMemoryBuilder {
    process: Option<String>,
    base: u64,
    read_delay: Option<Duration>,
    data: Vec<u8>,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only answer to this process name
    pub fn process(mut self, name: &str) -> Self {
        self.process = Some(name.to_string());
        self
    }

    pub fn base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    /// Sleep before every read, widening any scan-then-write window
    pub fn read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Map `size` bytes of `fill` starting at `base`
    pub fn filled(mut self, size: usize, fill: u8) -> Self {
        self.data = vec![fill; size];
        self
    }

    /// Overwrite bytes at an absolute address inside the mapped range
    pub fn patch(mut self, address: u64, bytes: &[u8]) -> Self {
        let start = (address - self.base) as usize;
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn build(self) -> MockMemory {
        MockMemory {
            process: self.process,
            base: self.base,
            read_delay: self.read_delay,
            data: Mutex::new(self.data),
            writes: Mutex::new(Vec::new()),
        }
    }
}
