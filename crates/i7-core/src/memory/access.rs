use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};

/// Capability to read and write another process's memory by process name.
///
/// Every accessor in this crate receives one of these by value. Tests inject
/// [`MockMemory`](super::MockMemory) instead of a live process.
pub trait MemoryAccessor {
    /// Read exactly `size` bytes at `address`.
    ///
    /// A short read is reported as [`Error::MemoryReadFailed`].
    fn read_bytes(&self, process: &str, address: u64, size: usize) -> Result<Vec<u8>>;

    /// Replace `bytes.len()` bytes at `address`.
    ///
    /// The caller is responsible for the target range being writable and
    /// meaningful; no game structure is validated here.
    fn write_bytes(&self, process: &str, address: u64, bytes: &[u8]) -> Result<()>;

    /// Scan `item_count` fixed-size items starting at `start`.
    ///
    /// Returns the byte offset (relative to `start`) of the first item the
    /// predicate accepts, or `None` if no item in the window matches.
    fn scan<F>(
        &self,
        process: &str,
        start: u64,
        item_size: usize,
        item_count: usize,
        predicate: F,
    ) -> Result<Option<usize>>
    where
        F: FnMut(&[u8]) -> bool,
    {
        if item_size == 0 || item_count == 0 {
            return Ok(None);
        }

        let window = self.read_bytes(process, start, item_size * item_count)?;
        let offset = find_item(&window, item_size, predicate);

        debug!(
            "Scanned {} x {} bytes at 0x{:X}: {:?}",
            item_count, item_size, start, offset
        );
        Ok(offset)
    }

    fn read_u8(&self, process: &str, address: u64) -> Result<u8> {
        let bytes = self.read_bytes(process, address, 1)?;
        ensure_len(&bytes, address, 1)?;
        Ok(bytes[0])
    }

    fn read_u16(&self, process: &str, address: u64) -> Result<u16> {
        let bytes = self.read_bytes(process, address, 2)?;
        ensure_len(&bytes, address, 2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_u32(&self, process: &str, address: u64) -> Result<u32> {
        let bytes = self.read_bytes(process, address, 4)?;
        ensure_len(&bytes, address, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn write_u8(&self, process: &str, address: u64, value: u8) -> Result<()> {
        self.write_bytes(process, address, &[value])
    }

    fn write_u16(&self, process: &str, address: u64, value: u16) -> Result<()> {
        self.write_bytes(process, address, &value.to_le_bytes())
    }

    fn write_u32(&self, process: &str, address: u64, value: u32) -> Result<()> {
        self.write_bytes(process, address, &value.to_le_bytes())
    }
}

/// Forward linear search over `window` split into `item_size` chunks.
///
/// A trailing partial chunk is never offered to the predicate.
pub fn find_item<F>(window: &[u8], item_size: usize, mut predicate: F) -> Option<usize>
where
    F: FnMut(&[u8]) -> bool,
{
    if item_size == 0 {
        return None;
    }

    window
        .chunks_exact(item_size)
        .position(|item| predicate(item))
        .map(|index| index * item_size)
}

/// Verify a read returned the requested length
pub(crate) fn ensure_len(bytes: &[u8], address: u64, size: usize) -> Result<()> {
    if bytes.len() != size {
        return Err(Error::MemoryReadFailed {
            address,
            message: format!("expected {} bytes, got {}", size, bytes.len()),
        });
    }
    Ok(())
}

impl<T: MemoryAccessor> MemoryAccessor for &T {
    fn read_bytes(&self, process: &str, address: u64, size: usize) -> Result<Vec<u8>> {
        (**self).read_bytes(process, address, size)
    }

    fn write_bytes(&self, process: &str, address: u64, bytes: &[u8]) -> Result<()> {
        (**self).write_bytes(process, address, bytes)
    }
}

impl<T: MemoryAccessor> MemoryAccessor for Arc<T> {
    fn read_bytes(&self, process: &str, address: u64, size: usize) -> Result<Vec<u8>> {
        (**self).read_bytes(process, address, size)
    }

    fn write_bytes(&self, process: &str, address: u64, bytes: &[u8]) -> Result<()> {
        (**self).write_bytes(process, address, bytes)
    }
}
