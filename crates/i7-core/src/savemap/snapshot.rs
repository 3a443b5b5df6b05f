use tracing::debug;

use crate::error::Result;
use crate::memory::MemoryAccessor;
use crate::memory::layout::{address, colors, save_map};
use crate::savemap::SaveMap;

/// Owned copy of the savemap and menu palette taken at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub map: Vec<u8>,
    pub colors: Vec<u8>,
}

impl MemorySnapshot {
    pub fn new(map: Vec<u8>, colors: Vec<u8>) -> Self {
        Self { map, colors }
    }

    /// Read both regions from their fixed addresses
    pub fn capture<M: MemoryAccessor>(memory: &M, process: &str) -> Result<Self> {
        let map = memory.read_bytes(process, address::SAVE_MAP, save_map::SIZE)?;
        let colors = memory.read_bytes(process, address::MENU_COLORS, colors::SIZE)?;
        debug!("Captured savemap ({} bytes) from {}", map.len(), process);
        Ok(Self { map, colors })
    }

    pub fn decode(&self) -> SaveMap {
        SaveMap::decode(self.map.clone(), Some(self.colors.as_slice()))
    }
}
