use std::sync::Arc;

use tracing::{debug, info};

use crate::data::{ItemId, item_name};
use crate::error::Result;
use crate::memory::layout::{address, inventory};
use crate::memory::{MemoryAccessor, ProcessLocks, find_item};

/// One 16-bit inventory word: 9-bit item id, 7-bit quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventorySlot {
    pub item: ItemId,
    pub quantity: u8,
}

impl InventorySlot {
    pub fn encode(&self) -> [u8; inventory::SLOT_SIZE] {
        let word = (self.item.0 & inventory::ITEM_ID_MASK)
            | ((self.quantity as u16) << inventory::QUANTITY_SHIFT);
        word.to_le_bytes()
    }

    /// `None` for a free slot
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let word = u16::from_le_bytes([bytes[0], bytes[1]]);
        if word == inventory::FREE {
            return None;
        }
        Some(Self {
            item: ItemId(word & inventory::ITEM_ID_MASK),
            quantity: (word >> inventory::QUANTITY_SHIFT) as u8,
        })
    }
}

fn holds(item: ItemId) -> impl Fn(&[u8]) -> bool {
    move |raw| InventorySlot::decode(raw).is_some_and(|slot| slot.item == item)
}

fn is_free(raw: &[u8]) -> bool {
    InventorySlot::decode(raw).is_none()
}

/// Read-modify-write access to the 320-slot item inventory
pub struct InventoryAccessor<M> {
    memory: M,
    process: String,
    locks: Arc<ProcessLocks>,
}

impl<M: MemoryAccessor> InventoryAccessor<M> {
    pub fn new(memory: M, process: impl Into<String>, locks: Arc<ProcessLocks>) -> Self {
        Self {
            memory,
            process: process.into(),
            locks,
        }
    }

    fn scan(&self, predicate: impl FnMut(&[u8]) -> bool) -> Result<Option<u64>> {
        let offset = self.memory.scan(
            &self.process,
            address::INVENTORY,
            inventory::SLOT_SIZE,
            inventory::CAPACITY,
            predicate,
        )?;
        Ok(offset.map(|offset| address::INVENTORY + offset as u64))
    }

    /// Add `quantity` of `item`, capped at 99 per stack.
    ///
    /// With `allow_stacking`, an existing stack of the item is topped up;
    /// otherwise (or if there is none) the first free slot is used. Returns
    /// the written address, or `None` when nothing was written because the
    /// inventory is full or `quantity` is zero.
    pub fn add_item(&self, item: ItemId, quantity: u8, allow_stacking: bool) -> Result<Option<u64>> {
        if quantity == 0 {
            return Ok(None);
        }

        self.locks.with_lock(&self.process, || {
            if allow_stacking && let Some(slot_address) = self.scan(holds(item))? {
                let raw = self
                    .memory
                    .read_bytes(&self.process, slot_address, inventory::SLOT_SIZE)?;
                let current = InventorySlot::decode(&raw).map_or(0, |slot| slot.quantity);
                let slot = InventorySlot {
                    item,
                    quantity: current.saturating_add(quantity).min(inventory::MAX_QUANTITY),
                };
                self.memory
                    .write_bytes(&self.process, slot_address, &slot.encode())?;
                info!(
                    "Stacked {} x{} (now {})",
                    item_name(item).unwrap_or("?"),
                    quantity,
                    slot.quantity
                );
                return Ok(Some(slot_address));
            }

            let Some(slot_address) = self.scan(is_free)? else {
                debug!("Inventory full, dropping item {}", item);
                return Ok(None);
            };
            let slot = InventorySlot {
                item,
                quantity: quantity.min(inventory::MAX_QUANTITY),
            };
            self.memory
                .write_bytes(&self.process, slot_address, &slot.encode())?;
            info!(
                "Added {} x{} at 0x{:X}",
                item_name(item).unwrap_or("?"),
                slot.quantity,
                slot_address
            );
            Ok(Some(slot_address))
        })
    }

    /// Total quantity of `item` across all stacks
    pub fn item_quantity(&self, item: ItemId) -> Result<u32> {
        let window = self.memory.read_bytes(
            &self.process,
            address::INVENTORY,
            inventory::SLOT_SIZE * inventory::CAPACITY,
        )?;
        let total = window
            .chunks_exact(inventory::SLOT_SIZE)
            .filter_map(InventorySlot::decode)
            .filter(|slot| slot.item == item)
            .map(|slot| slot.quantity as u32)
            .sum();
        Ok(total)
    }

    /// Index of the first slot holding `item`
    pub fn find_item(&self, item: ItemId) -> Result<Option<usize>> {
        let window = self.memory.read_bytes(
            &self.process,
            address::INVENTORY,
            inventory::SLOT_SIZE * inventory::CAPACITY,
        )?;
        Ok(find_item(&window, inventory::SLOT_SIZE, holds(item))
            .map(|offset| offset / inventory::SLOT_SIZE))
    }
}
