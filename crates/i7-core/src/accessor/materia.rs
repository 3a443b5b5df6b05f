use std::sync::Arc;

use tracing::{debug, info};

use crate::data::{Character, materia_name};
use crate::error::{Error, Result};
use crate::memory::layout::{address, character, materia};
use crate::memory::{MemoryAccessor, ProcessLocks};

const FREE_SLOT: [u8; materia::SLOT_SIZE] = [materia::FREE; materia::SLOT_SIZE];

/// One 4-byte materia entry: id plus 24-bit AP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MateriaSlot {
    pub materia_id: u8,
    pub experience: u32,
}

impl MateriaSlot {
    /// Experience beyond 24 bits is truncated.
    pub fn new(materia_id: u8, experience: u32) -> Self {
        Self {
            materia_id,
            experience: experience & 0x00FF_FFFF,
        }
    }

    pub fn encode(&self) -> [u8; materia::SLOT_SIZE] {
        let exp = self.experience.to_le_bytes();
        [self.materia_id, exp[0], exp[1], exp[2]]
    }

    /// `None` for a free slot
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if is_free(bytes) {
            return None;
        }
        Some(Self {
            materia_id: bytes[0],
            experience: u32::from_le_bytes([bytes[1], bytes[2], bytes[3], 0]),
        })
    }

    pub const fn empty_bytes() -> [u8; materia::SLOT_SIZE] {
        FREE_SLOT
    }
}

fn is_free(slot: &[u8]) -> bool {
    slot.iter().all(|&b| b == materia::FREE)
}

/// Allocator over the 200-slot materia inventory
pub struct MateriaAccessor<M> {
    memory: M,
    process: String,
    locks: Arc<ProcessLocks>,
}

impl<M: MemoryAccessor> MateriaAccessor<M> {
    pub fn new(memory: M, process: impl Into<String>, locks: Arc<ProcessLocks>) -> Self {
        Self {
            memory,
            process: process.into(),
            locks,
        }
    }

    /// Put materia into the first free inventory slot.
    ///
    /// Returns the written address, or `None` when the inventory is full
    /// (nothing is written and no error is raised).
    pub fn add(&self, materia_id: u8, experience: u32) -> Result<Option<u64>> {
        self.locks
            .with_lock(&self.process, || self.add_unlocked(materia_id, experience))
    }

    fn add_unlocked(&self, materia_id: u8, experience: u32) -> Result<Option<u64>> {
        let offset = self.memory.scan(
            &self.process,
            address::MATERIA,
            materia::SLOT_SIZE,
            materia::CAPACITY,
            is_free,
        )?;

        let Some(offset) = offset else {
            debug!("Materia inventory full, dropping 0x{:02X}", materia_id);
            return Ok(None);
        };

        let slot_address = address::MATERIA + offset as u64;
        let slot = MateriaSlot::new(materia_id, experience);
        self.memory
            .write_bytes(&self.process, slot_address, &slot.encode())?;
        info!(
            "Added materia {} ({} AP) at 0x{:X}",
            materia_name(materia_id).unwrap_or("?"),
            slot.experience,
            slot_address
        );
        Ok(Some(slot_address))
    }

    /// Clear every occupied inventory slot. Returns how many were cleared.
    pub fn remove_all(&self) -> Result<usize> {
        self.locks.with_lock(&self.process, || {
            let mut next = 0usize;
            let mut cleared = 0usize;

            while next < materia::CAPACITY {
                let start = address::MATERIA + (next * materia::SLOT_SIZE) as u64;
                let found = self.memory.scan(
                    &self.process,
                    start,
                    materia::SLOT_SIZE,
                    materia::CAPACITY - next,
                    |slot| !is_free(slot),
                )?;
                let Some(offset) = found else {
                    break;
                };

                let index = next + offset / materia::SLOT_SIZE;
                let slot_address = address::MATERIA + (index * materia::SLOT_SIZE) as u64;
                self.memory
                    .write_bytes(&self.process, slot_address, &FREE_SLOT)?;
                cleared += 1;
                next = index + 1;
            }

            info!("Cleared {} materia slots", cleared);
            Ok(cleared)
        })
    }

    /// Move materia socketed in `who`'s weapon back into the inventory
    pub fn remove_weapon_materia(&self, who: Character) -> Result<usize> {
        self.unsocket(who, character::WEAPON_MATERIA)
    }

    /// Move materia socketed in `who`'s armor back into the inventory
    pub fn remove_armor_materia(&self, who: Character) -> Result<usize> {
        self.unsocket(who, character::ARMOR_MATERIA)
    }

    fn unsocket(&self, who: Character, field: usize) -> Result<usize> {
        let record = who
            .record_address()
            .ok_or_else(|| Error::UnknownIdentity(who.to_string()))?;
        let sockets = record + field as u64;

        self.locks.with_lock(&self.process, || {
            let bytes = self.memory.read_bytes(
                &self.process,
                sockets,
                character::MATERIA_SLOTS * materia::SLOT_SIZE,
            )?;

            let mut moved = 0usize;
            for (index, raw) in bytes.chunks_exact(materia::SLOT_SIZE).enumerate() {
                let Some(slot) = MateriaSlot::decode(raw) else {
                    continue;
                };
                // Stays socketed when the inventory has no room
                if self.add_unlocked(slot.materia_id, slot.experience)?.is_none() {
                    continue;
                }
                let socket = sockets + (index * materia::SLOT_SIZE) as u64;
                self.memory.write_bytes(&self.process, socket, &FREE_SLOT)?;
                moved += 1;
            }

            if moved > 0 {
                info!("Returned {} materia from {} to inventory", moved, who);
            }
            Ok(moved)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MockMemory, MockMemoryBuilder};
    use std::collections::HashSet;
    use std::thread;
    use std::time::Duration;

    const PROCESS: &str = "ff7.exe";

    fn slot_address(index: usize) -> u64 {
        address::MATERIA + (index * materia::SLOT_SIZE) as u64
    }

    /// Empty materia inventory, nothing else mapped
    fn inventory() -> MockMemoryBuilder {
        MockMemoryBuilder::new()
            .base(address::MATERIA)
            .filled(materia::CAPACITY * materia::SLOT_SIZE, 0xFF)
    }

    fn accessor(memory: &MockMemory) -> MateriaAccessor<&MockMemory> {
        MateriaAccessor::new(memory, PROCESS, Arc::new(ProcessLocks::new()))
    }

    #[test]
    fn test_slot_encoding() {
        let slot = MateriaSlot::new(12, 4000);
        let bytes = slot.encode();
        assert_eq!(bytes, [12, 0xA0, 0x0F, 0x00]);
        assert_eq!(MateriaSlot::decode(&bytes), Some(slot));
        assert_eq!(MateriaSlot::empty_bytes(), [0xFF; 4]);
        assert_eq!(MateriaSlot::decode(&[0xFF; 4]), None);
    }

    #[test]
    fn test_slot_experience_truncated_to_24_bits() {
        assert_eq!(MateriaSlot::new(1, 0x1234_5678).experience, 0x34_5678);
    }

    #[test]
    fn test_add_uses_first_free_slot() {
        let memory = inventory()
            .patch(slot_address(0), &[0x31, 0, 0, 0])
            .patch(slot_address(1), &[0x32, 0, 0, 0])
            .build();

        let written = accessor(&memory).add(0x59, 500).unwrap();
        assert_eq!(written, Some(slot_address(2)));
        assert_eq!(memory.slice(slot_address(2), 4), vec![0x59, 0xF4, 0x01, 0x00]);
    }

    #[test]
    fn test_add_when_full_is_silent_noop() {
        let memory = inventory()
            .filled(materia::CAPACITY * materia::SLOT_SIZE, 0x00)
            .build();

        assert_eq!(accessor(&memory).add(0x31, 0).unwrap(), None);
        assert!(memory.writes().is_empty());
    }

    #[test]
    fn test_remove_all_clears_exactly_occupied_slots() {
        let occupied = [3usize, 50, 199];
        let mut builder = inventory();
        for &index in &occupied {
            builder = builder.patch(slot_address(index), &[index as u8, 1, 2, 3]);
        }
        let memory = builder.build();

        let cleared = accessor(&memory).remove_all().unwrap();
        assert_eq!(cleared, 3);

        let writes: Vec<u64> = memory.writes().into_iter().map(|(addr, _)| addr).collect();
        assert_eq!(
            writes,
            occupied.iter().map(|&i| slot_address(i)).collect::<Vec<_>>()
        );
        assert!(
            memory
                .slice(address::MATERIA, materia::CAPACITY * materia::SLOT_SIZE)
                .iter()
                .all(|&b| b == 0xFF)
        );
    }

    #[test]
    fn test_remove_all_never_reads_past_inventory() {
        // Only the inventory is mapped, so any read beyond it would fail
        let memory = inventory().patch(slot_address(199), &[0x10, 0, 0, 0]).build();
        assert_eq!(accessor(&memory).remove_all().unwrap(), 1);
    }

    #[test]
    fn test_remove_all_on_empty_inventory() {
        let memory = inventory().build();
        assert_eq!(accessor(&memory).remove_all().unwrap(), 0);
        assert!(memory.writes().is_empty());
    }

    #[test]
    fn test_remove_weapon_materia_returns_to_inventory() {
        // Map from Cloud's record through the end of the materia inventory
        let cloud = Character::Cloud.record_address().unwrap();
        let end = address::MATERIA + (materia::CAPACITY * materia::SLOT_SIZE) as u64;
        let sockets = cloud + character::WEAPON_MATERIA as u64;
        let memory = MockMemoryBuilder::new()
            .base(cloud)
            .filled((end - cloud) as usize, 0xFF)
            .patch(sockets, &[0x31, 0x10, 0x00, 0x00])
            .patch(sockets + 8, &[0x49, 0x00, 0x01, 0x00])
            .build();

        let moved = accessor(&memory).remove_weapon_materia(Character::Cloud).unwrap();
        assert_eq!(moved, 2);
        assert_eq!(memory.slice(sockets, 32), vec![0xFF; 32]);
        assert_eq!(memory.slice(slot_address(0), 4), vec![0x31, 0x10, 0x00, 0x00]);
        assert_eq!(memory.slice(slot_address(1), 4), vec![0x49, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn test_remove_armor_materia_unknown_character() {
        let memory = inventory().build();
        assert!(matches!(
            accessor(&memory).remove_armor_materia(Character::Chocobo),
            Err(Error::UnknownIdentity(_))
        ));
    }

    #[test]
    fn test_concurrent_adds_take_distinct_slots() {
        let memory = inventory().read_delay(Duration::from_millis(10)).build();
        let locks = Arc::new(ProcessLocks::new());

        let written: Vec<u64> = thread::scope(|scope| {
            let handles: Vec<_> = (0..6u8)
                .map(|id| {
                    let accessor = MateriaAccessor::new(&memory, PROCESS, Arc::clone(&locks));
                    scope.spawn(move || accessor.add(0x31 + id, 0).unwrap().unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let distinct: HashSet<u64> = written.iter().copied().collect();
        assert_eq!(distinct.len(), 6);
        assert!((0..6).all(|index| distinct.contains(&slot_address(index))));
    }
}
