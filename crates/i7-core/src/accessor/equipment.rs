use std::sync::Arc;

use tracing::{debug, info};

use crate::data::{Character, EquipId, EquipmentKind};
use crate::error::{Error, Result};
use crate::memory::layout::character;
use crate::memory::{MemoryAccessor, ProcessLocks};

/// Reads and writes the equip-id bytes of character records.
///
/// Ids are written as given; checking them against the catalog is the
/// caller's job.
pub struct EquipmentAccessor<M> {
    memory: M,
    process: String,
    locks: Arc<ProcessLocks>,
}

impl<M: MemoryAccessor> EquipmentAccessor<M> {
    pub fn new(memory: M, process: impl Into<String>, locks: Arc<ProcessLocks>) -> Self {
        Self {
            memory,
            process: process.into(),
            locks,
        }
    }

    fn field_address(who: Character, kind: EquipmentKind) -> Result<u64> {
        let record = who
            .record_address()
            .ok_or_else(|| Error::UnknownIdentity(who.to_string()))?;
        let field = match kind {
            EquipmentKind::Weapon => character::WEAPON,
            EquipmentKind::Armlet => character::ARMOR,
            EquipmentKind::Accessory => character::ACCESSORY,
        };
        Ok(record + field as u64)
    }

    pub fn equipped(&self, who: Character, kind: EquipmentKind) -> Result<EquipId> {
        let address = Self::field_address(who, kind)?;
        self.memory.read_u8(&self.process, address).map(EquipId)
    }

    pub fn set_equipped(&self, who: Character, kind: EquipmentKind, id: EquipId) -> Result<()> {
        let address = Self::field_address(who, kind)?;
        self.memory.write_u8(&self.process, address, id.0)?;
        info!("Set {} {} to {}", who, kind, id);
        Ok(())
    }

    /// Swap in `id` unless it is already equipped.
    ///
    /// Returns the id that was replaced, or `None` when nothing was written.
    /// The read and the write happen under the process lock, so concurrent
    /// swaps on one character each see the previous one's result.
    pub fn replace_equipped(
        &self,
        who: Character,
        kind: EquipmentKind,
        id: EquipId,
    ) -> Result<Option<EquipId>> {
        let address = Self::field_address(who, kind)?;
        self.locks.with_lock(&self.process, || {
            let existing = EquipId(self.memory.read_u8(&self.process, address)?);
            if existing == id {
                debug!("{} already has {} {}", who, kind, id);
                return Ok(None);
            }
            self.memory.write_u8(&self.process, address, id.0)?;
            info!("Replaced {} {} {} with {}", who, kind, existing, id);
            Ok(Some(existing))
        })
    }

    pub fn weapon(&self, who: Character) -> Result<EquipId> {
        self.equipped(who, EquipmentKind::Weapon)
    }

    pub fn set_weapon(&self, who: Character, id: EquipId) -> Result<()> {
        self.set_equipped(who, EquipmentKind::Weapon, id)
    }

    pub fn armlet(&self, who: Character) -> Result<EquipId> {
        self.equipped(who, EquipmentKind::Armlet)
    }

    pub fn set_armlet(&self, who: Character, id: EquipId) -> Result<()> {
        self.set_equipped(who, EquipmentKind::Armlet, id)
    }

    pub fn accessory(&self, who: Character) -> Result<EquipId> {
        self.equipped(who, EquipmentKind::Accessory)
    }

    pub fn set_accessory(&self, who: Character, id: EquipId) -> Result<()> {
        self.set_equipped(who, EquipmentKind::Accessory, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockMemoryBuilder;
    use crate::memory::layout::address;
    use std::thread;
    use std::time::Duration;

    const PROCESS: &str = "ff7.exe";

    fn records() -> MockMemoryBuilder {
        MockMemoryBuilder::new()
            .base(address::CHARACTER_RECORDS)
            .filled(9 * character::SIZE, 0)
    }

    #[test]
    fn test_weapon_round_trip_per_character() {
        let memory = records().build();
        let equipment = EquipmentAccessor::new(&memory, PROCESS, Arc::new(ProcessLocks::new()));

        equipment.set_weapon(Character::Barret, EquipId(0x2F)).unwrap();
        assert_eq!(equipment.weapon(Character::Barret).unwrap(), EquipId(0x2F));
        assert_eq!(equipment.weapon(Character::Cloud).unwrap(), EquipId(0));

        let barret = Character::Barret.record_address().unwrap();
        assert_eq!(
            memory.writes(),
            vec![(barret + character::WEAPON as u64, vec![0x2F])]
        );
    }

    #[test]
    fn test_armlet_and_accessory_fields() {
        let memory = records().build();
        let equipment = EquipmentAccessor::new(&memory, PROCESS, Arc::new(ProcessLocks::new()));
        equipment.set_armlet(Character::Cid, EquipId(0x1D)).unwrap();
        equipment.set_accessory(Character::Cid, EquipId(0x12)).unwrap();

        let cid = Character::Cid.record_address().unwrap();
        assert_eq!(memory.slice(cid + character::ARMOR as u64, 2), vec![0x1D, 0x12]);
        assert_eq!(equipment.armlet(Character::Cid).unwrap(), EquipId(0x1D));
        assert_eq!(equipment.accessory(Character::Cid).unwrap(), EquipId(0x12));
    }

    #[test]
    fn test_shared_record_slots() {
        let memory = records().build();
        let equipment = EquipmentAccessor::new(&memory, PROCESS, Arc::new(ProcessLocks::new()));
        equipment.set_weapon(Character::Sephiroth, EquipId(0x7F)).unwrap();
        assert_eq!(equipment.weapon(Character::Vincent).unwrap(), EquipId(0x7F));
    }

    #[test]
    fn test_character_without_record() {
        let memory = records().build();
        let equipment = EquipmentAccessor::new(&memory, PROCESS, Arc::new(ProcessLocks::new()));
        assert!(matches!(
            equipment.weapon(Character::Chocobo),
            Err(Error::UnknownIdentity(_))
        ));
    }

    #[test]
    fn test_replace_equipped_reports_previous() {
        let memory = records().build();
        let equipment = EquipmentAccessor::new(&memory, PROCESS, Arc::new(ProcessLocks::new()));

        let replaced = equipment
            .replace_equipped(Character::Tifa, EquipmentKind::Weapon, EquipId(0x10))
            .unwrap();
        assert_eq!(replaced, Some(EquipId(0)));

        let again = equipment
            .replace_equipped(Character::Tifa, EquipmentKind::Weapon, EquipId(0x10))
            .unwrap();
        assert_eq!(again, None);
        assert_eq!(memory.writes().len(), 1);
    }

    #[test]
    fn test_concurrent_replacements_chain() {
        let memory = records().read_delay(Duration::from_millis(20)).build();
        let equipment = EquipmentAccessor::new(&memory, PROCESS, Arc::new(ProcessLocks::new()));

        let mut replaced: Vec<EquipId> = thread::scope(|scope| {
            let handles: Vec<_> = [EquipId(0x0E), EquipId(0x0F)]
                .into_iter()
                .map(|id| {
                    let equipment = &equipment;
                    scope.spawn(move || {
                        equipment
                            .replace_equipped(Character::Cloud, EquipmentKind::Weapon, id)
                            .unwrap()
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        replaced.sort();

        // One swap replaced the original, the other replaced the first swap
        let last = equipment.weapon(Character::Cloud).unwrap();
        assert_eq!(replaced[0], EquipId(0));
        assert_ne!(replaced[1], EquipId(0));
        assert_ne!(replaced[1], last);
    }
}
