use serde::Serialize;

use crate::data::{Character, EquipId, NOTHING_EQUIPPED};
use crate::memory::layout::character as off;
use crate::savemap::text::decode_ff_text;

/// One decoded 0x84-byte character record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterRecord {
    /// Identity the record was resolved from
    pub identity: Character,
    pub id: u8,
    /// Name as stored (the player may have renamed the character)
    pub name: String,
    pub level: u8,
    pub strength: u8,
    pub vitality: u8,
    pub magic: u8,
    pub spirit: u8,
    pub dexterity: u8,
    pub luck: u8,
    pub strength_bonus: u8,
    pub vitality_bonus: u8,
    pub magic_bonus: u8,
    pub spirit_bonus: u8,
    pub dexterity_bonus: u8,
    pub luck_bonus: u8,
    pub limit_level: u8,
    pub limit_bar: u8,
    pub weapon: EquipId,
    pub armor: EquipId,
    pub accessory: EquipId,
    pub status_flags: u8,
    pub at_front: bool,
    pub level_progress: u8,
    pub limit_mask: u16,
    pub kills: u16,
    pub limit_uses: [u16; 3],
    pub current_hp: u16,
    pub base_hp: u16,
    pub max_hp: u16,
    pub current_mp: u16,
    pub base_mp: u16,
    pub max_mp: u16,
    pub experience: u32,
    pub exp_to_next_level: u32,
    /// Materia id per weapon slot (0xFF = empty)
    pub weapon_materia: [u8; off::MATERIA_SLOTS],
    /// Materia id per armor slot (0xFF = empty)
    pub armor_materia: [u8; off::MATERIA_SLOTS],
}

impl CharacterRecord {
    /// Placeholder for a party slot with no resolvable character
    pub fn empty() -> Self {
        Self {
            identity: Character::Empty,
            id: Character::Empty.id(),
            name: String::new(),
            level: 0,
            strength: 0,
            vitality: 0,
            magic: 0,
            spirit: 0,
            dexterity: 0,
            luck: 0,
            strength_bonus: 0,
            vitality_bonus: 0,
            magic_bonus: 0,
            spirit_bonus: 0,
            dexterity_bonus: 0,
            luck_bonus: 0,
            limit_level: 0,
            limit_bar: 0,
            weapon: NOTHING_EQUIPPED,
            armor: NOTHING_EQUIPPED,
            accessory: NOTHING_EQUIPPED,
            status_flags: 0,
            at_front: false,
            level_progress: 0,
            limit_mask: 0,
            kills: 0,
            limit_uses: [0; 3],
            current_hp: 0,
            base_hp: 0,
            max_hp: 0,
            current_mp: 0,
            base_mp: 0,
            max_mp: 0,
            experience: 0,
            exp_to_next_level: 0,
            weapon_materia: [0xFF; off::MATERIA_SLOTS],
            armor_materia: [0xFF; off::MATERIA_SLOTS],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.identity == Character::Empty
    }

    /// Stored name, or the identity's default name when blank
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.identity.default_name()
        } else {
            &self.name
        }
    }

    /// Decode the record for stored id `id`.
    ///
    /// Returns `None` when the id names no character or one without a
    /// record. `map` must cover the whole savemap.
    pub(crate) fn decode(id: u8, map: &[u8]) -> Option<Self> {
        let identity = Character::from_id(id)?;
        let base = identity.record_offset()?;
        let rec = &map[base..base + off::SIZE];

        let u16_at = |at: usize| u16::from_le_bytes([rec[at], rec[at + 1]]);
        let u32_at =
            |at: usize| u32::from_le_bytes([rec[at], rec[at + 1], rec[at + 2], rec[at + 3]]);
        // Each materia slot is 4 bytes; only the id byte is kept here
        let materia = |at: usize| -> [u8; off::MATERIA_SLOTS] {
            std::array::from_fn(|slot| rec[at + slot * 4])
        };

        Some(Self {
            identity,
            id,
            name: decode_ff_text(&rec[off::NAME..off::NAME + off::NAME_LEN]),
            level: rec[off::LEVEL],
            strength: rec[off::STRENGTH],
            vitality: rec[off::VITALITY],
            magic: rec[off::MAGIC],
            spirit: rec[off::SPIRIT],
            dexterity: rec[off::DEXTERITY],
            luck: rec[off::LUCK],
            strength_bonus: rec[off::STRENGTH_BONUS],
            vitality_bonus: rec[off::VITALITY_BONUS],
            magic_bonus: rec[off::MAGIC_BONUS],
            spirit_bonus: rec[off::SPIRIT_BONUS],
            dexterity_bonus: rec[off::DEXTERITY_BONUS],
            luck_bonus: rec[off::LUCK_BONUS],
            limit_level: rec[off::LIMIT_LEVEL],
            limit_bar: rec[off::LIMIT_BAR],
            weapon: EquipId(rec[off::WEAPON]),
            armor: EquipId(rec[off::ARMOR]),
            accessory: EquipId(rec[off::ACCESSORY]),
            status_flags: rec[off::STATUS_FLAGS],
            at_front: rec[off::ROW] == 0xFF,
            level_progress: rec[off::LEVEL_PROGRESS],
            limit_mask: u16_at(off::LIMIT_BREAKS),
            kills: u16_at(off::KILLS),
            limit_uses: [
                u16_at(off::LIMIT_1_USES),
                u16_at(off::LIMIT_2_USES),
                u16_at(off::LIMIT_3_USES),
            ],
            current_hp: u16_at(off::CURRENT_HP),
            base_hp: u16_at(off::BASE_HP),
            max_hp: u16_at(off::MAX_HP),
            current_mp: u16_at(off::CURRENT_MP),
            base_mp: u16_at(off::BASE_MP),
            max_mp: u16_at(off::MAX_MP),
            experience: u32_at(off::EXPERIENCE),
            exp_to_next_level: u32_at(off::EXP_TO_NEXT_LEVEL),
            weapon_materia: materia(off::WEAPON_MATERIA),
            armor_materia: materia(off::ARMOR_MATERIA),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::layout::save_map;
    use crate::savemap::text::encode_ff_text;

    fn map_with_cloud() -> Vec<u8> {
        let mut map = vec![0u8; save_map::SIZE];
        let base = Character::Cloud.record_offset().unwrap();
        let rec = &mut map[base..base + off::SIZE];
        rec[off::LEVEL] = 7;
        rec[off::STRENGTH] = 20;
        rec[off::NAME..off::NAME + off::NAME_LEN].copy_from_slice(&encode_ff_text("Cloud", 12));
        rec[off::WEAPON] = 0x0F;
        rec[off::ROW] = 0xFF;
        rec[off::CURRENT_HP..off::CURRENT_HP + 2].copy_from_slice(&314u16.to_le_bytes());
        rec[off::EXPERIENCE..off::EXPERIENCE + 4].copy_from_slice(&70_000u32.to_le_bytes());
        rec[off::WEAPON_MATERIA] = 0x31;
        rec[off::WEAPON_MATERIA + 4] = 0xFF;
        map
    }

    #[test]
    fn test_decode_reads_fixed_offsets() {
        let map = map_with_cloud();
        let record = CharacterRecord::decode(0x00, &map).unwrap();
        assert_eq!(record.identity, Character::Cloud);
        assert_eq!(record.name, "Cloud");
        assert_eq!(record.level, 7);
        assert_eq!(record.strength, 20);
        assert_eq!(record.weapon, EquipId(0x0F));
        assert!(record.at_front);
        assert_eq!(record.current_hp, 314);
        assert_eq!(record.experience, 70_000);
        assert_eq!(record.weapon_materia[0], 0x31);
        assert_eq!(record.weapon_materia[1], 0xFF);
    }

    #[test]
    fn test_decode_unknown_or_recordless_id() {
        let map = map_with_cloud();
        assert!(CharacterRecord::decode(0x42, &map).is_none());
        assert!(CharacterRecord::decode(Character::Chocobo.id(), &map).is_none());
        assert!(CharacterRecord::decode(Character::Empty.id(), &map).is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_default() {
        let map = vec![0xFFu8; save_map::SIZE];
        let record = CharacterRecord::decode(Character::Tifa.id(), &map).unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.display_name(), "Tifa");
        assert!(CharacterRecord::empty().is_empty());
    }
}
