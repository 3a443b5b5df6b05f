use serde::Serialize;
use tracing::{debug, warn};

use crate::data::Character;
use crate::error::{Error, Result};
use crate::memory::layout::save_map as off;
use crate::savemap::colors::{MenuColors, WindowColors};
use crate::savemap::record::CharacterRecord;
use crate::savemap::text::decode_ff_text;

/// Decoded view of one savemap snapshot.
///
/// A map that fails the consistency check keeps no bytes, and every accessor
/// returns [`Error::InvalidSnapshot`].
#[derive(Debug, Clone)]
pub struct SaveMap {
    map: Option<Vec<u8>>,
    colors: MenuColors,
}

impl SaveMap {
    /// Decode `map` with an optional palette buffer.
    ///
    /// Never fails; check [`SaveMap::is_valid`]. A missing or short palette
    /// falls back to [`MenuColors::CLASSIC`].
    pub fn decode(map: Vec<u8>, colors: Option<&[u8]>) -> Self {
        let valid = Self::verify_integrity(&map);
        if !valid {
            debug!("Savemap failed consistency check ({} bytes)", map.len());
        }

        let colors = match colors.map(MenuColors::from_bytes) {
            Some(Some(colors)) => colors,
            Some(None) => {
                warn!("Menu palette too short, using classic colors");
                MenuColors::CLASSIC
            }
            None => MenuColors::CLASSIC,
        };

        Self {
            map: valid.then_some(map),
            colors,
        }
    }

    /// True if the buffer has the full savemap and all three markers
    pub fn verify_integrity(map: &[u8]) -> bool {
        map.len() >= off::SIZE
            && map[off::MARKER_PARTY_PADDING] == 0xFF
            && map[off::MARKER_LOCATION_PADDING] == 0x00
            && map[off::MARKER_STEP_PADDING] == 0x00
    }

    pub fn is_valid(&self) -> bool {
        self.map.is_some()
    }

    fn map(&self) -> Result<&[u8]> {
        self.map.as_deref().ok_or(Error::InvalidSnapshot)
    }

    fn u8_at(&self, at: usize) -> Result<u8> {
        Ok(self.map()?[at])
    }

    fn u16_at(&self, at: usize) -> Result<u16> {
        let map = self.map()?;
        Ok(u16::from_le_bytes([map[at], map[at + 1]]))
    }

    fn i16_at(&self, at: usize) -> Result<i16> {
        let map = self.map()?;
        Ok(i16::from_le_bytes([map[at], map[at + 1]]))
    }

    fn u32_at(&self, at: usize) -> Result<u32> {
        let map = self.map()?;
        Ok(u32::from_le_bytes([
            map[at],
            map[at + 1],
            map[at + 2],
            map[at + 3],
        ]))
    }

    fn text_at(&self, at: usize) -> Result<String> {
        Ok(decode_ff_text(&self.map()?[at..at + off::MAP_NAME_LEN]))
    }

    pub fn battle_points(&self) -> Result<u16> {
        self.u16_at(off::BATTLE_POINTS)
    }

    pub fn battles_fought(&self) -> Result<u16> {
        self.u16_at(off::BATTLES_FOUGHT)
    }

    pub fn escapes(&self) -> Result<u16> {
        self.u16_at(off::BATTLES_ESCAPED)
    }

    pub fn countdown_timer(&self) -> Result<u32> {
        self.u32_at(off::COUNTDOWN_SECONDS)
    }

    pub fn direction(&self) -> Result<u8> {
        self.u8_at(off::DIRECTION)
    }

    pub fn disc(&self) -> Result<u8> {
        self.u8_at(off::GAME_DISC)
    }

    /// Play clock from the field bank: `s + 60m + 3600h`
    pub fn field_total_seconds(&self) -> Result<u32> {
        let map = self.map()?;
        Ok(map[off::PLAY_TIME_SECONDS] as u32
            + map[off::PLAY_TIME_MINUTES] as u32 * 60
            + map[off::PLAY_TIME_HOURS] as u32 * 3600)
    }

    pub fn live_char_ids(&self) -> Result<[u8; 3]> {
        let map = self.map()?;
        Ok([
            map[off::PARTY_MEMBER_1],
            map[off::PARTY_MEMBER_2],
            map[off::PARTY_MEMBER_3],
        ])
    }

    pub fn live_gil(&self) -> Result<u32> {
        self.u32_at(off::GIL)
    }

    pub fn live_map_name(&self) -> Result<String> {
        self.text_at(off::CURRENT_MAP_NAME)
    }

    /// Current party; unresolvable slots become [`CharacterRecord::empty`]
    pub fn live_party(&self) -> Result<[CharacterRecord; 3]> {
        let map = self.map()?;
        let ids = self.live_char_ids()?;
        Ok(ids.map(|id| CharacterRecord::decode(id, map).unwrap_or_else(CharacterRecord::empty)))
    }

    pub fn live_total_seconds(&self) -> Result<u32> {
        self.u32_at(off::SECONDS_PLAYED)
    }

    pub fn location_id(&self) -> Result<u16> {
        self.u16_at(off::LOCATION_ID)
    }

    pub fn map_id(&self) -> Result<u16> {
        self.u16_at(off::MAP_ID)
    }

    pub fn party_gp(&self) -> Result<u16> {
        self.u16_at(off::GP)
    }

    pub fn position_x(&self) -> Result<i16> {
        self.i16_at(off::POSITION_X)
    }

    pub fn position_y(&self) -> Result<i16> {
        self.i16_at(off::POSITION_Y)
    }

    pub fn preview_gil(&self) -> Result<u32> {
        self.u32_at(off::PREVIEW_GIL)
    }

    pub fn preview_map_name(&self) -> Result<String> {
        self.text_at(off::PREVIEW_LOCATION)
    }

    /// Party shown on the save screen.
    ///
    /// An unresolvable first slot drops the whole party. An unresolvable
    /// later slot empties that slot and every slot after it.
    pub fn preview_party(&self) -> Result<Option<[CharacterRecord; 3]>> {
        let map = self.map()?;
        let decode = |at: usize| CharacterRecord::decode(map[at], map);

        let Some(first) = decode(off::PREVIEW_PARTY_1) else {
            return Ok(None);
        };
        let Some(second) = decode(off::PREVIEW_PARTY_2) else {
            return Ok(Some([first, CharacterRecord::empty(), CharacterRecord::empty()]));
        };
        let third = decode(off::PREVIEW_PARTY_3).unwrap_or_else(CharacterRecord::empty);
        Ok(Some([first, second, third]))
    }

    pub fn preview_total_seconds(&self) -> Result<u32> {
        self.u32_at(off::PREVIEW_SECONDS_PLAYED)
    }

    /// Boss HP stored as a 24-bit value
    pub fn ultimate_weapon_hp(&self) -> Result<u32> {
        let map = self.map()?;
        Ok(read_u24(&map[off::ULTIMATE_WEAPON_HP..]))
    }

    pub fn menu_colors(&self) -> Result<MenuColors> {
        self.map()?;
        Ok(self.colors)
    }

    pub fn window_colors(&self) -> Result<WindowColors> {
        self.menu_colors().map(|colors| colors.to_hex())
    }

    /// Record of any roster character, in or out of the party
    pub fn character(&self, identity: Character) -> Result<CharacterRecord> {
        CharacterRecord::decode(identity.id(), self.map()?)
            .ok_or_else(|| Error::UnknownIdentity(identity.to_string()))
    }

    /// Every derived field in one serializable value
    pub fn summary(&self) -> Result<SaveSummary> {
        Ok(SaveSummary {
            live_map_name: self.live_map_name()?,
            map_id: self.map_id()?,
            location_id: self.location_id()?,
            position_x: self.position_x()?,
            position_y: self.position_y()?,
            direction: self.direction()?,
            disc: self.disc()?,
            live_gil: self.live_gil()?,
            party_gp: self.party_gp()?,
            battle_points: self.battle_points()?,
            battles_fought: self.battles_fought()?,
            escapes: self.escapes()?,
            countdown_timer: self.countdown_timer()?,
            live_total_seconds: self.live_total_seconds()?,
            field_total_seconds: self.field_total_seconds()?,
            ultimate_weapon_hp: self.ultimate_weapon_hp()?,
            live_char_ids: self.live_char_ids()?,
            live_party: self.live_party()?,
            preview_map_name: self.preview_map_name()?,
            preview_gil: self.preview_gil()?,
            preview_total_seconds: self.preview_total_seconds()?,
            preview_party: self.preview_party()?,
            window_colors: self.window_colors()?,
        })
    }
}

/// Little-endian 24-bit value widened with a zero high byte
pub fn read_u24(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveSummary {
    pub live_map_name: String,
    pub map_id: u16,
    pub location_id: u16,
    pub position_x: i16,
    pub position_y: i16,
    pub direction: u8,
    pub disc: u8,
    pub live_gil: u32,
    pub party_gp: u16,
    pub battle_points: u16,
    pub battles_fought: u16,
    pub escapes: u16,
    pub countdown_timer: u32,
    pub live_total_seconds: u32,
    pub field_total_seconds: u32,
    pub ultimate_weapon_hp: u32,
    pub live_char_ids: [u8; 3],
    pub live_party: [CharacterRecord; 3],
    pub preview_map_name: String,
    pub preview_gil: u32,
    pub preview_total_seconds: u32,
    pub preview_party: Option<[CharacterRecord; 3]>,
    pub window_colors: WindowColors,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::layout::character;
    use crate::savemap::text::encode_ff_text;

    /// Savemap that passes the consistency check, Cloud/Tifa/Barret in party
    fn valid_map() -> Vec<u8> {
        let mut map = vec![0u8; off::SIZE];
        map[off::MARKER_PARTY_PADDING] = 0xFF;
        map[off::PARTY_MEMBER_1] = Character::Cloud.id();
        map[off::PARTY_MEMBER_2] = Character::Tifa.id();
        map[off::PARTY_MEMBER_3] = Character::Barret.id();
        map[off::PREVIEW_PARTY_1] = Character::Cloud.id();
        map[off::PREVIEW_PARTY_2] = Character::Tifa.id();
        map[off::PREVIEW_PARTY_3] = Character::Barret.id();
        map[off::GIL..off::GIL + 4].copy_from_slice(&123_456u32.to_le_bytes());
        map[off::CURRENT_MAP_NAME..off::CURRENT_MAP_NAME + 32]
            .copy_from_slice(&encode_ff_text("Sector 7 Slums", 32));
        map[off::PLAY_TIME_HOURS] = 2;
        map[off::PLAY_TIME_MINUTES] = 3;
        map[off::PLAY_TIME_SECONDS] = 4;
        map[off::POSITION_X..off::POSITION_X + 2].copy_from_slice(&(-12i16).to_le_bytes());

        let tifa = Character::Tifa.record_offset().unwrap();
        map[tifa + character::NAME..tifa + character::NAME + 12]
            .copy_from_slice(&encode_ff_text("Tifa", 12));
        map[tifa + character::LEVEL] = 9;
        map
    }

    fn palette() -> Vec<u8> {
        vec![
            0x10, 0x20, 0x30, 0x00, 0x40, 0x50, 0x60, 0x00, 0x70, 0x80, 0x90, 0x00, 0xA0, 0xB0,
            0xC0, 0x00,
        ]
    }

    #[test]
    fn test_decode_is_deterministic() {
        let map = valid_map();
        let colors = palette();
        let a = SaveMap::decode(map.clone(), Some(colors.as_slice())).summary().unwrap();
        let b = SaveMap::decode(map, Some(colors.as_slice())).summary().unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_each_marker_invalidates() {
        let edits: [(usize, u8); 3] = [
            (off::MARKER_PARTY_PADDING, 0x00),
            (off::MARKER_LOCATION_PADDING, 0x01),
            (off::MARKER_STEP_PADDING, 0x01),
        ];
        for (at, value) in edits {
            let mut map = valid_map();
            map[at] = value;
            let save = SaveMap::decode(map, None);
            assert!(!save.is_valid());
            assert!(matches!(save.live_gil(), Err(Error::InvalidSnapshot)));
            assert!(matches!(save.live_party(), Err(Error::InvalidSnapshot)));
            assert!(matches!(save.preview_party(), Err(Error::InvalidSnapshot)));
            assert!(matches!(save.window_colors(), Err(Error::InvalidSnapshot)));
            assert!(matches!(save.summary(), Err(Error::InvalidSnapshot)));
        }
    }

    #[test]
    fn test_short_buffer_is_invalid() {
        let mut map = valid_map();
        map.truncate(0xBB0);
        assert!(!SaveMap::verify_integrity(&map));
        assert!(!SaveMap::decode(map, None).is_valid());
        assert!(!SaveMap::decode(Vec::new(), None).is_valid());
    }

    #[test]
    fn test_scalar_fields() {
        let save = SaveMap::decode(valid_map(), None);
        assert!(save.is_valid());
        assert_eq!(save.live_gil().unwrap(), 123_456);
        assert_eq!(save.live_map_name().unwrap(), "Sector 7 Slums");
        assert_eq!(save.field_total_seconds().unwrap(), 4 + 3 * 60 + 2 * 3600);
        assert_eq!(save.position_x().unwrap(), -12);
        assert_eq!(save.live_char_ids().unwrap(), [0x00, 0x02, 0x01]);
    }

    #[test]
    fn test_ultimate_weapon_hp_is_24_bit() {
        let mut map = valid_map();
        map[off::ULTIMATE_WEAPON_HP..off::ULTIMATE_WEAPON_HP + 4]
            .copy_from_slice(&[0x10, 0x27, 0x00, 0xAB]);
        let save = SaveMap::decode(map, None);
        assert_eq!(save.ultimate_weapon_hp().unwrap(), 10000);
        assert_eq!(read_u24(&[0xFF, 0xFF, 0xFF, 0xFF]), 0x00FF_FFFF);
    }

    #[test]
    fn test_window_colors_hex() {
        let save = SaveMap::decode(valid_map(), Some(palette().as_slice()));
        let colors = save.window_colors().unwrap();
        assert_eq!(colors.bottom_left, "302010");
        assert_eq!(colors.bottom_right, "605040");
        assert_eq!(colors.top_left, "908070");
        assert_eq!(colors.top_right, "C0B0A0");
    }

    #[test]
    fn test_missing_or_short_palette_uses_classic() {
        let save = SaveMap::decode(valid_map(), None);
        assert_eq!(save.menu_colors().unwrap(), MenuColors::CLASSIC);

        let save = SaveMap::decode(valid_map(), Some(&[0x01u8, 0x02][..]));
        assert_eq!(save.menu_colors().unwrap(), MenuColors::CLASSIC);
    }

    #[test]
    fn test_live_party_uses_empty_placeholder() {
        let mut map = valid_map();
        map[off::PARTY_MEMBER_2] = Character::Empty.id();
        map[off::PARTY_MEMBER_3] = 0x42;
        let party = SaveMap::decode(map, None).live_party().unwrap();
        assert_eq!(party[0].identity, Character::Cloud);
        assert!(party[1].is_empty());
        assert!(party[2].is_empty());
    }

    #[test]
    fn test_preview_party_unknown_first_slot_is_absent() {
        let mut map = valid_map();
        map[off::PREVIEW_PARTY_1] = 0x42;
        let save = SaveMap::decode(map, None);
        assert_eq!(save.preview_party().unwrap(), None);
    }

    #[test]
    fn test_preview_party_unknown_second_slot_empties_rest() {
        let mut map = valid_map();
        map[off::PREVIEW_PARTY_2] = 0x42;
        let party = SaveMap::decode(map, None).preview_party().unwrap().unwrap();
        assert_eq!(party[0].identity, Character::Cloud);
        assert!(party[1].is_empty());
        // Slot 3 holds Barret but is still voided
        assert!(party[2].is_empty());
    }

    #[test]
    fn test_preview_party_unknown_third_slot() {
        let mut map = valid_map();
        map[off::PREVIEW_PARTY_3] = Character::Chocobo.id();
        let party = SaveMap::decode(map, None).preview_party().unwrap().unwrap();
        assert_eq!(party[1].name, "Tifa");
        assert_eq!(party[1].level, 9);
        assert!(party[2].is_empty());
    }

    #[test]
    fn test_character_lookup() {
        let save = SaveMap::decode(valid_map(), None);
        assert_eq!(save.character(Character::Tifa).unwrap().level, 9);
        assert!(matches!(
            save.character(Character::Chocobo),
            Err(Error::UnknownIdentity(_))
        ));
    }
}
