//! Memory layout constants for the FF7 PC savemap
//!
//! This module centralizes all memory layout constants used for reading and
//! writing game data. Offsets inside the savemap are relative to its first
//! byte (the checksum word); absolute addresses belong to the 1998 PC release.

/// Absolute process addresses
pub mod address {
    /// First byte of the in-memory savemap
    pub const SAVE_MAP: u64 = 0xDBFD38;

    /// Live menu window palette (4 corners x B,G,R,pad)
    pub const MENU_COLORS: u64 = 0x91EFD0;

    /// First character record (Cloud)
    pub const CHARACTER_RECORDS: u64 = SAVE_MAP + super::save_map::CHARACTER_RECORDS as u64;

    /// Item inventory
    pub const INVENTORY: u64 = SAVE_MAP + super::save_map::INVENTORY as u64;

    /// Materia inventory
    pub const MATERIA: u64 = SAVE_MAP + super::save_map::MATERIA as u64;

    /// Party gil
    pub const GIL: u64 = SAVE_MAP + super::save_map::GIL as u64;
}

/// Offsets inside the savemap
pub mod save_map {
    /// Total savemap size in bytes
    pub const SIZE: usize = 0x10F4;

    // Save preview block
    pub const PREVIEW_PARTY_1: usize = 0x05;
    pub const PREVIEW_PARTY_2: usize = 0x06;
    pub const PREVIEW_PARTY_3: usize = 0x07;
    pub const PREVIEW_GIL: usize = 0x20;
    pub const PREVIEW_SECONDS_PLAYED: usize = 0x24;
    pub const PREVIEW_LOCATION: usize = 0x28;

    /// Character records (9 x 0x84 bytes)
    pub const CHARACTER_RECORDS: usize = 0x54;

    // Live party
    pub const PARTY_MEMBER_1: usize = 0x4F8;
    pub const PARTY_MEMBER_2: usize = 0x4F9;
    pub const PARTY_MEMBER_3: usize = 0x4FA;

    /// Inventory (320 x 2 bytes)
    pub const INVENTORY: usize = 0x4FC;
    /// Materia inventory (200 x 4 bytes)
    pub const MATERIA: usize = 0x77C;

    pub const GIL: usize = 0xB7C;
    pub const SECONDS_PLAYED: usize = 0xB80;
    pub const COUNTDOWN_SECONDS: usize = 0xB84;
    pub const MAP_ID: usize = 0xB94;
    pub const LOCATION_ID: usize = 0xB96;
    pub const POSITION_X: usize = 0xB9A;
    pub const POSITION_Y: usize = 0xB9C;
    pub const DIRECTION: usize = 0xBA0;

    // Field bank 1
    pub const PLAY_TIME_HOURS: usize = 0xBB4;
    pub const PLAY_TIME_MINUTES: usize = 0xBB5;
    pub const PLAY_TIME_SECONDS: usize = 0xBB6;
    pub const CURRENT_MAP_NAME: usize = 0xBC0;
    pub const BATTLE_POINTS: usize = 0xC14;
    pub const BATTLES_FOUGHT: usize = 0xC1C;
    pub const BATTLES_ESCAPED: usize = 0xC1E;

    // Field banks 2-4
    pub const GP: usize = 0xCEE;
    pub const GAME_DISC: usize = 0xEA4;
    /// 24-bit boss HP
    pub const ULTIMATE_WEAPON_HP: usize = 0xF3C;

    /// Consistency markers checked before decoding
    pub const MARKER_PARTY_PADDING: usize = 0x4FB;
    pub const MARKER_LOCATION_PADDING: usize = 0xB98;
    pub const MARKER_STEP_PADDING: usize = 0xBA3;

    pub const MAP_NAME_LEN: usize = 32;
}

/// Offsets inside a 0x84-byte character record
pub mod character {
    pub const SIZE: usize = 0x84;

    pub const ID: usize = 0x00;
    pub const LEVEL: usize = 0x01;
    pub const STRENGTH: usize = 0x02;
    pub const VITALITY: usize = 0x03;
    pub const MAGIC: usize = 0x04;
    pub const SPIRIT: usize = 0x05;
    pub const DEXTERITY: usize = 0x06;
    pub const LUCK: usize = 0x07;
    pub const STRENGTH_BONUS: usize = 0x08;
    pub const VITALITY_BONUS: usize = 0x09;
    pub const MAGIC_BONUS: usize = 0x0A;
    pub const SPIRIT_BONUS: usize = 0x0B;
    pub const DEXTERITY_BONUS: usize = 0x0C;
    pub const LUCK_BONUS: usize = 0x0D;
    pub const LIMIT_LEVEL: usize = 0x0E;
    pub const LIMIT_BAR: usize = 0x0F;
    pub const NAME: usize = 0x10;
    pub const NAME_LEN: usize = 12;
    pub const WEAPON: usize = 0x1C;
    pub const ARMOR: usize = 0x1D;
    pub const ACCESSORY: usize = 0x1E;
    pub const STATUS_FLAGS: usize = 0x1F;
    /// 0xFF = front row, 0xFE = back row
    pub const ROW: usize = 0x20;
    pub const LEVEL_PROGRESS: usize = 0x21;
    pub const LIMIT_BREAKS: usize = 0x22;
    pub const KILLS: usize = 0x24;
    pub const LIMIT_1_USES: usize = 0x26;
    pub const LIMIT_2_USES: usize = 0x28;
    pub const LIMIT_3_USES: usize = 0x2A;
    pub const CURRENT_HP: usize = 0x2C;
    pub const BASE_HP: usize = 0x2E;
    pub const CURRENT_MP: usize = 0x30;
    pub const BASE_MP: usize = 0x32;
    pub const MAX_HP: usize = 0x38;
    pub const MAX_MP: usize = 0x3A;
    pub const EXPERIENCE: usize = 0x3C;
    pub const WEAPON_MATERIA: usize = 0x40;
    pub const ARMOR_MATERIA: usize = 0x60;
    pub const EXP_TO_NEXT_LEVEL: usize = 0x80;

    pub const MATERIA_SLOTS: usize = 8;
}

/// Materia inventory layout
pub mod materia {
    pub const SLOT_SIZE: usize = 4;
    pub const CAPACITY: usize = 200;
    /// Byte value every byte of a free slot holds
    pub const FREE: u8 = 0xFF;
}

/// Item inventory layout
pub mod inventory {
    pub const SLOT_SIZE: usize = 2;
    pub const CAPACITY: usize = 320;
    /// Encoded value of a free slot
    pub const FREE: u16 = 0xFFFF;
    pub const ITEM_ID_MASK: u16 = 0x01FF;
    pub const QUANTITY_SHIFT: u16 = 9;
    pub const MAX_QUANTITY: u8 = 99;
}

/// Menu palette layout (colors buffer)
pub mod colors {
    pub const SIZE: usize = 16;

    // Each corner is stored as B, G, R, pad
    pub const BOTTOM_LEFT: usize = 0x0;
    pub const BOTTOM_RIGHT: usize = 0x4;
    pub const TOP_LEFT: usize = 0x8;
    pub const TOP_RIGHT: usize = 0xC;
}
