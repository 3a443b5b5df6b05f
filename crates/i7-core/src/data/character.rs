use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, FromRepr, IntoStaticStr};

use crate::memory::layout::{address, character};

/// Fixed roster of character identities as stored in party/record id bytes
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Character {
    #[strum(to_string = "Cloud")]
    Cloud = 0x00,
    #[strum(to_string = "Barret")]
    Barret = 0x01,
    #[strum(to_string = "Tifa")]
    Tifa = 0x02,
    #[strum(to_string = "Aeris", serialize = "aerith")]
    Aeris = 0x03,
    #[strum(
        to_string = "Red XIII",
        serialize = "redxiii",
        serialize = "red13",
        serialize = "red",
        serialize = "nanaki"
    )]
    RedXiii = 0x04,
    #[strum(to_string = "Yuffie")]
    Yuffie = 0x05,
    #[strum(to_string = "Cait Sith", serialize = "caitsith", serialize = "cait")]
    CaitSith = 0x06,
    #[strum(to_string = "Vincent")]
    Vincent = 0x07,
    #[strum(to_string = "Cid")]
    Cid = 0x08,
    #[strum(to_string = "Young Cloud", serialize = "youngcloud")]
    YoungCloud = 0x09,
    #[strum(to_string = "Sephiroth")]
    Sephiroth = 0x0A,
    #[strum(to_string = "Chocobo")]
    Chocobo = 0x0B,
    #[strum(to_string = "Empty")]
    Empty = 0xFF,
}

impl Character {
    /// Identity for a stored id byte; `None` for ids outside the roster
    pub fn from_id(id: u8) -> Option<Self> {
        Self::from_repr(id)
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn default_name(self) -> &'static str {
        self.into()
    }

    /// Parse a user-supplied name ("cloud", "Red XIII", "cait sith", ...)
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        name.parse()
            .ok()
            .or_else(|| name.replace(' ', "").parse().ok())
            .filter(|c| *c != Self::Empty)
    }

    /// Index of the 0x84-byte record this identity is stored in.
    ///
    /// Young Cloud and Sephiroth borrow the Cait Sith and Vincent records.
    pub fn record_slot(self) -> Option<usize> {
        match self {
            Self::Cloud => Some(0),
            Self::Barret => Some(1),
            Self::Tifa => Some(2),
            Self::Aeris => Some(3),
            Self::RedXiii => Some(4),
            Self::Yuffie => Some(5),
            Self::CaitSith | Self::YoungCloud => Some(6),
            Self::Vincent | Self::Sephiroth => Some(7),
            Self::Cid => Some(8),
            Self::Chocobo | Self::Empty => None,
        }
    }

    /// Record offset inside the savemap
    pub fn record_offset(self) -> Option<usize> {
        self.record_slot()
            .map(|slot| crate::memory::layout::save_map::CHARACTER_RECORDS + slot * character::SIZE)
    }

    /// Absolute address of the record in the live process
    pub fn record_address(self) -> Option<u64> {
        self.record_slot()
            .map(|slot| address::CHARACTER_RECORDS + (slot * character::SIZE) as u64)
    }
}
