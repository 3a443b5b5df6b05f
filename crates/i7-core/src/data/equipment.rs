//! Static equipment catalog.
//!
//! Every piece of equipment has three numbers in three different id spaces:
//!
//! - [`CatalogId`]: 1-based number users type in commands (per owner for weapons)
//! - [`ItemId`]: inventory item id, used for stacking in the item list
//! - [`EquipId`]: the byte stored in a character's equipped-item field
//!
//! Lookups take exactly one of these types, so a comparison across spaces
//! does not compile.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::data::Character;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EquipId(pub u8);

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:03X}", self.0)
    }
}

impl fmt::Display for EquipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// Stored in an equip field when nothing is equipped
pub const NOTHING_EQUIPPED: EquipId = EquipId(0xFF);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr, Display,
)]
#[strum(ascii_case_insensitive)]
pub enum EquipmentKind {
    #[strum(to_string = "weapon")]
    Weapon,
    #[strum(to_string = "armlet", serialize = "armor", serialize = "armour")]
    Armlet,
    #[strum(to_string = "accessory", serialize = "acc")]
    Accessory,
}

impl EquipmentKind {
    /// Offset from equip id to inventory item id
    pub const fn item_offset(self) -> u16 {
        match self {
            Self::Weapon => 128,
            Self::Armlet => 256,
            Self::Accessory => 288,
        }
    }

    pub fn item_id(self, equip_id: EquipId) -> ItemId {
        ItemId(self.item_offset() + equip_id.0 as u16)
    }
}

/// Identity numbers and display name shared by every equipment variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EquipmentInfo {
    pub name: &'static str,
    pub catalog_id: CatalogId,
    pub item_id: ItemId,
    pub equip_id: EquipId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EquipmentItem {
    Weapon { owner: Character, info: EquipmentInfo },
    Armlet(EquipmentInfo),
    Accessory(EquipmentInfo),
}

impl EquipmentItem {
    pub fn kind(&self) -> EquipmentKind {
        match self {
            Self::Weapon { .. } => EquipmentKind::Weapon,
            Self::Armlet(_) => EquipmentKind::Armlet,
            Self::Accessory(_) => EquipmentKind::Accessory,
        }
    }

    pub fn info(&self) -> &EquipmentInfo {
        match self {
            Self::Weapon { info, .. } | Self::Armlet(info) | Self::Accessory(info) => info,
        }
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn catalog_id(&self) -> CatalogId {
        self.info().catalog_id
    }

    pub fn item_id(&self) -> ItemId {
        self.info().item_id
    }

    pub fn equip_id(&self) -> EquipId {
        self.info().equip_id
    }

    /// Weapons belong to one character; armor and accessories to anyone
    pub fn owner(&self) -> Option<Character> {
        match self {
            Self::Weapon { owner, .. } => Some(*owner),
            _ => None,
        }
    }

    pub fn usable_by(&self, character: Character) -> bool {
        self.owner().is_none_or(|owner| owner == character)
    }
}

/// Immutable lookup tables built once on first use
pub struct Catalog {
    weapons: Vec<EquipmentItem>,
    armlets: Vec<EquipmentItem>,
    accessories: Vec<EquipmentItem>,
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::build);

impl Catalog {
    pub fn get() -> &'static Catalog {
        &CATALOG
    }

    fn build() -> Self {
        let weapons = WEAPON_OWNERS
            .iter()
            .flat_map(|&(owner, first, last)| {
                (first..=last).enumerate().map(move |(index, equip)| {
                    let equip_id = EquipId(equip);
                    EquipmentItem::Weapon {
                        owner,
                        info: EquipmentInfo {
                            name: WEAPON_NAMES[equip as usize],
                            catalog_id: CatalogId(index as u8 + 1),
                            item_id: EquipmentKind::Weapon.item_id(equip_id),
                            equip_id,
                        },
                    }
                })
            })
            .collect();

        let table = |kind: EquipmentKind,
                     names: &[&'static str],
                     wrap: fn(EquipmentInfo) -> EquipmentItem|
         -> Vec<EquipmentItem> {
            names
                .iter()
                .enumerate()
                .map(|(index, &name)| {
                    let equip_id = EquipId(index as u8);
                    let info = EquipmentInfo {
                        name,
                        catalog_id: CatalogId(index as u8 + 1),
                        item_id: kind.item_id(equip_id),
                        equip_id,
                    };
                    wrap(info)
                })
                .collect()
        };

        Self {
            weapons,
            armlets: table(EquipmentKind::Armlet, &ARMLET_NAMES, EquipmentItem::Armlet),
            accessories: table(
                EquipmentKind::Accessory,
                &ACCESSORY_NAMES,
                EquipmentItem::Accessory,
            ),
        }
    }

    fn items(&self, kind: EquipmentKind) -> &[EquipmentItem] {
        match kind {
            EquipmentKind::Weapon => &self.weapons,
            EquipmentKind::Armlet => &self.armlets,
            EquipmentKind::Accessory => &self.accessories,
        }
    }

    /// Everything `character` may equip in the given slot
    pub fn equippable(
        &self,
        kind: EquipmentKind,
        character: Character,
    ) -> impl Iterator<Item = &EquipmentItem> {
        self.items(kind)
            .iter()
            .filter(move |item| item.usable_by(character))
    }

    /// Lookup by the number users type (weapon numbers restart per owner)
    pub fn by_catalog_id(
        &self,
        kind: EquipmentKind,
        character: Character,
        id: CatalogId,
    ) -> Option<&EquipmentItem> {
        self.equippable(kind, character)
            .find(|item| item.catalog_id() == id)
    }

    /// Lookup by inventory item id (unique across all kinds)
    pub fn by_item_id(&self, id: ItemId) -> Option<&EquipmentItem> {
        [EquipmentKind::Weapon, EquipmentKind::Armlet, EquipmentKind::Accessory]
            .into_iter()
            .flat_map(|kind| self.items(kind))
            .find(|item| item.item_id() == id)
    }

    /// Lookup by the byte stored in a character's equip field
    pub fn by_equip_id(&self, kind: EquipmentKind, id: EquipId) -> Option<&EquipmentItem> {
        self.items(kind).iter().find(|item| item.equip_id() == id)
    }

    /// Resolve a command argument: a catalog number or an item name.
    pub fn find(
        &self,
        kind: EquipmentKind,
        character: Character,
        text: &str,
    ) -> Option<&EquipmentItem> {
        let text = text.trim();
        if let Ok(number) = text.parse::<u8>() {
            return self.by_catalog_id(kind, character, CatalogId(number));
        }

        let wanted = normalize(text);
        self.equippable(kind, character)
            .find(|item| normalize(item.name()) == wanted)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// (owner, first equip id, last equip id)
const WEAPON_OWNERS: [(Character, u8, u8); 10] = [
    (Character::Cloud, 0x00, 0x0F),
    (Character::Tifa, 0x10, 0x1F),
    (Character::Barret, 0x20, 0x2F),
    (Character::RedXiii, 0x30, 0x3D),
    (Character::Aeris, 0x3E, 0x48),
    (Character::Cid, 0x49, 0x56),
    (Character::Yuffie, 0x57, 0x64),
    (Character::CaitSith, 0x65, 0x71),
    (Character::Vincent, 0x72, 0x7E),
    (Character::Sephiroth, 0x7F, 0x7F),
];

const WEAPON_NAMES: [&str; 128] = [
    "Buster Sword", "Mythril Saber", "Hardedge", "Butterfly Edge", "Enhance Sword",
    "Organics", "Crystal Sword", "Force Stealer", "Rune Blade", "Murasame",
    "Nail Bat", "Yoshiyuki", "Apocalypse", "Heaven's Cloud", "Ragnarok",
    "Ultima Weapon", "Leather Glove", "Metal Knuckle", "Mythril Claw", "Grand Glove",
    "Tiger Fang", "Diamond Knuckle", "Dragon Claw", "Crystal Glove", "Motor Drive",
    "Platinum Fist", "Kaiser Knuckle", "Work Glove", "Powersoul", "Master Fist",
    "God's Hand", "Premium Heart", "Gatling Gun", "Assault Gun", "Cannon Ball",
    "Atomic Scissors", "Heavy Vulcan", "Chainsaw", "Microlaser", "A-M Cannon",
    "W Machine Gun", "Drill Arm", "Solid Bazooka", "Rocket Punch", "Enemy Launcher",
    "Pile Banger", "Max Ray", "Missing Score", "Mythril Clip", "Diamond Pin",
    "Silver Barrette", "Gold Barrette", "Adaman Clip", "Crystal Comb", "Magic Comb",
    "Plus Barrette", "Centclip", "Hairpin", "Seraph Comb", "Behemoth Horn",
    "Spring Gun Clip", "Limited Moon", "Guard Stick", "Mythril Rod", "Full Metal Staff",
    "Striking Staff", "Prism Staff", "Aurora Rod", "Wizard Staff", "Wizer Staff",
    "Fairy Tale", "Umbrella", "Princess Guard", "Spear", "Slash Lance",
    "Trident", "Mast Ax", "Partisan", "Viper Halberd", "Javelin",
    "Grow Lance", "Mop", "Dragoon Lance", "Scimitar", "Flayer",
    "Spirit Lance", "Venus Gospel", "4-point Shuriken", "Boomerang", "Pinwheel",
    "Razor Ring", "Hawkeye", "Crystal Cross", "Wind Slash", "Twin Viper",
    "Spiral Shuriken", "Superball", "Magic Shuriken", "Rising Sun", "Oritsuru",
    "Conformer", "Yellow M-Phone", "Green M-Phone", "Blue M-Phone", "Red M-Phone",
    "Crystal M-Phone", "White M-Phone", "Black M-Phone", "Silver M-Phone", "Trumpet Shell",
    "Gold M-Phone", "Battle Trumpet", "Starlight Phone", "HP Shout", "Quicksilver",
    "Shotgun", "Shortbarrel", "Lariat", "Winchester", "Peacemaker",
    "Buntline", "Long Barrel R", "Silver Rifle", "Sniper CR", "Supershot",
    "Outsider", "Death Penalty", "Masamune",
];

const ARMLET_NAMES: [&str; 32] = [
    "Bronze Bangle", "Iron Bangle", "Titan Bangle", "Mythril Armlet", "Carbon Bangle",
    "Silver Armlet", "Gold Armlet", "Diamond Bangle", "Crystal Bangle", "Platinum Bangle",
    "Rune Armlet", "Edincoat", "Wizard Bracelet", "Adaman Bangle", "Gigas Armlet",
    "Imperial Guard", "Aegis Armlet", "Fourth Bracelet", "Warrior Bangle", "Shinra Beta",
    "Shinra Alpha", "Four Slots", "Fire Armlet", "Aurora Armlet", "Bolt Armlet",
    "Dragon Armlet", "Minerva Band", "Escort Guard", "Mystile", "Ziedrich",
    "Precious Watch", "Chocobracelet",
];

const ACCESSORY_NAMES: [&str; 32] = [
    "Power Wrist", "Protect Vest", "Earring", "Talisman", "Choco Feather",
    "Amulet", "Champion Belt", "Poison Ring", "Tough Ring", "Circlet",
    "Star Pendant", "Silver Glasses", "Headband", "Fairy Ring", "Jem Ring",
    "White Cape", "Sprint Shoes", "Peace Ring", "Ribbon", "Fire Ring",
    "Ice Ring", "Bolt Ring", "Tetra Elemental", "Safety Bit", "Fury Ring",
    "Curse Ring", "Protect Ring", "Cat's Bell", "Reflect Ring", "Water Ring",
    "Sneak Glove", "HypnoCrown",
];
