use crate::data::equipment::{Catalog, ItemId};

/// Display name for any inventory item id (consumables and equipment)
pub fn item_name(id: ItemId) -> Option<&'static str> {
    match id.0 {
        0x000..=0x068 => Some(CONSUMABLE_NAMES[id.0 as usize]),
        _ => Catalog::get().by_item_id(id).map(|item| item.name()),
    }
}

const CONSUMABLE_NAMES: [&str; 0x69] = [
    "Potion", "Hi-Potion", "X-Potion", "Ether", "Turbo Ether", "Elixir",
    "Megalixir", "Phoenix Down", "Antidote", "Soft", "Maiden's Kiss",
    "Cornucopia", "Echo Screen", "Hyper", "Tranquilizer", "Remedy",
    "Smoke Bomb", "Speed Drink", "Hero Drink", "Vaccine", "Grenade",
    "Shrapnel", "Right Arm", "Hourglass", "Kiss of Death", "Spider Web",
    "Dream Powder", "Mute Mask", "War Gong", "Loco Weed", "Fire Fang",
    "Fire Veil", "Antarctic Wind", "Ice Crystal", "Bolt Plume", "Swift Bolt",
    "Earth Drum", "Earth Mallet", "Deadly Waste", "M-Tentacles", "Stardust",
    "Vampire Fang", "Ghost Hand", "Vagyrisk Claw", "Light Curtain",
    "Lunar Curtain", "Mirror", "Holy Torch", "Bird Wing", "Dragon Scales",
    "Impaler", "Shrivel", "Eye Drop", "Molotov", "S-Mine", "8-Inch Cannon",
    "Graviball", "T/S Bomb", "Ink", "Dazers", "Dragon Fang", "Cauldron",
    "Sylkis Greens", "Reagan Greens", "Mimett Greens", "Curiel Greens",
    "Pahsana Greens", "Tantal Greens", "Krakka Greens", "Gysahl Greens", "Tent",
    "Power Source", "Guard Source", "Magic Source", "Mind Source",
    "Speed Source", "Luck Source", "Zeio Nut", "Carob Nut", "Porov Nut",
    "Pram Nut", "Lasan Nut", "Saraha Nut", "Luchile Nut", "Pepio Nut",
    "Battery", "Tissue", "Omnislash", "Catastrophe", "Final Heaven",
    "Great Gospel", "Cosmo Memory", "All Creation", "Chaos", "Highwind",
    "1/35 Soldier", "Super Sweeper", "Masamune Blade", "Save Crystal",
    "Combat Diary", "Autograph", "Gambler", "Desert Rose", "Earth Harp",
    "Guide Book",
];
