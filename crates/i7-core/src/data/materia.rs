//! Materia names by id.

/// Display name for a materia id; `None` for unused or out-of-range ids.
pub fn materia_name(id: u8) -> Option<&'static str> {
    MATERIA_NAMES
        .get(id as usize)
        .copied()
        .filter(|name| !name.is_empty())
}

/// Resolve a materia argument: a decimal/hex id or a name
pub fn parse_materia(text: &str) -> Option<u8> {
    let text = text.trim();
    let id = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16).ok()
    } else if let Ok(id) = text.parse::<u8>() {
        Some(id)
    } else {
        MATERIA_NAMES
            .iter()
            .position(|name| !name.is_empty() && name.eq_ignore_ascii_case(text))
            .map(|index| index as u8)
    };
    id.filter(|&id| materia_name(id).is_some())
}

const MATERIA_NAMES: [&str; 91] = [
    // 0x00 independent
    "MP Plus", "HP Plus", "Speed Plus", "Magic Plus", "Luck Plus", "EXP Plus",
    "Gil Plus", "Enemy Away", "Enemy Lure", "Chocobo Lure", "Pre-Emptive",
    "Long Range", "Mega All", "Counter Attack", "Slash-All", "Double Cut",
    "Cover", "Underwater", "HP <-> MP", "W-Magic", "W-Summon", "W-Item", "",
    // 0x17 support
    "All", "Counter", "Magic Counter", "MP Turbo", "MP Absorb", "HP Absorb",
    "Elemental", "Added Effect", "Sneak Attack", "Final Attack", "Added Cut",
    "Steal As Well", "Quadra Magic",
    // 0x24 command
    "Steal", "Sense", "", "Throw", "Morph", "Deathblow", "Manipulate", "Mime",
    "Enemy Skill", "", "", "", "Master Command",
    // 0x31 magic
    "Fire", "Ice", "Earth", "Lightning", "Restore", "Heal", "Revive", "Seal",
    "Mystify", "Transform", "Exit", "Poison", "Gravity", "Barrier", "", "Comet",
    "Time", "", "", "Destruct", "Contain", "Full Cure", "Shield", "Ultima",
    "Master Magic",
    // 0x4A summon
    "Choco/Mog", "Shiva", "Ifrit", "Titan", "Ramuh", "Odin", "Leviathan",
    "Bahamut", "Kujata", "Alexander", "Phoenix", "Neo Bahamut", "Hades",
    "Typhoon", "Bahamut ZERO", "Knights of the Round", "Master Summon",
];
