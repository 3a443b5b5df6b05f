//! Operator settings, stored as TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

pub const DEFAULT_PROCESS_NAME: &str = "ff7.exe";

/// Top-level settings; every field falls back to its default when absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Executable name of the game process
    pub process_name: String,
    pub equipment: EquipmentSettings,
    pub materia: MateriaSettings,
    pub bank: BankSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            process_name: DEFAULT_PROCESS_NAME.to_string(),
            equipment: EquipmentSettings::default(),
            materia: MateriaSettings::default(),
            bank: BankSettings::default(),
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let settings = toml::from_str(&content)?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentSettings {
    pub enabled: bool,
    /// Moderators skip the cost when set
    pub allow_mod_override: bool,
    /// Return swapped-out equipment to the inventory
    pub keep_previous_equipment: bool,
    pub weapon_cost: u32,
    pub armlet_cost: u32,
    pub accessory_cost: u32,
}

impl Default for EquipmentSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_mod_override: true,
            keep_previous_equipment: true,
            weapon_cost: 100,
            armlet_cost: 100,
            accessory_cost: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MateriaSettings {
    /// Allow writes to the materia inventory
    pub enabled: bool,
}

impl Default for MateriaSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankSettings {
    /// Balance of a user's account when first referenced
    pub starting_balance: u32,
}
