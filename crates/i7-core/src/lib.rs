//! # i7-core
//!
//! Core library for driving a running FF7 PC (1998) game from chat commands.
//!
//! This crate provides:
//! - Process memory access with a mockable capability trait
//! - Savemap snapshot decoding (party, characters, gil, map, timers)
//! - Static roster, equipment catalog and materia data
//! - Accessors for materia, equipment, inventory and party gil
//! - A per-user gil ledger and the paid equip command flow
//! - TOML settings

pub mod accessor;
pub mod bank;
pub mod command;
pub mod config;
pub mod data;
pub mod error;
pub mod memory;
pub mod savemap;

pub use accessor::{
    EquipmentAccessor, GilAccessor, InventoryAccessor, InventorySlot, MateriaAccessor, MateriaSlot,
};
pub use bank::{GilBank, Withdrawal};
pub use command::{ChatOutput, ChatUser, CommandRequest, EquipCommand, EquipOutcome, LogOutput};
pub use config::Settings;
pub use data::{
    Catalog, CatalogId, Character, EquipId, EquipmentItem, EquipmentKind, ItemId, item_name,
    materia_name, parse_materia,
};
pub use error::{Error, Result};
pub use memory::{MemoryAccessor, ProcessHandle, ProcessInfo, ProcessLocks, ProcessMemory};
pub use savemap::{CharacterRecord, MemorySnapshot, MenuColors, SaveMap, SaveSummary};
