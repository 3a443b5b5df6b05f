//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod dump;
pub mod equip;
pub mod gil;
pub mod hex_utils;
pub mod hexdump;
pub mod item;
pub mod materia;
pub mod status;

pub use gil::GilAction;
pub use item::ItemAction;
pub use materia::MateriaAction;
