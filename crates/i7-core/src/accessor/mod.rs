//! Read-modify-write operations on live game state.
//!
//! Every accessor takes its [`MemoryAccessor`](crate::memory::MemoryAccessor)
//! by value and the process name it targets. Operations that scan and then
//! write hold the process lock from [`ProcessLocks`](crate::memory::ProcessLocks)
//! for the whole sequence.

mod equipment;
mod gil;
mod inventory;
mod materia;

pub use equipment::EquipmentAccessor;
pub use gil::GilAccessor;
pub use inventory::{InventoryAccessor, InventorySlot};
pub use materia::{MateriaAccessor, MateriaSlot};
