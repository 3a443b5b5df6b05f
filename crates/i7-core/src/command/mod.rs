//! Chat command handling on top of the accessors.

mod chat;
mod equip;

pub use chat::{ChatOutput, ChatUser, CommandRequest, LogOutput};
pub use equip::{EquipCommand, EquipOutcome};
