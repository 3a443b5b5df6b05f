use std::sync::Arc;

use tracing::{info, warn};

use crate::accessor::{EquipmentAccessor, InventoryAccessor, MateriaAccessor};
use crate::bank::GilBank;
use crate::command::chat::{ChatOutput, CommandRequest};
use crate::config::Settings;
use crate::data::{Catalog, Character, EquipId, EquipmentItem, EquipmentKind};
use crate::error::Result;
use crate::memory::{MemoryAccessor, ProcessLocks};

/// What an equip command ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipOutcome {
    Disabled,
    InvalidRequest,
    InsufficientFunds { balance: u32, cost: u32 },
    AlreadyEquipped,
    Equipped { previous: EquipId },
}

/// Paid "equip X on character Y" command for one equipment kind
pub struct EquipCommand<M, O> {
    kind: EquipmentKind,
    settings: Arc<Settings>,
    bank: Arc<GilBank>,
    output: O,
    equipment: EquipmentAccessor<M>,
    inventory: InventoryAccessor<M>,
    materia: MateriaAccessor<M>,
}

impl<M, O> EquipCommand<M, O>
where
    M: MemoryAccessor + Clone,
    O: ChatOutput,
{
    pub fn new(
        kind: EquipmentKind,
        memory: M,
        locks: Arc<ProcessLocks>,
        settings: Arc<Settings>,
        bank: Arc<GilBank>,
        output: O,
    ) -> Self {
        let process = settings.process_name.clone();
        Self {
            kind,
            equipment: EquipmentAccessor::new(memory.clone(), process.clone(), Arc::clone(&locks)),
            inventory: InventoryAccessor::new(memory.clone(), process.clone(), Arc::clone(&locks)),
            materia: MateriaAccessor::new(memory, process, locks),
            settings,
            bank,
            output,
        }
    }

    fn cost(&self) -> u32 {
        let equipment = &self.settings.equipment;
        match self.kind {
            EquipmentKind::Weapon => equipment.weapon_cost,
            EquipmentKind::Armlet => equipment.armlet_cost,
            EquipmentKind::Accessory => equipment.accessory_cost,
        }
    }

    fn parse(&self, arguments: &[String]) -> Option<(Character, &'static EquipmentItem)> {
        let (name, value) = arguments.split_first()?;
        let character = Character::parse(name)?;
        let value = value.join(" ");
        let item = Catalog::get().find(self.kind, character, &value)?;
        Some((character, item))
    }

    /// Run the command.
    ///
    /// Process failures are returned as errors after any gil taken for the
    /// command has been refunded; every other outcome is reported to chat.
    pub fn execute(&self, request: &CommandRequest) -> Result<EquipOutcome> {
        if !self.settings.equipment.enabled {
            return Ok(EquipOutcome::Disabled);
        }

        let channel = request.channel.as_str();
        let user = &request.user;

        let Some((character, item)) = self.parse(&request.arguments) else {
            self.output.send_message(
                channel,
                &format!(
                    "Invalid Request - Specify character and {kind} number like this !{kind} cloud 15",
                    kind = self.kind
                ),
            );
            return Ok(EquipOutcome::InvalidRequest);
        };

        let mut withdrawn = 0;
        if !user.can_override_cost(self.settings.equipment.allow_mod_override) {
            let cost = self.cost();
            let withdrawal = self.bank.withdraw(&user.name, cost, true);
            withdrawn = withdrawal.withdrawn;
            if !withdrawal.covers(cost) {
                let balance = self.refund(&user.name, withdrawn);
                self.output.send_message(
                    channel,
                    &format!(
                        "Insufficient gil. You only have {} gil and needed {}",
                        balance, cost
                    ),
                );
                return Ok(EquipOutcome::InsufficientFunds { balance, cost });
            }
        }

        let previous = match self.swap(character, item) {
            Ok(Some(previous)) => previous,
            Ok(None) => {
                self.refund(&user.name, withdrawn);
                self.output.send_message(
                    channel,
                    &format!(
                        "Sorry, {} already has {} equipped.",
                        character.default_name(),
                        item.name()
                    ),
                );
                return Ok(EquipOutcome::AlreadyEquipped);
            }
            Err(e) => {
                self.refund(&user.name, withdrawn);
                return Err(e);
            }
        };

        self.after_swap(character, previous)?;
        self.output.send_message(
            channel,
            &format!("Equipped {} with a {}.", character.default_name(), item.name()),
        );
        Ok(EquipOutcome::Equipped { previous })
    }

    /// Write the new equip id; `None` if it was already equipped
    fn swap(&self, character: Character, item: &EquipmentItem) -> Result<Option<EquipId>> {
        self.equipment
            .replace_equipped(character, self.kind, item.equip_id())
    }

    /// Return the old item and its materia to the inventory
    fn after_swap(&self, character: Character, previous: EquipId) -> Result<()> {
        if self.settings.equipment.keep_previous_equipment {
            // Stored ids are equip ids; the inventory wants item ids
            match Catalog::get().by_equip_id(self.kind, previous) {
                Some(removed) => {
                    self.inventory.add_item(removed.item_id(), 1, true)?;
                }
                None => warn!("No {} with {} to return to inventory", self.kind, previous),
            }
        }

        match self.kind {
            EquipmentKind::Weapon => {
                self.materia.remove_weapon_materia(character)?;
            }
            EquipmentKind::Armlet => {
                self.materia.remove_armor_materia(character)?;
            }
            EquipmentKind::Accessory => {}
        }
        Ok(())
    }

    fn refund(&self, user: &str, amount: u32) -> u32 {
        if amount == 0 {
            return self.bank.balance(user);
        }
        info!("Refunding {} gil to {}", amount, user);
        self.bank.deposit(user, amount)
    }
}
