//! Item inventory commands.

use anyhow::{Result, bail};
use clap::Subcommand;
use i7_core::{InventoryAccessor, ItemId, item_name};

use crate::App;
use crate::commands::hex_utils::{format_hex_address, parse_number};

#[derive(Subcommand)]
pub enum ItemAction {
    /// Add items to the inventory
    Add {
        /// Item id (decimal or 0x hex)
        item: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u8,

        /// Always use a new slot instead of topping up a stack
        #[arg(long)]
        no_stack: bool,
    },

    /// Show how many of an item the party holds
    Count {
        item: String,
    },
}

fn parse_item(text: &str) -> Result<ItemId> {
    let id = parse_number(text)?;
    let id = u16::try_from(id).ok().map(ItemId);
    match id {
        Some(id) if item_name(id).is_some() => Ok(id),
        _ => bail!("Unknown item id: {}", text),
    }
}

pub fn run(app: &App, action: ItemAction) -> Result<()> {
    let inventory = InventoryAccessor::new(app.memory, app.process(), app.locks.clone());

    match action {
        ItemAction::Add {
            item,
            quantity,
            no_stack,
        } => {
            let id = parse_item(&item)?;
            let name = item_name(id).unwrap_or("?");
            match inventory.add_item(id, quantity, !no_stack)? {
                Some(address) => println!(
                    "Added {} x{} at {}",
                    name,
                    quantity,
                    format_hex_address(address)
                ),
                None => println!("Nothing added (inventory full or zero quantity)"),
            }
        }
        ItemAction::Count { item } => {
            let id = parse_item(&item)?;
            println!(
                "{}: {}",
                item_name(id).unwrap_or("?"),
                inventory.item_quantity(id)?
            );
        }
    }
    Ok(())
}
