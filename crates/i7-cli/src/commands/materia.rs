//! Materia inventory commands.

use anyhow::{Result, anyhow};
use clap::Subcommand;
use i7_core::{MateriaAccessor, materia_name, parse_materia};

use crate::App;
use crate::commands::hex_utils::format_hex_address;

#[derive(Subcommand)]
pub enum MateriaAction {
    /// Add materia to the first free inventory slot
    Add {
        /// Materia id (decimal or 0x hex) or name
        materia: String,

        /// Starting AP
        #[arg(long, default_value_t = 0)]
        ap: u32,
    },

    /// Clear the whole materia inventory
    Clear,
}

pub fn run(app: &App, action: MateriaAction) -> Result<()> {
    if !app.settings.materia.enabled {
        println!("Materia commands are disabled in the settings");
        return Ok(());
    }

    let accessor = MateriaAccessor::new(app.memory, app.process(), app.locks.clone());

    match action {
        MateriaAction::Add { materia, ap } => {
            let id = parse_materia(&materia).ok_or_else(|| anyhow!("Unknown materia: {}", materia))?;
            let name = materia_name(id).unwrap_or("?");
            match accessor.add(id, ap)? {
                Some(address) => println!("Added {} at {}", name, format_hex_address(address)),
                None => println!("Materia inventory is full, {} was not added", name),
            }
        }
        MateriaAction::Clear => {
            let cleared = accessor.remove_all()?;
            println!("Cleared {} materia", cleared);
        }
    }
    Ok(())
}
