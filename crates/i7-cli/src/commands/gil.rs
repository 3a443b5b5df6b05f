//! Party gil commands.

use anyhow::Result;
use clap::Subcommand;
use i7_core::GilAccessor;

use crate::App;

#[derive(Subcommand)]
pub enum GilAction {
    /// Show current gil
    Get,
    /// Add gil
    Add { amount: u32 },
    /// Remove gil (stops at zero)
    Remove { amount: u32 },
}

pub fn run(app: &App, action: GilAction) -> Result<()> {
    let gil = GilAccessor::new(app.memory, app.process(), app.locks.clone());

    let total = match action {
        GilAction::Get => gil.get()?,
        GilAction::Add { amount } => gil.add(amount)?,
        GilAction::Remove { amount } => gil.remove(amount)?,
    };
    println!("Gil: {}", total);
    Ok(())
}
