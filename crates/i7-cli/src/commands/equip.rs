//! Operator equip command.
//!
//! Runs the same flow as the chat command, as a cost-exempt user.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use i7_core::{ChatUser, CommandRequest, EquipCommand, EquipOutcome, EquipmentKind, GilBank, LogOutput};

use crate::App;

const CHANNEL: &str = "cli";

pub fn run(app: &App, character: &str, kind: &str, value: &[String]) -> Result<()> {
    let kind: EquipmentKind = kind
        .parse()
        .map_err(|_| anyhow!("Unknown equipment kind: {} (weapon, armlet, accessory)", kind))?;

    let command = EquipCommand::new(
        kind,
        app.memory,
        Arc::clone(&app.locks),
        Arc::clone(&app.settings),
        Arc::new(GilBank::with_starting_balance(
            app.settings.bank.starting_balance,
        )),
        LogOutput,
    );

    let operator = ChatUser {
        is_me: true,
        ..ChatUser::new("operator")
    };
    let mut arguments = vec![character];
    arguments.extend(value.iter().map(String::as_str));
    let request = CommandRequest::new(operator, CHANNEL, &arguments);

    match command.execute(&request)? {
        EquipOutcome::Disabled => println!("Equipment commands are disabled in the settings"),
        EquipOutcome::InvalidRequest => return Err(anyhow!("Invalid character or {}", kind)),
        EquipOutcome::InsufficientFunds { balance, cost } => {
            println!("Insufficient gil: {} of {}", balance, cost)
        }
        EquipOutcome::AlreadyEquipped => println!("Already equipped"),
        EquipOutcome::Equipped { previous } => println!("Done (replaced {})", previous),
    }
    Ok(())
}
