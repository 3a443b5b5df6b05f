//! Status and offline decode commands.

use std::path::Path;

use anyhow::{Result, bail};
use i7_core::{CharacterRecord, EquipmentKind, MemorySnapshot, SaveMap, SaveSummary, materia_name};

use crate::App;

/// Capture the live savemap and print it
pub fn run(app: &App, json: bool) -> Result<()> {
    let snapshot = MemorySnapshot::capture(&app.memory, app.process())?;
    show(&snapshot.decode(), json)
}

/// Decode dump files written by the `dump` command
pub fn decode_file(map: &Path, colors: Option<&Path>, json: bool) -> Result<()> {
    let map = std::fs::read(map)?;
    let colors = colors.map(std::fs::read).transpose()?;
    show(&SaveMap::decode(map, colors.as_deref()), json)
}

fn show(save: &SaveMap, json: bool) -> Result<()> {
    if !save.is_valid() {
        bail!("Savemap failed the consistency check (is a save loaded?)");
    }

    let summary = save.summary()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn format_duration(seconds: u32) -> String {
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}

fn print_summary(summary: &SaveSummary) {
    println!("=== Location ===");
    println!(
        "  {} (map {}, location {}) at ({}, {}) facing {}",
        summary.live_map_name,
        summary.map_id,
        summary.location_id,
        summary.position_x,
        summary.position_y,
        summary.direction
    );
    println!("  Disc {}", summary.disc);

    println!();
    println!("=== Progress ===");
    println!("  Gil: {}  GP: {}", summary.live_gil, summary.party_gp);
    println!(
        "  Play time: {} (field clock {})",
        format_duration(summary.live_total_seconds),
        format_duration(summary.field_total_seconds)
    );
    println!(
        "  Battles: {} fought, {} escaped, {} BP",
        summary.battles_fought, summary.escapes, summary.battle_points
    );
    println!("  Countdown: {}s", summary.countdown_timer);
    println!("  Ultimate Weapon HP: {}", summary.ultimate_weapon_hp);

    println!();
    println!("=== Party ===");
    for member in &summary.live_party {
        print_member(member);
    }

    println!();
    println!("=== Save Preview ===");
    println!(
        "  {} - {} gil - {}",
        summary.preview_map_name,
        summary.preview_gil,
        format_duration(summary.preview_total_seconds)
    );
    match &summary.preview_party {
        Some(party) => {
            let names: Vec<&str> = party
                .iter()
                .filter(|m| !m.is_empty())
                .map(|m| m.display_name())
                .collect();
            println!("  Party: {}", names.join(", "));
        }
        None => println!("  Party: (unavailable)"),
    }

    let colors = &summary.window_colors;
    println!();
    println!("=== Window Colors ===");
    println!("  {}  {}", colors.top_left, colors.top_right);
    println!("  {}  {}", colors.bottom_left, colors.bottom_right);
}

fn print_member(member: &CharacterRecord) {
    if member.is_empty() {
        println!("  (empty)");
        return;
    }

    println!(
        "  {} Lv{} HP {}/{} MP {}/{} {}",
        member.display_name(),
        member.level,
        member.current_hp,
        member.max_hp,
        member.current_mp,
        member.max_mp,
        if member.at_front { "front" } else { "back" }
    );

    let catalog = i7_core::Catalog::get();
    let equipped = [
        (EquipmentKind::Weapon, member.weapon),
        (EquipmentKind::Armlet, member.armor),
        (EquipmentKind::Accessory, member.accessory),
    ]
    .map(|(kind, id)| {
        catalog
            .by_equip_id(kind, id)
            .map_or("-", |item| item.name())
    });
    println!("    {} / {} / {}", equipped[0], equipped[1], equipped[2]);

    let materia: Vec<&str> = member
        .weapon_materia
        .iter()
        .chain(&member.armor_materia)
        .filter_map(|&id| materia_name(id))
        .collect();
    if !materia.is_empty() {
        println!("    Materia: {}", materia.join(", "));
    }
}
