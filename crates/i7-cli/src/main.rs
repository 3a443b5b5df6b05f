use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use i7_core::{ProcessLocks, ProcessMemory, Settings};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{GilAction, ItemAction, MateriaAction};

#[derive(Parser)]
#[command(name = "i7")]
#[command(version)]
#[command(about = "Live memory bridge for FF7 PC")]
struct Cli {
    /// Settings file
    #[arg(short, long, default_value = "i7.toml", global = true)]
    config: PathBuf,

    /// Game executable name (overrides the settings file)
    #[arg(short, long, env = "I7_PROCESS", global = true)]
    process: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Capture the savemap and print the decoded state
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Decode a savemap dump from disk
    Decode {
        /// Savemap dump file
        #[arg(long)]
        map: PathBuf,

        /// 16-byte menu palette file
        #[arg(long)]
        colors: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Write the live savemap (and optionally the palette) to files
    Dump {
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        colors: Option<PathBuf>,
    },

    /// Show raw process memory
    Hexdump {
        /// Start address (hex)
        #[arg(short, long, value_parser = commands::hex_utils::parse_hex_address)]
        address: u64,

        #[arg(short, long, default_value_t = 256)]
        size: usize,

        /// Show ASCII column
        #[arg(long)]
        ascii: bool,
    },

    /// Materia inventory
    Materia {
        #[command(subcommand)]
        action: MateriaAction,
    },

    /// Equip a weapon, armlet or accessory on a character
    Equip {
        character: String,

        /// weapon, armlet or accessory
        kind: String,

        /// Catalog number or item name
        #[arg(num_args = 1.., required = true)]
        value: Vec<String>,
    },

    /// Item inventory
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Party gil
    Gil {
        #[command(subcommand)]
        action: GilAction,
    },
}

/// Shared state handed to every command
pub struct App {
    pub settings: Arc<Settings>,
    pub memory: ProcessMemory,
    pub locks: Arc<ProcessLocks>,
}

impl App {
    pub fn process(&self) -> &str {
        &self.settings.process_name
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("i7=info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut settings = match Settings::load(&cli.config) {
        Ok(s) => {
            info!("Loaded settings from {:?}", cli.config);
            s
        }
        Err(e) if e.is_not_found() => Settings::default(),
        Err(e) => {
            warn!("Failed to load settings: {}, using defaults", e);
            Settings::default()
        }
    };
    if let Some(process) = cli.process {
        settings.process_name = process;
    }

    let app = App {
        settings: Arc::new(settings),
        memory: ProcessMemory::new(),
        locks: Arc::new(ProcessLocks::new()),
    };

    match cli.command {
        Command::Status { json } => commands::status::run(&app, json),
        Command::Decode { map, colors, json } => {
            commands::status::decode_file(&map, colors.as_deref(), json)
        }
        Command::Dump { output, colors } => commands::dump::run(&app, &output, colors.as_deref()),
        Command::Hexdump {
            address,
            size,
            ascii,
        } => commands::hexdump::run(&app, address, size, ascii),
        Command::Materia { action } => commands::materia::run(&app, action),
        Command::Equip {
            character,
            kind,
            value,
        } => commands::equip::run(&app, &character, &kind, &value),
        Command::Item { action } => commands::item::run(&app, action),
        Command::Gil { action } => commands::gil::run(&app, action),
    }
}
