//! CLI frontend for the Black Void character sheet engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "BLACKVOID_LOG";

#[derive(Parser)]
#[command(
    name = "blackvoid",
    about = "Black Void character sheets and contextual dice rolls",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log resolver decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a template character sheet
    Init {
        /// Path of the sheet to create
        #[arg(default_value = "character.json")]
        path: PathBuf,

        /// Character name
        #[arg(short, long, default_value = "Nameless")]
        name: String,
    },

    /// Show derived statistics and visible tabs
    Sheet {
        /// Character sheet file
        #[arg(short, long, default_value = "character.json")]
        sheet: PathBuf,

        /// Print derived statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a roll trigger (e.g. `SKILL_Stealth 1d20+2`, `agi 1d20+12`)
    Roll {
        /// Trigger label
        label: String,

        /// Dice formula template
        #[arg(default_value = "")]
        formula: String,

        /// Table text announced by phenomenon triggers
        #[arg(short, long)]
        table: Option<String>,

        /// Answer the next prompt with this option key (repeatable)
        #[arg(short, long = "pick")]
        picks: Vec<String>,

        /// RNG seed for reproducible rolls
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Character sheet file
        #[arg(short, long, default_value = "character.json")]
        sheet: PathBuf,
    },

    /// Manage possessed items
    Item {
        #[command(subcommand)]
        action: ItemCommand,
    },
}

#[derive(Subcommand)]
enum ItemCommand {
    /// List items on the sheet
    List {
        /// Character sheet file
        #[arg(short, long, default_value = "character.json")]
        sheet: PathBuf,
    },

    /// Add a new item of the given kind
    Add {
        /// Item kind (background, skill, combatskill, shield, method, ...)
        kind: String,

        /// Item name (default: "New <Kind>")
        #[arg(short, long)]
        name: Option<String>,

        /// Character sheet file
        #[arg(short, long, default_value = "character.json")]
        sheet: PathBuf,
    },

    /// Remove an item by id or id prefix
    Remove {
        /// Item id
        id: String,

        /// Character sheet file
        #[arg(short, long, default_value = "character.json")]
        sheet: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init { path, name } => commands::init::run(&path, &name),
        Commands::Sheet { sheet, json } => commands::sheet::run(&sheet, json),
        Commands::Roll {
            label,
            formula,
            table,
            picks,
            seed,
            sheet,
        } => commands::roll::run(&sheet, &label, &formula, table.as_deref(), picks, seed),
        Commands::Item { action } => match action {
            ItemCommand::List { sheet } => commands::item::list(&sheet),
            ItemCommand::Add { kind, name, sheet } => {
                commands::item::add(&sheet, &kind, name.as_deref())
            }
            ItemCommand::Remove { id, sheet } => commands::item::remove(&sheet, &id),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
