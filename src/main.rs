mod commands;
mod dates;
mod host;
mod render;
mod vault;

use std::path::PathBuf;

use anyhow::Result;
use calpro_core::NoteKind;
use clap::{Parser, Subcommand};

use crate::vault::Vault;

#[derive(Parser)]
#[command(name = "calpro")]
#[command(about = "Browse month and quarter calendars and open dated notes in your vault")]
struct Cli {
    /// Vault directory (defaults to vault_dir from ~/.config/calpro/config.toml)
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month with ISO week numbers
    Month {
        /// Year to show (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to show, 1-12 (defaults to the current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Months to move forward (or back, if negative) from the shown month
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
    },
    /// Show the quarter and month picker for a year
    Year {
        /// Year to show (defaults to the current year)
        year: Option<i32>,

        /// Years to move forward (or back, if negative)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
    },
    /// Open a dated note, creating it if it doesn't exist
    Open {
        /// daily, weekly, monthly, quarterly or yearly
        kind: NoteKind,

        /// Date in the note's period: YYYY-MM-DD, YYYY-MM, today, yesterday, tomorrow
        #[arg(default_value = "today")]
        date: String,

        /// Create without asking, even if showConfirmBeforeCreate is set
        #[arg(short, long)]
        yes: bool,

        /// Print the note path instead of launching an editor
        #[arg(long)]
        no_launch: bool,
    },
    /// Open the weekly note for a row of the month grid
    OpenWeek {
        year: i32,

        /// Month, 1-12
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,

        /// Row of the grid, 1 for the first row
        #[arg(value_parser = clap::value_parser!(u32).range(1..=6))]
        row: u32,

        #[arg(short, long)]
        yes: bool,

        #[arg(long)]
        no_launch: bool,
    },
    /// Preview a dated note without opening it
    Preview {
        kind: NoteKind,

        #[arg(default_value = "today")]
        date: String,
    },
    /// Print the path a dated note resolves to
    Path {
        kind: NoteKind,

        #[arg(default_value = "today")]
        date: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommand>,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current settings
    Show,
    /// Show where configuration and settings are stored
    Path,
    /// Change one setting (e.g. `calpro config set startDayOfWeek monday`)
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Month {
            year,
            month,
            offset,
        } => {
            let vault = Vault::load(cli.vault)?;
            commands::month::run(&vault, today, year, month, offset)
        }
        Commands::Year { year, offset } => commands::year::run(today, year, offset),
        Commands::Open {
            kind,
            date,
            yes,
            no_launch,
        } => {
            let vault = Vault::load(cli.vault)?;
            let date = dates::parse_date(&date, today)?;
            commands::open::run(&vault, kind, date, yes, !no_launch).await
        }
        Commands::OpenWeek {
            year,
            month,
            row,
            yes,
            no_launch,
        } => {
            let vault = Vault::load(cli.vault)?;
            commands::open::run_week(&vault, year, month, row, yes, !no_launch).await
        }
        Commands::Preview { kind, date } => {
            let vault = Vault::load(cli.vault)?;
            let date = dates::parse_date(&date, today)?;
            commands::preview::run(&vault, kind, date).await
        }
        Commands::Path { kind, date, json } => {
            let vault = Vault::load(cli.vault)?;
            let date = dates::parse_date(&date, today)?;
            commands::path::run(&vault, kind, date, json)
        }
        Commands::Config { command } => match command.unwrap_or(ConfigCommand::Show) {
            ConfigCommand::Show => commands::config::show(cli.vault),
            ConfigCommand::Path => commands::config::path(cli.vault),
            ConfigCommand::Set { key, value } => commands::config::set(cli.vault, &key, &value),
        },
    }
}
