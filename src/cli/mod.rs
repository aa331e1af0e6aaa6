pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "birthboard")]
#[command(about = "Browse and bookmark famous birthdays by date", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui,
    /// Print the births recorded for a day of the year
    Births {
        /// Month, 1-12
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
        /// Day of the month, 1-31
        #[arg(value_parser = clap::value_parser!(u32).range(1..=31))]
        day: u32,
        /// Only show entries containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },
}

impl Commands {
    /// Whether the command draws on the terminal, leaving stderr unusable
    /// for log output.
    pub fn owns_terminal(&self) -> bool {
        matches!(self, Commands::Tui)
    }
}
