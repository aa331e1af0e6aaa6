use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

use birthboard::app::AppContext;
use birthboard::cli::{commands, Cli, Commands};
use birthboard::config::Config;

/// The TUI owns the terminal, so its log goes to a file. Without a usable
/// log file the TUI logs nowhere.
fn log_writer(command: &Commands) -> BoxMakeWriter {
    if !command.owns_terminal() {
        return BoxMakeWriter::new(std::io::stderr);
    }
    match Config::default_log_path().and_then(|path| Config::open_log_file(&path)) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(std::io::sink),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(!command.owns_terminal())
                .with_writer(log_writer(&command)),
        )
        .with(EnvFilter::from_default_env())
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    match command {
        Commands::Tui => {
            birthboard::tui::run(Arc::new(ctx)).await?;
        }
        Commands::Births { month, day, search } => {
            commands::print_births(&ctx, month, day, search.as_deref()).await?;
        }
    }

    Ok(())
}
