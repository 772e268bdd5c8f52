#![forbid(unsafe_code)]

mod cli;
mod clipboard;
mod config;
mod constants;
mod controls;
mod error;
mod gui;

use anyhow::Result;
use clap::Parser;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use cli::Cli;

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let args = Cli::parse();
    match args.command {
        Some(command) => cli::run(command),
        None => {
            info!("No subcommand given, launching GUI");
            gui::run_gui()
        }
    }
}
