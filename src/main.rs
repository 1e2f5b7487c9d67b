mod api;
mod cli;
mod commands;
mod config;
mod error;
mod records;
mod tui;

#[cfg(test)]
mod tests;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};
use log::LevelFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

// Interactive mode logs nothing unless RUST_LOG is set.
fn init_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::new();
    let level = match cli.command {
        Commands::Interactive => LevelFilter::Off,
        _ if cli.verbose => LevelFilter::Debug,
        _ => LevelFilter::Warn,
    };
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}
