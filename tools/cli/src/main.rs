use clap::Parser;
use std::process;

mod commands;
mod config;
mod prompts;

use commands::*;
use config::*;
use salary_ticker::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    // Load settings
    let settings = match load_settings(&cli.config).await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };
    let language = resolve_language(cli.lang, &settings);

    // Execute command
    let result = match cli.command {
        Commands::Track {
            salary,
            no_smoothing,
            run_for,
        } => track_command(salary, no_smoothing, run_for, language, &settings).await,
        Commands::Snapshot { salary, format, at } => {
            snapshot_command(salary, format, at, language, &settings).await
        }
        Commands::Presets => presets_command(language).await,
        Commands::Status => status_command(&cli.config, language, &settings).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
