// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domo - a chat-driven personal assistant.
//!
//! This is the binary entry point for the Domo assistant.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod shell;

use clap::{Parser, Subcommand};

/// Domo - a chat-driven personal assistant.
#[derive(Parser, Debug)]
#[command(name = "domo", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive REPL session.
    Shell,
    /// Print the effective validated configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match domo_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            domo_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    match cli.command {
        Some(Commands::Shell) => {
            if let Err(e) = shell::run_shell(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            print_config(&config);
        }
        None => {
            println!("domo: use --help for available commands");
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("domo={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// Prints the effective configuration as TOML, with the API key masked.
fn print_config(config: &domo_config::DomoConfig) {
    let mut display = config.clone();
    if display.anthropic.api_key.is_some() {
        display.anthropic.api_key = Some("<set>".to_string());
    }
    match toml::to_string_pretty(&display) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => eprintln!("error: failed to render config: {e}"),
    }
}
