// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trellis - plugin and component registry diagnostics.
//!
//! This is the binary entry point: it loads `trellis.toml`, initializes
//! tracing and inspects the configured components without a host process.

mod check;
mod components;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Trellis - plugin and component registry diagnostics.
#[derive(Parser, Debug)]
#[command(name = "trellis", version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of the standard lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate configured components: types, asset files and parameters.
    Check,
    /// List configured components.
    Components {
        /// Print descriptors as JSON.
        #[arg(long)]
        json: bool,
        /// Only components rendered in this view.
        #[arg(long)]
        view: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => trellis_config::load_and_validate_path(path),
        None => trellis_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            trellis_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.registry.log_level);

    let result = match cli.command {
        Some(Commands::Check) => check::run_check(&config, cli.plain),
        Some(Commands::Components { json, view }) => {
            components::run_components(&config, json, view.as_deref())
        }
        None => {
            println!("trellis: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("trellis: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so `components --json` output stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("trellis={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
