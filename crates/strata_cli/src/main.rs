//! Strata CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Settings error
//! - 4: Composition error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

use strata_compose::ComposeError;
use strata_settings::SettingsError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const SETTINGS_ERROR: u8 = 3;
    pub const COMPOSE_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_directive = if cli.verbose {
        "strata=debug"
    } else if cli.quiet {
        "strata=error"
    } else {
        "strata=info"
    };

    // Logs go to stderr; stdout carries the composed document.
    let log_result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive(default_directive.parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.command {
        Commands::App(args) => commands::app::execute(args),
        Commands::Network(args) => commands::network::execute(args),
        Commands::Link(args) => commands::link::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<ComposeError>() {
        return match err {
            ComposeError::Settings(_) => ExitCodes::SETTINGS_ERROR,
            _ => ExitCodes::COMPOSE_ERROR,
        };
    }
    if e.downcast_ref::<SettingsError>().is_some() {
        return ExitCodes::SETTINGS_ERROR;
    }
    ExitCodes::GENERAL_ERROR
}
