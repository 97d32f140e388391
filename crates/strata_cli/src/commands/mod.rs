//! CLI command definitions.
//!
//! Each subcommand composes one stack document from an environment
//! settings file and prints it, or links an applied stack's outputs
//! back into settings form.

use clap::{Parser, Subcommand};

pub mod app;
pub mod link;
pub mod network;

/// Strata - environment-driven stack document composer
#[derive(Parser)]
#[command(name = "strata")]
#[command(version, about = "Strata - environment-driven stack document composer")]
#[command(long_about = r#"
Strata composes declarative cloud stack documents from per-environment
settings files. The document goes to stdout, ready for the provisioning
engine to create or update a stack; logs go to stderr.

WORKFLOWS:
  network  → compose the shared network stack document
  app      → compose an application stack document for one environment
  link     → turn applied network-stack outputs into application settings

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Settings error
  4 - Composition error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compose an application stack document
    App(app::AppArgs),

    /// Compose the shared network stack document
    Network(network::NetworkArgs),

    /// Build application settings from applied network outputs
    Link(link::LinkArgs),
}
