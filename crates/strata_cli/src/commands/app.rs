//! app command - compose an application stack document.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use strata_compose::AppStack;
use strata_settings::SettingsLoader;

#[derive(Args)]
pub struct AppArgs {
    /// Environment settings file (YAML with a config:aws section)
    pub settings: PathBuf,
}

pub fn execute(args: AppArgs) -> Result<()> {
    info!("Composing application stack from {:?}", args.settings);

    let settings = SettingsLoader::from_file(&args.settings)?;
    let document = AppStack::compose(&settings)?;

    // Serialization happens only after the full builder sequence ran,
    // so a failed run never emits a partial document.
    println!("{}", document.to_json()?);
    Ok(())
}
