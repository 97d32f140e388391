//! network command - compose the shared network stack document.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use strata_compose::NetworkStack;
use strata_settings::SettingsLoader;

#[derive(Args)]
pub struct NetworkArgs {
    /// Environment settings file (YAML with a config:aws section)
    pub settings: PathBuf,
}

pub fn execute(args: NetworkArgs) -> Result<()> {
    info!("Composing network stack from {:?}", args.settings);

    let settings = SettingsLoader::from_file(&args.settings)?;
    let document = NetworkStack::compose(&settings)?;

    println!("{}", document.to_json()?);
    Ok(())
}
