//! link command - turn applied network outputs into application settings.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use strata_compose::StackLinker;

#[derive(Args)]
pub struct LinkArgs {
    /// Resolved network-stack outputs (YAML mapping of name to value)
    pub outputs: PathBuf,

    /// Position of the application in the network stack's list
    #[arg(long, default_value_t = 0)]
    pub application_index: usize,
}

pub fn execute(args: LinkArgs) -> Result<()> {
    info!("Linking network outputs from {:?}", args.outputs);

    let content = fs::read_to_string(&args.outputs)?;
    let values: BTreeMap<String, String> = serde_yaml::from_str(&content)?;

    let linker = StackLinker::new()
        .with_network_bindings()
        .with_application_bindings(args.application_index);

    println!("{}", linker.to_yaml(&values)?);
    Ok(())
}
