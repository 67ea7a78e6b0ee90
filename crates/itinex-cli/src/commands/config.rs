//! Config command - inspect or initialize pipeline configuration.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use itinex_core::ItinexConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the active configuration as JSON
    Show,

    /// Write a default configuration file
    Init {
        /// Destination path
        #[arg(default_value = "itinex.json")]
        path: PathBuf,
    },
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = if let Some(path) = config_path {
                ItinexConfig::from_file(std::path::Path::new(path))?
            } else {
                ItinexConfig::default()
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Init { path } => {
            if path.exists() {
                anyhow::bail!("Config file already exists: {}", path.display());
            }
            ItinexConfig::default().save(&path)?;
            println!(
                "{} Default config written to {}",
                style("✓").green(),
                path.display()
            );
        }
    }

    Ok(())
}
