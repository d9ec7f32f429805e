use std::error::Error;

use clap::Subcommand;
use tabata_core::config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the active session configuration
    Show {
        /// Show the fast debug configuration
        #[arg(long)]
        debug: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the configuration file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn Error>> {
    match action {
        ConfigAction::Show { debug, json } => {
            let config = super::active_config(debug)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string(&config)?);
            }
        }
        ConfigAction::Path => {
            println!("{}", config::config_path().display());
        }
    }
    Ok(())
}
