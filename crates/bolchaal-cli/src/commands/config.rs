use clap::Subcommand;
use serde_json::json;

use bolchaal_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value (e.g. "rotation.window_size", "learner.faith")
    Get { key: String },
    /// Change one value and save; "none" clears the preferred mode
    Set { key: String, value: String },
    /// Print the whole configuration as JSON
    List,
    /// Overwrite the file with defaults; also recovers from a rejected file
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            let stored = config.get(&key).unwrap_or(value);
            println!("{}", serde_json::to_string_pretty(&json!({ "key": key, "value": stored }))?);
        }
        ConfigAction::List => {
            println!("{}", serde_json::to_string_pretty(&Config::load()?)?);
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "status": "reset", "config": config }))?
            );
        }
    }
    Ok(())
}
