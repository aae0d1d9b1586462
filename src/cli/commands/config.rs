//! Config Command
//!
//! Inspect OpenWiki configuration.
//!
//! Usage:
//!   openwiki config show [-f json]
//!   openwiki config path

use crate::config::{Config, ConfigLoader};
use crate::types::{Result, WikiError};

/// Print the effective configuration (merged from all sources)
pub fn show(config: &Config, format: &str) -> Result<()> {
    let as_json = match format {
        "toml" => false,
        "json" => true,
        other => {
            return Err(WikiError::Config(format!(
                "Invalid format '{}'. Valid values: toml, json",
                other
            )));
        }
    };

    println!("{}", ConfigLoader::render(config, as_json)?);
    Ok(())
}

/// Print configuration file locations
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}
