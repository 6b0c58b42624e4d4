use std::path::PathBuf;

// config lets you read a separate config file
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_SETTINGS_FILE: &str = "atomspace";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Socket address the REST server binds to.
    pub listen: String,
    /// Used for the log filter when `RUST_LOG` is not set.
    pub log_filter: String,
    /// JSON file holding an array of atoms to create at startup.
    #[serde(default)]
    pub seed: Option<PathBuf>,
}

impl Settings {
    /// Reads `atomspace.{toml,json,yaml,...}` from the working directory if present,
    /// then `ATOMSPACE_*` environment variables on top.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_SETTINGS_FILE)
    }
    pub fn load_from(name: &str) -> Result<Self> {
        let settings = Config::builder()
            .set_default("listen", DEFAULT_LISTEN)?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("ATOMSPACE"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
