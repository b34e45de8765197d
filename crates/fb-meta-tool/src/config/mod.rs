//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Build a validated configuration from a connection string alone.
    pub fn from_connection_string(conn_str: &str) -> Result<Self> {
        let config = Config::with_connection(ConnectionConfig::from_connection_string(conn_str)?);
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

/// The `export` section alone; other sections are ignored.
#[derive(Deserialize)]
struct ExportSection {
    #[serde(default)]
    export: ExportConfig,
}

impl ExportConfig {
    /// Load only the `export` section of a configuration file, for commands
    /// that need no database.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate the `export` section of a YAML configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let section: ExportSection = serde_yaml::from_str(yaml)?;
        validation::validate_export(&section.export)?;
        Ok(section.export)
    }
}
