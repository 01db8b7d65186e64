//! Shimmer configuration file handling
//!
//! `shimmer.toml` holds a single `[shimmer]` table. Every field is optional
//! and falls back to the engine default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shimmer_view::ShimmerConfiguration;
use std::fs;
use std::path::Path;

/// Default file name looked up by `config init`
pub const CONFIG_FILE: &str = "shimmer.toml";

/// Contents of a `shimmer.toml`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShimmerFile {
    #[serde(default)]
    pub shimmer: ShimmerConfiguration,
}

impl ShimmerFile {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        file.shimmer
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(file)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize shimmer config")
    }
}

/// Load `path` if given, otherwise start from the defaults
pub fn load_or_default(path: Option<&Path>) -> Result<ShimmerConfiguration> {
    match path {
        Some(path) => Ok(ShimmerFile::load(path)?.shimmer),
        None => Ok(ShimmerConfiguration::default()),
    }
}
