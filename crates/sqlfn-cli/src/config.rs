//! Registry configuration loading.

use anyhow::{Context, Result};
use sqlfn_core::RegistryConfig;
use std::path::Path;

/// Loads the registry configuration, falling back to defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<RegistryConfig> {
    let Some(path) = path else {
        return Ok(RegistryConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}
