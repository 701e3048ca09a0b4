//! YAML configuration I/O
//!
//! Loading never fails: a missing file or one that does not parse yields the
//! default configuration. Saving creates parent directories as needed.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;

/// Load configuration from a YAML file, falling back to defaults
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match read_config(path) {
        Ok(Some(config)) => {
            log::debug!("[PRESET_LIBRARY] Loaded config from {:?}", path);
            config
        }
        Ok(None) => {
            log::debug!("[PRESET_LIBRARY] No config at {:?}, using defaults", path);
            T::default()
        }
        Err(e) => {
            log::warn!("[PRESET_LIBRARY] {:#}, using defaults", e);
            T::default()
        }
    }
}

/// `Ok(None)` when the file does not exist
fn read_config<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to read config {:?}", path)),
    };
    serde_yaml::from_str(&contents)
        .map(Some)
        .with_context(|| format!("Failed to parse config {:?}", path))
}

/// Write configuration as YAML, creating the parent directory first
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("Failed to serialize config")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {:?}", parent))?;
    }
    std::fs::write(path, yaml).with_context(|| format!("Failed to write config {:?}", path))?;
    log::debug!("[PRESET_LIBRARY] Saved config to {:?}", path);
    Ok(())
}
