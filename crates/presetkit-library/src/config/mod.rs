//! Library configuration

mod io;
mod paths;

pub use io::{load_config, save_config};
pub use paths::{default_config_path, default_library_path};

use serde::{Deserialize, Serialize};

/// Config file name inside a library root
pub const CONFIG_FILENAME: &str = "library.yaml";

/// Settings of one preset library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Preset folder, relative to the library root
    pub presets_folder: String,
    /// Extension of preset files, without the dot
    pub file_extension: String,
    /// Replace an existing preset file on save
    pub overwrite_existing: bool,
    /// Run preset validation before saving
    pub validate_on_save: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            presets_folder: "presets".to_string(),
            file_extension: "yaml".to_string(),
            overwrite_existing: true,
            validate_on_save: true,
        }
    }
}
