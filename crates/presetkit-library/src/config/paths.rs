//! Standard locations for the preset library

use std::path::PathBuf;

/// Get the default library root
///
/// Returns: `<data dir>/presetkit`, or `~/presetkit` where the platform has
/// no data directory.
pub fn default_library_path() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("presetkit")
}

/// Get the default path of a config file inside the library root
pub fn default_config_path(filename: &str) -> PathBuf {
    default_library_path().join(filename)
}
