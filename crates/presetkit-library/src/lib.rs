//! Presetkit Library - On-disk collection of presets
//!
//! Presets are stored as YAML files in a folder under a library root, with
//! the library's settings in `library.yaml` next to that folder.

pub mod config;
pub mod error;
pub mod library;

pub use config::{load_config, save_config, LibraryConfig};
pub use error::{LibraryError, LibraryResult};
pub use library::{sanitize_filename, PresetLibrary};
