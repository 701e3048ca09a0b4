//! Error types for the on-disk preset library

use std::path::PathBuf;

use presetkit_core::PresetError;
use thiserror::Error;

/// Errors that can occur while reading or writing library presets
#[derive(Debug, Error)]
pub enum LibraryError {
    /// No preset file exists for this name
    #[error("Preset '{0}' not found")]
    NotFound(String),

    /// A preset file exists and overwriting is disabled
    #[error("Preset '{0}' already exists")]
    AlreadyExists(String),

    /// Filesystem operation failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Preset file is not valid YAML for a preset
    #[error("Failed to parse preset file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Preset could not be serialized
    #[error("Failed to serialize preset: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// Preset failed validation before saving
    #[error(transparent)]
    Invalid(#[from] PresetError),
}

impl LibraryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LibraryError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;
