//! Error types for preset operations
//!
//! Two families of errors live here:
//! - [`PresetError`] for the few conditions that stop an operation outright
//!   (restricted targets, instantiation failures, invalid presets)
//! - [`AdapterError`] for failures reported by a live parameter or input
//!   adapter. Apply turns these into diagnostics instead of aborting.

use thiserror::Error;

use crate::adapter::AssetId;

/// Errors that abort a preset operation
#[derive(Debug, Error)]
pub enum PresetError {
    /// The preset may only be applied to its source asset
    #[error("Preset is restricted to asset '{expected}' but target is '{actual}'")]
    RestrictedTarget { expected: AssetId, actual: AssetId },

    /// The preset is not flagged for instantiation or has no source asset
    #[error("Preset '{0}' cannot be used to instantiate an asset")]
    InstantiationUnavailable(String),

    /// The asset factory could not create an instance of the source asset
    #[error("Failed to instantiate asset '{source_asset}'")]
    InstantiationFailed { source_asset: AssetId },

    /// Structural problem with a preset (empty name, unbound input record, ...)
    #[error("Invalid preset: {0}")]
    InvalidPreset(String),
}

/// Result type for preset operations
pub type PresetResult<T> = Result<T, PresetError>;

/// Errors reported by parameter and input adapters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    /// The parameter does not support the requested operation
    #[error("Parameter '{parameter}' does not support {operation}")]
    Unsupported {
        parameter: String,
        operation: &'static str,
    },

    /// Component index is past the parameter's component count
    #[error("Component {index} out of range for parameter '{parameter}' (has {count})")]
    ComponentOutOfRange {
        parameter: String,
        index: usize,
        count: usize,
    },

    /// Choice index is past the number of options
    #[error("Choice index {index} out of range for parameter '{parameter}' ({count} options)")]
    ChoiceOutOfRange {
        parameter: String,
        index: usize,
        count: usize,
    },

    /// No option carries the requested label
    #[error("No option labelled '{label}' on parameter '{parameter}'")]
    UnknownChoiceLabel { parameter: String, label: String },
}

impl AdapterError {
    /// Shorthand for [`AdapterError::Unsupported`]
    pub fn unsupported(parameter: &str, operation: &'static str) -> Self {
        Self::Unsupported {
            parameter: parameter.to_string(),
            operation,
        }
    }
}

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
