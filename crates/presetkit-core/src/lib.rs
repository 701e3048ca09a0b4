//! Presetkit Core - Parameter presets for procedural asset instances
//!
//! A [`Preset`] stores the parameter values and input bindings of an asset
//! instance in five typed mappings plus a list of input records. Values are
//! captured from live parameters by [`ingest`] and written back by [`apply`].
//! Live objects are only ever reached through the traits in [`adapter`], so
//! the core carries no host dependency. [`host`] provides an in-memory
//! implementation of those traits.

pub mod adapter;
pub mod apply;
pub mod capture;
pub mod diagnostics;
pub mod error;
pub mod host;
pub mod ingest;
pub mod input;
pub mod preset;
pub mod value;

pub use adapter::{
    AssetAdapter, AssetFactory, AssetId, InputAdapter, ParameterAdapter, ParameterKind,
};
pub use apply::{apply_preset, instantiate_preset};
pub use capture::{capture_preset, CaptureOptions, CaptureReport};
pub use diagnostics::{ApplyReport, Diagnostic, DiagnosticKind};
pub use error::{AdapterError, AdapterResult, PresetError, PresetResult};
pub use ingest::{ingest_generic_input, ingest_input, ingest_parameter, IngestOutcome};
pub use input::{ExportOptions, InputObject, InputType, InputValues, ObjectRef};
pub use preset::{ParameterMap, ParameterMapping, Preset};
pub use value::{
    ColorRampValues, FloatRampValues, FloatValues, IntValues, PresetPayload, PresetValueRef,
    RampInterpolation, RampPoint, Rgba, StringValues, ValueKind,
};
