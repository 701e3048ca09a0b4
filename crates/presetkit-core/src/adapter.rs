//! Adapter traits over live host objects
//!
//! The preset core never touches host types. Instead the host presents its
//! parameters, inputs and asset instances through the traits in this module:
//!
//! - [`ParameterAdapter`] - one named parameter with typed component access
//! - [`InputAdapter`] - one input binding (export options + bound objects)
//! - [`AssetAdapter`] - an asset instance that resolves parameters and inputs
//! - [`AssetFactory`] - creates new asset instances from a source asset
//!
//! Typed accessors have default implementations that report the operation as
//! unsupported, so an adapter only implements what its [`ParameterKind`]
//! actually stores.

use std::fmt;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, AdapterResult};
use crate::input::{ExportOptions, InputObject, InputType, ObjectRef};
use crate::value::{RampPoint, Rgba};

/// Opaque identity of an asset, compared against a preset's source asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Concrete kinds of live parameter the core recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    Int,
    Choice,
    Toggle,
    Float,
    Color,
    String,
    File,
    FloatRamp,
    ColorRamp,
}

impl ParameterKind {
    pub fn name(&self) -> &'static str {
        match self {
            ParameterKind::Int => "int",
            ParameterKind::Choice => "choice",
            ParameterKind::Toggle => "toggle",
            ParameterKind::Float => "float",
            ParameterKind::Color => "color",
            ParameterKind::String => "string",
            ParameterKind::File => "file",
            ParameterKind::FloatRamp => "float ramp",
            ParameterKind::ColorRamp => "color ramp",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// View over one live parameter
pub trait ParameterAdapter {
    /// Parameter identity within its asset
    fn name(&self) -> &str;

    fn kind(&self) -> ParameterKind;

    /// 1 for scalars, choices and toggles; N for vectors; point count for ramps
    fn component_count(&self) -> usize;

    fn int_value(&self, _index: usize) -> Option<i32> {
        None
    }

    fn set_int_value(&mut self, _index: usize, _value: i32) -> AdapterResult<()> {
        Err(AdapterError::unsupported(self.name(), "set_int_value"))
    }

    fn float_value(&self, _index: usize) -> Option<f32> {
        None
    }

    fn set_float_value(&mut self, _index: usize, _value: f32) -> AdapterResult<()> {
        Err(AdapterError::unsupported(self.name(), "set_float_value"))
    }

    fn string_value(&self, _index: usize) -> Option<String> {
        None
    }

    fn set_string_value(&mut self, _index: usize, _value: &str) -> AdapterResult<()> {
        Err(AdapterError::unsupported(self.name(), "set_string_value"))
    }

    /// Toggle state (toggle parameters only)
    fn is_checked(&self) -> Option<bool> {
        None
    }

    fn set_checked(&mut self, _checked: bool) -> AdapterResult<()> {
        Err(AdapterError::unsupported(self.name(), "set_checked"))
    }

    /// Option labels in presentation order (choice parameters only)
    fn choice_options(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether the choice currently presents its value as a label rather
    /// than an index. Decides which mapping Ingest writes a choice into.
    fn is_string_choice(&self) -> bool {
        false
    }

    fn selected_index(&self) -> Option<usize> {
        None
    }

    fn selected_label(&self) -> Option<String> {
        let index = self.selected_index()?;
        self.choice_options().into_iter().nth(index)
    }

    fn set_selected_index(&mut self, _index: usize) -> AdapterResult<()> {
        Err(AdapterError::unsupported(self.name(), "set_selected_index"))
    }

    /// Select the option with exactly this label
    fn set_selected_label(&mut self, label: &str) -> AdapterResult<()> {
        let options = self.choice_options();
        match options.iter().position(|option| option == label) {
            Some(index) => self.set_selected_index(index),
            None => Err(AdapterError::UnknownChoiceLabel {
                parameter: self.name().to_string(),
                label: label.to_string(),
            }),
        }
    }

    fn float_ramp_points(&self) -> Option<Vec<RampPoint<f32>>> {
        None
    }

    /// Replace every point of a float ramp
    fn set_float_ramp_points(&mut self, _points: &[RampPoint<f32>]) -> AdapterResult<()> {
        Err(AdapterError::unsupported(self.name(), "set_float_ramp_points"))
    }

    fn color_ramp_points(&self) -> Option<Vec<RampPoint<Rgba>>> {
        None
    }

    /// Replace every point of a color ramp
    fn set_color_ramp_points(&mut self, _points: &[RampPoint<Rgba>]) -> AdapterResult<()> {
        Err(AdapterError::unsupported(self.name(), "set_color_ramp_points"))
    }
}

/// View over one live input binding
pub trait InputAdapter {
    fn input_type(&self) -> InputType;
    fn set_input_type(&mut self, input_type: InputType);

    fn export_options(&self) -> ExportOptions;
    fn set_export_options(&mut self, options: ExportOptions);

    fn is_parameter_input(&self) -> bool;

    /// Name of the operator-path parameter, for parameter inputs
    fn parameter_name(&self) -> Option<&str>;

    /// Position of the input on the asset, for positional inputs
    fn input_index(&self) -> Option<usize>;

    /// Bound objects in order
    fn objects(&self) -> Vec<InputObject>;

    fn clear_objects(&mut self);

    /// Append an object slot. Returns `false` when the reference did not
    /// resolve and the slot was left empty.
    fn append_object(&mut self, object: Option<&ObjectRef>, transform: Mat4) -> bool;
}

/// View over a live procedural asset instance
pub trait AssetAdapter {
    fn identity(&self) -> AssetId;

    /// All parameters in presentation order
    fn parameters(&self) -> Vec<&dyn ParameterAdapter>;

    /// All input bindings in presentation order
    fn inputs(&self) -> Vec<&dyn InputAdapter>;

    fn parameter_by_name(&mut self, name: &str) -> Option<&mut dyn ParameterAdapter>;

    fn input_by_parameter_name(&mut self, name: &str) -> Option<&mut dyn InputAdapter>;

    fn input_by_index(&mut self, index: usize) -> Option<&mut dyn InputAdapter>;

    fn reset_all_parameters_to_defaults(&mut self);
}

/// Creates new asset instances (used when a preset seeds an instantiation)
pub trait AssetFactory {
    type Asset: AssetAdapter;

    fn instantiate(&mut self, source: &AssetId) -> Option<Self::Asset>;
}
