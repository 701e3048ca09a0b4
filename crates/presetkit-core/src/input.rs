//! Input binding records
//!
//! An input binding is a slot on a procedural asset that accepts external
//! objects (meshes, curves, actors in a world) instead of scalar values.
//! Presets record each binding as an [`InputValues`]: the export options,
//! the input type, how the binding is identified (parameter name or
//! positional index) and the bound objects with their transforms.
//!
//! Object references are weak. A preset never owns what it points at, and a
//! reference that no longer resolves is reported at apply time rather than
//! rejected at capture time.

use std::fmt;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::adapter::InputAdapter;
use crate::value::{PresetPayload, ValueKind};

/// Categories of input the host knows about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputType {
    #[default]
    Invalid,
    Geometry,
    Curve,
    Asset,
    Landscape,
    World,
    Skeletal,
    GeometryCollection,
}

impl InputType {
    pub fn name(&self) -> &'static str {
        match self {
            InputType::Invalid => "Invalid",
            InputType::Geometry => "Geometry",
            InputType::Curve => "Curve",
            InputType::Asset => "Asset",
            InputType::Landscape => "Landscape",
            InputType::World => "World",
            InputType::Skeletal => "Skeletal",
            InputType::GeometryCollection => "GeometryCollection",
        }
    }
}

/// Whether an input of this type can be captured and re-applied
pub fn is_supported_input_type(input_type: InputType) -> bool {
    matches!(
        input_type,
        InputType::Geometry | InputType::Curve | InputType::Asset | InputType::World
    )
}

/// Export options of an input binding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub keep_world_transform: bool,
    pub pack_geometry_before_merging: bool,
    pub export_input_as_reference: bool,
    pub export_lods: bool,
    pub export_sockets: bool,
    pub export_colliders: bool,
    pub export_material_parameters: bool,
    pub merge_spline_mesh_components: bool,
    pub prefer_nanite_fallback_mesh: bool,
}

/// Weak reference to an external object, stored as its object path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectRef(String);

impl ObjectRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An object bound to an input, with its transform
///
/// `object` is `None` for an empty slot (a reference that failed to resolve
/// when it was bound).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputObject {
    pub object: Option<ObjectRef>,
    pub transform: Mat4,
}

impl InputObject {
    pub fn new(object: impl Into<ObjectRef>, transform: Mat4) -> Self {
        Self {
            object: Some(object.into()),
            transform,
        }
    }
}

/// How an input record finds its live binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding<'a> {
    /// Input exposed through an operator-path parameter
    Parameter(&'a str),
    /// Positional input of the asset
    Index(usize),
}

impl fmt::Display for InputBinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputBinding::Parameter(name) => write!(f, "input parameter '{}'", name),
            InputBinding::Index(index) => write!(f, "input #{}", index),
        }
    }
}

/// Stored state of one input binding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputValues {
    pub export_options: ExportOptions,
    pub input_type: InputType,
    pub is_parameter_input: bool,
    /// Only meaningful when `is_parameter_input` is set
    pub parameter_name: String,
    /// Only meaningful when `is_parameter_input` is not set
    pub input_index: usize,
    pub input_objects: Vec<InputObject>,
}

impl InputValues {
    /// Record bound to an operator-path parameter
    pub fn for_parameter(name: impl Into<String>, input_type: InputType) -> Self {
        Self {
            input_type,
            is_parameter_input: true,
            parameter_name: name.into(),
            ..Default::default()
        }
    }

    /// Record bound to a positional input
    pub fn for_index(index: usize, input_type: InputType) -> Self {
        Self {
            input_type,
            is_parameter_input: false,
            input_index: index,
            ..Default::default()
        }
    }

    /// The half of the record that identifies the live binding
    pub fn binding(&self) -> InputBinding<'_> {
        if self.is_parameter_input {
            InputBinding::Parameter(&self.parameter_name)
        } else {
            InputBinding::Index(self.input_index)
        }
    }

    /// Refresh type, export options and bound objects from a live input.
    ///
    /// The binding identity (parameter name / index) is left untouched.
    pub fn update_from_input(&mut self, input: &dyn InputAdapter) {
        self.input_type = input.input_type();
        self.export_options = input.export_options();
        self.input_objects = input.objects();
    }
}

impl PresetPayload for InputValues {
    fn value_kind(&self) -> ValueKind {
        ValueKind::String
    }

    fn describe(&self) -> String {
        format!(
            "{} {} ({} objects)",
            self.input_type.name(),
            self.binding(),
            self.input_objects.len()
        )
    }
}
