//! Stored preset value payloads
//!
//! A preset keeps parameter values in five payload shapes: float, int and
//! string vectors, and float / color ramps. Input bindings use a sixth,
//! richer record ([`InputValues`](crate::input::InputValues)).
//!
//! Every payload implements [`PresetPayload`], which exposes a coarse legacy
//! [`ValueKind`] and a short human-readable rendering. Neither is used for
//! dispatch: callers branch on the concrete payload type, or on
//! [`PresetValueRef`] when they need to handle all of them uniformly.

use serde::{Deserialize, Serialize};

use crate::input::InputValues;

/// Coarse value category reported by payloads
///
/// Ramp and input payloads report [`ValueKind::String`]. The category is kept
/// for callers that only need a rough grouping and must not drive dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Invalid,
    Float,
    Int,
    String,
}

/// Common behaviour of all stored payloads
pub trait PresetPayload {
    /// Legacy coarse category of this payload
    fn value_kind(&self) -> ValueKind;

    /// Short informational rendering ("1.0, 2.0, 3.0", "5 float points.").
    /// Not meant to be parsed.
    fn describe(&self) -> String;
}

// ─────────────────────────────────────────────────────────────────────────────
// Vector payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Float components of a float or color parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatValues {
    pub values: Vec<f32>,
}

/// Integer components of an int, choice or toggle parameter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntValues {
    pub values: Vec<i32>,
}

/// String components of a string, file or label-choice parameter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringValues {
    pub values: Vec<String>,
}

impl FloatValues {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
        }
    }
}

impl IntValues {
    pub fn new(values: impl Into<Vec<i32>>) -> Self {
        Self {
            values: values.into(),
        }
    }
}

impl StringValues {
    pub fn new<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl PresetPayload for FloatValues {
    fn value_kind(&self) -> ValueKind {
        ValueKind::Float
    }

    fn describe(&self) -> String {
        self.values
            .iter()
            .map(|v| format!("{:?}", v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl PresetPayload for IntValues {
    fn value_kind(&self) -> ValueKind {
        ValueKind::Int
    }

    fn describe(&self) -> String {
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl PresetPayload for StringValues {
    fn value_kind(&self) -> ValueKind {
        ValueKind::String
    }

    fn describe(&self) -> String {
        self.values.join(", ")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ramp payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Interpolation used between a ramp point and the next one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RampInterpolation {
    Constant,
    #[default]
    Linear,
    CatmullRom,
    MonotoneCubic,
    Bezier,
    BSpline,
    Hermite,
}

/// Linear RGBA color stored in color ramps
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from three channels
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// A single ramp point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampPoint<T> {
    pub position: f32,
    pub value: T,
    pub interpolation: RampInterpolation,
}

impl<T> RampPoint<T> {
    pub fn new(position: f32, value: T, interpolation: RampInterpolation) -> Self {
        Self {
            position,
            value,
            interpolation,
        }
    }
}

/// Points of a float ramp, in captured order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatRampValues {
    pub points: Vec<RampPoint<f32>>,
}

/// Points of a color ramp, in captured order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorRampValues {
    pub points: Vec<RampPoint<Rgba>>,
}

impl FloatRampValues {
    pub fn new(points: impl Into<Vec<RampPoint<f32>>>) -> Self {
        Self {
            points: points.into(),
        }
    }
}

impl ColorRampValues {
    pub fn new(points: impl Into<Vec<RampPoint<Rgba>>>) -> Self {
        Self {
            points: points.into(),
        }
    }
}

impl PresetPayload for FloatRampValues {
    fn value_kind(&self) -> ValueKind {
        ValueKind::String
    }

    fn describe(&self) -> String {
        format!("{} float points.", self.points.len())
    }
}

impl PresetPayload for ColorRampValues {
    fn value_kind(&self) -> ValueKind {
        ValueKind::String
    }

    fn describe(&self) -> String {
        format!("{} color points.", self.points.len())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Borrowed view over any payload
// ─────────────────────────────────────────────────────────────────────────────

/// Borrowed view of a stored payload, tagged by the mapping it lives in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresetValueRef<'a> {
    Float(&'a FloatValues),
    Int(&'a IntValues),
    String(&'a StringValues),
    FloatRamp(&'a FloatRampValues),
    ColorRamp(&'a ColorRampValues),
    Input(&'a InputValues),
}

impl PresetValueRef<'_> {
    /// The payload as a trait object
    pub fn payload(&self) -> &dyn PresetPayload {
        match *self {
            PresetValueRef::Float(v) => v,
            PresetValueRef::Int(v) => v,
            PresetValueRef::String(v) => v,
            PresetValueRef::FloatRamp(v) => v,
            PresetValueRef::ColorRamp(v) => v,
            PresetValueRef::Input(v) => v,
        }
    }

    /// Name of the payload variant, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            PresetValueRef::Float(_) => "float",
            PresetValueRef::Int(_) => "int",
            PresetValueRef::String(_) => "string",
            PresetValueRef::FloatRamp(_) => "float ramp",
            PresetValueRef::ColorRamp(_) => "color ramp",
            PresetValueRef::Input(_) => "input",
        }
    }

    pub fn value_kind(&self) -> ValueKind {
        self.payload().value_kind()
    }

    pub fn describe(&self) -> String {
        self.payload().describe()
    }
}
