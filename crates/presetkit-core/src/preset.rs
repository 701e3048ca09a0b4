//! The preset container
//!
//! A [`Preset`] is a named snapshot of parameter values and input bindings
//! captured from a procedural asset instance:
//!
//! ```text
//! Preset
//!   name / description / source_asset / flags
//!   int_parameters         name → IntValues
//!   float_parameters       name → FloatValues
//!   string_parameters      name → StringValues
//!   ramp_float_parameters  name → FloatRampValues
//!   ramp_color_parameters  name → ColorRampValues
//!   input_parameters       [InputValues]   (ordered, duplicates allowed)
//! ```
//!
//! Each mapping has unique keys. The container itself does no validation
//! beyond that; [`Preset::validate`] is available for callers that persist
//! presets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::adapter::AssetId;
use crate::error::{PresetError, PresetResult};
use crate::input::InputValues;
use crate::value::{
    ColorRampValues, FloatRampValues, FloatValues, IntValues, PresetValueRef, StringValues,
};

/// Name-keyed mapping of one payload kind
pub type ParameterMap<T> = BTreeMap<String, T>;

/// The five name-keyed mappings of a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterMapping {
    Int,
    Float,
    String,
    FloatRamp,
    ColorRamp,
}

impl ParameterMapping {
    /// All mappings, in apply order
    pub const ALL: [ParameterMapping; 5] = [
        ParameterMapping::Int,
        ParameterMapping::Float,
        ParameterMapping::String,
        ParameterMapping::FloatRamp,
        ParameterMapping::ColorRamp,
    ];
}

/// A captured parameter preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    /// Display label
    pub name: String,
    pub description: String,
    /// Asset this preset was captured from (weak, may be absent)
    pub source_asset: Option<AssetId>,
    /// Revert every parameter on the target to its default before applying
    pub revert_before_apply: bool,
    /// Refuse targets other than `source_asset`
    pub restricted_to_source: bool,
    /// Allow using this preset to instantiate `source_asset`
    pub can_instantiate: bool,

    pub float_parameters: ParameterMap<FloatValues>,
    pub int_parameters: ParameterMap<IntValues>,
    pub string_parameters: ParameterMap<StringValues>,
    pub ramp_float_parameters: ParameterMap<FloatRampValues>,
    pub ramp_color_parameters: ParameterMap<ColorRampValues>,

    /// Parameter-bound and positional inputs, in presentation order
    pub input_parameters: Vec<InputValues>,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            name: "Preset".to_string(),
            description: String::new(),
            source_asset: None,
            revert_before_apply: false,
            restricted_to_source: false,
            can_instantiate: false,
            float_parameters: ParameterMap::new(),
            int_parameters: ParameterMap::new(),
            string_parameters: ParameterMap::new(),
            ramp_float_parameters: ParameterMap::new(),
            ramp_color_parameters: ParameterMap::new(),
            input_parameters: Vec::new(),
        }
    }
}

impl Preset {
    /// Create an empty preset with the given label
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the source asset
    pub fn with_source(mut self, source: impl Into<AssetId>) -> Self {
        self.source_asset = Some(source.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether the restriction to the source asset is in force.
    ///
    /// Without a source asset there is nothing to restrict to, so the flag
    /// is treated as unset.
    pub fn is_restricted(&self) -> bool {
        self.restricted_to_source && self.source_asset.is_some()
    }

    /// Whether this preset may be applied to an asset with the given identity
    pub fn allows_target(&self, target: &AssetId) -> bool {
        !self.is_restricted() || self.source_asset.as_ref() == Some(target)
    }

    /// Source asset to instantiate from, if instantiation is enabled
    pub fn instantiation_source(&self) -> Option<&AssetId> {
        if self.can_instantiate {
            self.source_asset.as_ref()
        } else {
            None
        }
    }

    /// Whether any of the five parameter mappings holds this name
    pub fn has_parameter(&self, name: &str) -> bool {
        self.int_parameters.contains_key(name)
            || self.float_parameters.contains_key(name)
            || self.string_parameters.contains_key(name)
            || self.ramp_float_parameters.contains_key(name)
            || self.ramp_color_parameters.contains_key(name)
    }

    /// Look up a stored parameter value across the five mappings.
    ///
    /// Mappings are searched int, float, string, float ramp, color ramp.
    pub fn parameter(&self, name: &str) -> Option<PresetValueRef<'_>> {
        if let Some(v) = self.int_parameters.get(name) {
            return Some(PresetValueRef::Int(v));
        }
        if let Some(v) = self.float_parameters.get(name) {
            return Some(PresetValueRef::Float(v));
        }
        if let Some(v) = self.string_parameters.get(name) {
            return Some(PresetValueRef::String(v));
        }
        if let Some(v) = self.ramp_float_parameters.get(name) {
            return Some(PresetValueRef::FloatRamp(v));
        }
        self.ramp_color_parameters
            .get(name)
            .map(PresetValueRef::ColorRamp)
    }

    /// Remove a parameter from every mapping. Returns whether anything was removed.
    pub fn remove_parameter(&mut self, name: &str) -> bool {
        let mut removed = false;
        for mapping in ParameterMapping::ALL {
            removed |= self.remove_from(name, mapping);
        }
        removed
    }

    /// Remove a parameter from every mapping except `keep`
    pub fn remove_parameter_except(&mut self, name: &str, keep: ParameterMapping) {
        for mapping in ParameterMapping::ALL {
            if mapping != keep {
                self.remove_from(name, mapping);
            }
        }
    }

    fn remove_from(&mut self, name: &str, mapping: ParameterMapping) -> bool {
        match mapping {
            ParameterMapping::Int => self.int_parameters.remove(name).is_some(),
            ParameterMapping::Float => self.float_parameters.remove(name).is_some(),
            ParameterMapping::String => self.string_parameters.remove(name).is_some(),
            ParameterMapping::FloatRamp => self.ramp_float_parameters.remove(name).is_some(),
            ParameterMapping::ColorRamp => self.ramp_color_parameters.remove(name).is_some(),
        }
    }

    /// Number of entries across the five parameter mappings
    pub fn parameter_count(&self) -> usize {
        self.int_parameters.len()
            + self.float_parameters.len()
            + self.string_parameters.len()
            + self.ramp_float_parameters.len()
            + self.ramp_color_parameters.len()
    }

    /// True when neither parameters nor inputs have been captured
    pub fn is_empty(&self) -> bool {
        self.parameter_count() == 0 && self.input_parameters.is_empty()
    }

    /// Every stored entry with its name, in apply order.
    ///
    /// Input records are yielded under their parameter name (empty for
    /// positional inputs).
    pub fn entries(&self) -> impl Iterator<Item = (&str, PresetValueRef<'_>)> {
        let ints = self
            .int_parameters
            .iter()
            .map(|(k, v)| (k.as_str(), PresetValueRef::Int(v)));
        let floats = self
            .float_parameters
            .iter()
            .map(|(k, v)| (k.as_str(), PresetValueRef::Float(v)));
        let strings = self
            .string_parameters
            .iter()
            .map(|(k, v)| (k.as_str(), PresetValueRef::String(v)));
        let float_ramps = self
            .ramp_float_parameters
            .iter()
            .map(|(k, v)| (k.as_str(), PresetValueRef::FloatRamp(v)));
        let color_ramps = self
            .ramp_color_parameters
            .iter()
            .map(|(k, v)| (k.as_str(), PresetValueRef::ColorRamp(v)));
        let inputs = self
            .input_parameters
            .iter()
            .map(|v| (v.parameter_name.as_str(), PresetValueRef::Input(v)));

        ints.chain(floats)
            .chain(strings)
            .chain(float_ramps)
            .chain(color_ramps)
            .chain(inputs)
    }

    /// Check the structural invariants a persisted preset should satisfy
    pub fn validate(&self) -> PresetResult<()> {
        if self.name.trim().is_empty() {
            return Err(PresetError::InvalidPreset(
                "preset name must not be empty".to_string(),
            ));
        }

        if let Some(position) = self
            .input_parameters
            .iter()
            .position(|input| input.is_parameter_input && input.parameter_name.is_empty())
        {
            return Err(PresetError::InvalidPreset(format!(
                "input record {} is parameter-bound but has no parameter name",
                position
            )));
        }

        Ok(())
    }
}
