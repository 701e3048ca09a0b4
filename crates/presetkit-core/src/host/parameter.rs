//! In-memory parameter

use crate::adapter::{ParameterAdapter, ParameterKind};
use crate::error::{AdapterError, AdapterResult};
use crate::value::{RampPoint, Rgba};

/// Stored value of an in-memory parameter
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryValue {
    Int(Vec<i32>),
    Float(Vec<f32>),
    /// 3 or 4 channels
    Color(Vec<f32>),
    String(Vec<String>),
    File(Vec<String>),
    Toggle(bool),
    Choice {
        options: Vec<String>,
        selected: usize,
        /// Presents its value as the selected label
        string_choice: bool,
    },
    FloatRamp(Vec<RampPoint<f32>>),
    ColorRamp(Vec<RampPoint<Rgba>>),
}

impl MemoryValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            MemoryValue::Int(_) => ParameterKind::Int,
            MemoryValue::Float(_) => ParameterKind::Float,
            MemoryValue::Color(_) => ParameterKind::Color,
            MemoryValue::String(_) => ParameterKind::String,
            MemoryValue::File(_) => ParameterKind::File,
            MemoryValue::Toggle(_) => ParameterKind::Toggle,
            MemoryValue::Choice { .. } => ParameterKind::Choice,
            MemoryValue::FloatRamp(_) => ParameterKind::FloatRamp,
            MemoryValue::ColorRamp(_) => ParameterKind::ColorRamp,
        }
    }
}

/// A named parameter holding its value and the default it reverts to
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryParameter {
    name: String,
    value: MemoryValue,
    default: MemoryValue,
}

fn strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Vec<String> {
    values.into_iter().map(Into::into).collect()
}

impl MemoryParameter {
    /// Create a parameter whose default is its initial value
    pub fn new(name: impl Into<String>, value: MemoryValue) -> Self {
        Self {
            name: name.into(),
            default: value.clone(),
            value,
        }
    }

    pub fn int(name: impl Into<String>, values: impl Into<Vec<i32>>) -> Self {
        Self::new(name, MemoryValue::Int(values.into()))
    }

    pub fn float(name: impl Into<String>, values: impl Into<Vec<f32>>) -> Self {
        Self::new(name, MemoryValue::Float(values.into()))
    }

    pub fn color(name: impl Into<String>, channels: impl Into<Vec<f32>>) -> Self {
        Self::new(name, MemoryValue::Color(channels.into()))
    }

    pub fn string<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(name, MemoryValue::String(strings(values)))
    }

    pub fn file<S: Into<String>>(
        name: impl Into<String>,
        paths: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(name, MemoryValue::File(strings(paths)))
    }

    pub fn toggle(name: impl Into<String>, checked: bool) -> Self {
        Self::new(name, MemoryValue::Toggle(checked))
    }

    /// Choice presenting its value as an index
    pub fn choice<S: Into<String>>(
        name: impl Into<String>,
        options: impl IntoIterator<Item = S>,
        selected: usize,
    ) -> Self {
        Self::new(
            name,
            MemoryValue::Choice {
                options: strings(options),
                selected,
                string_choice: false,
            },
        )
    }

    /// Choice presenting its value as a label
    pub fn string_choice<S: Into<String>>(
        name: impl Into<String>,
        options: impl IntoIterator<Item = S>,
        selected: usize,
    ) -> Self {
        Self::new(
            name,
            MemoryValue::Choice {
                options: strings(options),
                selected,
                string_choice: true,
            },
        )
    }

    pub fn float_ramp(name: impl Into<String>, points: impl Into<Vec<RampPoint<f32>>>) -> Self {
        Self::new(name, MemoryValue::FloatRamp(points.into()))
    }

    pub fn color_ramp(name: impl Into<String>, points: impl Into<Vec<RampPoint<Rgba>>>) -> Self {
        Self::new(name, MemoryValue::ColorRamp(points.into()))
    }

    /// Replace the default this parameter reverts to
    pub fn with_default(mut self, default: MemoryValue) -> Self {
        self.default = default;
        self
    }

    pub fn value(&self) -> &MemoryValue {
        &self.value
    }

    pub fn default_value(&self) -> &MemoryValue {
        &self.default
    }

    /// Restore the default value
    pub fn reset(&mut self) {
        self.value = self.default.clone();
    }

    fn out_of_range(&self, index: usize) -> AdapterError {
        AdapterError::ComponentOutOfRange {
            parameter: self.name.clone(),
            index,
            count: self.component_count(),
        }
    }
}

impl ParameterAdapter for MemoryParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ParameterKind {
        self.value.kind()
    }

    fn component_count(&self) -> usize {
        match &self.value {
            MemoryValue::Int(v) => v.len(),
            MemoryValue::Float(v) | MemoryValue::Color(v) => v.len(),
            MemoryValue::String(v) | MemoryValue::File(v) => v.len(),
            MemoryValue::Toggle(_) | MemoryValue::Choice { .. } => 1,
            MemoryValue::FloatRamp(p) => p.len(),
            MemoryValue::ColorRamp(p) => p.len(),
        }
    }

    fn int_value(&self, index: usize) -> Option<i32> {
        match &self.value {
            MemoryValue::Int(v) => v.get(index).copied(),
            _ => None,
        }
    }

    fn set_int_value(&mut self, index: usize, value: i32) -> AdapterResult<()> {
        let err = self.out_of_range(index);
        match &mut self.value {
            MemoryValue::Int(v) => {
                let slot = v.get_mut(index).ok_or(err)?;
                *slot = value;
                Ok(())
            }
            _ => Err(AdapterError::unsupported(&self.name, "set_int_value")),
        }
    }

    fn float_value(&self, index: usize) -> Option<f32> {
        match &self.value {
            MemoryValue::Float(v) | MemoryValue::Color(v) => v.get(index).copied(),
            _ => None,
        }
    }

    fn set_float_value(&mut self, index: usize, value: f32) -> AdapterResult<()> {
        let err = self.out_of_range(index);
        match &mut self.value {
            MemoryValue::Float(v) | MemoryValue::Color(v) => {
                let slot = v.get_mut(index).ok_or(err)?;
                *slot = value;
                Ok(())
            }
            _ => Err(AdapterError::unsupported(&self.name, "set_float_value")),
        }
    }

    fn string_value(&self, index: usize) -> Option<String> {
        match &self.value {
            MemoryValue::String(v) | MemoryValue::File(v) => v.get(index).cloned(),
            _ => None,
        }
    }

    fn set_string_value(&mut self, index: usize, value: &str) -> AdapterResult<()> {
        let err = self.out_of_range(index);
        match &mut self.value {
            MemoryValue::String(v) | MemoryValue::File(v) => {
                let slot = v.get_mut(index).ok_or(err)?;
                *slot = value.to_string();
                Ok(())
            }
            _ => Err(AdapterError::unsupported(&self.name, "set_string_value")),
        }
    }

    fn is_checked(&self) -> Option<bool> {
        match self.value {
            MemoryValue::Toggle(checked) => Some(checked),
            _ => None,
        }
    }

    fn set_checked(&mut self, checked: bool) -> AdapterResult<()> {
        match &mut self.value {
            MemoryValue::Toggle(value) => {
                *value = checked;
                Ok(())
            }
            _ => Err(AdapterError::unsupported(&self.name, "set_checked")),
        }
    }

    fn choice_options(&self) -> Vec<String> {
        match &self.value {
            MemoryValue::Choice { options, .. } => options.clone(),
            _ => Vec::new(),
        }
    }

    fn is_string_choice(&self) -> bool {
        matches!(
            self.value,
            MemoryValue::Choice {
                string_choice: true,
                ..
            }
        )
    }

    fn selected_index(&self) -> Option<usize> {
        match self.value {
            MemoryValue::Choice { selected, .. } => Some(selected),
            _ => None,
        }
    }

    fn set_selected_index(&mut self, index: usize) -> AdapterResult<()> {
        match &mut self.value {
            MemoryValue::Choice {
                options, selected, ..
            } => {
                if index >= options.len() {
                    return Err(AdapterError::ChoiceOutOfRange {
                        parameter: self.name.clone(),
                        index,
                        count: options.len(),
                    });
                }
                *selected = index;
                Ok(())
            }
            _ => Err(AdapterError::unsupported(&self.name, "set_selected_index")),
        }
    }

    fn float_ramp_points(&self) -> Option<Vec<RampPoint<f32>>> {
        match &self.value {
            MemoryValue::FloatRamp(points) => Some(points.clone()),
            _ => None,
        }
    }

    fn set_float_ramp_points(&mut self, points: &[RampPoint<f32>]) -> AdapterResult<()> {
        match &mut self.value {
            MemoryValue::FloatRamp(current) => {
                *current = points.to_vec();
                Ok(())
            }
            _ => Err(AdapterError::unsupported(&self.name, "set_float_ramp_points")),
        }
    }

    fn color_ramp_points(&self) -> Option<Vec<RampPoint<Rgba>>> {
        match &self.value {
            MemoryValue::ColorRamp(points) => Some(points.clone()),
            _ => None,
        }
    }

    fn set_color_ramp_points(&mut self, points: &[RampPoint<Rgba>]) -> AdapterResult<()> {
        match &mut self.value {
            MemoryValue::ColorRamp(current) => {
                *current = points.to_vec();
                Ok(())
            }
            _ => Err(AdapterError::unsupported(&self.name, "set_color_ramp_points")),
        }
    }
}
