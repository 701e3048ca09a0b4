//! In-memory asset instance and factory

use std::collections::BTreeMap;

use crate::adapter::{AssetAdapter, AssetFactory, AssetId, InputAdapter, ParameterAdapter};

use super::input::MemoryInput;
use super::parameter::MemoryParameter;

/// An asset instance holding its parameters and inputs in presentation order
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryAsset {
    id: AssetId,
    parameters: Vec<MemoryParameter>,
    inputs: Vec<MemoryInput>,
    reset_count: usize,
}

impl MemoryAsset {
    pub fn new(id: impl Into<AssetId>) -> Self {
        Self {
            id: id.into(),
            parameters: Vec::new(),
            inputs: Vec::new(),
            reset_count: 0,
        }
    }

    pub fn with_parameter(mut self, parameter: MemoryParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_input(mut self, input: MemoryInput) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&MemoryParameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut MemoryParameter> {
        self.parameters.iter_mut().find(|p| p.name() == name)
    }

    pub fn parameter_input(&self, name: &str) -> Option<&MemoryInput> {
        self.inputs
            .iter()
            .find(|input| input.parameter_name() == Some(name))
    }

    pub fn positional_input(&self, index: usize) -> Option<&MemoryInput> {
        self.inputs
            .iter()
            .find(|input| input.input_index() == Some(index))
    }

    /// How many times the asset was reverted to defaults
    pub fn reset_count(&self) -> usize {
        self.reset_count
    }
}

impl AssetAdapter for MemoryAsset {
    fn identity(&self) -> AssetId {
        self.id.clone()
    }

    fn parameters(&self) -> Vec<&dyn ParameterAdapter> {
        self.parameters
            .iter()
            .map(|p| p as &dyn ParameterAdapter)
            .collect()
    }

    fn inputs(&self) -> Vec<&dyn InputAdapter> {
        self.inputs.iter().map(|i| i as &dyn InputAdapter).collect()
    }

    fn parameter_by_name(&mut self, name: &str) -> Option<&mut dyn ParameterAdapter> {
        self.parameters
            .iter_mut()
            .find(|p| p.name() == name)
            .map(|p| p as &mut dyn ParameterAdapter)
    }

    fn input_by_parameter_name(&mut self, name: &str) -> Option<&mut dyn InputAdapter> {
        self.inputs
            .iter_mut()
            .find(|input| input.parameter_name() == Some(name))
            .map(|input| input as &mut dyn InputAdapter)
    }

    fn input_by_index(&mut self, index: usize) -> Option<&mut dyn InputAdapter> {
        self.inputs
            .iter_mut()
            .find(|input| input.input_index() == Some(index))
            .map(|input| input as &mut dyn InputAdapter)
    }

    fn reset_all_parameters_to_defaults(&mut self) {
        for parameter in &mut self.parameters {
            parameter.reset();
        }
        self.reset_count += 1;
    }
}

/// Factory that instantiates registered assets by cloning a template
#[derive(Debug, Clone, Default)]
pub struct MemoryFactory {
    templates: BTreeMap<AssetId, MemoryAsset>,
    instantiated: usize,
}

impl MemoryFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under its own identity
    pub fn register(&mut self, template: MemoryAsset) {
        self.templates.insert(template.identity(), template);
    }

    pub fn instantiated(&self) -> usize {
        self.instantiated
    }
}

impl AssetFactory for MemoryFactory {
    type Asset = MemoryAsset;

    fn instantiate(&mut self, source: &AssetId) -> Option<MemoryAsset> {
        let asset = self.templates.get(source)?.clone();
        self.instantiated += 1;
        log::debug!("[PRESET] Instantiated '{}'", source);
        Some(asset)
    }
}
