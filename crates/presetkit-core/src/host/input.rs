//! In-memory input binding

use std::collections::BTreeSet;

use glam::Mat4;

use crate::adapter::InputAdapter;
use crate::input::{ExportOptions, InputObject, InputType, ObjectRef};

/// An input binding holding its objects directly.
///
/// Object references resolve unless they were registered with
/// [`MemoryInput::with_missing_object`], which simulates an asset that was
/// deleted or renamed since the preset was captured.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryInput {
    pub input_type: InputType,
    pub export_options: ExportOptions,
    parameter_name: Option<String>,
    index: Option<usize>,
    objects: Vec<InputObject>,
    missing: BTreeSet<ObjectRef>,
}

impl MemoryInput {
    /// Input exposed through an operator-path parameter
    pub fn parameter(name: impl Into<String>, input_type: InputType) -> Self {
        Self {
            input_type,
            export_options: ExportOptions::default(),
            parameter_name: Some(name.into()),
            index: None,
            objects: Vec::new(),
            missing: BTreeSet::new(),
        }
    }

    /// Positional input of the asset
    pub fn positional(index: usize, input_type: InputType) -> Self {
        Self {
            input_type,
            export_options: ExportOptions::default(),
            parameter_name: None,
            index: Some(index),
            objects: Vec::new(),
            missing: BTreeSet::new(),
        }
    }

    pub fn with_object(mut self, path: &str, transform: Mat4) -> Self {
        self.objects.push(InputObject::new(path, transform));
        self
    }

    /// Mark an object path as no longer resolvable
    pub fn with_missing_object(mut self, path: &str) -> Self {
        self.missing.insert(ObjectRef::new(path));
        self
    }

    pub fn bound_objects(&self) -> &[InputObject] {
        &self.objects
    }

    fn resolves(&self, object: &ObjectRef) -> bool {
        !self.missing.contains(object)
    }
}

impl InputAdapter for MemoryInput {
    fn input_type(&self) -> InputType {
        self.input_type
    }

    fn set_input_type(&mut self, input_type: InputType) {
        self.input_type = input_type;
    }

    fn export_options(&self) -> ExportOptions {
        self.export_options
    }

    fn set_export_options(&mut self, options: ExportOptions) {
        self.export_options = options;
    }

    fn is_parameter_input(&self) -> bool {
        self.parameter_name.is_some()
    }

    fn parameter_name(&self) -> Option<&str> {
        self.parameter_name.as_deref()
    }

    fn input_index(&self) -> Option<usize> {
        self.index
    }

    fn objects(&self) -> Vec<InputObject> {
        self.objects.clone()
    }

    fn clear_objects(&mut self) {
        self.objects.clear();
    }

    fn append_object(&mut self, object: Option<&ObjectRef>, transform: Mat4) -> bool {
        let resolved = object.filter(|object| self.resolves(object)).cloned();
        let ok = resolved.is_some();
        self.objects.push(InputObject {
            object: resolved,
            transform,
        });
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_identity() {
        let by_name = MemoryInput::parameter("input_mesh", InputType::Geometry);
        assert!(by_name.is_parameter_input());
        assert_eq!(by_name.parameter_name(), Some("input_mesh"));
        assert_eq!(by_name.input_index(), None);

        let by_index = MemoryInput::positional(2, InputType::Curve);
        assert!(!by_index.is_parameter_input());
        assert_eq!(by_index.input_index(), Some(2));
    }

    #[test]
    fn test_missing_object_leaves_empty_slot() {
        let mut input = MemoryInput::positional(0, InputType::World)
            .with_missing_object("/Game/Deleted.Deleted");

        assert!(input.append_object(Some(&ObjectRef::new("/Game/Rock.Rock")), Mat4::IDENTITY));
        let deleted = ObjectRef::new("/Game/Deleted.Deleted");
        assert!(!input.append_object(Some(&deleted), Mat4::IDENTITY));
        assert!(!input.append_object(None, Mat4::IDENTITY));

        let objects = input.bound_objects();
        assert_eq!(objects.len(), 3);
        assert!(objects[0].object.is_some());
        assert!(objects[1].object.is_none());
        assert!(objects[2].object.is_none());
    }
}
