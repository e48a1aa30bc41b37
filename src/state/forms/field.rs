//! Field node: a single value with its validators and interaction state

use super::node::{Control, NodeId};
use super::value::FieldValue;
use crate::validation::{ErrorKind, ValidationErrors, Validator};
use serde_json::Value;

/// Represents a single form field with its value, rules and validity
#[derive(Debug, Clone)]
pub struct FieldNode {
    id: NodeId,
    value: FieldValue,
    initial: FieldValue,
    errors: Option<ValidationErrors>,
    touched: bool,
    dirty: bool,
    validators: Vec<Validator>,
}

impl FieldNode {
    /// Create a field and compute its initial validity
    pub fn new(initial: FieldValue, validators: Vec<Validator>) -> Self {
        let mut field = Self {
            id: NodeId::new(),
            value: initial.clone(),
            initial,
            errors: None,
            touched: false,
            dirty: false,
            validators,
        };
        field.validate();
        field
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Value restored by a reset
    pub fn initial(&self) -> &FieldValue {
        &self.initial
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    pub fn has_error(&self, kind: ErrorKind) -> bool {
        self.errors.as_ref().is_some_and(|e| e.contains(kind))
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub(crate) fn set_value(&mut self, value: FieldValue) {
        self.value = value;
        self.dirty = true;
        self.validate();
    }

    pub(crate) fn mark_touched(&mut self) {
        self.touched = true;
    }

    /// Run every active validator in order, keeping all failures
    pub(crate) fn validate(&mut self) {
        self.errors = self
            .validators
            .iter()
            .filter_map(|validator| validator.check(&self.value))
            .collect::<ValidationErrors>()
            .into_option();
    }

    /// Replace the active rules. Errors stay as they are until `validate` runs.
    pub(crate) fn set_validators(&mut self, validators: Vec<Validator>) {
        self.validators = validators;
    }

    pub(crate) fn clear_validators(&mut self) {
        self.validators.clear();
    }

    pub(crate) fn reset(&mut self) {
        self.value = self.initial.clone();
        self.dirty = false;
        self.touched = false;
        self.validate();
    }
}

impl Control for FieldNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn value_json(&self) -> Value {
        self.value.to_json()
    }

    fn is_valid(&self) -> bool {
        self.errors.is_none()
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn is_touched(&self) -> bool {
        self.touched
    }
}
