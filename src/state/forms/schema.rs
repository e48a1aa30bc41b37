//! Declarative form description and construction checks

use super::array::ArrayNode;
use super::errors::SchemaError;
use super::field::FieldNode;
use super::group::GroupNode;
use super::node::Node;
use super::path::FormPath;
use super::value::FieldValue;
use crate::validation::{GroupValidator, Validator};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Initial value and rules of one field
#[derive(Debug, Clone)]
pub struct FieldSchema {
    initial: FieldValue,
    validators: Vec<Validator>,
}

impl FieldSchema {
    pub fn new(initial: impl Into<FieldValue>) -> Self {
        Self {
            initial: initial.into(),
            validators: Vec::new(),
        }
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn validators(mut self, validators: impl IntoIterator<Item = Validator>) -> Self {
        self.validators.extend(validators);
        self
    }

    fn check(&self, path: &FormPath) -> Result<(), SchemaError> {
        let mut min_len = None;
        let mut max_len = None;
        for validator in &self.validators {
            match validator {
                Validator::Range { min, max }
                    if !min.is_finite() || !max.is_finite() || min > max =>
                {
                    return Err(SchemaError::InvalidRange {
                        field: path.clone(),
                        min: *min,
                        max: *max,
                    });
                }
                Validator::MinLength(n) => min_len = Some(*n),
                Validator::MaxLength(n) => max_len = Some(*n),
                _ => {}
            }
        }
        match (min_len, max_len) {
            (Some(min), Some(max)) if min > max => Err(SchemaError::ConflictingLength {
                field: path.clone(),
                min,
                max,
            }),
            _ => Ok(()),
        }
    }
}

/// Repeatable item shape plus the number of items created up front
#[derive(Debug, Clone)]
pub struct ArraySchema {
    item: GroupSchema,
    initial_items: usize,
}

impl ArraySchema {
    pub fn new(item: GroupSchema, initial_items: usize) -> Self {
        Self {
            item,
            initial_items,
        }
    }

    pub fn item(&self) -> &GroupSchema {
        &self.item
    }
}

#[derive(Debug, Clone)]
pub enum Schema {
    Field(FieldSchema),
    Group(GroupSchema),
    Array(ArraySchema),
}

impl From<FieldSchema> for Schema {
    fn from(schema: FieldSchema) -> Self {
        Schema::Field(schema)
    }
}

impl From<GroupSchema> for Schema {
    fn from(schema: GroupSchema) -> Self {
        Schema::Group(schema)
    }
}

impl From<ArraySchema> for Schema {
    fn from(schema: ArraySchema) -> Self {
        Schema::Array(schema)
    }
}

/// Named children in declaration order plus cross-field rules
#[derive(Debug, Clone, Default)]
pub struct GroupSchema {
    children: Vec<(String, Schema)>,
    validators: Vec<GroupValidator>,
}

impl GroupSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.children.push((name.into(), schema.into()));
        self
    }

    pub fn field(self, name: impl Into<String>, schema: FieldSchema) -> Self {
        self.child(name, schema)
    }

    pub fn group(self, name: impl Into<String>, schema: GroupSchema) -> Self {
        self.child(name, schema)
    }

    pub fn array(self, name: impl Into<String>, schema: ArraySchema) -> Self {
        self.child(name, schema)
    }

    pub fn validator(mut self, validator: GroupValidator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Check the whole description, then build the node tree
    pub fn build(&self) -> Result<GroupNode, SchemaError> {
        self.check(&FormPath::root())?;
        Ok(self.instantiate())
    }

    fn check(&self, path: &FormPath) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for (name, schema) in &self.children {
            if name.is_empty() {
                return Err(SchemaError::EmptyName {
                    group: path.clone(),
                });
            }
            if name.contains('.') || name.chars().all(|c| c.is_ascii_digit()) {
                return Err(SchemaError::InvalidName {
                    group: path.clone(),
                    name: name.clone(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateName {
                    group: path.clone(),
                    name: name.clone(),
                });
            }

            let child_path = path.child(name);
            match schema {
                Schema::Field(field) => field.check(&child_path)?,
                Schema::Group(group) => group.check(&child_path)?,
                // items are addressed by index below the array
                Schema::Array(array) => array.item.check(&child_path.child("*"))?,
            }
        }

        for validator in &self.validators {
            if let GroupValidator::Match { field, confirm } = validator {
                for name in [field, confirm] {
                    let is_field = self
                        .children
                        .iter()
                        .any(|(child, schema)| child == name && matches!(schema, Schema::Field(_)));
                    if !is_field {
                        return Err(SchemaError::MatchTarget {
                            group: path.clone(),
                            name: name.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Build nodes without checking; callers guarantee `check` passed
    pub(crate) fn instantiate(&self) -> GroupNode {
        let children: IndexMap<String, Node> = self
            .children
            .iter()
            .map(|(name, schema)| (name.clone(), schema.instantiate()))
            .collect();
        GroupNode::new(children, self.validators.clone())
    }
}

impl Schema {
    fn instantiate(&self) -> Node {
        match self {
            Schema::Field(field) => {
                Node::Field(FieldNode::new(field.initial.clone(), field.validators.clone()))
            }
            Schema::Group(group) => Node::Group(group.instantiate()),
            Schema::Array(array) => {
                Node::Array(ArrayNode::new(array.item.clone(), array.initial_items))
            }
        }
    }
}
