//! Group node: named children plus cross-field rules

use super::field::FieldNode;
use super::node::{Control, Node, NodeId};
use crate::validation::{ErrorKind, GroupValidator, ValidationErrors};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Ordered mapping of named child nodes.
///
/// Cross-field failures live on the group itself; `is_valid` also folds in
/// the live validity of every child.
#[derive(Debug, Clone)]
pub struct GroupNode {
    id: NodeId,
    children: IndexMap<String, Node>,
    validators: Vec<GroupValidator>,
    errors: Option<ValidationErrors>,
}

impl GroupNode {
    pub(crate) fn new(children: IndexMap<String, Node>, validators: Vec<GroupValidator>) -> Self {
        let mut group = Self {
            id: NodeId::new(),
            children,
            validators,
            errors: None,
        };
        group.validate_self();
        group
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    /// Child field by name, `None` for missing names and non-field children
    pub fn field(&self, name: &str) -> Option<&FieldNode> {
        match self.children.get(name)? {
            Node::Field(field) => Some(field),
            _ => None,
        }
    }

    /// Children in declaration order
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Cross-field failures of this group (children's own errors excluded)
    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    pub fn has_error(&self, kind: ErrorKind) -> bool {
        self.errors.as_ref().is_some_and(|e| e.contains(kind))
    }

    pub fn validators(&self) -> &[GroupValidator] {
        &self.validators
    }

    /// Re-run only the group's own rules against the current children
    pub(crate) fn validate_self(&mut self) {
        let errors = self
            .validators
            .iter()
            .filter_map(|validator| validator.check(self))
            .collect::<ValidationErrors>();
        self.errors = errors.into_option();
    }

    /// Revalidate every child, then the group's own rules
    pub(crate) fn validate(&mut self) {
        for child in self.children.values_mut() {
            child.view_mut().validate();
        }
        self.validate_self();
    }

    pub(crate) fn mark_touched(&mut self) {
        for child in self.children.values_mut() {
            child.view_mut().mark_touched();
        }
    }

    pub(crate) fn reset(&mut self) {
        for child in self.children.values_mut() {
            child.view_mut().reset();
        }
        self.validate_self();
    }
}

impl Control for GroupNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn value_json(&self) -> Value {
        let map: Map<String, Value> = self
            .children
            .iter()
            .map(|(name, node)| (name.clone(), node.value_json()))
            .collect();
        Value::Object(map)
    }

    fn is_valid(&self) -> bool {
        self.errors.is_none() && self.children.values().all(Control::is_valid)
    }

    fn is_dirty(&self) -> bool {
        self.children.values().any(Control::is_dirty)
    }

    fn is_touched(&self) -> bool {
        self.children.values().any(Control::is_touched)
    }
}
