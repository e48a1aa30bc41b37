//! Form state: the node tree plus its change notifier, addressed by path

use super::array::ArrayNode;
use super::errors::{FormError, SchemaError};
use super::field::FieldNode;
use super::group::GroupNode;
use super::node::{Control, NodeMut, NodeRef};
use super::path::FormPath;
use super::schema::GroupSchema;
use super::value::FieldValue;
use crate::events::{ChangeNotifier, Subscription, ValueChange};
use crate::validation::{ValidationErrors, Validator};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::rc::Rc;
use tracing::debug;

/// Read-only value and validity snapshot handed to the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSnapshot {
    pub value: Value,
    pub valid: bool,
    pub saved_at: DateTime<Utc>,
}

/// Live form: owns the root group and routes every write through
/// revalidation and change notification.
///
/// Writes finish synchronously. After a write, the written node and every
/// ancestor have been revalidated before any handler runs.
#[derive(Debug)]
pub struct FormState {
    root: GroupNode,
    notifier: ChangeNotifier,
}

impl FormState {
    pub fn new(schema: &GroupSchema) -> Result<Self, SchemaError> {
        Ok(Self {
            root: schema.build()?,
            notifier: ChangeNotifier::new(),
        })
    }

    pub fn root(&self) -> &GroupNode {
        &self.root
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    // ─── Reads ──────────────────────────────────────────────────────

    pub fn node(&self, path: &str) -> Result<NodeRef<'_>, FormError> {
        self.node_at(&FormPath::parse(path))
    }

    pub fn field(&self, path: &str) -> Result<&FieldNode, FormError> {
        let path = FormPath::parse(path);
        match self.node_at(&path)? {
            NodeRef::Field(field) => Ok(field),
            other => Err(FormError::NotAField {
                path,
                found: other.kind(),
            }),
        }
    }

    pub fn array(&self, path: &str) -> Result<&ArrayNode, FormError> {
        let path = FormPath::parse(path);
        match self.node_at(&path)? {
            NodeRef::Array(array) => Ok(array),
            other => Err(FormError::NotAnArray {
                path,
                found: other.kind(),
            }),
        }
    }

    /// Deep snapshot of the whole form
    pub fn value(&self) -> Value {
        self.root.value_json()
    }

    pub fn value_at(&self, path: &str) -> Result<Value, FormError> {
        Ok(self.node(path)?.value_json())
    }

    /// Own errors of a field or group; arrays carry none
    pub fn errors(&self, path: &str) -> Result<Option<&ValidationErrors>, FormError> {
        Ok(match self.node(path)? {
            NodeRef::Field(field) => field.errors(),
            NodeRef::Group(group) => group.errors(),
            NodeRef::Array(_) => None,
        })
    }

    pub fn is_valid(&self, path: &str) -> Result<bool, FormError> {
        Ok(self.node(path)?.is_valid())
    }

    pub fn is_touched(&self, path: &str) -> Result<bool, FormError> {
        Ok(self.node(path)?.is_touched())
    }

    pub fn is_dirty(&self, path: &str) -> Result<bool, FormError> {
        Ok(self.node(path)?.is_dirty())
    }

    pub fn is_pristine(&self, path: &str) -> Result<bool, FormError> {
        Ok(self.node(path)?.is_pristine())
    }

    /// Number of items in an array
    pub fn len(&self, path: &str) -> Result<usize, FormError> {
        Ok(self.array(path)?.len())
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            value: self.value(),
            valid: self.root.is_valid(),
            saved_at: Utc::now(),
        }
    }

    // ─── Writes ─────────────────────────────────────────────────────

    /// Write a field value, mark it dirty, revalidate up to the root, then notify
    pub fn set_value(&mut self, path: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        self.set_value_at(&FormPath::parse(path), value.into())
    }

    /// Bulk write from JSON. Objects map onto group children by name, arrays
    /// onto existing items by index; unknown keys and surplus items are
    /// ignored. The whole patch is type-checked before anything is written.
    pub fn patch_value(&mut self, path: &str, value: &Value) -> Result<(), FormError> {
        let path = FormPath::parse(path);
        let mut writes = Vec::new();
        collect_writes(self.node_at(&path)?, &path, value, &mut writes)?;
        for (target, value) in writes {
            self.set_value_at(&target, value)?;
        }
        Ok(())
    }

    /// Mark a field, or every field below a group/array, as touched
    pub fn mark_touched(&mut self, path: &str) -> Result<(), FormError> {
        let path = FormPath::parse(path);
        self.node_mut_at(&path)?.mark_touched();
        Ok(())
    }

    /// Recompute errors for the node (and its subtree), then for its ancestors
    pub fn validate(&mut self, path: &str) -> Result<(), FormError> {
        let path = FormPath::parse(path);
        self.node_mut_at(&path)?.validate();
        self.revalidate_ancestors(&path);
        Ok(())
    }

    /// Replace a field's rules. Errors are left untouched until `validate`.
    pub fn set_validators(
        &mut self,
        path: &str,
        validators: Vec<Validator>,
    ) -> Result<(), FormError> {
        let path = FormPath::parse(path);
        let field = self.field_mut_at(&path)?;
        debug!(
            %path,
            validators = ?validators.iter().map(Validator::name).collect::<Vec<_>>(),
            "Validators replaced"
        );
        field.set_validators(validators);
        Ok(())
    }

    /// Remove all of a field's rules. Errors are left untouched until `validate`.
    pub fn clear_validators(&mut self, path: &str) -> Result<(), FormError> {
        let path = FormPath::parse(path);
        self.field_mut_at(&path)?.clear_validators();
        debug!(%path, "Validators cleared");
        Ok(())
    }

    /// `set_validators` followed by `validate` in one step
    pub fn replace_validators(
        &mut self,
        path: &str,
        validators: Vec<Validator>,
    ) -> Result<(), FormError> {
        self.set_validators(path, validators)?;
        self.validate(path)
    }

    /// Append an item built from the array's item schema; returns its index
    pub fn push(&mut self, path: &str) -> Result<usize, FormError> {
        let path = FormPath::parse(path);
        let index = self.array_mut_at(&path)?.push();
        debug!(%path, index, "Array item added");
        self.revalidate_ancestors(&path);
        self.emit(&path);
        Ok(index)
    }

    /// Remove an array item; its subscriptions are discarded with it
    pub fn remove_at(&mut self, path: &str, index: usize) -> Result<(), FormError> {
        let path = FormPath::parse(path);
        let array = self.array_mut_at(&path)?;
        let len = array.len();
        let Some(removed) = array.remove_at(index) else {
            return Err(FormError::IndexOutOfBounds { path, index, len });
        };

        let mut ids = Vec::new();
        NodeRef::Group(&removed).collect_ids(&mut ids);
        self.notifier.forget(&ids);
        debug!(%path, index, "Array item removed");

        self.revalidate_ancestors(&path);
        self.emit(&path);
        Ok(())
    }

    /// Restore initial values and clear dirty/touched below `path`, then notify
    pub fn reset(&mut self, path: &str) -> Result<(), FormError> {
        let path = FormPath::parse(path);
        self.node_mut_at(&path)?.reset();
        self.revalidate_ancestors(&path);
        self.emit(&path);
        Ok(())
    }

    // ─── Events ─────────────────────────────────────────────────────

    /// Run `handler` after every value change of the node at `path` (including
    /// changes below it). The subscription lives as long as the handle.
    pub fn on_value_change<F>(&self, path: &str, handler: F) -> Result<Subscription, FormError>
    where
        F: Fn(&mut FormState, &ValueChange) + 'static,
    {
        let id = self.node(path)?.id();
        Ok(self.notifier.subscribe(id, Rc::new(handler)))
    }

    // ─── Internals ──────────────────────────────────────────────────

    fn node_at(&self, path: &FormPath) -> Result<NodeRef<'_>, FormError> {
        NodeRef::Group(&self.root)
            .find(path)
            .ok_or_else(|| FormError::UnknownPath(path.clone()))
    }

    fn node_mut_at(&mut self, path: &FormPath) -> Result<NodeMut<'_>, FormError> {
        NodeMut::Group(&mut self.root)
            .find(path)
            .ok_or_else(|| FormError::UnknownPath(path.clone()))
    }

    fn field_mut_at(&mut self, path: &FormPath) -> Result<&mut FieldNode, FormError> {
        match self.node_mut_at(path)? {
            NodeMut::Field(field) => Ok(field),
            other => Err(FormError::NotAField {
                path: path.clone(),
                found: other.kind(),
            }),
        }
    }

    fn array_mut_at(&mut self, path: &FormPath) -> Result<&mut ArrayNode, FormError> {
        match self.node_mut_at(path)? {
            NodeMut::Array(array) => Ok(array),
            other => Err(FormError::NotAnArray {
                path: path.clone(),
                found: other.kind(),
            }),
        }
    }

    fn set_value_at(&mut self, path: &FormPath, value: FieldValue) -> Result<(), FormError> {
        let field = self.field_mut_at(path)?;
        debug!(%path, value = %value.display_value(), "Value set");
        field.set_value(value);
        self.revalidate_ancestors(path);
        self.emit(path);
        Ok(())
    }

    /// Re-run cross-field rules of every group above `path`, deepest first
    fn revalidate_ancestors(&mut self, path: &FormPath) {
        for ancestor in path.lineage().skip(1) {
            if let Some(NodeMut::Group(group)) = NodeMut::Group(&mut self.root).find(&ancestor) {
                group.validate_self();
            }
        }
    }

    /// Notify subscribers of `path` and of each ancestor, innermost first
    fn emit(&mut self, path: &FormPath) {
        for target in path.lineage() {
            // a handler earlier in the chain may have removed this node
            let Ok(node) = self.node_at(&target) else {
                continue;
            };
            let handlers = self.notifier.handlers_for(node.id());
            if handlers.is_empty() {
                continue;
            }
            let change = ValueChange {
                value: node.value_json(),
                path: target,
            };
            for handler in handlers {
                handler(self, &change);
            }
        }
    }
}

fn collect_writes(
    node: NodeRef<'_>,
    path: &FormPath,
    value: &Value,
    out: &mut Vec<(FormPath, FieldValue)>,
) -> Result<(), FormError> {
    match (node, value) {
        (NodeRef::Field(_), value) => {
            let value = FieldValue::try_from(value).map_err(|_| FormError::TypeMismatch {
                path: path.clone(),
                expected: "a scalar value",
            })?;
            out.push((path.clone(), value));
        }
        (NodeRef::Group(group), Value::Object(map)) => {
            for (name, value) in map {
                match group.get(name) {
                    Some(child) => collect_writes(child.view(), &path.child(name), value, out)?,
                    None => debug!(%path, key = %name, "Ignoring unknown key in patch"),
                }
            }
        }
        (NodeRef::Array(array), Value::Array(values)) => {
            if values.len() > array.len() {
                debug!(
                    %path,
                    extra = values.len() - array.len(),
                    "Ignoring surplus items in patch"
                );
            }
            for (index, (item, value)) in array.items().iter().zip(values).enumerate() {
                collect_writes(NodeRef::Group(item), &path.child(index), value, out)?;
            }
        }
        (NodeRef::Group(_), _) => {
            return Err(FormError::TypeMismatch {
                path: path.clone(),
                expected: "an object",
            })
        }
        (NodeRef::Array(_), _) => {
            return Err(FormError::TypeMismatch {
                path: path.clone(),
                expected: "an array",
            })
        }
    }
    Ok(())
}
