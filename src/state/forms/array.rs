//! Array node: a resizable list of identically shaped groups

use super::group::GroupNode;
use super::node::{Control, NodeId};
use super::schema::GroupSchema;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct ArrayNode {
    id: NodeId,
    item_schema: GroupSchema,
    items: Vec<GroupNode>,
}

impl ArrayNode {
    /// `item_schema` must already have passed its construction checks
    pub(crate) fn new(item_schema: GroupSchema, initial_items: usize) -> Self {
        let items = (0..initial_items).map(|_| item_schema.instantiate()).collect();
        Self {
            id: NodeId::new(),
            item_schema,
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<&GroupNode> {
        self.items.get(index)
    }

    pub(crate) fn at_mut(&mut self, index: usize) -> Option<&mut GroupNode> {
        self.items.get_mut(index)
    }

    pub fn items(&self) -> &[GroupNode] {
        &self.items
    }

    /// Append a fresh item built from the shared schema, returning its index
    pub(crate) fn push(&mut self) -> usize {
        self.items.push(self.item_schema.instantiate());
        self.items.len() - 1
    }

    /// Discard the item at `index`; `None` when out of bounds
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<GroupNode> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub(crate) fn validate(&mut self) {
        for item in &mut self.items {
            item.validate();
        }
    }

    pub(crate) fn mark_touched(&mut self) {
        for item in &mut self.items {
            item.mark_touched();
        }
    }

    /// Reset every item in place; the item count is kept
    pub(crate) fn reset(&mut self) {
        for item in &mut self.items {
            item.reset();
        }
    }
}

impl Control for ArrayNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn value_json(&self) -> Value {
        Value::Array(self.items.iter().map(Control::value_json).collect())
    }

    fn is_valid(&self) -> bool {
        self.items.iter().all(Control::is_valid)
    }

    fn is_dirty(&self) -> bool {
        self.items.iter().any(Control::is_dirty)
    }

    fn is_touched(&self) -> bool {
        self.items.iter().any(Control::is_touched)
    }
}
