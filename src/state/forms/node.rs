//! Node identity, the node enum and the capability trait shared by all nodes

use super::array::ArrayNode;
use super::field::FieldNode;
use super::group::GroupNode;
use super::path::FormPath;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Stable identity of a node, independent of its current path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Uuid);

impl NodeId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Trait for common node state queries
pub trait Control {
    fn id(&self) -> NodeId;
    /// Deep snapshot of the node's value
    fn value_json(&self) -> Value;
    fn is_valid(&self) -> bool;
    fn is_dirty(&self) -> bool;
    fn is_touched(&self) -> bool;
    fn is_pristine(&self) -> bool {
        !self.is_dirty()
    }
    fn is_invalid(&self) -> bool {
        !self.is_valid()
    }
}

/// Any element of the form tree
#[derive(Debug, Clone)]
pub enum Node {
    Field(FieldNode),
    Group(GroupNode),
    Array(ArrayNode),
}

impl Node {
    pub fn view(&self) -> NodeRef<'_> {
        match self {
            Node::Field(f) => NodeRef::Field(f),
            Node::Group(g) => NodeRef::Group(g),
            Node::Array(a) => NodeRef::Array(a),
        }
    }

    pub(crate) fn view_mut(&mut self) -> NodeMut<'_> {
        match self {
            Node::Field(f) => NodeMut::Field(f),
            Node::Group(g) => NodeMut::Group(g),
            Node::Array(a) => NodeMut::Array(a),
        }
    }
}

/// Borrowed view of a node found by path
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Field(&'a FieldNode),
    Group(&'a GroupNode),
    Array(&'a ArrayNode),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            NodeRef::Field(_) => "field",
            NodeRef::Group(_) => "group",
            NodeRef::Array(_) => "array",
        }
    }

    /// Walk `path` down from this node
    pub fn find(self, path: &FormPath) -> Option<NodeRef<'a>> {
        let mut current = self;
        for segment in path.segments() {
            current = match current {
                NodeRef::Field(_) => return None,
                NodeRef::Group(g) => g.get(segment)?.view(),
                NodeRef::Array(a) => NodeRef::Group(a.at(segment.parse().ok()?)?),
            };
        }
        Some(current)
    }

    /// Ids of this node and every node below it
    pub fn collect_ids(&self, out: &mut Vec<NodeId>) {
        out.push(self.id());
        match self {
            NodeRef::Field(_) => {}
            NodeRef::Group(g) => {
                for (_, child) in g.children() {
                    child.view().collect_ids(out);
                }
            }
            NodeRef::Array(a) => {
                for item in a.items() {
                    NodeRef::Group(item).collect_ids(out);
                }
            }
        }
    }
}

impl Control for NodeRef<'_> {
    fn id(&self) -> NodeId {
        match self {
            NodeRef::Field(f) => f.id(),
            NodeRef::Group(g) => g.id(),
            NodeRef::Array(a) => a.id(),
        }
    }

    fn value_json(&self) -> Value {
        match self {
            NodeRef::Field(f) => f.value_json(),
            NodeRef::Group(g) => g.value_json(),
            NodeRef::Array(a) => a.value_json(),
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            NodeRef::Field(f) => f.is_valid(),
            NodeRef::Group(g) => g.is_valid(),
            NodeRef::Array(a) => a.is_valid(),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            NodeRef::Field(f) => f.is_dirty(),
            NodeRef::Group(g) => g.is_dirty(),
            NodeRef::Array(a) => a.is_dirty(),
        }
    }

    fn is_touched(&self) -> bool {
        match self {
            NodeRef::Field(f) => f.is_touched(),
            NodeRef::Group(g) => g.is_touched(),
            NodeRef::Array(a) => a.is_touched(),
        }
    }
}

impl Control for Node {
    fn id(&self) -> NodeId {
        self.view().id()
    }
    fn value_json(&self) -> Value {
        self.view().value_json()
    }
    fn is_valid(&self) -> bool {
        self.view().is_valid()
    }
    fn is_dirty(&self) -> bool {
        self.view().is_dirty()
    }
    fn is_touched(&self) -> bool {
        self.view().is_touched()
    }
}

/// Mutable view of a node found by path
pub(crate) enum NodeMut<'a> {
    Field(&'a mut FieldNode),
    Group(&'a mut GroupNode),
    Array(&'a mut ArrayNode),
}

impl<'a> NodeMut<'a> {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            NodeMut::Field(_) => "field",
            NodeMut::Group(_) => "group",
            NodeMut::Array(_) => "array",
        }
    }

    pub(crate) fn find(self, path: &FormPath) -> Option<NodeMut<'a>> {
        let mut current = self;
        for segment in path.segments() {
            current = match current {
                NodeMut::Field(_) => return None,
                NodeMut::Group(g) => g.get_mut(segment)?.view_mut(),
                NodeMut::Array(a) => NodeMut::Group(a.at_mut(segment.parse().ok()?)?),
            };
        }
        Some(current)
    }

    /// Recompute errors for this node and everything below it
    pub(crate) fn validate(self) {
        match self {
            NodeMut::Field(f) => f.validate(),
            NodeMut::Group(g) => g.validate(),
            NodeMut::Array(a) => a.validate(),
        }
    }

    pub(crate) fn mark_touched(self) {
        match self {
            NodeMut::Field(f) => f.mark_touched(),
            NodeMut::Group(g) => g.mark_touched(),
            NodeMut::Array(a) => a.mark_touched(),
        }
    }

    pub(crate) fn reset(self) {
        match self {
            NodeMut::Field(f) => f.reset(),
            NodeMut::Group(g) => g.reset(),
            NodeMut::Array(a) => a.reset(),
        }
    }
}
