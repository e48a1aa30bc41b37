//! Per-node value-change subscriptions

use crate::state::{FormPath, FormState, NodeId};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

/// Emitted after a node's value changed and the tree was revalidated
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    /// Path of the node the subscription is attached to
    pub path: FormPath,
    /// Deep snapshot of that node's new value
    pub value: Value,
}

/// Callback run synchronously for every emission on a node.
///
/// The handler gets the form so it can adjust sibling fields, e.g. swap
/// their validators.
pub type ChangeHandler = Rc<dyn Fn(&mut FormState, &ValueChange)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: HashMap<NodeId, Vec<(SubscriptionId, ChangeHandler)>>,
}

impl Registry {
    /// Detach a handler and hand it back; the caller drops it once the
    /// registry is no longer borrowed
    fn remove(&mut self, node: NodeId, id: SubscriptionId) -> Option<ChangeHandler> {
        let handlers = self.handlers.get_mut(&node)?;
        let position = handlers.iter().position(|(sub, _)| *sub == id)?;
        let (_, handler) = handlers.remove(position);
        if handlers.is_empty() {
            self.handlers.remove(&node);
        }
        Some(handler)
    }
}

/// Registry of value-change handlers keyed by node identity
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    registry: Rc<RefCell<Registry>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; it stays active until the returned handle is dropped
    pub fn subscribe(&self, node: NodeId, handler: ChangeHandler) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = SubscriptionId(registry.next_id);
        registry.handlers.entry(node).or_default().push((id, handler));
        debug!("Subscribed {id:?} to node {node}");

        Subscription {
            id,
            node,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Snapshot of the handlers for a node, in subscription order.
    ///
    /// Callers dispatch from the snapshot so handlers can subscribe or
    /// unsubscribe while an emission is running.
    pub fn handlers_for(&self, node: NodeId) -> Vec<ChangeHandler> {
        self.registry
            .borrow()
            .handlers
            .get(&node)
            .map(|handlers| handlers.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default()
    }

    pub fn subscriber_count(&self, node: NodeId) -> usize {
        self.registry
            .borrow()
            .handlers
            .get(&node)
            .map_or(0, Vec::len)
    }

    /// Drop every handler attached to the given nodes (used when nodes are removed)
    pub fn forget(&self, nodes: &[NodeId]) {
        let mut released = Vec::new();
        {
            let mut registry = self.registry.borrow_mut();
            for node in nodes {
                if let Some(handlers) = registry.handlers.remove(node) {
                    debug!("Dropped {} handler(s) of removed node {node}", handlers.len());
                    released.extend(handlers);
                }
            }
        }
        // handlers may own subscriptions whose drop needs the registry
        drop(released);
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("ChangeNotifier")
            .field("nodes", &registry.handlers.len())
            .field(
                "handlers",
                &registry.handlers.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

/// Handle to an active subscription. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the handler immediately"]
pub struct Subscription {
    id: SubscriptionId,
    node: NodeId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Whether the handler is still registered
    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let registry = registry.borrow();
        registry
            .handlers
            .get(&self.node)
            .is_some_and(|handlers| handlers.iter().any(|(id, _)| *id == self.id))
    }

    /// Release the handler now
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let released = match registry.try_borrow_mut() {
            Ok(mut registry) => registry.remove(self.node, self.id),
            Err(_) => {
                warn!("Registry busy, {:?} left registered", self.id);
                None
            }
        };
        if released.is_some() {
            debug!("Unsubscribed {:?} from node {}", self.id, self.node);
        }
        drop(released);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("node", &self.node)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_handler(counter: &Rc<Cell<usize>>) -> ChangeHandler {
        let counter = Rc::clone(counter);
        Rc::new(move |_: &mut FormState, _: &ValueChange| counter.set(counter.get() + 1))
    }

    #[test]
    fn test_subscribe_and_drop() {
        let notifier = ChangeNotifier::new();
        let node = NodeId::new();
        let counter = Rc::new(Cell::new(0));

        let sub = notifier.subscribe(node, counting_handler(&counter));
        assert!(sub.is_active());
        assert_eq!(notifier.subscriber_count(node), 1);

        drop(sub);
        assert_eq!(notifier.subscriber_count(node), 0);
        assert!(notifier.handlers_for(node).is_empty());
    }

    #[test]
    fn test_handlers_keep_subscription_order() {
        let notifier = ChangeNotifier::new();
        let node = NodeId::new();
        let counter = Rc::new(Cell::new(0));

        let first = notifier.subscribe(node, counting_handler(&counter));
        let second = notifier.subscribe(node, counting_handler(&counter));
        assert!(first.id() != second.id());
        assert_eq!(notifier.handlers_for(node).len(), 2);

        first.unsubscribe();
        assert_eq!(notifier.subscriber_count(node), 1);
        assert!(second.is_active());
    }

    #[test]
    fn test_forget_deactivates_handles() {
        let notifier = ChangeNotifier::new();
        let node = NodeId::new();
        let counter = Rc::new(Cell::new(0));

        let sub = notifier.subscribe(node, counting_handler(&counter));
        notifier.forget(&[node]);
        assert!(!sub.is_active());
        // dropping a forgotten handle is a no-op
        drop(sub);
    }

    fn owning_handler(owned: Subscription) -> ChangeHandler {
        Rc::new(move |_: &mut FormState, _: &ValueChange| {
            owned.is_active();
        })
    }

    #[test]
    fn test_unsubscribe_releases_subscriptions_owned_by_handler() {
        let notifier = ChangeNotifier::new();
        let (outer_node, inner_node) = (NodeId::new(), NodeId::new());
        let counter = Rc::new(Cell::new(0));

        let inner = notifier.subscribe(inner_node, counting_handler(&counter));
        let outer = notifier.subscribe(outer_node, owning_handler(inner));
        assert_eq!(notifier.subscriber_count(inner_node), 1);

        drop(outer);
        assert_eq!(notifier.subscriber_count(outer_node), 0);
        assert_eq!(notifier.subscriber_count(inner_node), 0);
    }

    #[test]
    fn test_forget_releases_subscriptions_owned_by_handler() {
        let notifier = ChangeNotifier::new();
        let (removed_node, inner_node) = (NodeId::new(), NodeId::new());
        let counter = Rc::new(Cell::new(0));

        let inner = notifier.subscribe(inner_node, counting_handler(&counter));
        let _outer = notifier.subscribe(removed_node, owning_handler(inner));

        notifier.forget(&[removed_node]);
        assert_eq!(notifier.subscriber_count(inner_node), 0);
    }

    #[test]
    fn test_handle_outliving_notifier() {
        let notifier = ChangeNotifier::new();
        let node = NodeId::new();
        let counter = Rc::new(Cell::new(0));

        let sub = notifier.subscribe(node, counting_handler(&counter));
        drop(notifier);
        assert!(!sub.is_active());
    }

    #[test]
    fn test_debug_reports_counts() {
        let notifier = ChangeNotifier::new();
        let counter = Rc::new(Cell::new(0));
        let _sub = notifier.subscribe(NodeId::new(), counting_handler(&counter));
        assert!(format!("{notifier:?}").contains("handlers: 1"));
    }
}
