//! Arena of diagram nodes.
//!
//! [`NodeStore`] owns every [`Node`] of one application. Nodes are addressed
//! by [`NodeId`], whose order is the insertion order; resolver passes rely on
//! that order for first-match tie-breaking. Parent links are only written
//! through [`NodeStore::set_parent`], which refuses links that would make a
//! node its own ancestor.

use std::ops::Index;

use log::trace;
use thiserror::Error;

use crate::node::{Node, NodeId, Parent, URL_ANCHOR_LABEL};

/// Reasons a parent link is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinkError {
    /// The id does not belong to this store.
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
    /// The link would make `child` an ancestor of itself.
    #[error("linking {child} under {parent} would create a cycle")]
    Cycle { child: NodeId, parent: NodeId },
}

/// Arena of the nodes of one application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStore {
    nodes: Vec<Node>,
}

impl NodeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its id.
    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId::new(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Returns all ids in store order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Returns all nodes with their ids in store order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index), node))
    }

    /// Returns the ids of the nodes matching `predicate`, in store order.
    pub fn select(&self, predicate: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| predicate(node))
            .map(|(id, _)| id)
            .collect()
    }

    /// Links `child` under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::UnknownNode`] when either id is foreign to this
    /// store and [`LinkError::Cycle`] when `child` is `parent` or one of its
    /// ancestors. The store is left unchanged on error.
    pub fn set_parent(&mut self, child: NodeId, parent: Parent) -> Result<(), LinkError> {
        if self.get(child).is_none() {
            return Err(LinkError::UnknownNode(child));
        }
        if let Parent::Node(parent_id) = parent {
            if self.get(parent_id).is_none() {
                return Err(LinkError::UnknownNode(parent_id));
            }
            if self.is_ancestor_or_self(child, parent_id) {
                return Err(LinkError::Cycle {
                    child,
                    parent: parent_id,
                });
            }
        }

        trace!(child:% = child, parent:? = parent; "Linking node");
        self.nodes[child.index()].set_parent(Some(parent));
        Ok(())
    }

    /// Removes the parent link of `id`, if any.
    pub fn clear_parent(&mut self, id: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.set_parent(None);
        }
    }

    /// Returns the label of the parent of `id`; the URL anchor reads as `app_url`.
    pub fn parent_label(&self, id: NodeId) -> Option<&str> {
        match self.get(id)?.parent()? {
            Parent::Node(parent) => self.get(parent).map(Node::label),
            Parent::UrlAnchor => Some(URL_ANCHOR_LABEL),
        }
    }

    /// Returns the resource name of the parent node of `id`.
    pub fn parent_name(&self, id: NodeId) -> Option<&str> {
        let parent = self.get(id)?.parent_node()?;
        self.get(parent).map(Node::name)
    }

    /// Returns `true` if any node has `id` as its parent.
    pub fn has_children(&self, id: NodeId) -> bool {
        self.nodes
            .iter()
            .any(|node| node.parent_node() == Some(id))
    }

    /// Returns `true` if `ancestor` is `id` itself or reachable by following parent links from `id`.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        // A well-formed chain is never longer than the store.
        for _ in 0..=self.nodes.len() {
            match current {
                Some(node) if node == ancestor => return true,
                Some(node) => current = self.get(node).and_then(Node::parent_node),
                None => return false,
            }
        }
        true
    }
}

impl Index<NodeId> for NodeStore {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}
