//! Diagram nodes.
//!
//! A [`Node`] is one resource instance inside an application's diagram. Nodes
//! live in a [`NodeStore`](crate::store::NodeStore) and are addressed by
//! [`NodeId`]; parent links are ids into the same store.

use std::fmt;

use crate::{resource::ResourceType, tier::Tier};

/// Label of the synthetic node standing for the application URL.
pub const URL_ANCHOR_LABEL: &str = "app_url";

/// Stable index of a node inside its [`NodeStore`](crate::store::NodeStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position of the node in store order.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Resolved parent of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    /// Another node of the same store.
    Node(NodeId),
    /// The application's URL anchor.
    UrlAnchor,
}

/// One resource instance in an application's diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    resource_type: ResourceType,
    raw_type: String,
    label: String,
    name: String,
    category: String,
    tier: Tier,
    parent: Option<Parent>,
    parsed: Option<String>,
    unique_name: Option<String>,
}

impl Node {
    /// Creates an unclassified, parentless node.
    ///
    /// # Arguments
    ///
    /// * `raw_type` - Provider type string, e.g. `microsoft.compute/virtualmachines`
    /// * `label` - Identifier unique within the application, e.g. `virtualmachines_1`
    /// * `name` - Resource name
    pub fn new(
        raw_type: impl Into<String>,
        label: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let raw_type = raw_type.into();
        Self {
            resource_type: ResourceType::from_raw(&raw_type),
            raw_type,
            label: label.into(),
            name: name.into(),
            category: String::new(),
            tier: Tier::Unassigned,
            parent: None,
            parsed: None,
            unique_name: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    pub fn raw_type(&self) -> &str {
        &self.raw_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn parent(&self) -> Option<Parent> {
        self.parent
    }

    /// Returns the parent node id, ignoring the URL anchor.
    pub fn parent_node(&self) -> Option<NodeId> {
        match self.parent {
            Some(Parent::Node(id)) => Some(id),
            _ => None,
        }
    }

    /// Returns the short identifier extracted from a network interface name.
    pub fn parsed(&self) -> Option<&str> {
        self.parsed.as_deref()
    }

    pub fn unique_name(&self) -> Option<&str> {
        self.unique_name.as_deref()
    }

    pub fn set_tier(&mut self, tier: Tier) {
        self.tier = tier;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_parsed(&mut self, parsed: Option<String>) {
        self.parsed = parsed;
    }

    pub fn set_unique_name(&mut self, unique_name: Option<String>) {
        self.unique_name = unique_name;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Parent>) {
        self.parent = parent;
    }
}
