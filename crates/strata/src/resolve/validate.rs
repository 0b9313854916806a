//! Final consistency check of a resolved store.

use petgraph::{algo::toposort, graph::DiGraph};
use thiserror::Error;

use strata_core::{node::NodeId, store::NodeStore};

/// A resolved store that breaks a structural guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("node `{label}` has no tier")]
    Unassigned { label: String },

    #[error("node `{label}` references unknown parent {parent}")]
    DanglingParent { label: String, parent: NodeId },

    #[error("node `{label}` is its own ancestor")]
    Cycle { label: String },
}

/// Checks that every tier is assigned, every parent exists and the parent
/// relation is acyclic.
pub(super) fn validate(store: &NodeStore) -> Result<(), ValidationError> {
    let mut graph = DiGraph::<NodeId, ()>::with_capacity(store.len(), store.len());
    let indices: Vec<_> = store.ids().map(|id| graph.add_node(id)).collect();

    for (id, node) in store.iter() {
        if !node.tier().is_assigned() {
            return Err(ValidationError::Unassigned {
                label: node.label().to_string(),
            });
        }
        let Some(parent) = node.parent_node() else {
            continue;
        };
        let Some(&parent_index) = indices.get(parent.index()) else {
            return Err(ValidationError::DanglingParent {
                label: node.label().to_string(),
                parent,
            });
        };
        graph.add_edge(parent_index, indices[id.index()], ());
    }

    toposort(&graph, None).map(|_| ()).map_err(|cycle| {
        let label = graph
            .node_weight(cycle.node_id())
            .and_then(|&id| store.get(id))
            .map(|node| node.label().to_string())
            .unwrap_or_default();
        ValidationError::Cycle { label }
    })
}
