//! Hierarchy resolution.
//!
//! The inventory carries no foreign keys between resources, so parent links
//! and tiers are reconstructed from names alone. [`resolve`] runs an ordered
//! series of passes over an application's [`NodeStore`]; each pass reads the
//! whole store and rewrites parents and tiers in place. Ties are broken by
//! store order, which is the sorted input order.
//!
//! A candidate that does not match is not an error. It is logged at `debug`
//! and the node keeps its current parent.

mod passes;
mod validate;

use std::fmt;

use log::{debug, info};

use strata_core::store::{LinkError, NodeStore};

use crate::error::StrataError;

pub use validate::ValidationError;

/// A stage of building an application's graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Node creation from the inventory records.
    Build,
    /// Virtual machines linked under the load balancer matching their name.
    VmToLoadBalancer,
    /// Network interfaces linked under the machine they are named after.
    NicToVm,
    /// Unattached network interfaces linked under platform services.
    NicToPaas,
    /// Virtual machines relinked under the first load balancer of their tier.
    LoadBalancerBackfill,
    /// Platform services linked under the orphans their names extend.
    OrphanBackfill,
    /// Final consistency check.
    Validate,
}

impl Pass {
    /// Passes run by [`resolve`], in order.
    pub const RESOLVER: [Pass; 5] = [
        Pass::VmToLoadBalancer,
        Pass::NicToVm,
        Pass::NicToPaas,
        Pass::LoadBalancerBackfill,
        Pass::OrphanBackfill,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pass::Build => "build",
            Pass::VmToLoadBalancer => "vm-to-load-balancer",
            Pass::NicToVm => "nic-to-vm",
            Pass::NicToPaas => "nic-to-paas",
            Pass::LoadBalancerBackfill => "load-balancer-backfill",
            Pass::OrphanBackfill => "orphan-backfill",
            Pass::Validate => "validate",
        }
    }

    fn run(self, store: &mut NodeStore) -> Result<(), LinkError> {
        match self {
            Pass::VmToLoadBalancer => passes::vm_to_load_balancer(store),
            Pass::NicToVm => passes::nic_to_vm(store),
            Pass::NicToPaas => passes::nic_to_paas(store),
            Pass::LoadBalancerBackfill => passes::load_balancer_backfill(store),
            Pass::OrphanBackfill => passes::orphan_backfill(store),
            Pass::Build | Pass::Validate => Ok(()),
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves parents and tiers of every node of `application`.
///
/// After the last pass the store is validated: every tier is assigned, every
/// parent is a node of the same store and the parent relation is acyclic.
///
/// # Errors
///
/// Returns [`StrataError::Application`] naming the failing pass.
pub fn resolve(application: &str, store: &mut NodeStore) -> Result<(), StrataError> {
    for pass in Pass::RESOLVER {
        debug!(app = application, pass:% = pass; "Running resolver pass");
        pass.run(store)
            .map_err(|err| StrataError::application(application, pass, err.to_string()))?;
    }

    validate::validate(store)
        .map_err(|err| StrataError::application(application, Pass::Validate, err.to_string()))?;

    info!(app = application, nodes = store.len(); "Resolved hierarchy");
    Ok(())
}
