//! Resolver passes.
//!
//! Every pass selects its candidates up front and breaks ties by store order.

use log::{debug, trace};

use strata_core::{
    node::{Node, NodeId, Parent},
    resource::ResourceKind,
    store::{LinkError, NodeStore},
    tier::Tier,
};
use strata_inventory::naming;

use super::Pass;

/// Characters of a machine name expected inside its load balancer's name.
const LOAD_BALANCER_KEY_LEN: usize = 6;

fn is_vm_like(node: &Node) -> bool {
    node.resource_type().kind().is_vm_like()
}

fn is_load_balancer(node: &Node) -> bool {
    node.resource_type().kind() == ResourceKind::LoadBalancer
}

fn is_network_interface(node: &Node) -> bool {
    node.resource_type().kind() == ResourceKind::NetworkInterface
}

/// Returns the last `count` characters of `name`, or all of it when shorter.
fn trailing_chars(name: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    let start = count
        .checked_sub(1)
        .and_then(|skip| name.char_indices().rev().nth(skip))
        .map_or(0, |(index, _)| index);
    &name[start..]
}

fn adopt_tier(store: &mut NodeStore, id: NodeId, tier: Tier) {
    if let Some(node) = store.get_mut(id) {
        node.set_tier(tier);
    }
}

/// Links each machine under the first load balancer whose name contains the
/// machine name's trailing characters. The load balancer takes the machine's tier.
pub(super) fn vm_to_load_balancer(store: &mut NodeStore) -> Result<(), LinkError> {
    let load_balancers = store.select(is_load_balancer);

    for vm in store.select(is_vm_like) {
        let key = trailing_chars(store[vm].name(), LOAD_BALANCER_KEY_LEN);
        let matched = load_balancers
            .iter()
            .copied()
            .find(|&lb| store[lb].name().contains(key));

        let Some(lb) = matched else {
            debug!(pass:% = Pass::VmToLoadBalancer, node = store[vm].name(); "No load balancer matched");
            continue;
        };

        store.set_parent(vm, Parent::Node(lb))?;
        let tier = store[vm].tier();
        adopt_tier(store, lb, tier);
    }
    Ok(())
}

/// Normalizes interface names, then links each interface under the machine
/// named by its parsed base. The interface takes the machine's tier.
///
/// Interface names usually extend the full machine name, as in
/// `appweb01-prd-01-nic-01`, while the parsed base stops at the first
/// separator. When no machine carries the parsed base, the interface goes to
/// the first machine, in store order, whose name followed by `-` starts the
/// interface name.
pub(super) fn nic_to_vm(store: &mut NodeStore) -> Result<(), LinkError> {
    let nics = store.select(is_network_interface);
    for &nic in &nics {
        if let Some(node) = store.get_mut(nic) {
            let name = naming::normalize(node.name()).to_string();
            let parsed = naming::parse_base(&name).map(str::to_string);
            trace!(name = name.as_str(), parsed:? = parsed; "Parsed interface name");
            node.set_name(name);
            node.set_parsed(parsed);
        }
    }

    let vms = store.select(is_vm_like);
    for nic in nics {
        let name = store[nic].name();
        let exact = store[nic]
            .parsed()
            .and_then(|parsed| vms.iter().copied().find(|&vm| store[vm].name() == parsed));
        let matched = exact.or_else(|| {
            vms.iter().copied().find(|&vm| {
                name.strip_prefix(store[vm].name())
                    .is_some_and(|rest| rest.starts_with('-'))
            })
        });

        let Some(vm) = matched else {
            debug!(pass:% = Pass::NicToVm, node = name; "No machine matched");
            continue;
        };
        if exact.is_none() {
            trace!(node = name, machine = store[vm].name(); "Matched machine by name prefix");
        }

        store.set_parent(nic, Parent::Node(vm))?;
        let tier = store[vm].tier();
        adopt_tier(store, nic, tier);
    }
    Ok(())
}

/// Links interfaces still without a parent under the first platform service
/// whose name contains their parsed base.
pub(super) fn nic_to_paas(store: &mut NodeStore) -> Result<(), LinkError> {
    let services =
        store.select(|node| node.tier() == Tier::Paas && !is_network_interface(node));
    let orphans = store.select(|node| {
        is_network_interface(node) && node.parent().is_none() && node.parsed().is_some()
    });

    for nic in orphans {
        let parsed = store[nic].parsed().unwrap_or_default();
        let matched = services
            .iter()
            .copied()
            .find(|&service| store[service].name().contains(parsed));

        let Some(service) = matched else {
            debug!(pass:% = Pass::NicToPaas, node = store[nic].name(); "No platform service matched");
            continue;
        };

        store.set_parent(nic, Parent::Node(service))?;
        let tier = store[service].tier();
        adopt_tier(store, nic, tier);
    }
    Ok(())
}

/// Relinks each machine under the first load balancer sharing its tier, as
/// tiers stood when the pass began.
pub(super) fn load_balancer_backfill(store: &mut NodeStore) -> Result<(), LinkError> {
    let tiers: Vec<Tier> = store.iter().map(|(_, node)| node.tier()).collect();
    let load_balancers = store.select(is_load_balancer);

    for vm in store.select(is_vm_like) {
        let tier = tiers[vm.index()];
        let Some(lb) = load_balancers
            .iter()
            .copied()
            .find(|lb| tiers[lb.index()] == tier)
        else {
            debug!(pass:% = Pass::LoadBalancerBackfill, node = store[vm].name(); "No load balancer in tier");
            continue;
        };

        store.set_parent(vm, Parent::Node(lb))?;
        adopt_tier(store, lb, tier);
        adopt_tier(store, vm, tier);
    }
    Ok(())
}

/// Links parentless platform services under the orphans whose names they
/// contain, then moves every node still without a tier to the paas tier.
///
/// Links that would close a cycle are skipped.
pub(super) fn orphan_backfill(store: &mut NodeStore) -> Result<(), LinkError> {
    let orphans = store.select(|node| node.parent().is_none());

    for orphan in orphans {
        let name = store[orphan].name().to_string();
        let services = store.select(|node| node.tier() == Tier::Paas && node.parent().is_none());

        for service in services {
            if service == orphan || !store[service].name().contains(name.as_str()) {
                continue;
            }
            match store.set_parent(service, Parent::Node(orphan)) {
                Ok(()) => {}
                Err(LinkError::Cycle { .. }) => {
                    debug!(
                        pass:% = Pass::OrphanBackfill,
                        node = store[service].name(),
                        parent = name.as_str();
                        "Skipped link that would close a cycle"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    for id in store.select(|node| !node.tier().is_assigned()) {
        trace!(node = store[id].name(); "Defaulting tier to paas");
        adopt_tier(store, id, Tier::Paas);
    }
    Ok(())
}
