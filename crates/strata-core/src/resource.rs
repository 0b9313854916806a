//! Resource kinds derived from raw inventory type strings.
//!
//! Inventory exports identify resources with provider paths such as
//! `microsoft.compute/virtualmachines`. Only the last path segment matters for
//! classification; [`ResourceType`] keeps that segment and its [`ResourceKind`].

use std::fmt;

/// Known resource kinds, keyed on the last segment of the raw type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    VirtualMachine,
    SqlVirtualMachine,
    NetworkInterface,
    LoadBalancer,
    Site,
    Sites,
    ServerFarm,
    Database,
    ManagedInstance,
    PrivateEndpoint,
    Registry,
    Namespace,
    ConfigurationStore,
    Vault,
    StorageAccount,
    Redis,
    Other,
}

impl ResourceKind {
    /// Maps a normalized type segment onto its kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_core::resource::ResourceKind;
    ///
    /// assert_eq!(ResourceKind::from_segment("loadbalancers"), ResourceKind::LoadBalancer);
    /// assert_eq!(ResourceKind::from_segment("workspaces"), ResourceKind::Other);
    /// ```
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "virtualmachines" => Self::VirtualMachine,
            "sqlvirtualmachines" => Self::SqlVirtualMachine,
            "networkinterfaces" => Self::NetworkInterface,
            "loadbalancers" => Self::LoadBalancer,
            "site" => Self::Site,
            "sites" => Self::Sites,
            "serverfarms" => Self::ServerFarm,
            "databases" => Self::Database,
            "managedinstances" => Self::ManagedInstance,
            "privateendpoints" => Self::PrivateEndpoint,
            "registries" => Self::Registry,
            "namespaces" => Self::Namespace,
            "configurationstores" => Self::ConfigurationStore,
            "vaults" => Self::Vault,
            "storageaccounts" => Self::StorageAccount,
            "redis" => Self::Redis,
            _ => Self::Other,
        }
    }

    /// Returns `true` for virtual machines and SQL virtual machines.
    pub fn is_vm_like(&self) -> bool {
        matches!(self, Self::VirtualMachine | Self::SqlVirtualMachine)
    }
}

/// A normalized resource type: the last `/` segment of the raw type string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceType {
    segment: String,
    kind: ResourceKind,
}

impl ResourceType {
    /// Normalizes a raw provider type string.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_core::resource::{ResourceKind, ResourceType};
    ///
    /// let ty = ResourceType::from_raw("microsoft.sql/managedinstances/databases");
    /// assert_eq!(ty.segment(), "databases");
    /// assert_eq!(ty.kind(), ResourceKind::Database);
    /// ```
    pub fn from_raw(raw: &str) -> Self {
        let segment = raw.rsplit('/').next().unwrap_or(raw).to_string();
        let kind = ResourceKind::from_segment(&segment);
        Self { segment, kind }
    }

    /// Returns the normalized type segment.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Returns the resource kind.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_takes_last_segment() {
        let ty = ResourceType::from_raw("microsoft.network/networkinterfaces");
        assert_eq!(ty.segment(), "networkinterfaces");
        assert_eq!(ty.kind(), ResourceKind::NetworkInterface);
    }

    #[test]
    fn test_from_raw_without_separator() {
        let ty = ResourceType::from_raw("vaults");
        assert_eq!(ty.segment(), "vaults");
        assert_eq!(ty.kind(), ResourceKind::Vault);
    }

    #[test]
    fn test_vm_like() {
        assert!(ResourceKind::VirtualMachine.is_vm_like());
        assert!(ResourceKind::SqlVirtualMachine.is_vm_like());
        assert!(!ResourceKind::NetworkInterface.is_vm_like());
    }
}
