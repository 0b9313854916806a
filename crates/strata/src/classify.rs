//! Tier classification of resources.
//!
//! The classifier assigns an initial [`Tier`] from the resource kind and
//! name alone. Name tests are case-sensitive substring matches. Hierarchy
//! resolution may revise the tier later.

use strata_core::{resource::ResourceKind, tier::Tier};

use crate::config::ClassifierConfig;

/// Outcome of classifying one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    tier: Tier,
    url_anchor: bool,
}

impl Classification {
    fn tier(tier: Tier) -> Self {
        Self {
            tier,
            url_anchor: false,
        }
    }

    /// Returns the initial tier.
    pub fn initial_tier(&self) -> Tier {
        self.tier
    }

    /// Returns `true` if the resource hangs directly off the application URL.
    pub fn is_url_anchored(&self) -> bool {
        self.url_anchor
    }
}

/// Classifies resources by kind and name.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    config: &'a ClassifierConfig,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classifies one resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::{classify::Classifier, config::ClassifierConfig};
    /// use strata::{resource::ResourceKind, tier::Tier};
    ///
    /// let config = ClassifierConfig::default();
    /// let classifier = Classifier::new(&config);
    ///
    /// let lb = classifier.classify(ResourceKind::LoadBalancer, "lb-iis-front");
    /// assert_eq!(lb.initial_tier(), Tier::Web);
    /// assert!(lb.is_url_anchored());
    /// ```
    pub fn classify(&self, kind: ResourceKind, name: &str) -> Classification {
        match kind {
            ResourceKind::Site | ResourceKind::Sites | ResourceKind::ServerFarm => {
                Classification::tier(Tier::App)
            }
            ResourceKind::VirtualMachine | ResourceKind::NetworkInterface => {
                Classification::tier(self.host_tier(name))
            }
            ResourceKind::SqlVirtualMachine
            | ResourceKind::Database
            | ResourceKind::ManagedInstance => Classification::tier(Tier::Sql),
            ResourceKind::LoadBalancer => self.load_balancer(name),
            ResourceKind::PrivateEndpoint
            | ResourceKind::Registry
            | ResourceKind::Namespace
            | ResourceKind::ConfigurationStore
            | ResourceKind::Vault
            | ResourceKind::StorageAccount => Classification::tier(Tier::Paas),
            ResourceKind::Redis | ResourceKind::Other => Classification::tier(Tier::Unassigned),
        }
    }

    fn host_tier(&self, name: &str) -> Tier {
        if self.config.queue_hosts().iter().any(|host| host == name) {
            Tier::App
        } else if name.contains("sql") {
            Tier::Sql
        } else {
            Tier::Web
        }
    }

    fn load_balancer(&self, name: &str) -> Classification {
        let queue_token = self.config.queue_token();
        let tier = if name.contains("cluster") {
            Tier::Sql
        } else if !queue_token.is_empty() && name.contains(queue_token) {
            Tier::App
        } else {
            // "iis" balancers and unmatched ones both front the web tier.
            Tier::Web
        };

        Classification {
            tier,
            url_anchor: name.contains("iis"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(kind: ResourceKind, name: &str) -> Classification {
        let config = ClassifierConfig::default();
        Classifier::new(&config).classify(kind, name)
    }

    #[test]
    fn test_app_service_kinds() {
        for kind in [ResourceKind::Site, ResourceKind::Sites, ResourceKind::ServerFarm] {
            assert_eq!(classify(kind, "anything").initial_tier(), Tier::App);
        }
    }

    #[test]
    fn test_hosts() {
        for kind in [ResourceKind::VirtualMachine, ResourceKind::NetworkInterface] {
            assert_eq!(classify(kind, "mps2518").initial_tier(), Tier::App);
            assert_eq!(classify(kind, "paysql01").initial_tier(), Tier::Sql);
            assert_eq!(classify(kind, "PAYSQL01").initial_tier(), Tier::Web);
            assert_eq!(classify(kind, "payweb01").initial_tier(), Tier::Web);
        }
        // Queue host names must match exactly.
        assert_eq!(
            classify(ResourceKind::VirtualMachine, "mps2518-nic").initial_tier(),
            Tier::Web
        );
    }

    #[test]
    fn test_load_balancer_precedence() {
        let lb = classify(ResourceKind::LoadBalancer, "lb-cluster-rabmq-iis");
        assert_eq!(lb.initial_tier(), Tier::Sql);
        assert!(lb.is_url_anchored());

        let lb = classify(ResourceKind::LoadBalancer, "lb-rabmq-iis");
        assert_eq!(lb.initial_tier(), Tier::App);
        assert!(lb.is_url_anchored());

        let lb = classify(ResourceKind::LoadBalancer, "lb-iis");
        assert_eq!(lb.initial_tier(), Tier::Web);
        assert!(lb.is_url_anchored());

        let lb = classify(ResourceKind::LoadBalancer, "lb-appweb01prd");
        assert_eq!(lb.initial_tier(), Tier::Web);
        assert!(!lb.is_url_anchored());
    }

    #[test]
    fn test_sql_and_paas_kinds() {
        for kind in [
            ResourceKind::SqlVirtualMachine,
            ResourceKind::Database,
            ResourceKind::ManagedInstance,
        ] {
            assert_eq!(classify(kind, "x").initial_tier(), Tier::Sql);
        }
        for kind in [
            ResourceKind::PrivateEndpoint,
            ResourceKind::Registry,
            ResourceKind::Namespace,
            ResourceKind::ConfigurationStore,
            ResourceKind::Vault,
            ResourceKind::StorageAccount,
        ] {
            assert_eq!(classify(kind, "x").initial_tier(), Tier::Paas);
        }
    }

    #[test]
    fn test_unknown_kinds_unassigned() {
        assert_eq!(classify(ResourceKind::Redis, "cache").initial_tier(), Tier::Unassigned);
        assert_eq!(classify(ResourceKind::Other, "x").initial_tier(), Tier::Unassigned);
    }

    #[test]
    fn test_custom_queue_config() {
        let config = ClassifierConfig::new(vec!["mq01".to_string()], "amqp");
        let classifier = Classifier::new(&config);

        assert_eq!(
            classifier.classify(ResourceKind::VirtualMachine, "mq01").initial_tier(),
            Tier::App
        );
        assert_eq!(
            classifier.classify(ResourceKind::LoadBalancer, "lb-amqp").initial_tier(),
            Tier::App
        );
        assert_eq!(
            classifier.classify(ResourceKind::LoadBalancer, "lb-rabmq").initial_tier(),
            Tier::Web
        );
    }
}
