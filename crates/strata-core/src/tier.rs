//! Deployment tiers.
//!
//! A [`Tier`] is the coarse layer a resource is drawn in. Tiers are assigned
//! by the classifier when a node is created and revised by the hierarchy
//! resolver when structural evidence is found.

use std::fmt;

/// Coarse deployment layer of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Tier {
    /// Entry point of the application (site URL).
    Url,
    /// Front-end hosts and the load balancers in front of them.
    Web,
    /// Application and messaging hosts.
    App,
    /// Database servers and managed database services.
    Sql,
    /// Platform services such as vaults, registries and storage.
    Paas,
    /// No tier has been derived yet.
    #[default]
    Unassigned,
}

impl Tier {
    /// Tiers drawn as clusters, in diagram order.
    pub const CLUSTERED: [Tier; 5] = [Tier::Url, Tier::Web, Tier::App, Tier::Sql, Tier::Paas];

    /// Returns the lowercase name used in logs and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Url => "url",
            Tier::Web => "web",
            Tier::App => "app",
            Tier::Sql => "sql",
            Tier::Paas => "paas",
            Tier::Unassigned => "unassigned",
        }
    }

    /// Returns the capitalized name used for cluster anchors and labels.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_core::tier::Tier;
    ///
    /// assert_eq!(Tier::Web.display_name(), "Web");
    /// assert_eq!(Tier::Paas.display_name(), "Paas");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Url => "Url",
            Tier::Web => "Web",
            Tier::App => "App",
            Tier::Sql => "Sql",
            Tier::Paas => "Paas",
            Tier::Unassigned => "Unassigned",
        }
    }

    /// Returns the two-digit cluster number of the tier (`00` for url through `04` for paas).
    pub fn cluster_number(&self) -> Option<&'static str> {
        match self {
            Tier::Url => Some("00"),
            Tier::Web => Some("01"),
            Tier::App => Some("02"),
            Tier::Sql => Some("03"),
            Tier::Paas => Some("04"),
            Tier::Unassigned => None,
        }
    }

    /// Returns `true` once a tier other than [`Tier::Unassigned`] is set.
    pub fn is_assigned(&self) -> bool {
        !matches!(self, Tier::Unassigned)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_default_is_unassigned() {
        assert_eq!(Tier::default(), Tier::Unassigned);
        assert!(!Tier::default().is_assigned());
        assert!(Tier::Web.is_assigned());
    }

    #[test]
    fn test_clustered_tiers_have_numbers() {
        let numbers: Vec<_> = Tier::CLUSTERED
            .iter()
            .filter_map(Tier::cluster_number)
            .collect();
        assert_eq!(numbers, ["00", "01", "02", "03", "04"]);
        assert_eq!(Tier::Unassigned.cluster_number(), None);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::Sql.to_string(), "sql");
        assert_eq!(Tier::Sql.display_name(), "Sql");
    }
}
