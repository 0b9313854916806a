//! Configuration types for Strata runs.
//!
//! This module provides the configuration structures that control which
//! inventory rows are diagrammed, how resources are classified, how unique
//! names are derived and how diagrams are styled. All types implement
//! [`serde::Deserialize`] and every field has a default, so a configuration
//! file only needs to name the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`InventoryConfig`] - Row selection and the fallback application URL.
//! - [`ClassifierConfig`] - Host names and tokens that mark messaging servers.
//! - [`NamingConfig`] - Unique-name derivation.
//! - [`StyleConfig`] - Cluster colors, icons and spacing.
//!
//! # Example
//!
//! ```
//! # use strata::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.inventory().environment(), "Production");
//! assert!(config.style().cluster_color().is_ok());
//! ```

use serde::Deserialize;

use strata_core::color::Color;
use strata_inventory::RecordFilter;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Inventory selection section.
    #[serde(default)]
    inventory: InventoryConfig,

    /// Tier classifier section.
    #[serde(default)]
    classifier: ClassifierConfig,

    /// Unique-name section.
    #[serde(default)]
    naming: NamingConfig,

    /// Diagram style section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        inventory: InventoryConfig,
        classifier: ClassifierConfig,
        naming: NamingConfig,
        style: StyleConfig,
    ) -> Self {
        Self {
            inventory,
            classifier,
            naming,
            style,
        }
    }

    /// Returns the inventory configuration.
    pub fn inventory(&self) -> &InventoryConfig {
        &self.inventory
    }

    /// Returns the classifier configuration.
    pub fn classifier(&self) -> &ClassifierConfig {
        &self.classifier
    }

    /// Returns the naming configuration.
    pub fn naming(&self) -> &NamingConfig {
        &self.naming
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Selection of the inventory rows that are diagrammed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Environment column value to keep.
    environment: String,

    /// A row is kept when its category contains one of these tokens.
    categories: Vec<String>,

    /// URL shown for applications without one in the cross reference.
    default_url: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            environment: "Production".to_string(),
            categories: vec!["IaaS".to_string(), "PaaS".to_string()],
            default_url: "https://*.mgroup.net".to_string(),
        }
    }
}

impl InventoryConfig {
    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn default_url(&self) -> &str {
        &self.default_url
    }

    /// Returns the row filter described by this section.
    pub fn record_filter(&self) -> RecordFilter {
        RecordFilter::new(self.environment.clone(), self.categories.clone())
    }
}

/// Names that identify messaging hosts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Machine names of the message-queue servers.
    queue_hosts: Vec<String>,

    /// Substring marking message-queue load balancers.
    queue_token: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            queue_hosts: ["mps2517", "mps2518", "mps2519", "mps2520", "mps2521"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            queue_token: "rabmq".to_string(),
        }
    }
}

impl ClassifierConfig {
    /// Creates a classifier section with custom queue hosts and token.
    pub fn new(queue_hosts: Vec<String>, queue_token: impl Into<String>) -> Self {
        Self {
            queue_hosts,
            queue_token: queue_token.into(),
        }
    }

    pub fn queue_hosts(&self) -> &[String] {
        &self.queue_hosts
    }

    pub fn queue_token(&self) -> &str {
        &self.queue_token
    }
}

/// Unique-name derivation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Marker appended when no naming convention applies.
    unique_suffix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            unique_suffix: "_IRE".to_string(),
        }
    }
}

impl NamingConfig {
    pub fn new(unique_suffix: impl Into<String>) -> Self {
        Self {
            unique_suffix: unique_suffix.into(),
        }
    }

    pub fn unique_suffix(&self) -> &str {
        &self.unique_suffix
    }
}

/// Visual styling of the tier diagrams.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Border [`Color`] of the diagram, as a color string.
    cluster_color: String,

    /// Fill [`Color`] of the diagram, as a color string.
    cluster_fill_color: String,

    /// Directory holding the resource icons; empty disables icons.
    icon_dir: String,

    /// Vertical separation between ranks, in inches.
    rank_separation: f32,

    /// Horizontal separation between nodes, in inches.
    node_separation: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            cluster_color: "deepskyblue".to_string(),
            cluster_fill_color: "lightskyblue".to_string(),
            icon_dir: "icons".to_string(),
            rank_separation: 2.0,
            node_separation: 1.5,
        }
    }
}

impl StyleConfig {
    /// Replaces the border color string.
    pub fn with_cluster_color(mut self, color: impl Into<String>) -> Self {
        self.cluster_color = color.into();
        self
    }

    /// Returns the parsed border [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn cluster_color(&self) -> Result<Color, String> {
        Color::new(&self.cluster_color)
            .map_err(|err| format!("Invalid cluster color in config: {err}"))
    }

    /// Returns the parsed fill [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn cluster_fill_color(&self) -> Result<Color, String> {
        Color::new(&self.cluster_fill_color)
            .map_err(|err| format!("Invalid cluster fill color in config: {err}"))
    }

    /// Returns the icon path for `file`, or `None` when icons are disabled.
    pub fn icon_path(&self, file: &str) -> Option<String> {
        if self.icon_dir.is_empty() || file.is_empty() {
            None
        } else {
            Some(format!("{}/{}", self.icon_dir.trim_end_matches(['/', '\\']), file))
        }
    }

    pub fn rank_separation(&self) -> f32 {
        self.rank_separation
    }

    pub fn node_separation(&self) -> f32 {
        self.node_separation
    }
}
