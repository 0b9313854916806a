//! Application relationship maps.
//!
//! A [`RelationshipMap`] selects the rows of a relationship sheet for a
//! [`RelationshipScope`] and groups them into one cluster per application.
//! The layout engine and spacing follow the size of the selection.

use std::{fmt, str::FromStr};

use log::debug;

use strata_core::relationship::Relationship;
use strata_inventory::RelationshipSheet;

/// Which applications a relationship map covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipScope {
    /// Every relationship of the sheet.
    All,
    /// Relationships between applications the sheet documents.
    Ecosystem,
    /// Relationships touching the listed applications.
    Applications(Vec<String>),
}

impl RelationshipScope {
    /// Returns the output file stem for this scope.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::relationship::RelationshipScope;
    ///
    /// let scope: RelationshipScope = "Payroll, HR Portal".parse().unwrap();
    /// assert_eq!(scope.file_stem(false), "relationship_map_Payroll_HR_Portal");
    /// assert_eq!(RelationshipScope::All.file_stem(true), "relationship_map_all_legend");
    /// ```
    pub fn file_stem(&self, legend: bool) -> String {
        let mut stem = match self {
            Self::All => "relationship_map_all".to_string(),
            Self::Ecosystem => "relationship_map_ecosystem".to_string(),
            Self::Applications(applications) => format!(
                "relationship_map_{}",
                applications.join("_").replace([' ', '/'], "_")
            ),
        };
        if legend {
            stem.push_str("_legend");
        }
        stem
    }
}

impl FromStr for RelationshipScope {
    type Err = String;

    /// Parses a comma-separated application list; `all` or `ecosystem`
    /// anywhere in the list selects that scope.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let applications: Vec<String> = s
            .split(',')
            .map(str::trim)
            .filter(|app| !app.is_empty())
            .map(str::to_string)
            .collect();

        if applications.iter().any(|app| app == "all") {
            Ok(Self::All)
        } else if applications.iter().any(|app| app == "ecosystem") {
            Ok(Self::Ecosystem)
        } else if applications.is_empty() {
            Err("no application named".to_string())
        } else {
            Ok(Self::Applications(applications))
        }
    }
}

impl fmt::Display for RelationshipScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Ecosystem => f.write_str("ecosystem"),
            Self::Applications(applications) => f.write_str(&applications.join(",")),
        }
    }
}

/// Graphviz layout engine of a relationship map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEngine {
    /// Circular layout for a single application.
    Circo,
    /// Force-directed layout for larger selections.
    Sfdp,
}

impl LayoutEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Circo => "circo",
            Self::Sfdp => "sfdp",
        }
    }
}

/// The relationships drawn around one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipCluster {
    application: String,
    relationships: Vec<Relationship>,
}

impl RelationshipCluster {
    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }
}

/// A relationship map ready for export.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipMap {
    engine: LayoutEngine,
    rank_separation: f32,
    node_separation: f32,
    applications: Vec<String>,
    peers: Vec<String>,
    clusters: Vec<RelationshipCluster>,
    topics: bool,
    legend: bool,
}

impl RelationshipMap {
    /// Selects the relationships of `sheet` covered by `scope`.
    pub fn new(sheet: &RelationshipSheet, scope: &RelationshipScope) -> Self {
        let documented: Vec<&str> = sheet.primary_applications();
        let is_documented = |app: &str| documented.contains(&app);

        let (applications, rows, engine, rank_separation, node_separation): (
            Vec<String>,
            Vec<&Relationship>,
            LayoutEngine,
            f32,
            f32,
        ) = match scope {
            RelationshipScope::All => (
                documented.iter().map(|app| app.to_string()).collect(),
                sheet.relationships().iter().collect(),
                LayoutEngine::Sfdp,
                10.0,
                10.0,
            ),
            RelationshipScope::Ecosystem => (
                documented.iter().map(|app| app.to_string()).collect(),
                sheet
                    .relationships()
                    .iter()
                    .filter(|rel| is_documented(rel.source()) && is_documented(rel.target()))
                    .collect(),
                LayoutEngine::Sfdp,
                10.0,
                10.0,
            ),
            RelationshipScope::Applications(applications) => {
                let selected = |app: &str| applications.iter().any(|a| a == app);
                let rows = sheet
                    .relationships()
                    .iter()
                    .filter(|rel| selected(rel.source()) || selected(rel.target()))
                    .collect();
                let (engine, node_separation) = if applications.len() == 1 {
                    (LayoutEngine::Circo, 2.0)
                } else {
                    (LayoutEngine::Sfdp, 5.0)
                };
                (applications.clone(), rows, engine, 5.0, node_separation)
            }
        };

        let is_selected = |app: &str| applications.iter().any(|a| a == app);

        // Documented applications reached from the selection but not selected themselves.
        let mut peers: Vec<String> = Vec::new();
        if matches!(scope, RelationshipScope::Applications(_)) {
            for rel in &rows {
                let source = rel.source();
                if is_documented(source)
                    && !is_selected(source)
                    && !peers.iter().any(|peer| peer == source)
                {
                    peers.push(source.to_string());
                }
            }
        }

        let clusters: Vec<RelationshipCluster> = applications
            .iter()
            .filter_map(|application| {
                let touching: Vec<&Relationship> = rows
                    .iter()
                    .copied()
                    .filter(|rel| rel.source() == application || rel.target() == application)
                    .collect();
                if touching.is_empty() {
                    return None;
                }
                let relationships = touching
                    .into_iter()
                    .filter(|rel| rel.source() == application || !is_selected(rel.source()))
                    .cloned()
                    .collect();
                Some(RelationshipCluster {
                    application: application.clone(),
                    relationships,
                })
            })
            .collect();

        debug!(
            scope:% = scope,
            applications = applications.len(),
            relationships = rows.len(),
            clusters = clusters.len();
            "Selected relationships"
        );

        Self {
            engine,
            rank_separation,
            node_separation,
            applications,
            peers,
            clusters,
            topics: *scope != RelationshipScope::All,
            legend: false,
        }
    }

    /// Adds the direction and mechanism legend clusters.
    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    pub fn rank_separation(&self) -> f32 {
        self.rank_separation
    }

    pub fn node_separation(&self) -> f32 {
        self.node_separation
    }

    /// Returns the selected applications, drawn as prominent nodes.
    pub fn applications(&self) -> &[String] {
        &self.applications
    }

    /// Returns documented applications related to the selection but not part of it.
    pub fn peers(&self) -> &[String] {
        &self.peers
    }

    pub fn clusters(&self) -> &[RelationshipCluster] {
        &self.clusters
    }

    /// Returns `true` if edges carry their topic as label.
    pub fn shows_topics(&self) -> bool {
        self.topics
    }

    pub fn has_legend(&self) -> bool {
        self.legend
    }
}
