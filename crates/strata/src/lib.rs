//! Strata - tiered infrastructure diagrams from cloud inventory exports.
//!
//! Inventory rows carry no links between resources. Strata classifies each
//! resource into a deployment tier, reconstructs parent/child relations from
//! naming conventions and emits one Graphviz DOT digraph per application.
//! Application relationship sheets are turned into relationship maps.

pub mod classify;
pub mod config;
pub mod context;
#[cfg(feature = "graphviz")]
pub mod export;
pub mod model;
pub mod relationship;
pub mod resolve;
pub mod unique;

mod error;

pub use strata_core::{color, node, record, resource, store, tier};
pub use strata_inventory::{Inventory, RelationshipSheet, SharedAppXref};

pub use error::StrataError;

#[cfg(feature = "graphviz")]
use dot_structures::Graph;
#[cfg(feature = "graphviz")]
use log::error;
use log::{debug, info};

use config::AppConfig;
use context::RunContext;
#[cfg(feature = "graphviz")]
use context::ApplicationDiagram;
#[cfg(feature = "graphviz")]
use export::{Exporter, relationship::RelationshipDiagram};
#[cfg(feature = "graphviz")]
use relationship::{RelationshipMap, RelationshipScope};
#[cfg(feature = "graphviz")]
use unique::UniqueNameTable;

/// Outcome of diagramming every application of an inventory.
#[cfg(feature = "graphviz")]
#[derive(Debug, Default)]
pub struct RunReport {
    diagrams: Vec<ApplicationDiagram>,
    failures: Vec<StrataError>,
    unique_names: UniqueNameTable,
}

#[cfg(feature = "graphviz")]
impl RunReport {
    /// Returns the diagrams produced, in application order.
    pub fn diagrams(&self) -> &[ApplicationDiagram] {
        &self.diagrams
    }

    /// Returns the per-application errors of the run.
    pub fn failures(&self) -> &[StrataError] {
        &self.failures
    }

    /// Records a failure found after the run, such as a diagram that could not be rendered.
    pub fn record_failure(&mut self, failure: StrataError) {
        self.failures.push(failure);
    }

    pub fn unique_names(&self) -> &UniqueNameTable {
        &self.unique_names
    }
}

/// Builder for loading inventories and producing diagrams.
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Loads an inventory export and applies the configured row filter.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Inventory`] with the diagnostics of a malformed source.
    pub fn load_inventory(&self, source: &str) -> Result<Inventory, StrataError> {
        info!("Loading inventory");
        let filter = self.config.inventory().record_filter();
        let inventory = strata_inventory::load_inventory(source, &filter)
            .map_err(|err| StrataError::new_inventory_error(err, source))?;

        info!(
            records = inventory.records().len(),
            skipped = inventory.skipped(),
            applications = inventory.application_names().len();
            "Inventory loaded"
        );
        Ok(inventory)
    }

    /// Loads a standalone shared-application cross reference.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Inventory`] with the diagnostics of a malformed source.
    pub fn load_xref(&self, source: &str) -> Result<SharedAppXref, StrataError> {
        let xref = SharedAppXref::load(source)
            .map_err(|err| StrataError::new_inventory_error(err, source))?;
        debug!(entries = xref.len(); "Cross reference loaded");
        Ok(xref)
    }

    /// Returns a run context for driving applications one at a time.
    pub fn context<'a>(&'a self, inventory: &'a Inventory) -> RunContext<'a> {
        RunContext::new(&self.config, inventory)
    }

    /// Diagrams every application of `inventory`.
    ///
    /// An application that fails is logged and recorded in the report; the
    /// run continues with the next one.
    ///
    /// # Errors
    ///
    /// Returns the first error that is not confined to one application,
    /// such as an invalid style configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::{DiagramBuilder, config::AppConfig};
    ///
    /// let source = "\
    /// AppName,type,name,Environment,ResourceCategory,ResourceType
    /// Payroll,microsoft.compute/virtualmachines,appweb01-prd-01,Production,IaaS,Virtual Machine
    /// Payroll,microsoft.network/loadbalancers,lb-appweb01prd,Production,IaaS,Load Balancer
    /// ";
    ///
    /// let builder = DiagramBuilder::new(AppConfig::default());
    /// let inventory = builder.load_inventory(source).expect("valid inventory");
    /// let report = builder.run(&inventory).expect("valid style");
    ///
    /// assert_eq!(report.diagrams().len(), 1);
    /// let dot = report.diagrams()[0].dot();
    /// assert!(dot.contains("loadbalancers_1"));
    /// assert!(dot.contains("virtualmachines_1"));
    /// ```
    #[cfg(feature = "graphviz")]
    pub fn run(&self, inventory: &Inventory) -> Result<RunReport, StrataError> {
        let mut context = self.context(inventory);
        let mut diagrams = Vec::new();
        let mut failures = Vec::new();

        for application in inventory.application_names() {
            match context.process(application) {
                Ok(diagram) => diagrams.push(diagram),
                Err(err) if err.is_application_error() => {
                    error!(app = application, err:% = err; "Application skipped");
                    failures.push(err);
                }
                Err(err) => return Err(err),
            }
        }

        info!(diagrams = diagrams.len(), failures = failures.len(); "Run complete");
        Ok(RunReport {
            diagrams,
            failures,
            unique_names: context.into_unique_names(),
        })
    }

    /// Loads an application relationship sheet.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Inventory`] with the diagnostics of a malformed source.
    pub fn load_relationships(&self, source: &str) -> Result<RelationshipSheet, StrataError> {
        let sheet = strata_inventory::load_relationships(source)
            .map_err(|err| StrataError::new_inventory_error(err, source))?;
        info!(relationships = sheet.len(); "Relationship sheet loaded");
        Ok(sheet)
    }

    /// Exports the relationship map of `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the map cannot be exported.
    #[cfg(feature = "graphviz")]
    pub fn relationship_map(
        &self,
        sheet: &RelationshipSheet,
        scope: &RelationshipScope,
        legend: bool,
    ) -> Result<Graph, StrataError> {
        let map = RelationshipMap::new(sheet, scope).with_legend(legend);
        Ok(RelationshipDiagram.export(&map)?)
    }

    /// Renders an exported graph with the Graphviz executables.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Render`] if Graphviz cannot be started or fails.
    #[cfg(feature = "graphviz")]
    pub fn render(&self, graph: &Graph, format: export::RenderFormat) -> Result<Vec<u8>, StrataError> {
        Ok(export::render(graph, format)?)
    }
}
