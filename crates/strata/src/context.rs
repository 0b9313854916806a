//! Per-run state.

#[cfg(feature = "graphviz")]
use dot_structures::Graph;
#[cfg(feature = "graphviz")]
use log::{debug, info};

use strata_inventory::Inventory;

#[cfg(feature = "graphviz")]
use crate::export::{self, Exporter, dot::TierDiagram};
use crate::{
    config::AppConfig,
    error::StrataError,
    model::{ApplicationGraph, ModelBuilder},
    resolve::resolve,
    unique::UniqueNameTable,
};

/// The exported diagram of one application.
#[cfg(feature = "graphviz")]
#[derive(Debug, Clone)]
pub struct ApplicationDiagram {
    application: String,
    graph: Graph,
    dot: String,
}

#[cfg(feature = "graphviz")]
impl ApplicationDiagram {
    pub fn new(application: impl Into<String>, graph: Graph) -> Self {
        let dot = export::to_dot(&graph);
        Self {
            application: application.into(),
            graph,
            dot,
        }
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the graph printed as DOT text.
    pub fn dot(&self) -> &str {
        &self.dot
    }
}

/// State shared by the stages of one run.
///
/// The context borrows the configuration and inventory and owns the
/// unique-name table filled while applications are built.
#[derive(Debug)]
pub struct RunContext<'a> {
    config: &'a AppConfig,
    inventory: &'a Inventory,
    unique_names: UniqueNameTable,
}

impl<'a> RunContext<'a> {
    pub fn new(config: &'a AppConfig, inventory: &'a Inventory) -> Self {
        Self {
            config,
            inventory,
            unique_names: UniqueNameTable::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        self.config
    }

    pub fn inventory(&self) -> &Inventory {
        self.inventory
    }

    pub fn unique_names(&self) -> &UniqueNameTable {
        &self.unique_names
    }

    pub fn into_unique_names(self) -> UniqueNameTable {
        self.unique_names
    }

    /// Builds and resolves the graph of `application`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Application`] if building or a resolver pass fails.
    pub fn build(&mut self, application: &str) -> Result<ApplicationGraph, StrataError> {
        let mut graph = ModelBuilder::new(self.config, self.inventory)
            .build(application, &mut self.unique_names)?;
        resolve(application, graph.store_mut())?;
        Ok(graph)
    }

    /// Exports a resolved graph as a tiered digraph.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Config`] if the configured style is invalid.
    #[cfg(feature = "graphviz")]
    pub fn export(&self, graph: &ApplicationGraph) -> Result<Graph, StrataError> {
        let diagram = TierDiagram::new(self.config.style()).export(graph)?;
        debug!(app = graph.application(), nodes = graph.store().len(); "Diagram exported");
        Ok(diagram)
    }

    /// Builds, resolves and exports `application`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage.
    #[cfg(feature = "graphviz")]
    pub fn process(&mut self, application: &str) -> Result<ApplicationDiagram, StrataError> {
        info!(app = application; "Processing application");
        let graph = self.build(application)?;
        let diagram = self.export(&graph)?;
        Ok(ApplicationDiagram::new(application, diagram))
    }
}
