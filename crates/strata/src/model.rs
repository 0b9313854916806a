//! Graph model building.
//!
//! [`ModelBuilder`] turns the inventory records of one application into a
//! classified [`NodeStore`]. Parents are left for the resolver, except the
//! URL anchor which the classifier decides from the name alone.

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use strata_core::{
    node::{Node, Parent},
    record::ResourceRecord,
    store::NodeStore,
};
use strata_inventory::Inventory;

use crate::{
    classify::Classifier,
    config::AppConfig,
    error::StrataError,
    resolve::Pass,
    unique::{UniqueNameTable, unique_name},
};

/// The node graph of one application.
#[derive(Debug, Clone)]
pub struct ApplicationGraph {
    application: String,
    url: String,
    store: NodeStore,
}

impl ApplicationGraph {
    pub fn new(application: impl Into<String>, url: impl Into<String>, store: NodeStore) -> Self {
        Self {
            application: application.into(),
            url: url.into(),
            store,
        }
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    /// Returns the URL shown on the application's entry node.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut NodeStore {
        &mut self.store
    }
}

/// Builds classified node stores from inventory records.
#[derive(Debug, Clone, Copy)]
pub struct ModelBuilder<'a> {
    config: &'a AppConfig,
    inventory: &'a Inventory,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(config: &'a AppConfig, inventory: &'a Inventory) -> Self {
        Self { config, inventory }
    }

    /// Builds the unresolved graph of `application`.
    ///
    /// When the cross reference names a shared application, its records are
    /// merged in. Records are deduplicated by category, type and name, then
    /// ordered by type, category and name. Unique names of flagged records
    /// are recorded in `unique_names`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Application`] if a record has an empty name or type.
    pub fn build(
        &self,
        application: &str,
        unique_names: &mut UniqueNameTable,
    ) -> Result<ApplicationGraph, StrataError> {
        let records = self.records(application)?;
        debug!(app = application, records = records.len(); "Building node graph");

        let classifier = Classifier::new(self.config.classifier());
        let suffix = self.config.naming().unique_suffix();
        let mut sequences: IndexMap<String, usize> = IndexMap::new();
        let mut store = NodeStore::new();

        for record in records {
            let resource_type = record.resource_type();
            let sequence = sequences
                .entry(resource_type.segment().to_string())
                .or_default();
            *sequence += 1;
            let label = format!("{}_{}", resource_type.segment(), sequence);

            let classification = classifier.classify(resource_type.kind(), record.name());
            let mut node = Node::new(record.raw_type(), label, record.name())
                .with_category(record.category())
                .with_tier(classification.initial_tier());

            if record.is_unique() {
                let unique = unique_name(record.name(), suffix);
                unique_names.insert(record.app_name(), record.raw_type(), record.name(), unique.clone());
                node.set_unique_name(Some(unique));
            }

            trace!(label = node.label(), tier:% = node.tier(); "Classified node");
            let id = store.push(node);
            if classification.is_url_anchored() {
                store
                    .set_parent(id, Parent::UrlAnchor)
                    .map_err(|err| StrataError::application(application, Pass::Build, err.to_string()))?;
            }
        }

        let url = self
            .inventory
            .xref()
            .url(application)
            .unwrap_or_else(|| self.config.inventory().default_url());

        Ok(ApplicationGraph::new(application, url, store))
    }

    /// Returns the application's records merged with its shared peer's, deduplicated and ordered.
    fn records(&self, application: &str) -> Result<Vec<&'a ResourceRecord>, StrataError> {
        let shared = self
            .inventory
            .xref()
            .shared_app(application)
            .filter(|shared| *shared != application);

        let mut seen = IndexSet::new();
        let mut records = Vec::new();
        let own = self.inventory.records_for(application);
        let peer = shared
            .into_iter()
            .flat_map(|shared| self.inventory.records_for(shared));

        for record in own.chain(peer) {
            if record.name().is_empty() {
                return Err(StrataError::application(
                    application,
                    Pass::Build,
                    format!("record on line {} has an empty name", record.line()),
                ));
            }
            if record.raw_type().is_empty() {
                return Err(StrataError::application(
                    application,
                    Pass::Build,
                    format!("record on line {} has an empty type", record.line()),
                ));
            }
            if seen.insert((record.category(), record.raw_type(), record.name())) {
                records.push(record);
            }
        }

        records.sort_by(|a, b| {
            (a.category(), a.raw_type(), a.name()).cmp(&(b.category(), b.raw_type(), b.name()))
        });
        Ok(records)
    }
}
