//! Inventory sheet loading.
//!
//! Reads the inventory export, keeps the rows in scope for diagramming and
//! orders them the way every later stage expects.

use log::{debug, info};

use strata_core::record::ResourceRecord;

use crate::{
    error::{ErrorCode, InventoryError},
    inventory::Inventory,
    sheet,
};

/// Columns every inventory export must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "AppName",
    "type",
    "name",
    "Environment",
    "ResourceCategory",
    "ResourceType",
];

/// Selects the inventory rows that are diagrammed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    environment: String,
    categories: Vec<String>,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            environment: "Production".to_string(),
            categories: vec!["IaaS".to_string(), "PaaS".to_string()],
        }
    }
}

impl RecordFilter {
    /// Creates a filter for `environment` keeping categories that contain any of `categories`.
    pub fn new(environment: impl Into<String>, categories: Vec<String>) -> Self {
        Self {
            environment: environment.into(),
            categories,
        }
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns `true` if `record` belongs to the environment and to one of the categories.
    pub fn accepts(&self, record: &ResourceRecord) -> bool {
        record.environment() == self.environment
            && self
                .categories
                .iter()
                .any(|category| record.category().contains(category.as_str()))
    }
}

/// Reads every row of an inventory export.
///
/// Application names are trimmed and each record remembers its source line.
///
/// # Errors
///
/// Returns an [`InventoryError`] when a required column is missing or any
/// row cannot be read.
pub fn read_records(source: &str) -> Result<Vec<ResourceRecord>, InventoryError> {
    let rows = sheet::read_rows::<ResourceRecord>(source, &REQUIRED_COLUMNS, ErrorCode::E001)?;

    Ok(rows
        .into_iter()
        .map(|row| row.value.trimmed().with_line(row.line))
        .collect())
}

/// Loads an inventory export and keeps the rows selected by `filter`.
///
/// # Arguments
///
/// * `source` - CSV text of the inventory export
/// * `filter` - Environment and category selection
///
/// # Errors
///
/// See [`read_records`].
pub fn load_inventory(source: &str, filter: &RecordFilter) -> Result<Inventory, InventoryError> {
    info!(environment = filter.environment(); "Loading inventory");

    let records = read_records(source)?;
    debug!(rows = records.len(); "Inventory rows read");

    Ok(Inventory::new(records, filter))
}
