//! The loaded, filtered and ordered inventory.

use indexmap::IndexSet;
use log::debug;

use strata_core::record::ResourceRecord;

use crate::{loader::RecordFilter, xref::SharedAppXref};

/// Inventory rows in scope for diagramming, with the cross reference.
///
/// Records are ordered by application, category, lookup type and name. That
/// order is the tie-break order of every later matching step.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    records: Vec<ResourceRecord>,
    skipped: usize,
    xref: SharedAppXref,
}

impl Inventory {
    /// Builds an inventory from raw rows.
    ///
    /// The cross reference is taken from the optional columns of all rows,
    /// including the ones `filter` rejects.
    pub fn new(records: Vec<ResourceRecord>, filter: &RecordFilter) -> Self {
        let xref = SharedAppXref::from_records(&records);
        let total = records.len();

        let mut records: Vec<ResourceRecord> = records
            .into_iter()
            .filter(|record| filter.accepts(record))
            .collect();
        records.sort_by(|a, b| {
            (a.app_name(), a.category(), a.lookup_type(), a.name()).cmp(&(
                b.app_name(),
                b.category(),
                b.lookup_type(),
                b.name(),
            ))
        });

        let skipped = total - records.len();
        debug!(kept = records.len(), skipped; "Inventory filtered");

        Self {
            records,
            skipped,
            xref,
        }
    }

    /// Overlays a standalone cross reference on the one read from the rows.
    pub fn with_xref(mut self, xref: SharedAppXref) -> Self {
        self.xref.merge(xref);
        self
    }

    /// Returns the records in scope, in sorted order.
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// Returns the number of rows the filter rejected.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn xref(&self) -> &SharedAppXref {
        &self.xref
    }

    /// Returns each application name once, in sorted order.
    pub fn application_names(&self) -> Vec<&str> {
        let names: IndexSet<&str> = self.records.iter().map(ResourceRecord::app_name).collect();
        names.into_iter().collect()
    }

    /// Returns the records of `application`, in sorted order.
    pub fn records_for<'a>(
        &'a self,
        application: &str,
    ) -> impl Iterator<Item = &'a ResourceRecord> {
        self.records
            .iter()
            .filter(move |record| record.app_name() == application)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
