//! Application relationship sheet loading.

use std::collections::BTreeSet;

use log::{debug, warn};

use strata_core::relationship::Relationship;

use crate::{
    error::{Diagnostic, ErrorCode, InventoryError},
    sheet,
};

/// Columns a relationship sheet must provide.
pub const RELATIONSHIP_COLUMNS: [&str; 2] = ["App-1", "App-2"];

/// The rows of a relationship sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipSheet {
    relationships: Vec<Relationship>,
}

impl RelationshipSheet {
    pub fn new(relationships: Vec<Relationship>) -> Self {
        Self { relationships }
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Returns the sorted, distinct applications that appear as `App-1`.
    ///
    /// These are the applications the sheet documents; `App-2` may also name
    /// external systems.
    pub fn primary_applications(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .relationships
            .iter()
            .map(Relationship::source)
            .collect();
        names.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}

/// Loads a relationship sheet.
///
/// Rows naming only one application are skipped with a warning.
///
/// # Errors
///
/// Returns an [`InventoryError`] when `App-1` or `App-2` is missing from the
/// header or a row cannot be read.
pub fn load_relationships(source: &str) -> Result<RelationshipSheet, InventoryError> {
    let rows = sheet::read_rows::<Relationship>(source, &RELATIONSHIP_COLUMNS, ErrorCode::E202)?;

    let mut relationships = Vec::with_capacity(rows.len());
    for row in rows {
        let relationship = row.value.trimmed();
        if relationship.source().is_empty() || relationship.target().is_empty() {
            let diag = Diagnostic::warning(format!(
                "relationship on line {} names only one application",
                row.line
            ))
            .with_code(ErrorCode::E203)
            .with_label(row.span, "skipped row");
            warn!(diagnostic:% = diag; "Incomplete relationship");
            continue;
        }
        relationships.push(relationship);
    }

    debug!(relationships = relationships.len(); "Relationship sheet loaded");
    Ok(RelationshipSheet::new(relationships))
}

#[cfg(test)]
mod tests {
    use strata_core::relationship::{Direction, Mechanism};

    use super::*;

    #[test]
    fn test_load_relationships() {
        let source = "App-1,App-2,Direction,Mechanism,Topic\n\
                      Payroll , Billing,Bi-Directional,API,Invoices\n\
                      Billing,Ledger,,FTP,\n\
                      ,Ledger,,,\n";

        let sheet = load_relationships(source).unwrap();

        assert_eq!(sheet.len(), 2);
        let first = &sheet.relationships()[0];
        assert_eq!(first.source(), "Payroll");
        assert_eq!(first.target(), "Billing");
        assert_eq!(first.direction(), Direction::Bidirectional);
        assert_eq!(first.mechanism(), Mechanism::Api);
        assert_eq!(first.topic(), Some("Invoices"));
        assert_eq!(sheet.relationships()[1].topic(), None);
        assert_eq!(sheet.primary_applications(), vec!["Billing", "Payroll"]);
    }

    #[test]
    fn test_missing_app_column() {
        let err = load_relationships("App-1,Direction\nPayroll,Forward\n").unwrap_err();

        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E202));
        assert_eq!(err.diagnostics()[0].message(), "missing required column `App-2`");
    }
}
