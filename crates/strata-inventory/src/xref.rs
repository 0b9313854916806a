//! Shared-application cross reference.
//!
//! Some applications run on infrastructure owned by a shared platform
//! application; their diagrams include the shared application's resources.
//! The cross reference also carries the public URL of each application.

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;

use strata_core::record::ResourceRecord;

use crate::{
    error::{Diagnostic, ErrorCode, InventoryError},
    sheet,
};

/// Columns a standalone cross reference sheet must provide.
pub const XREF_COLUMNS: [&str; 2] = ["PrimaryAppName", "SharedAppName"];

#[derive(Debug, Deserialize)]
struct XrefRow {
    #[serde(rename = "PrimaryAppName")]
    primary: String,

    #[serde(rename = "SharedAppName", default)]
    shared: Option<String>,

    #[serde(rename = "URL", default)]
    url: Option<String>,
}

/// Cross reference entry of one primary application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XrefEntry {
    shared_app: Option<String>,
    url: Option<String>,
}

impl XrefEntry {
    pub fn shared_app(&self) -> Option<&str> {
        self.shared_app.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// Primary application → shared application and URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedAppXref {
    entries: IndexMap<String, XrefEntry>,
}

impl SharedAppXref {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the cross reference from the optional columns of inventory rows.
    ///
    /// The first non-empty value per application wins.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ResourceRecord>) -> Self {
        let mut xref = Self::new();
        for record in records {
            if record.shared_app_name().is_some() || record.url().is_some() {
                xref.insert(
                    record.app_name(),
                    record.shared_app_name().map(str::to_string),
                    record.url().map(str::to_string),
                );
            }
        }
        xref
    }

    /// Loads a standalone cross reference sheet.
    ///
    /// Rows without a primary application, or without both a shared
    /// application and a URL, are ignored. A primary application declared
    /// twice with different shared applications keeps its first declaration
    /// and produces a warning.
    ///
    /// # Errors
    ///
    /// Returns an [`InventoryError`] when a required column is missing or a
    /// row cannot be read.
    pub fn load(source: &str) -> Result<Self, InventoryError> {
        let rows = sheet::read_rows::<XrefRow>(source, &XREF_COLUMNS, ErrorCode::E200)?;

        let mut xref = Self::new();
        for row in rows {
            let primary = row.value.primary.trim();
            let shared = non_empty(row.value.shared);
            let url = non_empty(row.value.url);
            if primary.is_empty() || (shared.is_none() && url.is_none()) {
                continue;
            }

            if !xref.insert(primary, shared, url) {
                let first = xref.shared_app(primary).unwrap_or_default();
                let diag = Diagnostic::warning(format!(
                    "application `{primary}` is already shared with `{first}`"
                ))
                .with_code(ErrorCode::E201)
                .with_label(row.span, "ignored declaration")
                .with_help("keep one cross reference row per primary application");
                warn!(diagnostic:% = diag; "Conflicting cross reference");
            }
        }

        debug!(entries = xref.len(); "Cross reference loaded");
        Ok(xref)
    }

    /// Records `shared` and `url` for `primary`, keeping existing values.
    ///
    /// Returns `false` if `primary` already has a different shared application.
    pub fn insert(
        &mut self,
        primary: impl Into<String>,
        shared: Option<String>,
        url: Option<String>,
    ) -> bool {
        let entry = self.entries.entry(primary.into()).or_default();

        let conflict = matches!(
            (&entry.shared_app, &shared),
            (Some(existing), Some(new)) if existing != new
        );
        if entry.shared_app.is_none() {
            entry.shared_app = shared;
        }
        if entry.url.is_none() {
            entry.url = url;
        }
        !conflict
    }

    /// Overlays `other` on top of this cross reference; entries of `other` win.
    pub fn merge(&mut self, other: SharedAppXref) {
        for (primary, entry) in other.entries {
            let existing = self.entries.entry(primary).or_default();
            if entry.shared_app.is_some() {
                existing.shared_app = entry.shared_app;
            }
            if entry.url.is_some() {
                existing.url = entry.url;
            }
        }
    }

    pub fn get(&self, primary: &str) -> Option<&XrefEntry> {
        self.entries.get(primary)
    }

    /// Returns the shared application declared for `primary`.
    pub fn shared_app(&self, primary: &str) -> Option<&str> {
        self.get(primary).and_then(XrefEntry::shared_app)
    }

    /// Returns the URL declared for `primary`.
    pub fn url(&self, primary: &str) -> Option<&str> {
        self.get(primary).and_then(XrefEntry::url)
    }

    /// Returns the primary applications in declaration order.
    pub fn primary_apps(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records_first_value_wins() {
        let records = vec![
            ResourceRecord::new("Payroll", "microsoft.compute/virtualmachines", "payweb01")
                .with_shared_app("Platform"),
            ResourceRecord::new("Payroll", "microsoft.compute/virtualmachines", "payweb02")
                .with_shared_app("Other")
                .with_url("https://payroll.example.net"),
            ResourceRecord::new("Billing", "microsoft.compute/virtualmachines", "bill01"),
        ];

        let xref = SharedAppXref::from_records(&records);

        assert_eq!(xref.len(), 1);
        assert_eq!(xref.shared_app("Payroll"), Some("Platform"));
        assert_eq!(xref.url("Payroll"), Some("https://payroll.example.net"));
        assert_eq!(xref.shared_app("Billing"), None);
    }

    #[test]
    fn test_load_sheet() {
        let source = "PrimaryAppName,SharedAppName,URL\n\
                      Payroll , Platform,https://payroll.example.net\n\
                      Billing,,\n\
                      Payroll,Other,\n\
                      Portal,,https://portal.example.net\n";

        let xref = SharedAppXref::load(source).unwrap();

        assert_eq!(xref.primary_apps().collect::<Vec<_>>(), vec!["Payroll", "Portal"]);
        assert_eq!(xref.shared_app("Payroll"), Some("Platform"));
        assert_eq!(xref.url("Portal"), Some("https://portal.example.net"));
    }

    #[test]
    fn test_load_missing_column() {
        let err = SharedAppXref::load("PrimaryAppName,URL\nPayroll,x\n").unwrap_err();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E200));
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = SharedAppXref::new();
        base.insert("Payroll", Some("Platform".to_string()), Some("https://a".to_string()));

        let mut sheet = SharedAppXref::new();
        sheet.insert("Payroll", None, Some("https://b".to_string()));
        sheet.insert("Billing", Some("Platform".to_string()), None);

        base.merge(sheet);

        assert_eq!(base.shared_app("Payroll"), Some("Platform"));
        assert_eq!(base.url("Payroll"), Some("https://b"));
        assert_eq!(base.shared_app("Billing"), Some("Platform"));
    }

    #[test]
    fn test_insert_conflict() {
        let mut xref = SharedAppXref::new();

        assert!(xref.insert("Payroll", Some("Platform".to_string()), None));
        assert!(xref.insert("Payroll", Some("Platform".to_string()), None));
        assert!(!xref.insert("Payroll", Some("Other".to_string()), None));
        assert_eq!(xref.shared_app("Payroll"), Some("Platform"));
    }
}
