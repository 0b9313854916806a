//! Environment-specific unique names.
//!
//! Resources flagged `Unique = Y` need a second, environment-specific name.
//! Naming conventions are expressed as an ordered list of rules; the first
//! rule whose predicate holds produces the name.

use indexmap::IndexMap;
use serde::Serialize;

/// One naming convention.
#[derive(Debug, Clone, Copy)]
pub struct UniqueNameRule {
    name: &'static str,
    applies: fn(&str) -> bool,
    transform: fn(&str, &str) -> String,
}

impl UniqueNameRule {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this convention applies to `name`.
    pub fn applies(&self, name: &str) -> bool {
        (self.applies)(name)
    }

    /// Derives the unique name; `suffix` is the configured fallback marker.
    pub fn apply(&self, name: &str, suffix: &str) -> String {
        (self.transform)(name, suffix)
    }
}

/// Naming conventions, in priority order. The last rule always applies.
pub const RULES: [UniqueNameRule; 4] = [
    UniqueNameRule {
        name: "environment-token",
        applies: |name| name.contains("-prd-") || name.contains("prod"),
        transform: |name, _| name.replace("-prd-", "-ire-").replace("prod", "ire"),
    },
    UniqueNameRule {
        name: "legacy",
        applies: |name| {
            (name.starts_with("com") || name.starts_with("crp")) && name.chars().count() >= 4
        },
        transform: |name, _| replace_char(name, 3, 'i'),
    },
    UniqueNameRule {
        name: "greenfield",
        applies: |name| name.starts_with("mpc") && name.chars().count() >= 7,
        transform: |name, _| replace_char(name, 6, 'i'),
    },
    UniqueNameRule {
        name: "suffix",
        applies: |_| true,
        transform: |name, suffix| format!("{name}{suffix}"),
    },
];

fn replace_char(name: &str, index: usize, replacement: char) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| if i == index { replacement } else { c })
        .collect()
}

/// Derives the unique name of `name` with the first applicable rule.
///
/// # Examples
///
/// ```
/// use strata::unique::unique_name;
///
/// assert_eq!(unique_name("app-prd-01", "_IRE"), "app-ire-01");
/// assert_eq!(unique_name("comx123", "_IRE"), "comi123");
/// assert_eq!(unique_name("mpcweb01", "_IRE"), "mpcwebi1");
/// assert_eq!(unique_name("payroll", "_IRE"), "payroll_IRE");
/// ```
pub fn unique_name(name: &str, suffix: &str) -> String {
    RULES
        .iter()
        .find(|rule| rule.applies(name))
        .map(|rule| rule.apply(name, suffix))
        .unwrap_or_else(|| format!("{name}{suffix}"))
}

/// Key of a unique-name entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResourceKey {
    application: String,
    raw_type: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct UniqueNameRow<'a> {
    #[serde(rename = "AppName")]
    application: &'a str,
    #[serde(rename = "type")]
    raw_type: &'a str,
    name: &'a str,
    #[serde(rename = "UniqueName")]
    unique_name: &'a str,
}

/// Unique names computed during a run, keyed by resource.
#[derive(Debug, Clone, Default)]
pub struct UniqueNameTable {
    entries: IndexMap<ResourceKey, String>,
}

impl UniqueNameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the unique name of a resource. The first entry per resource is kept.
    pub fn insert(
        &mut self,
        application: impl Into<String>,
        raw_type: impl Into<String>,
        name: impl Into<String>,
        unique_name: impl Into<String>,
    ) {
        let key = ResourceKey {
            application: application.into(),
            raw_type: raw_type.into(),
            name: name.into(),
        };
        self.entries.entry(key).or_insert_with(|| unique_name.into());
    }

    /// Returns the unique name recorded for a resource.
    pub fn get(&self, application: &str, raw_type: &str, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| {
                key.application == application && key.raw_type == raw_type && key.name == name
            })
            .map(|(_, unique)| unique.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the table as CSV with the columns `AppName,type,name,UniqueName`.
    ///
    /// # Errors
    ///
    /// Returns a [`csv::Error`] if writing fails.
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(writer);
        if self.entries.is_empty() {
            writer.write_record(["AppName", "type", "name", "UniqueName"])?;
        }
        for (key, unique_name) in &self.entries {
            writer.serialize(UniqueNameRow {
                application: &key.application,
                raw_type: &key.raw_type,
                name: &key.name,
                unique_name,
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_token_rule() {
        assert_eq!(unique_name("pay-prd-web01", "_IRE"), "pay-ire-web01");
        assert_eq!(unique_name("payprodweb", "_IRE"), "payireweb");
        // Both tokens are rewritten.
        assert_eq!(unique_name("prod-prd-01", "_IRE"), "ire-ire-01");
    }

    #[test]
    fn test_legacy_rule() {
        assert_eq!(unique_name("comp0042", "_IRE"), "comi0042");
        assert_eq!(unique_name("crpxweb", "_IRE"), "crpiweb");
        // Too short for the legacy convention.
        assert_eq!(unique_name("com", "_IRE"), "com_IRE");
    }

    #[test]
    fn test_greenfield_rule() {
        assert_eq!(unique_name("mpcabcpweb", "_IRE"), "mpcabciweb");
        assert_eq!(unique_name("mpc12", "_IRE"), "mpc12_IRE");
    }

    #[test]
    fn test_rule_order() {
        // The environment token wins over the legacy prefix.
        assert_eq!(unique_name("com-prd-01", "_IRE"), "com-ire-01");
        assert_eq!(RULES[0].name(), "environment-token");
        assert!(RULES[3].applies(""));
    }

    #[test]
    fn test_custom_suffix() {
        assert_eq!(unique_name("payroll", "-dr"), "payroll-dr");
    }

    #[test]
    fn test_table_keeps_first_entry() {
        let mut table = UniqueNameTable::new();
        table.insert("Payroll", "microsoft.compute/virtualmachines", "payweb01", "payweb01_IRE");
        table.insert("Payroll", "microsoft.compute/virtualmachines", "payweb01", "other");

        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("Payroll", "microsoft.compute/virtualmachines", "payweb01"),
            Some("payweb01_IRE")
        );
    }

    #[test]
    fn test_write_csv() {
        let mut table = UniqueNameTable::new();
        table.insert("Payroll", "microsoft.compute/virtualmachines", "pay-prd-01", "pay-ire-01");

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "AppName,type,name,UniqueName\nPayroll,microsoft.compute/virtualmachines,pay-prd-01,pay-ire-01\n"
        );
    }

    #[test]
    fn test_write_csv_empty_has_header() {
        let mut out = Vec::new();
        UniqueNameTable::new().write_csv(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "AppName,type,name,UniqueName\n");
    }
}
