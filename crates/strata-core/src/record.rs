//! Inventory records.
//!
//! A [`ResourceRecord`] is one row of the inventory export after the resource
//! lookup and shared-application cross reference have been joined onto it.
//! Records are immutable once loaded.

use serde::Deserialize;

use crate::resource::ResourceType;

/// One row of a cloud inventory export.
///
/// Field names follow the export's column headers. Cross-reference columns
/// are optional and absent columns deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRecord {
    #[serde(rename = "AppName")]
    app_name: String,

    #[serde(rename = "type")]
    resource_type: String,

    #[serde(rename = "name")]
    name: String,

    #[serde(rename = "Environment")]
    environment: String,

    #[serde(rename = "ResourceCategory")]
    category: String,

    #[serde(rename = "ResourceType")]
    lookup_type: String,

    #[serde(rename = "SharedAppName", default)]
    shared_app_name: Option<String>,

    #[serde(rename = "PrimaryAppName", default)]
    primary_app_name: Option<String>,

    #[serde(rename = "URL", default)]
    url: Option<String>,

    #[serde(rename = "Unique", default)]
    unique: Option<String>,

    /// 1-based line of the record in its source, 0 when built in memory.
    #[serde(skip)]
    line: u64,
}

impl ResourceRecord {
    /// Creates a production IaaS record for `app_name`.
    ///
    /// The lookup type mirrors the raw type; use the `with_*` methods to
    /// fill in the remaining columns.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_core::record::ResourceRecord;
    ///
    /// let record = ResourceRecord::new("Payroll", "microsoft.compute/virtualmachines", "payweb01")
    ///     .with_category("IaaS");
    /// assert_eq!(record.resource_type().segment(), "virtualmachines");
    /// ```
    pub fn new(
        app_name: impl Into<String>,
        resource_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        Self {
            app_name: app_name.into(),
            lookup_type: resource_type.clone(),
            resource_type,
            name: name.into(),
            environment: "Production".to_string(),
            category: "IaaS".to_string(),
            shared_app_name: None,
            primary_app_name: None,
            url: None,
            unique: None,
            line: 0,
        }
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_lookup_type(mut self, lookup_type: impl Into<String>) -> Self {
        self.lookup_type = lookup_type.into();
        self
    }

    pub fn with_shared_app(mut self, shared_app_name: impl Into<String>) -> Self {
        self.shared_app_name = Some(shared_app_name.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Flags the record as requiring an environment-specific unique name.
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = Some(if unique { "Y" } else { "N" }.to_string());
        self
    }

    pub fn with_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    /// Trims surrounding whitespace from the application name columns.
    pub fn trimmed(mut self) -> Self {
        self.app_name = self.app_name.trim().to_string();
        self.shared_app_name = trim_optional(self.shared_app_name);
        self.primary_app_name = trim_optional(self.primary_app_name);
        self.url = trim_optional(self.url);
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns the raw provider type string, e.g. `microsoft.network/loadbalancers`.
    pub fn raw_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the normalized resource type.
    pub fn resource_type(&self) -> ResourceType {
        ResourceType::from_raw(&self.resource_type)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the resource type from the service lookup column.
    pub fn lookup_type(&self) -> &str {
        &self.lookup_type
    }

    pub fn shared_app_name(&self) -> Option<&str> {
        self.shared_app_name.as_deref()
    }

    pub fn primary_app_name(&self) -> Option<&str> {
        self.primary_app_name.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns `true` when the `Unique` column holds `Y`.
    pub fn is_unique(&self) -> bool {
        self.unique.as_deref().map(str::trim) == Some("Y")
    }

    pub fn line(&self) -> u64 {
        self.line
    }
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
