//! Error types for Strata operations.
//!
//! This module provides the main error type [`StrataError`] which wraps the
//! error conditions of a run.

use std::io;

use thiserror::Error;

use strata_inventory::error::InventoryError;

#[cfg(feature = "graphviz")]
use crate::export;
use crate::resolve::Pass;

/// The main error type for Strata operations.
///
/// # Fatal and per-application variants
///
/// `Inventory` carries structured diagnostics with spans into the CSV source
/// and aborts the run. `Application` is confined to one application; the run
/// records it and moves on to the next application.
#[derive(Debug, Error)]
pub enum StrataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Inventory { err: InventoryError, src: String },

    #[error("Application `{application}` failed during {pass}: {message}")]
    Application {
        application: String,
        pass: Pass,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),

    #[error("Render error: {0}")]
    Render(String),
}

impl From<csv::Error> for StrataError {
    fn from(error: csv::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

#[cfg(feature = "graphviz")]
impl From<export::Error> for StrataError {
    fn from(error: export::Error) -> Self {
        match error {
            export::Error::Style(msg) => Self::Config(msg),
            export::Error::Render(msg) => Self::Render(msg),
        }
    }
}

impl StrataError {
    /// Create a new `Inventory` error with the associated source text.
    pub fn new_inventory_error(err: InventoryError, src: impl Into<String>) -> Self {
        Self::Inventory {
            err,
            src: src.into(),
        }
    }

    /// Create a new per-application error.
    pub fn application(
        application: impl Into<String>,
        pass: Pass,
        message: impl Into<String>,
    ) -> Self {
        Self::Application {
            application: application.into(),
            pass,
            message: message.into(),
        }
    }

    /// Returns `true` if the error only concerns one application.
    pub fn is_application_error(&self) -> bool {
        matches!(self, Self::Application { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_error_display() {
        let err = StrataError::application("Payroll", Pass::Build, "record on line 4 has an empty name");

        assert!(err.is_application_error());
        assert_eq!(
            err.to_string(),
            "Application `Payroll` failed during build: record on line 4 has an empty name"
        );
    }

    #[cfg(feature = "graphviz")]
    #[test]
    fn test_style_error_is_config_error() {
        let err = StrataError::from(export::Error::Style("bad color".to_string()));

        assert!(matches!(err, StrataError::Config(ref msg) if msg == "bad color"));
        assert!(!err.is_application_error());
    }
}
