//! Collector for accumulating diagnostics while loading a sheet.
//!
//! The [`DiagnosticCollector`] lets a loader report every bad row instead of
//! failing on the first one.

use log::warn;

use crate::error::{Diagnostic, InventoryError};

/// A collector for accumulating diagnostics during a load.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// Warnings are logged immediately as well.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        } else {
            warn!(diagnostic:% = diagnostic; "Inventory warning");
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if an error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(InventoryError)` with all diagnostics.
    /// - If there are no errors, returns `Ok(())`; warnings were already logged.
    pub fn finish(self) -> Result<(), InventoryError> {
        if self.has_errors {
            Err(InventoryError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}
