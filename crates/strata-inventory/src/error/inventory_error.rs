//! The InventoryError type for wrapping load diagnostics.

use std::fmt;

use crate::error::Diagnostic;

/// Error type for the inventory loaders.
///
/// Wraps one or more diagnostics. Any error here is fatal for the run.
#[derive(Debug)]
pub struct InventoryError {
    diagnostics: Vec<Diagnostic>,
}

impl InventoryError {
    /// Create a new inventory error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for InventoryError {}

impl From<Diagnostic> for InventoryError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for InventoryError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_inventory_error_from_diagnostic() {
        let diag = Diagnostic::error("test error").with_code(ErrorCode::E001);
        let err: InventoryError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].message(), "test error");
    }

    #[test]
    fn test_inventory_error_display_single() {
        let err: InventoryError = Diagnostic::error("missing column").into();

        assert_eq!(err.to_string(), "error: missing column");
    }

    #[test]
    fn test_inventory_error_display_multiple() {
        let diags = vec![
            Diagnostic::error("first error"),
            Diagnostic::error("second error"),
            Diagnostic::error("third error"),
        ];
        let err: InventoryError = diags.into();

        assert_eq!(err.to_string(), "error: first error (+2 more)");
    }
}
