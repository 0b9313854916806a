//! Error and diagnostic system for the inventory loaders.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans pointing into the CSV source
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, multiple source
//! locations, and help text. Multiple diagnostics are wrapped in
//! [`InventoryError`] for returning from the loaders.
//!
//! # Example
//!
//! ```
//! # use strata_inventory::error::{Diagnostic, ErrorCode};
//! # use strata_inventory::Span;
//!
//! let header = Span::new(0..40);
//!
//! let diag = Diagnostic::error("missing required column `ResourceCategory`")
//!     .with_code(ErrorCode::E001)
//!     .with_label(header, "header row")
//!     .with_help("export the inventory with the ResourceCategory column");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod inventory_error;
mod label;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use inventory_error::InventoryError;
pub use label::Label;
pub use severity::Severity;
