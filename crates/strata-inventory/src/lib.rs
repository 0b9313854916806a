//! Inventory loading for Strata.
//!
//! This crate turns spreadsheet exports (saved as CSV) into typed records:
//!
//! - **Inventory**: filtered, ordered [`ResourceRecord`](strata_core::record::ResourceRecord)s
//!   ([`load_inventory`], [`Inventory`])
//! - **Cross reference**: shared applications and URLs ([`SharedAppXref`])
//! - **Relationships**: application relationship sheets ([`load_relationships`])
//! - **Naming**: network interface naming conventions ([`naming`])
//!
//! Problems in the input are reported as [`error::Diagnostic`]s with stable
//! error codes and byte spans into the CSV text.

pub mod error;
pub mod naming;

mod inventory;
mod loader;
mod relationships;
mod sheet;
mod span;
mod xref;

pub use inventory::Inventory;
pub use loader::{REQUIRED_COLUMNS, RecordFilter, load_inventory, read_records};
pub use relationships::{RELATIONSHIP_COLUMNS, RelationshipSheet, load_relationships};
pub use span::Span;
pub use xref::{SharedAppXref, XREF_COLUMNS, XrefEntry};
