//! Strata Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Strata inventory
//! loader, the hierarchy resolver and the diagram emitter. It includes:
//!
//! - **Records**: One immutable row of a cloud inventory export ([`record::ResourceRecord`])
//! - **Resources**: Strongly typed resource kinds ([`resource::ResourceKind`])
//! - **Tiers**: Coarse deployment layers used to group resources ([`tier::Tier`])
//! - **Nodes**: The per-application node arena mutated by resolver passes ([`store::NodeStore`])
//! - **Relationships**: Application-to-application links ([`relationship::Relationship`])
//! - **Colors**: CSS color handling for diagram styling ([`color::Color`])

pub mod color;
pub mod node;
pub mod record;
pub mod relationship;
pub mod resource;
pub mod store;
pub mod tier;
