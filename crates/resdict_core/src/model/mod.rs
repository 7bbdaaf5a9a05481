//! Domain model for resource dictionary records.
//!
//! # Responsibility
//! - Define the persisted `ResourceDictionary` row shape.
//! - Define the transient `ResourceDefinition` document parsed on save.
//!
//! # Invariants
//! - `ResourceDictionary::name` is the unique business key.
//! - `ResourceDefinition` is never stored as its own entity; only its
//!   canonical text and derived summary fields are.

pub mod definition;
pub mod dictionary;
