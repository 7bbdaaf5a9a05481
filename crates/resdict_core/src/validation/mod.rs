//! Validation passes applied on dictionary save.
//!
//! # Responsibility
//! - `definition`: domain-shape rules on the parsed `ResourceDefinition`.
//! - `record`: persistence-shape rules on the `ResourceDictionary` row.
//!
//! # Invariants
//! - The two passes keep separate error types and run in order
//!   definition first, record second.

pub mod definition;
pub mod record;
