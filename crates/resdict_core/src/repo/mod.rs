//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record store contract used by the dictionary service.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - At most one row exists per dictionary `name`.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod dictionary_repo;
