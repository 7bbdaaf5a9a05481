//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate codec, validators and repository calls into use-case APIs.
//! - Keep callers (CLI, API layers) decoupled from storage details.

pub mod dictionary_service;
