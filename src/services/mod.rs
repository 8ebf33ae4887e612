//! Service layer
//!
//! Sits between the TUI and the resource provider. Services turn provider
//! errors into the degraded results the UI shows (empty lists, placeholder
//! sections) so the TUI layer only deals with presentation.

pub mod resource_service;

pub use resource_service::{ResourceService, ScopeError, ViewFetch};
