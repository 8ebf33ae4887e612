//! lazystack library
//!
//! Core of the lazystack terminal browser for OpenStack resources. It is
//! used by the binary and by the integration tests.

pub mod cli;
pub mod config;
pub mod models;
pub mod openstack;
pub mod services;
pub mod tui;

// Re-export commonly used types for convenience
pub use models::{Resource, ResourceKind, ViewId};
pub use openstack::{ListFilter, ProviderError, ResourceProvider, Scope};
pub use services::ResourceService;
