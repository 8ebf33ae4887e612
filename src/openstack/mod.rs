//! Resource provider capability
//!
//! `ResourceProvider` is the narrow seam between the UI and the cloud: list
//! records of a kind under a filter, or fetch one record by id. Three
//! implementations live here:
//! - `OpenStackProvider` - Keystone v3 authentication plus the service REST APIs
//! - `FixtureProvider` - static per-project tables for offline browsing
//! - `FallbackProvider` - a primary provider that degrades to fixtures

mod client;
mod endpoints;
mod fixtures;

pub use client::OpenStackProvider;
pub use fixtures::{FallbackProvider, FixtureProvider};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Resource, ResourceKind};

/// Who a request is made as: the project to scope the token to, and the
/// domain that project lives in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    pub project: String,
    pub domain: String,
}

impl Scope {
    pub fn new(project: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            domain: domain.into(),
        }
    }
}

/// Kind-specific list filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListFilter {
    /// Everything visible to the scoped token
    All,
    /// Records owned by the project with this id
    Project(String),
    /// Identity lookups by name, optionally within a domain
    Named {
        name: String,
        domain_id: Option<String>,
    },
    /// Record sets of the DNS zone with this id
    Zone(String),
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("no {service} endpoint in the service catalog")]
    MissingEndpoint { service: String },

    #[error("failed to decode {kind} response: {detail}")]
    Decode { kind: ResourceKind, detail: String },

    #[error("{kind} {id} not found")]
    NotFound { kind: ResourceKind, id: String },

    #[error("{kind} cannot be listed with filter {filter:?}")]
    UnsupportedFilter {
        kind: ResourceKind,
        filter: ListFilter,
    },
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// List every record of `kind` matching `filter`, following all pages
    async fn list(&self, scope: Scope, kind: ResourceKind, filter: ListFilter)
    -> Result<Vec<Resource>>;

    /// Fetch a single record by id
    async fn get_by_id(&self, scope: Scope, kind: ResourceKind, id: String) -> Result<Resource>;

    /// Short name used in log lines
    fn name(&self) -> &'static str;
}
