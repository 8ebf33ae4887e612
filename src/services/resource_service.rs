//! Generic resource adapter
//!
//! One service serves every view: it resolves the active project when a view
//! is project-scoped, lists the view's kind through the provider and performs
//! the dependent lookups detail rendering needs. Provider failures never
//! escape as errors; they degrade to empty lists or `None`.

use std::sync::Arc;
use thiserror::Error;

use crate::models::{Project, RecordSet, Resource, ResourceKind, ViewId};
use crate::openstack::{ListFilter, ProviderError, ResourceProvider, Scope};

/// Failure to resolve the active project's identifiers
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("domain '{0}' not found")]
    DomainNotFound(String),

    #[error("project '{project}' not found in domain '{domain}'")]
    ProjectNotFound { project: String, domain: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Result of fetching a view's records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewFetch {
    pub records: Vec<Resource>,
    /// Non-modal message for the footer, set when project scope resolution failed
    pub notice: Option<String>,
}

/// Service for fetching resources on behalf of one scope
#[derive(Clone)]
pub struct ResourceService {
    provider: Arc<dyn ResourceProvider>,
    scope: Scope,
}

impl ResourceService {
    pub fn new(provider: Arc<dyn ResourceProvider>, scope: Scope) -> Self {
        Self { provider, scope }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Resolve the scope's domain by name, then its project by name within
    /// that domain
    pub async fn resolve_project(&self) -> Result<Project, ScopeError> {
        let domains = self
            .provider
            .list(
                self.scope.clone(),
                ResourceKind::Domain,
                ListFilter::Named {
                    name: self.scope.domain.clone(),
                    domain_id: None,
                },
            )
            .await?;

        let domain_id = domains
            .into_iter()
            .find_map(|r| match r {
                Resource::Domain(d) => Some(d.id),
                _ => None,
            })
            .ok_or_else(|| ScopeError::DomainNotFound(self.scope.domain.clone()))?;

        let projects = self
            .provider
            .list(
                self.scope.clone(),
                ResourceKind::Project,
                ListFilter::Named {
                    name: self.scope.project.clone(),
                    domain_id: Some(domain_id),
                },
            )
            .await?;

        projects
            .into_iter()
            .find_map(|r| match r {
                Resource::Project(p) => Some(p),
                _ => None,
            })
            .ok_or_else(|| ScopeError::ProjectNotFound {
                project: self.scope.project.clone(),
                domain: self.scope.domain.clone(),
            })
    }

    /// Fetch every record a view lists
    pub async fn fetch_view(&self, view: ViewId) -> ViewFetch {
        let filter = if view.is_project_scoped() {
            match self.resolve_project().await {
                Ok(project) => ListFilter::Project(project.id),
                Err(e) => {
                    tracing::warn!("Cannot resolve scope for {}: {}", view, e);
                    return ViewFetch {
                        records: Vec::new(),
                        notice: Some(format!("{}: {}", view, e)),
                    };
                }
            }
        } else {
            ListFilter::All
        };

        tracing::debug!(
            "Fetching {} for project {} with {:?}",
            view,
            self.scope.project,
            filter
        );

        match self
            .provider
            .list(self.scope.clone(), view.resource_kind(), filter)
            .await
        {
            Ok(records) => ViewFetch {
                records,
                notice: None,
            },
            Err(e) => {
                tracing::warn!("Failed to list {}: {}", view, e);
                ViewFetch::default()
            }
        }
    }

    /// Fetch one record by id; failures are logged and become `None`
    pub async fn lookup(&self, kind: ResourceKind, id: &str) -> Option<Resource> {
        match self
            .provider
            .get_by_id(self.scope.clone(), kind, id.to_string())
            .await
        {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Lookup of {} {} failed: {}", kind, id, e);
                None
            }
        }
    }

    /// Record sets of a DNS zone; `None` when the fetch failed
    pub async fn zone_records(&self, zone_id: &str) -> Option<Vec<RecordSet>> {
        match self
            .provider
            .list(
                self.scope.clone(),
                ResourceKind::RecordSet,
                ListFilter::Zone(zone_id.to_string()),
            )
            .await
        {
            Ok(records) => Some(
                records
                    .into_iter()
                    .filter_map(|r| match r {
                        Resource::RecordSet(rs) => Some(rs),
                        _ => None,
                    })
                    .collect(),
            ),
            Err(e) => {
                tracing::warn!("Failed to list record sets of zone {}: {}", zone_id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openstack::FixtureProvider;

    fn service(project: &str) -> ResourceService {
        ResourceService::new(
            Arc::new(FixtureProvider::new()),
            Scope::new(project, "Default"),
        )
    }

    #[tokio::test]
    async fn test_resolve_project_by_name_and_domain() {
        let project = service("prod").resolve_project().await.unwrap();
        assert_eq!(project.id, "proj-prod");
        assert_eq!(project.domain_id, "default");
    }

    #[tokio::test]
    async fn test_unknown_project_is_a_scope_error() {
        let err = service("ghost").resolve_project().await.unwrap_err();
        assert!(matches!(err, ScopeError::ProjectNotFound { .. }));
    }

    #[tokio::test]
    async fn test_unknown_domain_is_a_scope_error() {
        let svc = ResourceService::new(
            Arc::new(FixtureProvider::new()),
            Scope::new("dev", "Elsewhere"),
        );
        let err = svc.resolve_project().await.unwrap_err();
        assert!(matches!(err, ScopeError::DomainNotFound(d) if d == "Elsewhere"));
    }

    #[tokio::test]
    async fn test_scoped_view_failure_is_empty_with_notice() {
        let fetch = service("ghost").fetch_view(ViewId::Networks).await;
        assert!(fetch.records.is_empty());
        assert!(fetch.notice.unwrap().starts_with("networks:"));
    }

    #[tokio::test]
    async fn test_unscoped_view_lists_everything() {
        let fetch = service("dev").fetch_view(ViewId::Flavors).await;
        assert_eq!(fetch.records.len(), 4);
        assert_eq!(fetch.notice, None);
    }

    #[tokio::test]
    async fn test_zone_records() {
        let records = service("dev").zone_records("zone-dev").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].records, vec!["10.0.0.100"]);
    }

    #[tokio::test]
    async fn test_lookup_miss_is_none() {
        assert!(
            service("dev")
                .lookup(ResourceKind::Image, "img-nope")
                .await
                .is_none()
        );
    }
}
