//! OpenStack REST provider
//!
//! Authenticates with Keystone v3 password auth scoped to the requested
//! project, resolves service endpoints from the token's catalog and follows
//! every page of list responses. Tokens are cached per scope until shortly
//! before they expire.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

use super::endpoints::{self, MAX_PAGES};
use super::{ListFilter, ProviderError, ResourceProvider, Result, Scope};
use crate::config::Credentials;
use crate::models::{Resource, ResourceKind};

/// Re-authenticate this long before the token's stated expiry
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Deserialize)]
struct TokenEnvelope {
    token: TokenBody,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    catalog: Vec<CatalogService>,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogService {
    #[serde(rename = "type")]
    service_type: String,
    #[serde(default)]
    endpoints: Vec<CatalogEndpoint>,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogEndpoint {
    interface: String,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    region_id: Option<String>,
    url: String,
}

/// An authenticated token plus its service catalog
#[derive(Debug, Clone)]
struct Session {
    token: String,
    expires_at: Option<DateTime<Utc>>,
    catalog: Vec<CatalogService>,
}

impl Session {
    fn is_fresh(&self) -> bool {
        match self.expires_at {
            Some(expiry) => Utc::now() + ChronoDuration::seconds(EXPIRY_MARGIN_SECS) < expiry,
            None => true,
        }
    }
}

pub struct OpenStackProvider {
    http: reqwest::Client,
    credentials: Credentials,
    sessions: Mutex<HashMap<Scope, Session>>,
}

impl OpenStackProvider {
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lazystack/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!(
            "Created OpenStack provider for {} as {}",
            credentials.auth_url,
            credentials.username
        );

        Ok(Self {
            http,
            credentials,
            sessions: Mutex::new(HashMap::new()),
        })
    }

    /// Keystone v3 base URL derived from `OS_AUTH_URL`
    fn identity_base(&self) -> String {
        identity_base(&self.credentials.auth_url)
    }

    /// Return a cached session for `scope`, authenticating when needed
    async fn session(&self, scope: &Scope) -> Result<Session> {
        if let Some(session) = self.cached_session(scope).await {
            return Ok(session);
        }

        // Not holding the cache lock here: a slow Keystone round-trip for one
        // project must not stall requests for the others
        let session = self.authenticate(scope).await?;
        self.sessions
            .lock()
            .await
            .insert(scope.clone(), session.clone());
        Ok(session)
    }

    async fn cached_session(&self, scope: &Scope) -> Option<Session> {
        self.sessions
            .lock()
            .await
            .get(scope)
            .filter(|s| s.is_fresh())
            .cloned()
    }

    async fn authenticate(&self, scope: &Scope) -> Result<Session> {
        let url = format!("{}/auth/tokens", self.identity_base());
        tracing::debug!("Authenticating to {} for project {}", url, scope.project);

        let body = json!({
            "auth": {
                "identity": {
                    "methods": ["password"],
                    "password": {
                        "user": {
                            "name": self.credentials.username,
                            "domain": { "name": self.credentials.user_domain },
                            "password": self.credentials.password,
                        }
                    }
                },
                "scope": {
                    "project": {
                        "name": scope.project,
                        "domain": { "name": scope.domain },
                    }
                }
            }
        });

        let resp = self.http.post(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Auth(format!(
                "{} returned HTTP {}",
                url,
                status.as_u16()
            )));
        }

        let token = resp
            .headers()
            .get("X-Subject-Token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::Auth("response carried no X-Subject-Token".into()))?;

        let envelope: TokenEnvelope = resp
            .json()
            .await
            .map_err(|e| ProviderError::Auth(format!("malformed token response: {}", e)))?;

        tracing::info!(
            "Authenticated to project {} ({} catalog services)",
            scope.project,
            envelope.token.catalog.len()
        );

        Ok(Session {
            token,
            expires_at: envelope.token.expires_at,
            catalog: envelope.token.catalog,
        })
    }

    /// Base URL of the service that serves `kind`
    fn service_url(&self, session: &Session, kind: ResourceKind) -> Result<String> {
        if kind.service_type() == "identity" {
            return Ok(self.identity_base());
        }
        let services = endpoints::route(kind).services;
        services
            .iter()
            .find_map(|service| {
                find_endpoint(
                    &session.catalog,
                    service,
                    &self.credentials.interface,
                    self.credentials.region.as_deref(),
                )
            })
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or_else(|| ProviderError::MissingEndpoint {
                service: services.join("/"),
            })
    }

    async fn get_json(&self, session: &Session, url: &str, query: &[(&str, String)]) -> Result<Value> {
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .header("X-Auth-Token", &session.token)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl ResourceProvider for OpenStackProvider {
    async fn list(&self, scope: Scope, kind: ResourceKind, filter: ListFilter) -> Result<Vec<Resource>> {
        let request = endpoints::list_request(kind, &filter)?;
        let session = self.session(&scope).await?;
        let base = self.service_url(&session, kind)?;
        let list_key = endpoints::route(kind).list_key;

        let mut records = Vec::new();
        let mut url = format!("{}{}", base, request.path);
        let mut query = request.query.clone();

        for page in 0..MAX_PAGES {
            let body = self.get_json(&session, &url, &query).await?;
            let items = body
                .get(list_key)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();

            records.extend(decode_items(kind, items));

            match endpoints::next_page_link(&body, list_key) {
                Some(next) => {
                    url = resolve_link(&base, &next);
                    // Next links already carry the original query
                    query.clear();
                    tracing::debug!("Following page {} of {}", page + 2, kind);
                }
                None => break,
            }
        }

        if let Some(owner) = &request.owner {
            records.retain(|r| match r {
                Resource::Zone(z) => &z.project_id == owner,
                _ => true,
            });
        }

        tracing::debug!("Listed {} {} records", records.len(), kind);
        Ok(records)
    }

    async fn get_by_id(&self, scope: Scope, kind: ResourceKind, id: String) -> Result<Resource> {
        let session = self.session(&scope).await?;
        let base = self.service_url(&session, kind)?;
        let url = format!("{}{}", base, endpoints::item_path(kind, &id));

        let body = match self.get_json(&session, &url, &[]).await {
            Err(ProviderError::Status { status: 404, .. }) => {
                return Err(ProviderError::NotFound { kind, id });
            }
            other => other?,
        };

        let item = match endpoints::route(kind).item_key {
            Some(key) => body.get(key).cloned().ok_or_else(|| ProviderError::Decode {
                kind,
                detail: format!("missing '{}' envelope", key),
            })?,
            None => body,
        };

        Resource::from_value(kind, item).map_err(|e| ProviderError::Decode {
            kind,
            detail: e.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "openstack"
    }
}

/// Keystone v3 base URL for an `OS_AUTH_URL` with or without the version
fn identity_base(auth_url: &str) -> String {
    let trimmed = auth_url.trim_end_matches('/');
    if trimmed.ends_with("/v3") {
        trimmed.to_string()
    } else {
        format!("{}/v3", trimmed)
    }
}

fn find_endpoint(
    catalog: &[CatalogService],
    service_type: &str,
    interface: &str,
    region: Option<&str>,
) -> Option<String> {
    catalog
        .iter()
        .filter(|s| s.service_type == service_type)
        .flat_map(|s| s.endpoints.iter())
        .find(|e| {
            e.interface == interface
                && region.is_none_or(|r| {
                    e.region.as_deref() == Some(r) || e.region_id.as_deref() == Some(r)
                })
        })
        .map(|e| e.url.clone())
}

/// Decode one page of list items; a malformed item is logged and skipped
/// so it cannot empty the whole list
fn decode_items(kind: ResourceKind, items: Vec<Value>) -> Vec<Resource> {
    items
        .into_iter()
        .filter_map(|item| match Resource::from_value(kind, item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping undecodable {} record: {}", kind, e);
                None
            }
        })
        .collect()
}

/// Absolute next-page links are used as-is. Relative ones (Glance) are
/// rooted at the service endpoint with its version segment removed, so a
/// path-prefixed endpoint such as `http://host/image` keeps its prefix.
fn resolve_link(base: &str, next: &str) -> String {
    if url::Url::parse(next).is_ok() {
        return next.to_string();
    }
    let trimmed = base.trim_end_matches('/');
    let root = match trimmed.rsplit_once('/') {
        Some((prefix, last)) if is_version_segment(last) => prefix,
        _ => trimmed,
    };
    format!("{}/{}", root, next.trim_start_matches('/'))
}

/// `v2`, `v2.1` and the like
fn is_version_segment(segment: &str) -> bool {
    segment.strip_prefix('v').is_some_and(|rest| {
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit() || c == '.')
    })
}
