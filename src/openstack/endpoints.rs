//! Per-kind request strategies
//!
//! One table maps every resource kind onto its catalog service, collection
//! path, response envelope key and supported filters. The HTTP client stays
//! generic; everything kind-specific lives here.

use serde_json::Value;

use super::{ListFilter, ProviderError, Result};
use crate::models::ResourceKind;

/// Upper bound on followed `next` links for a single list call
pub const MAX_PAGES: usize = 50;

/// Where a kind lives and how its responses are wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindRoute {
    /// Catalog service types to try, in order
    pub services: &'static [&'static str],
    pub collection: &'static str,
    /// Envelope key of list responses
    pub list_key: &'static str,
    /// Envelope key of single-item responses; `None` when unwrapped
    pub item_key: Option<&'static str>,
}

pub fn route(kind: ResourceKind) -> KindRoute {
    let (services, collection, list_key, item_key): (&'static [&'static str], _, _, _) = match kind
    {
        ResourceKind::Server => (&["compute"], "/servers", "servers", Some("server")),
        ResourceKind::Flavor => (&["compute"], "/flavors", "flavors", Some("flavor")),
        ResourceKind::Hypervisor => (
            &["compute"],
            "/os-hypervisors",
            "hypervisors",
            Some("hypervisor"),
        ),
        ResourceKind::Aggregate => (
            &["compute"],
            "/os-aggregates",
            "aggregates",
            Some("aggregate"),
        ),
        ResourceKind::Image => (&["image"], "/v2/images", "images", None),
        ResourceKind::Volume => (
            &["volumev3", "block-storage", "volume"],
            "/volumes",
            "volumes",
            Some("volume"),
        ),
        ResourceKind::Network => (&["network"], "/v2.0/networks", "networks", Some("network")),
        ResourceKind::LoadBalancer => (
            &["load-balancer"],
            "/v2/lbaas/loadbalancers",
            "loadbalancers",
            Some("loadbalancer"),
        ),
        ResourceKind::Zone => (&["dns"], "/v2/zones", "zones", None),
        ResourceKind::RecordSet => (&["dns"], "/v2/recordsets", "recordsets", None),
        ResourceKind::Project => (&["identity"], "/projects", "projects", Some("project")),
        ResourceKind::Domain => (&["identity"], "/domains", "domains", Some("domain")),
    };
    KindRoute {
        services,
        collection,
        list_key,
        item_key,
    }
}

/// A resolved list request relative to the service endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    /// Keep only records whose `project_id` equals this value
    pub owner: Option<String>,
}

/// Build the list request for `kind` under `filter`
pub fn list_request(kind: ResourceKind, filter: &ListFilter) -> Result<ListRequest> {
    let r = route(kind);
    let unsupported = || ProviderError::UnsupportedFilter {
        kind,
        filter: filter.clone(),
    };

    let plain = |path: String| ListRequest {
        path,
        query: Vec::new(),
        owner: None,
    };

    match (kind, filter) {
        // Detail listings carry the fields the detail pane needs
        (
            ResourceKind::Server
            | ResourceKind::Flavor
            | ResourceKind::Hypervisor
            | ResourceKind::Volume,
            ListFilter::All,
        ) => Ok(plain(format!("{}/detail", r.collection))),
        (ResourceKind::Aggregate | ResourceKind::Image, ListFilter::All) => {
            Ok(plain(r.collection.to_string()))
        }
        (ResourceKind::Network | ResourceKind::LoadBalancer, ListFilter::All) => {
            Ok(plain(r.collection.to_string()))
        }
        (ResourceKind::Network | ResourceKind::LoadBalancer, ListFilter::Project(id)) => {
            Ok(ListRequest {
                path: r.collection.to_string(),
                query: vec![("project_id", id.clone())],
                owner: None,
            })
        }
        (ResourceKind::Zone, ListFilter::All) => Ok(plain(r.collection.to_string())),
        (ResourceKind::Zone, ListFilter::Project(id)) => Ok(ListRequest {
            path: r.collection.to_string(),
            query: Vec::new(),
            owner: Some(id.clone()),
        }),
        (ResourceKind::RecordSet, ListFilter::Zone(zone_id)) => {
            Ok(plain(format!("/v2/zones/{}/recordsets", zone_id)))
        }
        (ResourceKind::Project | ResourceKind::Domain, ListFilter::All) => {
            Ok(plain(r.collection.to_string()))
        }
        (ResourceKind::Project, ListFilter::Named { name, domain_id }) => {
            let mut query = vec![("name", name.clone())];
            if let Some(domain_id) = domain_id {
                query.push(("domain_id", domain_id.clone()));
            }
            Ok(ListRequest {
                path: r.collection.to_string(),
                query,
                owner: None,
            })
        }
        (ResourceKind::Domain, ListFilter::Named { name, .. }) => Ok(ListRequest {
            path: r.collection.to_string(),
            query: vec![("name", name.clone())],
            owner: None,
        }),
        _ => Err(unsupported()),
    }
}

/// Path of a single record relative to the service endpoint
pub fn item_path(kind: ResourceKind, id: &str) -> String {
    format!("{}/{}", route(kind).collection, id)
}

/// Extract the link to the next page, if any
///
/// Handles the three pagination styles in use: Nova/Neutron/Octavia
/// `<key>_links` arrays, Designate `links.next`, and Glance's top-level
/// relative `next`.
pub fn next_page_link(body: &Value, list_key: &str) -> Option<String> {
    let links_key = format!("{}_links", list_key);
    if let Some(links) = body.get(&links_key).and_then(Value::as_array) {
        return links
            .iter()
            .find(|l| l.get("rel").and_then(Value::as_str) == Some("next"))
            .and_then(|l| l.get("href"))
            .and_then(Value::as_str)
            .map(str::to_string);
    }
    if let Some(next) = body
        .get("links")
        .and_then(|l| l.get("next"))
        .and_then(Value::as_str)
    {
        return Some(next.to_string());
    }
    body.get("next")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
