//! Resource kind and view identifiers
//!
//! `ResourceKind` names every record type the provider can return.
//! `ViewId` is the closed set of navigable views; each maps onto exactly one
//! resource kind and one command name.

use std::fmt;
use std::str::FromStr;

/// Every kind of record the resource provider can list or look up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    // Compute
    Server,
    Flavor,
    Hypervisor,
    Aggregate,
    // Image service
    Image,
    // Block storage
    Volume,
    // Networking
    Network,
    LoadBalancer,
    // DNS
    Zone,
    RecordSet,
    // Identity
    Project,
    Domain,
}

impl ResourceKind {
    /// Get the display name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Server => "Server",
            ResourceKind::Flavor => "Flavor",
            ResourceKind::Hypervisor => "Hypervisor",
            ResourceKind::Aggregate => "Aggregate",
            ResourceKind::Image => "Image",
            ResourceKind::Volume => "Volume",
            ResourceKind::Network => "Network",
            ResourceKind::LoadBalancer => "LoadBalancer",
            ResourceKind::Zone => "Zone",
            ResourceKind::RecordSet => "RecordSet",
            ResourceKind::Project => "Project",
            ResourceKind::Domain => "Domain",
        }
    }

    /// Catalog service type that serves this kind
    pub fn service_type(&self) -> &'static str {
        match self {
            ResourceKind::Server
            | ResourceKind::Flavor
            | ResourceKind::Hypervisor
            | ResourceKind::Aggregate => "compute",
            ResourceKind::Image => "image",
            ResourceKind::Volume => "volumev3",
            ResourceKind::Network => "network",
            ResourceKind::LoadBalancer => "load-balancer",
            ResourceKind::Zone | ResourceKind::RecordSet => "dns",
            ResourceKind::Project | ResourceKind::Domain => "identity",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifier of a navigable view
///
/// The set is fixed at compile time. The declaration order is the order of
/// the command vocabulary offered by autocomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    Servers,
    Aggregates,
    Hypervisors,
    Images,
    Flavors,
    Projects,
    Volumes,
    LoadBalancers,
    Dns,
    Networks,
}

impl ViewId {
    /// All views, in command vocabulary order
    pub fn all() -> &'static [Self] {
        &[
            ViewId::Servers,
            ViewId::Aggregates,
            ViewId::Hypervisors,
            ViewId::Images,
            ViewId::Flavors,
            ViewId::Projects,
            ViewId::Volumes,
            ViewId::LoadBalancers,
            ViewId::Dns,
            ViewId::Networks,
        ]
    }

    /// Command name, which is also the page identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Servers => "servers",
            ViewId::Aggregates => "aggregates",
            ViewId::Hypervisors => "hypervisors",
            ViewId::Images => "images",
            ViewId::Flavors => "flavors",
            ViewId::Projects => "projects",
            ViewId::Volumes => "volumes",
            ViewId::LoadBalancers => "loadbalancers",
            ViewId::Dns => "dns",
            ViewId::Networks => "networks",
        }
    }

    /// Pane title shown around the list
    pub fn title(&self) -> &'static str {
        match self {
            ViewId::Servers => "Servers",
            ViewId::Aggregates => "Aggregates",
            ViewId::Hypervisors => "Hypervisors",
            ViewId::Images => "Images",
            ViewId::Flavors => "Flavors",
            ViewId::Projects => "Projects",
            ViewId::Volumes => "Volumes",
            ViewId::LoadBalancers => "Loadbalancers",
            ViewId::Dns => "Dns",
            ViewId::Networks => "Networks",
        }
    }

    /// Resource kind listed by this view
    pub fn resource_kind(&self) -> ResourceKind {
        match self {
            ViewId::Servers => ResourceKind::Server,
            ViewId::Aggregates => ResourceKind::Aggregate,
            ViewId::Hypervisors => ResourceKind::Hypervisor,
            ViewId::Images => ResourceKind::Image,
            ViewId::Flavors => ResourceKind::Flavor,
            ViewId::Projects => ResourceKind::Project,
            ViewId::Volumes => ResourceKind::Volume,
            ViewId::LoadBalancers => ResourceKind::LoadBalancer,
            ViewId::Dns => ResourceKind::Zone,
            ViewId::Networks => ResourceKind::Network,
        }
    }

    /// Whether listing requires resolving the active project's id first
    pub fn is_project_scoped(&self) -> bool {
        matches!(
            self,
            ViewId::LoadBalancers | ViewId::Dns | ViewId::Networks
        )
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = String;

    /// Exact, case-sensitive match against the command vocabulary
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::all()
            .iter()
            .copied()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| format!("Unknown view: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_exact() {
        assert_eq!("servers".parse::<ViewId>(), Ok(ViewId::Servers));
        assert_eq!("dns".parse::<ViewId>(), Ok(ViewId::Dns));
        assert!("Servers".parse::<ViewId>().is_err());
        assert!("server".parse::<ViewId>().is_err());
        assert!(" servers".parse::<ViewId>().is_err());
    }

    #[test]
    fn test_every_view_round_trips_through_its_name() {
        for view in ViewId::all() {
            assert_eq!(view.as_str().parse::<ViewId>().as_ref(), Ok(view));
        }
    }

    #[test]
    fn test_project_scoped_views() {
        let scoped: Vec<_> = ViewId::all()
            .iter()
            .filter(|v| v.is_project_scoped())
            .collect();
        assert_eq!(
            scoped,
            vec![&ViewId::LoadBalancers, &ViewId::Dns, &ViewId::Networks]
        );
    }

    #[test]
    fn test_dns_view_lists_zones() {
        assert_eq!(ViewId::Dns.resource_kind(), ResourceKind::Zone);
        assert_eq!(ResourceKind::Zone.service_type(), "dns");
    }
}
