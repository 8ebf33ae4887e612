//! Static fixture data
//!
//! `FixtureProvider` serves a small fixed cloud: a handful of projects, each
//! with its own images, servers, volumes, networks, load balancers and DNS
//! zones, plus shared flavors, hypervisors and aggregates. `FallbackProvider`
//! answers from these tables when the real cloud fails or returns nothing.

use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{ListFilter, ProviderError, ResourceProvider, Result, Scope};
use crate::models::*;

/// Project names with fixture data, in listing order
pub const FIXTURE_PROJECTS: &[&str] = &[
    "dev", "admin", "qa", "ops", "legacy", "research", "staging", "prod",
];

const DEFAULT_DOMAIN_ID: &str = "default";

fn project_id(name: &str) -> String {
    format!("proj-{}", name)
}

fn image(id: &str, name: &str, size: u64) -> Resource {
    Resource::Image(Image {
        id: id.to_string(),
        name: name.to_string(),
        size,
        status: "active".to_string(),
        ..Default::default()
    })
}

fn images_for(project: &str) -> Vec<Resource> {
    let ubuntu_2004 = |size| image("img-ubuntu-2004", "Ubuntu 20.04 LTS", size);
    let ubuntu_2204 = || image("img-ubuntu-2204", "Ubuntu 22.04 LTS", 2300);
    let centos_7 = || image("img-centos-7", "CentOS 7", 1800);
    let centos_8 = || image("img-centos-8", "CentOS 8", 2000);
    let debian_11 = || image("img-debian-11", "Debian 11", 2100);
    let fedora_35 = || image("img-fedora-35", "Fedora 35", 2200);
    let win_2019 = || image("img-win2019", "Windows Server 2019", 4096);
    let win_2022 = || image("img-win2022", "Windows Server 2022", 5000);
    let alpine = || image("img-alpine-3", "Alpine 3.16", 512);
    let rocky = || image("img-rocky-9", "Rocky Linux 9", 1900);

    match project {
        "dev" => vec![ubuntu_2004(2300), centos_7(), centos_8(), debian_11()],
        "admin" => vec![rocky()],
        "qa" => vec![alpine()],
        "ops" => vec![win_2019(), win_2022()],
        "legacy" => vec![debian_11(), fedora_35()],
        "research" => vec![centos_7(), centos_8()],
        "staging" => vec![ubuntu_2004(2048), ubuntu_2204()],
        "prod" => vec![
            ubuntu_2004(2048),
            ubuntu_2204(),
            centos_7(),
            centos_8(),
            debian_11(),
            fedora_35(),
            win_2019(),
            win_2022(),
            alpine(),
            rocky(),
        ],
        _ => Vec::new(),
    }
}

fn flavor(id: &str, name: &str, vcpus: u32, ram: u64, disk: u64) -> Resource {
    Resource::Flavor(Flavor {
        id: id.to_string(),
        name: name.to_string(),
        vcpus,
        ram,
        disk,
    })
}

fn server(id: &str, name: &str, flavor_id: &str, image_id: Option<&str>, addr: &str) -> Server {
    Server {
        id: id.to_string(),
        name: name.to_string(),
        status: "ACTIVE".to_string(),
        flavor: json!({ "id": flavor_id }),
        image: image_id.map_or_else(|| json!(""), |id| json!({ "id": id })),
        addresses: BTreeMap::from([(
            "private".to_string(),
            vec![ServerAddress {
                addr: addr.to_string(),
                version: 4,
            }],
        )]),
        ..Default::default()
    }
}

fn servers_for(project: &str) -> Vec<Resource> {
    match project {
        "dev" => {
            let mut db = server("srv-dev-db-01", "db-01", "flv-large", None, "10.0.0.12");
            db.volumes_attached = vec![AttachedVolume {
                id: "vol-dev-db-data".to_string(),
            }];
            vec![
                Resource::Server(server(
                    "srv-dev-web-01",
                    "web-01",
                    "flv-small",
                    Some("img-ubuntu-2004"),
                    "10.0.0.11",
                )),
                Resource::Server(db),
            ]
        }
        "prod" => {
            let mut api_01 = server(
                "srv-prod-api-01",
                "api-01",
                "flv-medium",
                Some("img-ubuntu-2204"),
                "10.20.0.21",
            );
            api_01.access_ipv4 = "203.0.113.21".to_string();
            vec![
                Resource::Server(api_01),
                Resource::Server(server(
                    "srv-prod-api-02",
                    "api-02",
                    "flv-medium",
                    Some("img-ubuntu-2204"),
                    "10.20.0.22",
                )),
            ]
        }
        _ => Vec::new(),
    }
}

fn volumes_for(project: &str) -> Vec<Resource> {
    let volume = |id: &str, name: &str, size, kind: &str, description: Option<&str>| {
        Resource::Volume(Volume {
            id: id.to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at: "2024-03-01T10:00:00.000000".to_string(),
            size,
            volume_type: Some(kind.to_string()),
            status: "in-use".to_string(),
        })
    };
    match project {
        "dev" => vec![volume(
            "vol-dev-db-data",
            "db-data",
            100,
            "ssd",
            Some("Postgres data for db-01"),
        )],
        "prod" => vec![
            volume("vol-prod-logs", "logs", 500, "standard", None),
            volume("vol-prod-backup", "", 1000, "archive", Some("nightly backups")),
        ],
        _ => Vec::new(),
    }
}

fn scoped_network_records(project: &str) -> Vec<Resource> {
    let pid = project_id(project);
    match project {
        "dev" | "prod" => {
            let subnet = if project == "dev" { "10.0.0" } else { "10.20.0" };
            let zone_name = if project == "dev" {
                "dev.example.com."
            } else {
                "example.com."
            };
            vec![
                Resource::Network(Network {
                    id: format!("net-{}-private", project),
                    name: format!("{}-private", project),
                    project_id: pid.clone(),
                    status: "ACTIVE".to_string(),
                }),
                Resource::LoadBalancer(LoadBalancer {
                    id: format!("lb-{}-web", project),
                    name: format!("{}-web-lb", project),
                    project_id: pid.clone(),
                    vip_address: format!("{}.100", subnet),
                    operating_status: "ONLINE".to_string(),
                    provisioning_status: "ACTIVE".to_string(),
                }),
                Resource::Zone(Zone {
                    id: format!("zone-{}", project),
                    name: zone_name.to_string(),
                    project_id: pid,
                    ttl: 3600,
                    status: "ACTIVE".to_string(),
                    email: "hostmaster@example.com".to_string(),
                    pool_id: "pool-default".to_string(),
                }),
            ]
        }
        "admin" => vec![Resource::Network(Network {
            id: "net-public".to_string(),
            name: "public".to_string(),
            project_id: pid,
            status: "ACTIVE".to_string(),
        })],
        _ => Vec::new(),
    }
}

fn record_sets(zone_id: &str) -> Vec<Resource> {
    let record = |id: &str, name: &str, kind: &str, records: &[&str]| {
        Resource::RecordSet(RecordSet {
            id: id.to_string(),
            name: name.to_string(),
            record_type: kind.to_string(),
            records: records.iter().map(|r| r.to_string()).collect(),
        })
    };
    match zone_id {
        "zone-dev" => vec![
            record("rs-dev-soa", "dev.example.com.", "SOA", &["ns1.example.com. hostmaster.example.com. 1 3600 600 86400 3600"]),
            record("rs-dev-www", "www.dev.example.com.", "A", &["10.0.0.100"]),
        ],
        "zone-prod" => vec![
            record("rs-prod-api", "api.example.com.", "A", &["10.20.0.21", "10.20.0.22"]),
            record("rs-prod-mx", "example.com.", "MX", &["10 mail.example.com."]),
        ],
        _ => Vec::new(),
    }
}

/// Records shared by every project
fn shared_records() -> Vec<Resource> {
    let mut records = vec![
        flavor("flv-tiny", "m1.tiny", 1, 512, 1),
        flavor("flv-small", "m1.small", 1, 2048, 20),
        flavor("flv-medium", "m1.medium", 2, 4096, 40),
        flavor("flv-large", "m1.large", 4, 8192, 80),
    ];

    for (id, host, ip) in [("1", "cmp-01", "192.168.10.11"), ("2", "cmp-02", "192.168.10.12")] {
        records.push(Resource::Hypervisor(Hypervisor {
            id: id.to_string(),
            hypervisor_hostname: host.to_string(),
            hypervisor_type: "QEMU".to_string(),
            host_ip: ip.to_string(),
            state: "up".to_string(),
            status: "enabled".to_string(),
            cpu_info: json!({"arch": "x86_64", "model": "Cascadelake-Server", "vendor": "Intel"}),
        }));
    }

    records.push(Resource::Aggregate(Aggregate {
        id: "1".to_string(),
        name: "az1-hosts".to_string(),
        availability_zone: Some("az1".to_string()),
        hosts: vec!["cmp-01".to_string(), "cmp-02".to_string()],
        metadata: BTreeMap::from([("availability_zone".to_string(), "az1".to_string())]),
    }));
    records.push(Resource::Aggregate(Aggregate {
        id: "2".to_string(),
        name: "gpu-hosts".to_string(),
        availability_zone: None,
        hosts: vec!["cmp-02".to_string()],
        metadata: BTreeMap::from([("gpu".to_string(), "true".to_string())]),
    }));

    records.push(Resource::Domain(Domain {
        id: DEFAULT_DOMAIN_ID.to_string(),
        name: "Default".to_string(),
        enabled: true,
    }));

    for name in FIXTURE_PROJECTS {
        records.push(Resource::Project(Project {
            id: project_id(name),
            name: name.to_string(),
            description: format!("{} workloads", name),
            domain_id: DEFAULT_DOMAIN_ID.to_string(),
            enabled: *name != "legacy",
        }));
    }

    records
}

/// Offline provider backed by static tables
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    shared: Vec<Resource>,
    scoped: BTreeMap<String, Vec<Resource>>,
}

impl Default for FixtureProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureProvider {
    pub fn new() -> Self {
        let scoped = FIXTURE_PROJECTS
            .iter()
            .map(|name| {
                let mut records = images_for(name);
                records.extend(servers_for(name));
                records.extend(volumes_for(name));
                records.extend(scoped_network_records(name));
                (name.to_string(), records)
            })
            .collect();
        Self {
            shared: shared_records(),
            scoped,
        }
    }

    /// Every record visible to `scope`, before filtering
    fn visible(&self, scope: &Scope) -> impl Iterator<Item = &Resource> {
        self.shared
            .iter()
            .chain(self.scoped.get(&scope.project).into_iter().flatten())
    }
}

fn owned_by(record: &Resource, owner: &str) -> bool {
    match record {
        Resource::Network(r) => r.project_id == owner,
        Resource::LoadBalancer(r) => r.project_id == owner,
        Resource::Zone(r) => r.project_id == owner,
        _ => true,
    }
}

#[async_trait]
impl ResourceProvider for FixtureProvider {
    async fn list(&self, scope: Scope, kind: ResourceKind, filter: ListFilter) -> Result<Vec<Resource>> {
        if kind == ResourceKind::RecordSet {
            return match filter {
                ListFilter::Zone(zone_id) => Ok(record_sets(&zone_id)),
                other => Err(ProviderError::UnsupportedFilter {
                    kind,
                    filter: other,
                }),
            };
        }

        let of_kind = self.visible(&scope).filter(|r| r.kind() == kind);
        let records = match &filter {
            ListFilter::All => of_kind.cloned().collect(),
            ListFilter::Project(owner) => of_kind.filter(|r| owned_by(r, owner)).cloned().collect(),
            ListFilter::Named { name, domain_id } => of_kind
                .filter(|r| match r {
                    Resource::Project(p) => {
                        &p.name == name && domain_id.as_ref().is_none_or(|d| &p.domain_id == d)
                    }
                    Resource::Domain(d) => &d.name == name,
                    _ => false,
                })
                .cloned()
                .collect(),
            ListFilter::Zone(_) => {
                return Err(ProviderError::UnsupportedFilter {
                    kind,
                    filter: filter.clone(),
                });
            }
        };
        Ok(records)
    }

    async fn get_by_id(&self, scope: Scope, kind: ResourceKind, id: String) -> Result<Resource> {
        self.visible(&scope)
            .find(|r| r.kind() == kind && r.id() == id)
            .cloned()
            .ok_or(ProviderError::NotFound { kind, id })
    }

    fn name(&self) -> &'static str {
        "fixtures"
    }
}

/// Primary provider that degrades to fixtures on failure or empty results
pub struct FallbackProvider {
    primary: Arc<dyn ResourceProvider>,
    fixtures: FixtureProvider,
}

impl FallbackProvider {
    pub fn new(primary: Arc<dyn ResourceProvider>) -> Self {
        Self {
            primary,
            fixtures: FixtureProvider::new(),
        }
    }
}

#[async_trait]
impl ResourceProvider for FallbackProvider {
    async fn list(&self, scope: Scope, kind: ResourceKind, filter: ListFilter) -> Result<Vec<Resource>> {
        match self.primary.list(scope.clone(), kind, filter.clone()).await {
            Ok(records) if !records.is_empty() => Ok(records),
            Ok(_) => {
                tracing::debug!("No {} records from {}, using fixtures", kind, self.primary.name());
                self.fixtures.list(scope, kind, filter).await
            }
            Err(e) => {
                tracing::warn!("Listing {} failed ({}), using fixtures", kind, e);
                self.fixtures.list(scope, kind, filter).await
            }
        }
    }

    async fn get_by_id(&self, scope: Scope, kind: ResourceKind, id: String) -> Result<Resource> {
        match self.primary.get_by_id(scope.clone(), kind, id.clone()).await {
            Ok(record) => Ok(record),
            Err(primary_err) => {
                tracing::warn!("Fetching {} {} failed ({}), trying fixtures", kind, id, primary_err);
                self.fixtures
                    .get_by_id(scope, kind, id)
                    .await
                    .map_err(|_| primary_err)
            }
        }
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(project: &str) -> Scope {
        Scope::new(project, "Default")
    }

    fn labels(records: &[Resource]) -> Vec<String> {
        records.iter().map(Resource::label).collect()
    }

    #[tokio::test]
    async fn test_images_are_per_project() {
        let provider = FixtureProvider::new();
        let dev = provider
            .list(scope("dev"), ResourceKind::Image, ListFilter::All)
            .await
            .unwrap();
        assert_eq!(
            labels(&dev),
            vec!["Ubuntu 20.04 LTS", "CentOS 7", "CentOS 8", "Debian 11"]
        );

        let qa = provider
            .list(scope("qa"), ResourceKind::Image, ListFilter::All)
            .await
            .unwrap();
        assert_eq!(labels(&qa), vec!["Alpine 3.16"]);

        let unknown = provider
            .list(scope("nobody"), ResourceKind::Image, ListFilter::All)
            .await
            .unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_project_filter_selects_owned_networks() {
        let provider = FixtureProvider::new();
        let networks = provider
            .list(
                scope("dev"),
                ResourceKind::Network,
                ListFilter::Project("proj-dev".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(labels(&networks), vec!["dev-private"]);

        let none = provider
            .list(
                scope("dev"),
                ResourceKind::Network,
                ListFilter::Project("proj-prod".to_string()),
            )
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_named_project_lookup() {
        let provider = FixtureProvider::new();
        let found = provider
            .list(
                scope("dev"),
                ResourceKind::Project,
                ListFilter::Named {
                    name: "prod".to_string(),
                    domain_id: Some("default".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), "proj-prod");
    }

    #[tokio::test]
    async fn test_record_sets_by_zone() {
        let provider = FixtureProvider::new();
        let records = provider
            .list(
                scope("prod"),
                ResourceKind::RecordSet,
                ListFilter::Zone("zone-prod".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(labels(&records), vec!["api.example.com.", "example.com."]);
    }

    #[tokio::test]
    async fn test_get_by_id_misses_are_not_found() {
        let provider = FixtureProvider::new();
        let flavor = provider
            .get_by_id(scope("dev"), ResourceKind::Flavor, "flv-small".to_string())
            .await
            .unwrap();
        assert_eq!(flavor.label(), "m1.small");

        let missing = provider
            .get_by_id(scope("dev"), ResourceKind::Flavor, "flv-huge".to_string())
            .await;
        assert!(matches!(missing, Err(ProviderError::NotFound { .. })));
    }

    struct Unreachable;

    #[async_trait]
    impl ResourceProvider for Unreachable {
        async fn list(&self, _: Scope, _: ResourceKind, _: ListFilter) -> Result<Vec<Resource>> {
            Err(ProviderError::Auth("connection refused".to_string()))
        }

        async fn get_by_id(&self, _: Scope, kind: ResourceKind, id: String) -> Result<Resource> {
            Err(ProviderError::NotFound { kind, id })
        }

        fn name(&self) -> &'static str {
            "unreachable"
        }
    }

    #[tokio::test]
    async fn test_fallback_serves_fixtures_on_failure() {
        let provider = FallbackProvider::new(Arc::new(Unreachable));
        let images = provider
            .list(scope("ops"), ResourceKind::Image, ListFilter::All)
            .await
            .unwrap();
        assert_eq!(
            labels(&images),
            vec!["Windows Server 2019", "Windows Server 2022"]
        );

        let image = provider
            .get_by_id(scope("ops"), ResourceKind::Image, "img-win2022".to_string())
            .await
            .unwrap();
        assert_eq!(image.label(), "Windows Server 2022");
    }
}
