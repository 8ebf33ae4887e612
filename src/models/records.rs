//! Typed resource records
//!
//! Field names follow the OpenStack REST payloads so records deserialize
//! straight from API responses. Every field defaults, since microversions and
//! deployments disagree about which keys are present.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::ResourceKind;

/// Accept ids encoded either as strings or integers (aggregates, hypervisors)
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
        Missing(Option<()>),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
        RawId::Missing(_) => String::new(),
    })
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub id: String,
    pub name: String,
    pub status: String,
    /// `{"id": ..}` on older microversions, embedded flavor details on newer ones
    pub flavor: Value,
    /// `{"id": ..}` or an empty string for volume-backed servers
    pub image: Value,
    pub addresses: BTreeMap<String, Vec<ServerAddress>>,
    #[serde(rename = "accessIPv4")]
    pub access_ipv4: String,
    #[serde(rename = "os-extended-volumes:volumes_attached")]
    pub volumes_attached: Vec<AttachedVolume>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerAddress {
    pub addr: String,
    pub version: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachedVolume {
    pub id: String,
}

impl Server {
    /// Id of the flavor the server was booted from, if the payload carries one
    pub fn flavor_id(&self) -> Option<String> {
        self.flavor
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    /// Flavor details embedded by microversion 2.47 and later, which carry no id
    pub fn embedded_flavor(&self) -> Option<Flavor> {
        let name = self.flavor.get("original_name").and_then(Value::as_str)?;
        let number = |key: &str| self.flavor.get(key).and_then(Value::as_u64).unwrap_or(0);
        Some(Flavor {
            id: String::new(),
            name: name.to_string(),
            vcpus: u32::try_from(number("vcpus")).unwrap_or(u32::MAX),
            ram: number("ram"),
            disk: number("disk"),
        })
    }

    pub fn image_id(&self) -> Option<String> {
        self.image
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    /// Address used to reach the server: `accessIPv4`, else the first IPv4
    /// address of any network
    pub fn connect_address(&self) -> Option<String> {
        if !self.access_ipv4.is_empty() {
            return Some(self.access_ipv4.clone());
        }
        self.addresses
            .values()
            .flatten()
            .find(|a| a.version == 4 && !a.addr.is_empty())
            .map(|a| a.addr.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flavor {
    pub id: String,
    pub name: String,
    pub vcpus: u32,
    /// Megabytes
    pub ram: u64,
    /// Gigabytes
    pub disk: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Bytes; Glance reports `null` until data is uploaded
    #[serde(deserialize_with = "null_as_default")]
    pub size: u64,
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    /// Gigabytes
    pub size: u64,
    pub volume_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub project_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadBalancer {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub project_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vip_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub operating_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub provisioning_status: String,
}

/// DNS zone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub project_id: String,
    pub ttl: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pool_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSet {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub records: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hypervisor {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub hypervisor_hostname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hypervisor_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub host_ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Free-form JSON on older microversions, a JSON-encoded string on others
    pub cpu_info: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Aggregate {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub availability_zone: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub hosts: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub domain_id: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub enabled: bool,
}

/// Any record returned by the resource provider
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Server(Server),
    Flavor(Flavor),
    Image(Image),
    Volume(Volume),
    Network(Network),
    LoadBalancer(LoadBalancer),
    Zone(Zone),
    RecordSet(RecordSet),
    Hypervisor(Hypervisor),
    Aggregate(Aggregate),
    Project(Project),
    Domain(Domain),
}

impl Resource {
    /// Decode a single API object into the record type for `kind`
    pub fn from_value(kind: ResourceKind, value: Value) -> serde_json::Result<Self> {
        Ok(match kind {
            ResourceKind::Server => Resource::Server(serde_json::from_value(value)?),
            ResourceKind::Flavor => Resource::Flavor(serde_json::from_value(value)?),
            ResourceKind::Image => Resource::Image(serde_json::from_value(value)?),
            ResourceKind::Volume => Resource::Volume(serde_json::from_value(value)?),
            ResourceKind::Network => Resource::Network(serde_json::from_value(value)?),
            ResourceKind::LoadBalancer => {
                Resource::LoadBalancer(serde_json::from_value(value)?)
            }
            ResourceKind::Zone => Resource::Zone(serde_json::from_value(value)?),
            ResourceKind::RecordSet => Resource::RecordSet(serde_json::from_value(value)?),
            ResourceKind::Hypervisor => Resource::Hypervisor(serde_json::from_value(value)?),
            ResourceKind::Aggregate => Resource::Aggregate(serde_json::from_value(value)?),
            ResourceKind::Project => Resource::Project(serde_json::from_value(value)?),
            ResourceKind::Domain => Resource::Domain(serde_json::from_value(value)?),
        })
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Server(_) => ResourceKind::Server,
            Resource::Flavor(_) => ResourceKind::Flavor,
            Resource::Image(_) => ResourceKind::Image,
            Resource::Volume(_) => ResourceKind::Volume,
            Resource::Network(_) => ResourceKind::Network,
            Resource::LoadBalancer(_) => ResourceKind::LoadBalancer,
            Resource::Zone(_) => ResourceKind::Zone,
            Resource::RecordSet(_) => ResourceKind::RecordSet,
            Resource::Hypervisor(_) => ResourceKind::Hypervisor,
            Resource::Aggregate(_) => ResourceKind::Aggregate,
            Resource::Project(_) => ResourceKind::Project,
            Resource::Domain(_) => ResourceKind::Domain,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Resource::Server(r) => &r.id,
            Resource::Flavor(r) => &r.id,
            Resource::Image(r) => &r.id,
            Resource::Volume(r) => &r.id,
            Resource::Network(r) => &r.id,
            Resource::LoadBalancer(r) => &r.id,
            Resource::Zone(r) => &r.id,
            Resource::RecordSet(r) => &r.id,
            Resource::Hypervisor(r) => &r.id,
            Resource::Aggregate(r) => &r.id,
            Resource::Project(r) => &r.id,
            Resource::Domain(r) => &r.id,
        }
    }

    /// Human-readable list label: the name (hostname for hypervisors),
    /// falling back to the id when the name is empty
    pub fn label(&self) -> String {
        let name = match self {
            Resource::Server(r) => &r.name,
            Resource::Flavor(r) => &r.name,
            Resource::Image(r) => &r.name,
            Resource::Volume(r) => &r.name,
            Resource::Network(r) => &r.name,
            Resource::LoadBalancer(r) => &r.name,
            Resource::Zone(r) => &r.name,
            Resource::RecordSet(r) => &r.name,
            Resource::Hypervisor(r) => &r.hypervisor_hostname,
            Resource::Aggregate(r) => &r.name,
            Resource::Project(r) => &r.name,
            Resource::Domain(r) => &r.name,
        };
        if name.is_empty() {
            self.id().to_string()
        } else {
            name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_decodes_nova_payload() {
        let server: Server = serde_json::from_value(json!({
            "id": "srv-1",
            "name": "web-01",
            "status": "ACTIVE",
            "flavor": {"id": "m1.small"},
            "image": "",
            "addresses": {"private": [{"addr": "10.0.0.5", "version": 4}]},
            "accessIPv4": "",
            "os-extended-volumes:volumes_attached": [{"id": "vol-1"}]
        }))
        .unwrap();

        assert_eq!(server.flavor_id().as_deref(), Some("m1.small"));
        assert_eq!(server.image_id(), None);
        assert_eq!(server.connect_address().as_deref(), Some("10.0.0.5"));
        assert_eq!(server.volumes_attached[0].id, "vol-1");
        assert_eq!(server.embedded_flavor(), None);
    }

    #[test]
    fn test_embedded_flavor() {
        let server: Server = serde_json::from_value(json!({
            "id": "srv-2",
            "flavor": {"original_name": "m1.medium", "vcpus": 2, "ram": 4096, "disk": 40}
        }))
        .unwrap();

        assert_eq!(server.flavor_id(), None);
        let flavor = server.embedded_flavor().unwrap();
        assert_eq!(flavor.name, "m1.medium");
        assert_eq!(flavor.vcpus, 2);
        assert_eq!(flavor.ram, 4096);
    }

    #[test]
    fn test_access_ip_wins_over_addresses() {
        let server = Server {
            access_ipv4: "203.0.113.7".to_string(),
            addresses: BTreeMap::from([(
                "private".to_string(),
                vec![ServerAddress {
                    addr: "10.0.0.5".to_string(),
                    version: 4,
                }],
            )]),
            ..Default::default()
        };
        assert_eq!(server.connect_address().as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let aggregate: Aggregate =
            serde_json::from_value(json!({"id": 7, "name": "az1-hosts"})).unwrap();
        assert_eq!(aggregate.id, "7");

        let hypervisor: Hypervisor =
            serde_json::from_value(json!({"id": "c0ffee", "hypervisor_hostname": "cmp-01"}))
                .unwrap();
        assert_eq!(hypervisor.id, "c0ffee");
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let image: Image =
            serde_json::from_value(json!({"id": "img-1", "size": null, "status": "queued"}))
                .unwrap();
        assert_eq!(image.size, 0);

        let project: Project =
            serde_json::from_value(json!({"id": "p1", "name": "dev", "description": null}))
                .unwrap();
        assert_eq!(project.description, "");
    }

    #[test]
    fn test_unnamed_glance_and_cinder_records_decode() {
        let image = Resource::from_value(
            ResourceKind::Image,
            json!({"id": "i1", "name": null, "size": 10, "tags": [], "status": "active"}),
        )
        .unwrap();
        assert_eq!(image.label(), "i1");

        let volume = Resource::from_value(
            ResourceKind::Volume,
            json!({
                "id": "v1",
                "name": null,
                "description": null,
                "size": 1,
                "volume_type": null,
                "status": "available"
            }),
        )
        .unwrap();
        assert_eq!(volume.label(), "v1");
    }

    #[test]
    fn test_null_strings_in_network_records() {
        let zone: Zone = serde_json::from_value(json!({
            "id": "z1",
            "name": "example.com.",
            "email": null,
            "pool_id": null
        }))
        .unwrap();
        assert_eq!(zone.email, "");

        let lb: LoadBalancer =
            serde_json::from_value(json!({"id": "lb1", "name": null, "vip_address": null}))
                .unwrap();
        assert_eq!(lb.name, "");

        let hypervisor: Hypervisor =
            serde_json::from_value(json!({"id": 3, "host_ip": null, "state": "up"})).unwrap();
        assert_eq!(hypervisor.host_ip, "");
    }

    #[test]
    fn test_label_prefers_name_then_id() {
        let named = Resource::Flavor(Flavor {
            id: "f1".to_string(),
            name: "m1.tiny".to_string(),
            ..Default::default()
        });
        assert_eq!(named.label(), "m1.tiny");

        let unnamed = Resource::Volume(Volume {
            id: "vol-9".to_string(),
            ..Default::default()
        });
        assert_eq!(unnamed.label(), "vol-9");

        let hypervisor = Resource::Hypervisor(Hypervisor {
            id: "1".to_string(),
            hypervisor_hostname: "cmp-01".to_string(),
            ..Default::default()
        });
        assert_eq!(hypervisor.label(), "cmp-01");
    }
}
