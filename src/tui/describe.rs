//! Detail pane text for each resource kind
//!
//! Formatting is pure; the only async entry points are the two kinds whose
//! detail needs dependent fetches (servers and DNS zones). A failed dependent
//! fetch renders as a marked placeholder section, never as an error.

use std::fmt::Write as _;

use crate::models::*;
use crate::services::ResourceService;
use crate::tui::constants::UNAVAILABLE;

/// Outcome of a dependent lookup feeding one detail section
#[derive(Debug, Clone, PartialEq)]
pub enum Dependent<T> {
    Found(T),
    /// The lookup ran and failed
    Unavailable,
    /// The record has nothing to look up
    NotApplicable,
}

impl<T> From<Option<T>> for Dependent<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Dependent::Unavailable, Dependent::Found)
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn list_or_none(out: &mut String, items: impl IntoIterator<Item = String>) {
    let mut any = false;
    for item in items {
        let _ = writeln!(out, "  {}", item);
        any = true;
    }
    if !any {
        out.push_str("  none\n");
    }
}

/// Confirmation shown after a project is selected
pub fn project(p: &Project) -> String {
    format!(
        "Current Project Set To:\nID: {}\nName: {}\nDescription: {}\nDomainID: {}\nEnabled: {}",
        p.id, p.name, p.description, p.domain_id, p.enabled
    )
}

/// Server detail composed from the server and its flavor and image
pub fn server(s: &Server, flavor: &Dependent<Flavor>, image: &Dependent<Image>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID: {}", s.id);
    let _ = writeln!(out, "Name: {}", or_dash(&s.name));
    let _ = writeln!(out, "Status: {}", or_dash(&s.status));

    match flavor {
        Dependent::Found(f) => {
            out.push_str("Flavor:\n");
            let _ = writeln!(out, "  Name: {}", or_dash(&f.name));
            let _ = writeln!(out, "  RAM: {} MB", f.ram);
            let _ = writeln!(out, "  vCPUs: {}", f.vcpus);
            let _ = writeln!(out, "  Disk: {} GB", f.disk);
        }
        Dependent::Unavailable | Dependent::NotApplicable => {
            let _ = writeln!(out, "Flavor: {}", UNAVAILABLE);
        }
    }

    match image {
        Dependent::Found(i) => {
            out.push_str("Image:\n");
            let _ = writeln!(out, "  Name: {}", or_dash(&i.name));
            let _ = writeln!(out, "  ID: {}", i.id);
            let _ = writeln!(out, "  Size: {}", i.size);
            let _ = writeln!(out, "  Tags: {}", or_dash(&i.tags.join(", ")));
        }
        Dependent::Unavailable => {
            let _ = writeln!(out, "Image: {}", UNAVAILABLE);
        }
        Dependent::NotApplicable => out.push_str("Image: booted from volume\n"),
    }

    out.push_str("Networks:\n");
    list_or_none(
        &mut out,
        s.addresses.iter().map(|(network, addrs)| {
            let joined = addrs
                .iter()
                .map(|a| a.addr.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {}", network, joined)
        }),
    );

    out.push_str("Attached Volumes:\n");
    list_or_none(&mut out, s.volumes_attached.iter().map(|v| v.id.clone()));

    out.trim_end().to_string()
}

/// DNS zone detail including its record sets
pub fn zone(z: &Zone, records: Option<&[RecordSet]>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID: {}", z.id);
    let _ = writeln!(out, "Name: {}", z.name);
    let _ = writeln!(out, "TTL: {}", z.ttl);
    let _ = writeln!(out, "Status: {}", or_dash(&z.status));
    let _ = writeln!(out, "Email: {}", or_dash(&z.email));
    let _ = writeln!(out, "Pool: {}", or_dash(&z.pool_id));

    match records {
        None => {
            let _ = write!(out, "Records: {}", UNAVAILABLE);
        }
        Some([]) => out.push_str("Records: none"),
        Some(records) => {
            out.push_str("Records:");
            for rs in records {
                let _ = write!(
                    out,
                    "\n  Name: {}\n    ID: {}\n    Type: {}\n    Records: {}",
                    rs.name,
                    rs.id,
                    or_dash(&rs.record_type),
                    rs.records.join(", ")
                );
            }
        }
    }
    out
}

fn cpu_info(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::String(s) => or_dash(s).to_string(),
        other => other.to_string(),
    }
}

/// Detail text for records that need no dependent fetch
pub fn record(resource: &Resource) -> String {
    match resource {
        Resource::Server(s) => server(s, &Dependent::Unavailable, &Dependent::Unavailable),
        Resource::Zone(z) => zone(z, None),
        Resource::Project(p) => project(p),
        Resource::Flavor(f) => format!(
            "ID: {}\nName: {}\nVCPU: {}\nRAM: {} MB\nDisk: {} GB",
            f.id, f.name, f.vcpus, f.ram, f.disk
        ),
        Resource::Image(i) => format!(
            "ID: {}\nName: {}\nSize: {}\nStatus: {}",
            i.id,
            or_dash(&i.name),
            i.size,
            or_dash(&i.status)
        ),
        Resource::Volume(v) => format!(
            "ID: {}\nName: {}\nDescription: {}\nCreated at: {}\nSize: {} GB\nType: {}\nStatus: {}",
            v.id,
            or_dash(&v.name),
            or_dash(v.description.as_deref().unwrap_or_default()),
            or_dash(&v.created_at),
            v.size,
            or_dash(v.volume_type.as_deref().unwrap_or_default()),
            or_dash(&v.status)
        ),
        Resource::Network(n) => format!(
            "ID: {}\nName: {}\nStatus: {}",
            n.id,
            or_dash(&n.name),
            or_dash(&n.status)
        ),
        Resource::LoadBalancer(lb) => format!(
            "ID: {}\nName: {}\nVIP Address: {}\nOperating Status: {}\nProvisioning Status: {}",
            lb.id,
            or_dash(&lb.name),
            or_dash(&lb.vip_address),
            or_dash(&lb.operating_status),
            or_dash(&lb.provisioning_status)
        ),
        Resource::Hypervisor(h) => format!(
            "Hostname: {}\nType: {}\nHost IP: {}\nState: {}\nCPU Info: {}",
            h.hypervisor_hostname,
            or_dash(&h.hypervisor_type),
            or_dash(&h.host_ip),
            or_dash(&h.state),
            cpu_info(&h.cpu_info)
        ),
        Resource::Aggregate(a) => {
            let mut out = format!(
                "ID: {}\nName: {}\nAvailability Zone: {}\nMetadata:\n",
                a.id,
                a.name,
                a.availability_zone.as_deref().unwrap_or("-")
            );
            list_or_none(
                &mut out,
                a.metadata.iter().map(|(k, v)| format!("{}: {}", k, v)),
            );
            out.push_str("Hosts:\n");
            list_or_none(&mut out, a.hosts.iter().cloned());
            out.trim_end().to_string()
        }
        Resource::RecordSet(rs) => format!(
            "ID: {}\nName: {}\nType: {}\nRecords: {}",
            rs.id,
            rs.name,
            rs.record_type,
            rs.records.join(", ")
        ),
        Resource::Domain(d) => format!("ID: {}\nName: {}\nEnabled: {}", d.id, d.name, d.enabled),
    }
}

/// Server detail with its flavor and image looked up concurrently
pub async fn server_detail(service: &ResourceService, s: &Server) -> String {
    let flavor_lookup = async {
        match s.flavor_id() {
            Some(id) => match service.lookup(ResourceKind::Flavor, &id).await {
                Some(Resource::Flavor(f)) => Dependent::Found(f),
                _ => Dependent::Unavailable,
            },
            None => s.embedded_flavor().into(),
        }
    };
    let image_lookup = async {
        match s.image_id() {
            Some(id) => match service.lookup(ResourceKind::Image, &id).await {
                Some(Resource::Image(i)) => Dependent::Found(i),
                _ => Dependent::Unavailable,
            },
            None => Dependent::NotApplicable,
        }
    };

    let (flavor, image) = futures::join!(flavor_lookup, image_lookup);
    server(s, &flavor, &image)
}

/// Zone detail with its record sets
pub async fn zone_detail(service: &ResourceService, z: &Zone) -> String {
    let records = service.zone_records(&z.id).await;
    zone(z, records.as_deref())
}
