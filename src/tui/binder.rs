//! List-detail binder
//!
//! Turns a fetched record set into list entries. Each entry owns a closure
//! over its own snapshot of the record; activating it yields the context
//! change (if any) and the job that produces the detail text.

use futures::FutureExt;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

use crate::models::{Resource, Server};
use crate::services::ResourceService;
use crate::tui::describe;

/// Context State change requested by activating an entry
#[derive(Debug, Clone, PartialEq)]
pub enum ContextEffect {
    /// A project entry was chosen; holds the project name
    SetProject(String),
    /// A server entry was chosen
    SelectServer(Server),
}

/// Async detail renderer, run against the service of the active scope
pub type DetailFetch = Box<dyn FnOnce(ResourceService) -> BoxFuture<'static, String> + Send>;

/// How the detail pane text for an activation is produced
pub enum DetailJob {
    Ready(String),
    Fetch(DetailFetch),
}

impl fmt::Debug for DetailJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailJob::Ready(text) => f.debug_tuple("Ready").field(text).finish(),
            DetailJob::Fetch(_) => f.write_str("Fetch(..)"),
        }
    }
}

/// Outcome of activating a list entry
#[derive(Debug)]
pub struct Activation {
    pub effect: Option<ContextEffect>,
    pub detail: DetailJob,
}

type ActivateFn = Arc<dyn Fn() -> Activation + Send + Sync>;

/// One row of a list pane
#[derive(Clone)]
pub struct ListEntry {
    label: String,
    on_activate: ActivateFn,
}

impl fmt::Debug for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListEntry")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl ListEntry {
    pub fn new(label: impl Into<String>, on_activate: impl Fn() -> Activation + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            on_activate: Arc::new(on_activate),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn activate(&self) -> Activation {
        (self.on_activate)()
    }
}

/// Build the activation closure for one record
fn activation_for(record: Resource) -> impl Fn() -> Activation + Send + Sync + 'static {
    move || match &record {
        Resource::Project(p) => Activation {
            effect: Some(ContextEffect::SetProject(p.name.clone())),
            detail: DetailJob::Ready(describe::project(p)),
        },
        Resource::Server(s) => {
            let server = s.clone();
            Activation {
                effect: Some(ContextEffect::SelectServer(s.clone())),
                detail: DetailJob::Fetch(Box::new(move |service| {
                    async move { describe::server_detail(&service, &server).await }.boxed()
                })),
            }
        }
        Resource::Zone(z) => {
            let zone = z.clone();
            Activation {
                effect: None,
                detail: DetailJob::Fetch(Box::new(move |service| {
                    async move { describe::zone_detail(&service, &zone).await }.boxed()
                })),
            }
        }
        other => Activation {
            effect: None,
            detail: DetailJob::Ready(describe::record(other)),
        },
    }
}

/// Bind every record to a list entry, preserving order
pub fn bind(records: Vec<Resource>) -> Vec<ListEntry> {
    records
        .into_iter()
        .map(|record| ListEntry::new(record.label(), activation_for(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Flavor, Project};

    fn flavor(id: &str, name: &str) -> Resource {
        Resource::Flavor(Flavor {
            id: id.to_string(),
            name: name.to_string(),
            vcpus: 1,
            ram: 512,
            disk: 1,
        })
    }

    #[test]
    fn test_each_entry_captures_its_own_record() {
        let entries = bind(vec![flavor("f1", "m1.tiny"), flavor("f2", "m1.small")]);
        assert_eq!(entries.len(), 2);

        for (entry, expected) in entries.iter().zip(["f1", "f2"]) {
            match entry.activate().detail {
                DetailJob::Ready(text) => assert!(text.starts_with(&format!("ID: {}\n", expected))),
                DetailJob::Fetch(_) => panic!("flavor details need no fetch"),
            }
        }
    }

    #[test]
    fn test_project_entry_sets_project() {
        let entries = bind(vec![Resource::Project(Project {
            id: "proj-prod".to_string(),
            name: "prod".to_string(),
            ..Default::default()
        })]);
        let activation = entries[0].activate();
        assert_eq!(
            activation.effect,
            Some(ContextEffect::SetProject("prod".to_string()))
        );
    }

    #[test]
    fn test_server_entry_selects_and_fetches() {
        let server = Server {
            id: "srv-1".to_string(),
            name: "web-01".to_string(),
            ..Default::default()
        };
        let entries = bind(vec![Resource::Server(server.clone())]);
        assert_eq!(entries[0].label(), "web-01");

        let activation = entries[0].activate();
        assert_eq!(activation.effect, Some(ContextEffect::SelectServer(server)));
        assert!(matches!(activation.detail, DetailJob::Fetch(_)));
    }

    #[test]
    fn test_activation_is_repeatable() {
        let entries = bind(vec![flavor("f1", "m1.tiny")]);
        let first = format!("{:?}", entries[0].activate());
        let second = format!("{:?}", entries[0].activate());
        assert_eq!(first, second);
    }
}
