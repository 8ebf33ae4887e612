//! Async operation management
//!
//! Key handling never awaits. It queues `Job`s, the event loop spawns them,
//! and each job reports back with exactly one `UiEvent` through the UI
//! channel. Results carry the sequence number they were issued under so a
//! superseded fetch can never overwrite a newer one.

use std::fmt;

use super::core::App;
use crate::models::ViewId;
use crate::services::{ResourceService, ViewFetch};
use crate::tui::binder::{self, DetailFetch};
use crate::tui::display::StatusLine;
use crate::tui::ssh::{self, SshTarget};

/// Background work requested by the UI
pub enum Job {
    /// List the records of a view
    FetchView {
        view: ViewId,
        seq: u64,
        service: ResourceService,
    },
    /// Render detail text that needs dependent lookups
    Describe {
        seq: u64,
        fetch: DetailFetch,
        service: ResourceService,
    },
    /// Open an SSH session to a server
    Ssh(SshTarget),
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Job::FetchView { view, seq, .. } => f
                .debug_struct("FetchView")
                .field("view", view)
                .field("seq", seq)
                .finish_non_exhaustive(),
            Job::Describe { seq, .. } => f
                .debug_struct("Describe")
                .field("seq", seq)
                .finish_non_exhaustive(),
            Job::Ssh(target) => f.debug_tuple("Ssh").field(target).finish(),
        }
    }
}

impl Job {
    /// Run the job to completion and produce its UI event
    pub async fn run(self) -> UiEvent {
        match self {
            Job::FetchView { view, seq, service } => {
                tracing::debug!(
                    "Fetching {} (seq {}) for project {}",
                    view,
                    seq,
                    service.scope().project
                );
                let fetch = service.fetch_view(view).await;
                UiEvent::ViewLoaded { view, seq, fetch }
            }
            Job::Describe {
                seq,
                fetch,
                service,
            } => {
                let text = fetch(service).await;
                UiEvent::DetailReady { seq, text }
            }
            Job::Ssh(target) => match ssh::launch(&target).await {
                Ok(status) if status.success() => UiEvent::Notice {
                    text: format!("ssh session to {} ended", target.server_name),
                    is_error: false,
                },
                Ok(status) => {
                    tracing::warn!("ssh to {} exited with {}", target.destination(), status);
                    UiEvent::Notice {
                        text: format!("ssh to {} exited with {}", target.server_name, status),
                        is_error: true,
                    }
                }
                Err(e) => {
                    tracing::warn!("ssh to {} failed: {:#}", target.destination(), e);
                    UiEvent::Notice {
                        text: format!("ssh failed: {}", e),
                        is_error: true,
                    }
                }
            },
        }
    }
}

/// Display mutation delivered to the UI loop
#[derive(Debug)]
pub enum UiEvent {
    ViewLoaded {
        view: ViewId,
        seq: u64,
        fetch: ViewFetch,
    },
    DetailReady {
        seq: u64,
        text: String,
    },
    Status(StatusLine),
    Notice {
        text: String,
        is_error: bool,
    },
}

impl App {
    /// Hand queued jobs to the caller for spawning
    pub fn take_jobs(&mut self) -> Vec<Job> {
        std::mem::take(&mut self.async_state.pending)
    }

    pub(crate) fn enqueue(&mut self, job: Job) {
        tracing::debug!("Queued {:?}", job);
        self.async_state.pending.push(job);
    }

    /// Apply one event to the display; the only path async results take
    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::ViewLoaded { view, seq, fetch } => self.apply_view_loaded(view, seq, fetch),
            UiEvent::DetailReady { seq, text } => {
                if seq != self.async_state.detail_seq {
                    tracing::debug!(
                        "Dropping stale detail (seq {}, current {})",
                        seq,
                        self.async_state.detail_seq
                    );
                    return;
                }
                self.display.detail.clear();
                self.display.detail.write(&text);
            }
            UiEvent::Status(status) => self.display.set_status(status),
            UiEvent::Notice { text, is_error } => self.display.set_notice(text, is_error),
        }
    }

    fn apply_view_loaded(&mut self, view: ViewId, seq: u64, fetch: ViewFetch) {
        if !self.async_state.is_current_view_seq(view, seq) {
            tracing::debug!("Dropping superseded {} result (seq {})", view, seq);
            return;
        }

        let ViewFetch { records, notice } = fetch;
        tracing::debug!("Binding {} {} records", records.len(), view);

        if let Some(page) = self.display.page_mut(view) {
            page.replace(binder::bind(records));
            page.set_loading(false);
        }

        if let Some(notice) = notice {
            self.display.set_notice(notice, true);
        }
    }

    /// Run queued jobs inline until none remain
    ///
    /// SSH jobs are discarded. Used where no event loop is running.
    pub async fn settle(&mut self) {
        loop {
            let jobs = self.take_jobs();
            if jobs.is_empty() {
                break;
            }
            for job in jobs {
                if let Job::Ssh(target) = job {
                    tracing::debug!("Skipping ssh to {} outside the event loop", target.destination());
                    continue;
                }
                let event = job.run().await;
                self.apply_event(event);
            }
        }
    }
}
