//! Application state and main TUI logic

use super::async_ops::Job;
use super::state::{AsyncState, ContextState, InputMode, SharedContext};
use crate::config::Config;
use crate::models::ViewId;
use crate::openstack::{ResourceProvider, Scope};
use crate::services::ResourceService;
use crate::tui::Theme;
use crate::tui::binder::{ContextEffect, DetailJob};
use crate::tui::display::Display;
use crate::tui::ssh::SshTarget;
use std::sync::Arc;
use std::time::Duration;

/// Main application state
pub struct App {
    // Core data
    pub(crate) config: Config,
    pub(crate) theme: Theme,
    pub(crate) provider: Arc<dyn ResourceProvider>,
    /// Domain the active project lives in
    pub(crate) domain: String,

    // Organized state
    pub(crate) display: Display,
    pub(crate) context: SharedContext,
    pub(crate) mode: InputMode,
    pub(crate) async_state: AsyncState,
    /// First visible row of the list pane
    pub(crate) list_scroll: usize,
}

impl App {
    pub fn new(
        provider: Arc<dyn ResourceProvider>,
        project: impl Into<String>,
        domain: impl Into<String>,
        config: Config,
        theme: Theme,
    ) -> Self {
        let project = project.into();
        let domain = domain.into();
        tracing::debug!(
            "Creating app for project {} in domain {} via {} provider",
            project,
            domain,
            provider.name()
        );

        Self {
            config,
            theme,
            provider,
            domain,
            display: Display::new(),
            context: SharedContext::new(ContextState::new(project)),
            mode: InputMode::default(),
            async_state: AsyncState::default(),
            list_scroll: 0,
        }
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Handle to the Context State, for the status ticker
    pub fn context(&self) -> SharedContext {
        self.context.clone()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.ui.tick_interval_ms.max(1))
    }

    /// Service scoped to the project that is active right now
    pub fn service(&self) -> ResourceService {
        let scope = Scope::new(self.context.active_project(), self.domain.clone());
        ResourceService::new(Arc::clone(&self.provider), scope)
    }

    /// The configured start view, falling back to servers
    pub fn start_view(&self) -> ViewId {
        self.config.ui.start_view.parse().unwrap_or_else(|e| {
            tracing::warn!("{}, starting on servers", e);
            ViewId::Servers
        })
    }

    /// Activate a view: switch the page, clear the detail pane, empty the
    /// list and queue a fresh fetch
    pub fn activate_view(&mut self, view: ViewId) {
        tracing::debug!("Activating view {}", view);
        // A selection only ever refers to a row of the list being replaced
        self.context.update(|c| {
            c.current_view = Some(view);
            c.selected_server = None;
        });

        self.display.switch_to(view);
        self.list_scroll = 0;
        self.display.detail.clear();
        // In-flight details belong to the previous page
        self.async_state.next_detail_seq();

        if let Some(page) = self.display.page_mut(view) {
            page.clear();
            page.set_loading(true);
        }

        let seq = self.async_state.next_view_seq(view);
        let service = self.service();
        self.enqueue(Job::FetchView { view, seq, service });
    }

    /// Activate the highlighted entry of the current page
    pub fn activate_selected(&mut self) {
        let Some(entry) = self
            .display
            .current_page()
            .and_then(|page| page.selected_entry())
            .cloned()
        else {
            return;
        };

        tracing::debug!("Activating entry {}", entry.label());
        let activation = entry.activate();

        match activation.effect {
            Some(ContextEffect::SetProject(project)) => {
                tracing::info!("Active project set to {}", project);
                self.context.update(|c| c.active_project = project);
            }
            Some(ContextEffect::SelectServer(server)) => {
                self.context.update(|c| {
                    c.selected_server = Some(server);
                    c.current_view = Some(ViewId::Servers);
                });
            }
            None => {}
        }

        let seq = self.async_state.next_detail_seq();
        self.display.detail.clear();
        match activation.detail {
            DetailJob::Ready(text) => self.display.detail.write(&text),
            DetailJob::Fetch(fetch) => {
                self.display.detail.set_loading(true);
                let service = self.service();
                self.enqueue(Job::Describe {
                    seq,
                    fetch,
                    service,
                });
            }
        }
    }

    /// Queue an SSH session to the selected server when one is available
    pub fn request_ssh(&mut self) {
        let ctx = self.context.snapshot();
        if !ctx.ssh_available() {
            return;
        }
        let Some(server) = ctx.selected_server else {
            return;
        };

        match SshTarget::for_server(&server, &self.config.ssh) {
            Some(target) => self.enqueue(Job::Ssh(target)),
            None => {
                tracing::warn!("Server {} has no IPv4 address to connect to", server.id);
                self.display
                    .set_notice(format!("{} has no reachable address", server.name), true);
            }
        }
    }
}
