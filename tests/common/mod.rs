//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lazystack::config::Config;
use lazystack::openstack::{FixtureProvider, ListFilter, ProviderError, ResourceProvider, Scope};
use lazystack::tui::{App, Theme};
use lazystack::{Resource, ResourceKind};
use std::sync::{Arc, Mutex};

/// One `list` call seen by the recording provider
#[derive(Debug, Clone, PartialEq)]
pub struct ListCall {
    pub scope: Scope,
    pub kind: ResourceKind,
    pub filter: ListFilter,
}

/// Fixture-backed provider that records every list call
#[derive(Default)]
pub struct RecordingProvider {
    inner: FixtureProvider,
    calls: Mutex<Vec<ListCall>>,
}

impl RecordingProvider {
    pub fn calls(&self) -> Vec<ListCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, kind: ResourceKind) -> Vec<ListCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.kind == kind)
            .collect()
    }
}

#[async_trait]
impl ResourceProvider for RecordingProvider {
    async fn list(
        &self,
        scope: Scope,
        kind: ResourceKind,
        filter: ListFilter,
    ) -> Result<Vec<Resource>, ProviderError> {
        self.calls.lock().unwrap().push(ListCall {
            scope: scope.clone(),
            kind,
            filter: filter.clone(),
        });
        self.inner.list(scope, kind, filter).await
    }

    async fn get_by_id(
        &self,
        scope: Scope,
        kind: ResourceKind,
        id: String,
    ) -> Result<Resource, ProviderError> {
        self.inner.get_by_id(scope, kind, id).await
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// App over the fixture cloud, starting in `project`
pub fn fixture_app(project: &str) -> App {
    app_with(Arc::new(FixtureProvider::new()), project)
}

pub fn app_with(provider: Arc<dyn ResourceProvider>, project: &str) -> App {
    App::new(provider, project, "Default", Config::default(), Theme::default())
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn press(app: &mut App, code: KeyCode) -> Option<bool> {
    app.handle_key(key(code))
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Labels of the currently visible list page
pub fn current_labels(app: &App) -> Vec<String> {
    app.display()
        .current_page()
        .map(|page| page.labels().into_iter().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Move the selection to the entry labelled `label` and activate it
pub fn activate_label(app: &mut App, label: &str) {
    let labels = current_labels(app);
    let index = labels
        .iter()
        .position(|l| l == label)
        .unwrap_or_else(|| panic!("no entry labelled {}", label));
    for _ in 0..labels.len() {
        press(app, KeyCode::Up);
    }
    for _ in 0..index {
        press(app, KeyCode::Down);
    }
    press(app, KeyCode::Enter);
}
