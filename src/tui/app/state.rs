//! Application state structures
//!
//! Input mode, the Context State shared with the status ticker, and the
//! bookkeeping for in-flight async work.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::models::{Server, ViewId};

use super::async_ops::Job;

/// Which interpretation keyboard input currently gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Single keys map directly to actions
    #[default]
    Shortcut,
    /// Typed text accumulates in the command prompt
    Command,
}

/// Active project, selected server and current view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextState {
    pub active_project: String,
    pub selected_server: Option<Server>,
    pub current_view: Option<ViewId>,
}

impl ContextState {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            active_project: project.into(),
            ..Default::default()
        }
    }

    /// The SSH shortcut only fires on the server view with a server selected
    pub fn ssh_available(&self) -> bool {
        self.current_view == Some(ViewId::Servers) && self.selected_server.is_some()
    }
}

/// Context State shared between the UI loop and the status ticker
///
/// The UI loop is the only writer; the ticker takes snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedContext(Arc<RwLock<ContextState>>);

impl SharedContext {
    pub fn new(state: ContextState) -> Self {
        Self(Arc::new(RwLock::new(state)))
    }

    pub fn snapshot(&self) -> ContextState {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut ContextState) -> R) -> R {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn active_project(&self) -> String {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .active_project
            .clone()
    }
}

/// Sequence numbers and queued jobs for async work
#[derive(Debug, Default)]
pub struct AsyncState {
    /// Latest activation sequence per view; older results are dropped
    pub view_seqs: HashMap<ViewId, u64>,
    /// Latest detail request; bumped by entry activation and view switches
    pub detail_seq: u64,
    /// Jobs waiting to be spawned by the event loop
    pub pending: Vec<Job>,
}

impl AsyncState {
    pub fn next_view_seq(&mut self, view: ViewId) -> u64 {
        let seq = self.view_seqs.entry(view).or_insert(0);
        *seq += 1;
        *seq
    }

    pub fn is_current_view_seq(&self, view: ViewId, seq: u64) -> bool {
        self.view_seqs.get(&view).copied() == Some(seq)
    }

    pub fn next_detail_seq(&mut self) -> u64 {
        self.detail_seq += 1;
        self.detail_seq
    }
}
