//! SSH launcher for the selected server

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use crate::config::SshConfig;
use crate::config::paths::expand_home;
use crate::models::Server;

/// Everything needed to run `ssh` against one server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    pub server_name: String,
    pub user: String,
    pub host: String,
    pub identity_file: Option<PathBuf>,
    pub extra_args: Vec<String>,
}

impl SshTarget {
    /// Target for `server`, or `None` when it has no address to connect to
    pub fn for_server(server: &Server, config: &SshConfig) -> Option<Self> {
        let host = server.connect_address()?;
        let identity_file = if config.identity_file.is_empty() {
            None
        } else {
            Some(expand_home(&config.identity_file))
        };
        Some(Self {
            server_name: server.name.clone(),
            user: config.user.clone(),
            host,
            identity_file,
            extra_args: config.extra_args.clone(),
        })
    }

    /// `user@host`
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(identity) = &self.identity_file {
            args.push("-i".to_string());
            args.push(identity.display().to_string());
        }
        args.extend(self.extra_args.iter().cloned());
        args.push(self.destination());
        args
    }
}

/// Run `ssh` with the process's own stdio and wait for it to exit
pub async fn launch(target: &SshTarget) -> Result<ExitStatus> {
    tracing::info!("Launching ssh {}", target.args().join(" "));
    tokio::process::Command::new("ssh")
        .args(target.args())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .context("Failed to start ssh")
}
