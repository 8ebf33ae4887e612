//! Configuration schema definitions
//!
//! Defines the structure of `config.yaml` using serde for serialization.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,

    /// SSH launcher configuration
    #[serde(default)]
    pub ssh: SshConfig,

    /// OpenStack client configuration
    #[serde(default)]
    pub openstack: OpenStackConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// View activated at startup (a command name such as `servers`)
    #[serde(default = "default_start_view")]
    pub start_view: String,

    /// Status line refresh interval in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Disable Unicode icons for compatibility
    #[serde(default = "default_false")]
    pub no_icons: bool,
}

/// SSH configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SshConfig {
    /// Remote login user
    #[serde(default = "default_ssh_user")]
    pub user: String,

    /// Private key passed with `-i`; a leading `~` is expanded
    #[serde(default = "default_identity_file")]
    pub identity_file: String,

    /// Extra arguments inserted before the destination
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,
}

/// OpenStack client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenStackConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Serve fixture data when a list call fails or comes back empty
    #[serde(default = "default_false")]
    pub fallback_to_fixtures: bool,
}

// Default value functions
fn default_start_view() -> String {
    "servers".to_string()
}

fn default_tick_interval_ms() -> u64 {
    100
}

fn default_false() -> bool {
    false
}

fn default_ssh_user() -> String {
    "cloud-user".to_string()
}

fn default_identity_file() -> String {
    "~/.ssh/id_rsa".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_view: default_start_view(),
            tick_interval_ms: default_tick_interval_ms(),
            no_icons: default_false(),
        }
    }
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            user: default_ssh_user(),
            identity_file: default_identity_file(),
            extra_args: Vec::new(),
        }
    }
}

impl Default for OpenStackConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            fallback_to_fixtures: default_false(),
        }
    }
}
