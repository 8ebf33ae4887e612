//! Configuration for lazystack
//!
//! Two sources: the `config.yaml` settings file (UI, SSH and client tuning)
//! and the `OS_*` environment variables that carry OpenStack credentials.

pub mod credentials;
pub mod loader;
pub mod paths;
pub mod schema;

pub use credentials::{Credentials, CredentialsError};
pub use loader::ConfigLoader;
pub use schema::{Config, OpenStackConfig, SshConfig, UiConfig};
