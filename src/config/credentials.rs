//! OpenStack credentials from the process environment
//!
//! Read once at startup. The active project changes at runtime through the
//! UI context, never by writing back to the environment.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("{0} is not set; source your OpenStack RC file or pass --project")]
    Missing(&'static str),
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub auth_url: String,
    pub username: String,
    pub password: String,
    pub user_domain: String,
    pub project_domain: String,
    pub project: String,
    pub region: Option<String>,
    pub interface: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_url", &self.auth_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("user_domain", &self.user_domain)
            .field("project_domain", &self.project_domain)
            .field("project", &self.project)
            .field("region", &self.region)
            .field("interface", &self.interface)
            .finish()
    }
}

impl Credentials {
    /// Read credentials from `OS_*` environment variables
    pub fn from_env(project_override: Option<&str>) -> Result<Self, CredentialsError> {
        Self::from_lookup(|key| std::env::var(key).ok(), project_override)
    }

    /// Read credentials through an arbitrary lookup
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        project_override: Option<&str>,
    ) -> Result<Self, CredentialsError> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(CredentialsError::Missing(key));

        let project = match project_override {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => require("OS_PROJECT_NAME")?,
        };
        let user_domain = get("OS_USER_DOMAIN_NAME").unwrap_or_else(|| "Default".to_string());

        Ok(Self {
            auth_url: require("OS_AUTH_URL")?,
            username: require("OS_USERNAME")?,
            password: require("OS_PASSWORD")?,
            project_domain: get("OS_PROJECT_DOMAIN_NAME").unwrap_or_else(|| user_domain.clone()),
            user_domain,
            project,
            region: get("OS_REGION_NAME"),
            interface: get("OS_INTERFACE").unwrap_or_else(|| "public".to_string()),
        })
    }

    /// Credentials for offline browsing: only the project name matters
    pub fn demo(lookup: impl Fn(&str) -> Option<String>, project_override: Option<&str>) -> Self {
        let project = project_override
            .map(str::to_string)
            .or_else(|| lookup("OS_PROJECT_NAME"))
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "dev".to_string());
        Self {
            auth_url: String::new(),
            username: String::new(),
            password: String::new(),
            user_domain: "Default".to_string(),
            project_domain: "Default".to_string(),
            project,
            region: None,
            interface: "public".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const FULL: &[(&str, &str)] = &[
        ("OS_AUTH_URL", "https://keystone.example:5000/v3"),
        ("OS_USERNAME", "alice"),
        ("OS_PASSWORD", "secret"),
        ("OS_PROJECT_NAME", "dev"),
    ];

    #[test]
    fn test_defaults_for_optional_variables() {
        let creds = Credentials::from_lookup(env(FULL), None).unwrap();
        assert_eq!(creds.project, "dev");
        assert_eq!(creds.user_domain, "Default");
        assert_eq!(creds.project_domain, "Default");
        assert_eq!(creds.interface, "public");
        assert_eq!(creds.region, None);
    }

    #[test]
    fn test_missing_project_is_fatal() {
        let err = Credentials::from_lookup(env(&FULL[..3]), None).unwrap_err();
        assert_eq!(err, CredentialsError::Missing("OS_PROJECT_NAME"));
    }

    #[test]
    fn test_project_override_wins() {
        let creds = Credentials::from_lookup(env(&FULL[..3]), Some("prod")).unwrap();
        assert_eq!(creds.project, "prod");
    }

    #[test]
    fn test_password_is_redacted_in_debug_output() {
        let creds = Credentials::from_lookup(env(FULL), None).unwrap();
        assert!(!format!("{:?}", creds).contains("secret"));
    }

    #[test]
    fn test_demo_defaults_to_dev() {
        let creds = Credentials::demo(env(&[]), None);
        assert_eq!(creds.project, "dev");
    }
}
