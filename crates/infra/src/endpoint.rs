use std::env;

use anyhow::{Context, Result};

/// Fixed location of one backend service. Built once at startup and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendEndpoint {
    host: String,
    port: u16,
    path_prefix: Option<String>,
}

impl BackendEndpoint {
    pub fn new(host: impl Into<String>, port: u16, path_prefix: Option<String>) -> Self {
        let path_prefix = path_prefix
            .map(|p| p.trim_matches('/').to_string())
            .filter(|p| !p.is_empty());
        Self {
            host: host.into(),
            port,
            path_prefix,
        }
    }

    /// Reads `{host_var}`, `{port_var}` and optionally `{prefix_var}` from the environment.
    pub fn from_env(host_var: &str, port_var: &str, prefix_var: Option<&str>) -> Result<Self> {
        let host = env::var(host_var).with_context(|| format!("{host_var} must be set"))?;
        let port = env::var(port_var)
            .with_context(|| format!("{port_var} must be set"))?
            .parse::<u16>()
            .with_context(|| format!("{port_var} must be a valid port number"))?;
        let path_prefix = prefix_var.and_then(|var| env::var(var).ok());
        Ok(Self::new(host, port, path_prefix))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path_prefix(&self) -> Option<&str> {
        self.path_prefix.as_deref()
    }

    /// `http://{host}:{port}/{prefix}`, or `http://{host}:{port}` when the
    /// backend has no prefix. Never ends with a slash.
    pub fn base_url(&self) -> String {
        match &self.path_prefix {
            Some(prefix) => format!("http://{}:{}/{}", self.host, self.port, prefix),
            None => format!("http://{}:{}", self.host, self.port),
        }
    }
}

/// The complete set of backends the gateway fans out to.
#[derive(Clone, Debug)]
pub struct BackendsConfig {
    pub courses: BackendEndpoint,
    pub users: BackendEndpoint,
    pub newsletters: BackendEndpoint,
    pub centers: BackendEndpoint,
    /// Log every outbound URL at info level (`SHOW_URLS`).
    pub show_urls: bool,
}

impl BackendsConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            courses: BackendEndpoint::from_env("URL", "COURSES_PORT", Some("COURSES_ENTRY"))?,
            users: BackendEndpoint::from_env("USERS_URL", "USERS_PORT", Some("USERS_ENTRY"))?,
            newsletters: BackendEndpoint::from_env("NEWSLETTERS_URL", "NEWSLETTERS_PORT", None)?,
            centers: BackendEndpoint::from_env(
                "CENTERS_URL",
                "CENTERS_PORT",
                Some("CENTERS_ENTRY"),
            )?,
            show_urls: env::var("SHOW_URLS")
                .map(|v| !v.is_empty())
                .unwrap_or(false),
        })
    }
}
