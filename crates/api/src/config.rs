use std::env;

use anyhow::{Context, Result};
use infra::BackendsConfig;

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub port: u16,
    pub backends: BackendsConfig,
    /// `None` allows any origin.
    pub allowed_origins: Option<Vec<String>>,
    pub introspection: bool,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            backends: BackendsConfig::from_env()?,
            allowed_origins: env::var("ALLOWED_ORIGINS").ok().map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            }),
            introspection: env::var("GQL_INTROSPECTION")
                .map(|v| v == "true")
                .unwrap_or(true),
        })
    }
}
