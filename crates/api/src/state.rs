use std::sync::Arc;

use infra::HttpClient;

use crate::config::GatewayConfig;
use crate::gql::domains::default_modules;
use crate::gql::{build_schema, GatewaySchema, SchemaBuildError, SchemaOptions};

/// Shared, read-only process state. Built once before serving.
#[derive(Clone)]
pub struct AppState {
    pub schema: GatewaySchema,
    config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self, SchemaBuildError> {
        let client = HttpClient::new(config.backends.show_urls);
        let modules = default_modules(&config.backends, &client);
        let options = SchemaOptions {
            introspection: config.introspection,
            ..SchemaOptions::default()
        };
        let schema = build_schema(&modules, &options)?;

        Ok(Self {
            schema,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
