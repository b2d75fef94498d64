use std::sync::Arc;

use infra::{BackendEndpoint, HttpClient};
use serde_json::Value;

use super::types::{MUTATIONS, QUERIES, TYPE_DEFS};
use crate::gql::domains::{bind, DomainModule, RestBackend};
use crate::gql::error::ResolveError;
use crate::gql::resolver::{ResolverFragment, ResolverInput};

pub struct CentersModule {
    backend: Arc<RestBackend>,
}

impl CentersModule {
    pub fn new(endpoint: &BackendEndpoint, client: HttpClient) -> Self {
        Self {
            backend: RestBackend::new(endpoint, client),
        }
    }
}

impl DomainModule for CentersModule {
    fn name(&self) -> &'static str {
        "centers"
    }

    fn type_defs(&self) -> &'static str {
        TYPE_DEFS
    }

    fn queries(&self) -> &'static str {
        QUERIES
    }

    fn mutations(&self) -> &'static str {
        MUTATIONS
    }

    fn resolvers(&self) -> ResolverFragment {
        let b = &self.backend;
        ResolverFragment::new(self.name())
            .query("allCenters", bind(b, all_centers))
            .query("centerById", bind(b, center_by_id))
            .mutation("saveCenter", bind(b, save_center))
    }
}

async fn all_centers(backend: Arc<RestBackend>, input: ResolverInput) -> Result<Value, ResolveError> {
    backend.list("", &input).await
}

async fn center_by_id(
    backend: Arc<RestBackend>,
    input: ResolverInput,
) -> Result<Value, ResolveError> {
    let code = input.key("code")?;
    backend.fetch(&code, &input).await
}

async fn save_center(backend: Arc<RestBackend>, input: ResolverInput) -> Result<Value, ResolveError> {
    let center = input.arg("center")?;
    backend.create("", Some(center), &input).await
}
