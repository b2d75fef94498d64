//! One module per backend service. Each contributes its slice of the schema
//! and the resolvers that forward those fields to its own base URL.

use std::future::Future;
use std::sync::Arc;

use infra::{BackendEndpoint, BackendsConfig, HttpClient, UpstreamMethod};
use serde_json::Value;

use super::error::ResolveError;
use super::resolver::{ResolverFragment, ResolverInput};

pub mod centers;
pub mod courses;
pub mod newsletters;
pub mod users;

pub use centers::CentersModule;
pub use courses::CoursesModule;
pub use newsletters::NewslettersModule;
pub use users::UsersModule;

pub trait DomainModule: Send + Sync {
    /// Label used when reporting resolver collisions.
    fn name(&self) -> &'static str;
    /// Object, input and interface definitions.
    fn type_defs(&self) -> &'static str;
    /// Field declarations injected into `Query`.
    fn queries(&self) -> &'static str;
    /// Field declarations injected into `Mutation`.
    fn mutations(&self) -> &'static str;
    fn resolvers(&self) -> ResolverFragment;
}

/// The four gateway modules, in merge order.
pub fn default_modules(backends: &BackendsConfig, client: &HttpClient) -> Vec<Box<dyn DomainModule>> {
    vec![
        Box::new(CoursesModule::new(&backends.courses, client.clone())),
        Box::new(UsersModule::new(&backends.users, client.clone())),
        Box::new(NewslettersModule::new(&backends.newsletters, client.clone())),
        Box::new(CentersModule::new(&backends.centers, client.clone())),
    ]
}

/// A backend's base URL plus the client used to reach it.
#[derive(Debug)]
pub struct RestBackend {
    client: HttpClient,
    base_url: String,
}

impl RestBackend {
    pub fn new(endpoint: &BackendEndpoint, client: HttpClient) -> Arc<Self> {
        Arc::new(Self {
            client,
            base_url: endpoint.base_url(),
        })
    }

    /// `{base}` for an empty segment, `{base}/{segment}` otherwise.
    pub fn url(&self, segment: &str) -> String {
        if segment.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, segment)
        }
    }

    /// Read-all: `GET {url}/?{field arguments}`.
    pub async fn list(&self, segment: &str, input: &ResolverInput) -> Result<Value, ResolveError> {
        Ok(self
            .client
            .get(&self.url(segment), "", &input.args, input.token())
            .await?)
    }

    /// Read-by-key: `GET {url}` with no query string.
    pub async fn fetch(&self, segment: &str, input: &ResolverInput) -> Result<Value, ResolveError> {
        self.send(UpstreamMethod::Get, segment, None, input).await
    }

    pub async fn create(
        &self,
        segment: &str,
        body: Option<&Value>,
        input: &ResolverInput,
    ) -> Result<Value, ResolveError> {
        self.send(UpstreamMethod::Post, segment, body, input).await
    }

    pub async fn update(
        &self,
        segment: &str,
        body: Option<&Value>,
        input: &ResolverInput,
    ) -> Result<Value, ResolveError> {
        self.send(UpstreamMethod::Put, segment, body, input).await
    }

    pub async fn delete(&self, segment: &str, input: &ResolverInput) -> Result<Value, ResolveError> {
        self.send(UpstreamMethod::Delete, segment, None, input).await
    }

    async fn send(
        &self,
        method: UpstreamMethod,
        segment: &str,
        body: Option<&Value>,
        input: &ResolverInput,
    ) -> Result<Value, ResolveError> {
        Ok(self
            .client
            .call(&self.url(segment), method, body, input.token())
            .await?)
    }
}

/// Adapts `async fn(backend, input)` into a resolver closure.
pub(crate) fn bind<F, Fut>(
    backend: &Arc<RestBackend>,
    f: F,
) -> impl Fn(ResolverInput) -> Fut + Send + Sync + 'static
where
    F: Fn(Arc<RestBackend>, ResolverInput) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ResolveError>> + Send + 'static,
{
    let backend = Arc::clone(backend);
    move |input| f(Arc::clone(&backend), input)
}
