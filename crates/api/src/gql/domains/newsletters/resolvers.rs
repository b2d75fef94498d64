use std::sync::Arc;

use infra::{BackendEndpoint, HttpClient};
use serde_json::Value;

use super::types::{MUTATIONS, QUERIES, TYPE_DEFS};
use crate::gql::domains::{bind, DomainModule, RestBackend};
use crate::gql::error::ResolveError;
use crate::gql::resolver::{ResolverFragment, ResolverInput};

/// The newsletters backend has no entry segment; each collection sits at
/// the root of the host.
pub struct NewslettersModule {
    backend: Arc<RestBackend>,
}

impl NewslettersModule {
    pub fn new(endpoint: &BackendEndpoint, client: HttpClient) -> Self {
        Self {
            backend: RestBackend::new(endpoint, client),
        }
    }
}

impl DomainModule for NewslettersModule {
    fn name(&self) -> &'static str {
        "newsletters"
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
            .query("allNewsletters", bind(b, all_newsletters))
            .query("allTopics", bind(b, all_topics))
            .mutation("saveUser", bind(b, save_user))
            .mutation("saveUserTopic", bind(b, save_user_topic))
            .mutation("saveNewsletter", bind(b, save_newsletter))
    }
}

async fn all_newsletters(
    backend: Arc<RestBackend>,
    input: ResolverInput,
) -> Result<Value, ResolveError> {
    backend.list("newsletters", &input).await
}

async fn all_topics(backend: Arc<RestBackend>, input: ResolverInput) -> Result<Value, ResolveError> {
    backend.list("topics", &input).await
}

async fn save_user(backend: Arc<RestBackend>, input: ResolverInput) -> Result<Value, ResolveError> {
    let user = input.arg("user")?;
    backend.create("users", Some(user), &input).await
}

async fn save_user_topic(
    backend: Arc<RestBackend>,
    input: ResolverInput,
) -> Result<Value, ResolveError> {
    let user_topic = input.arg("userTopic")?;
    backend.create("user_topics", Some(user_topic), &input).await
}

async fn save_newsletter(
    backend: Arc<RestBackend>,
    input: ResolverInput,
) -> Result<Value, ResolveError> {
    let newsletter = input.arg("newsletter")?;
    backend.create("newsletters", Some(newsletter), &input).await
}
