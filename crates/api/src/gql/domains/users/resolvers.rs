use std::sync::Arc;

use infra::{BackendEndpoint, HttpClient};
use serde_json::Value;

use super::types::{MUTATIONS, QUERIES, TYPE_DEFS};
use crate::gql::domains::{bind, DomainModule, RestBackend};
use crate::gql::error::ResolveError;
use crate::gql::resolver::{ResolverFragment, ResolverInput};

/// What the users backend answers to a login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthReply {
    Authenticated { token: String, expires_in: i64 },
    Unauthenticated { message: String },
}

impl AuthReply {
    /// Only an explicit `auth: true` counts as authenticated.
    pub fn from_response(value: &Value) -> Self {
        if value.get("auth").and_then(Value::as_bool) == Some(true) {
            AuthReply::Authenticated {
                token: string_field(value, "token"),
                expires_in: value.get("expiresIn").and_then(Value::as_i64).unwrap_or_default(),
            }
        } else {
            AuthReply::Unauthenticated {
                message: string_field(value, "message"),
            }
        }
    }

    /// Concrete `ReplyUsers` type of this reply.
    pub const fn type_name(&self) -> &'static str {
        match self {
            AuthReply::Authenticated { .. } => "Token",
            AuthReply::Unauthenticated { .. } => "FailedToken",
        }
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub struct UsersModule {
    backend: Arc<RestBackend>,
}

impl UsersModule {
    pub fn new(endpoint: &BackendEndpoint, client: HttpClient) -> Self {
        Self {
            backend: RestBackend::new(endpoint, client),
        }
    }
}

impl DomainModule for UsersModule {
    fn name(&self) -> &'static str {
        "users"
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
            .resolve_type("ReplyUsers", |value| AuthReply::from_response(value).type_name())
            .query("me", bind(b, me))
            .mutation("registerUser", bind(b, register_user))
            .mutation("loginUser", bind(b, login_user))
    }
}

async fn me(backend: Arc<RestBackend>, input: ResolverInput) -> Result<Value, ResolveError> {
    backend.list("me", &input).await
}

async fn register_user(
    backend: Arc<RestBackend>,
    input: ResolverInput,
) -> Result<Value, ResolveError> {
    backend.create("register", input.args.get("user"), &input).await
}

async fn login_user(backend: Arc<RestBackend>, input: ResolverInput) -> Result<Value, ResolveError> {
    let reply = backend.create("login", input.args.get("login"), &input).await?;
    if let AuthReply::Unauthenticated { message } = AuthReply::from_response(&reply) {
        tracing::debug!("Login rejected by users backend: {message}");
    }
    Ok(reply)
}
