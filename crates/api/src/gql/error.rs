use async_graphql::PathSegment;
use infra::UpstreamError;
use serde_json::Value;
use thiserror::Error;

/// Failure while composing the executable schema. Always fatal at startup.
#[derive(Debug, Error)]
pub enum SchemaBuildError {
    #[error("merged schema is not valid GraphQL: {0}")]
    Syntax(String),

    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),

    #[error("field `{type_name}.{field}` is declared more than once")]
    DuplicateField { type_name: String, field: String },

    #[error(
        "resolver `{type_name}.{field}` from `{second}` collides with the one from `{first}`; \
         register it as an override if replacing it is intended"
    )]
    ResolverCollision {
        type_name: String,
        field: String,
        first: String,
        second: String,
    },

    #[error("field `{type_name}.{field}` has no resolver")]
    MissingResolver { type_name: String, field: String },

    #[error("abstract type `{0}` has no type discriminator")]
    MissingTypeResolver(String),

    #[error("resolver `{type_name}.{field}` does not match any declared field")]
    UnknownField { type_name: String, field: String },

    #[error("invalid schema: {0}")]
    Invalid(String),
}

/// Failure of a single resolver invocation.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("missing argument `{0}`")]
    MissingArgument(String),

    #[error("{0}")]
    Shape(String),
}

impl ResolveError {
    /// The backend's structured error payload, when it sent one with any of
    /// the `id`, `code` or `description` keys.
    pub fn domain_payload(&self) -> Option<&serde_json::Map<String, Value>> {
        let ResolveError::Upstream(upstream) = self else {
            return None;
        };
        let payload = upstream.body()?.as_object()?;
        ["id", "code", "description"]
            .iter()
            .any(|key| payload.contains_key(*key))
            .then_some(payload)
    }
}

/// A resolver failure tagged with the execution path of the field that
/// raised it. The dynamic executor does not record paths for field errors.
#[derive(Debug, Error)]
#[error("{cause}")]
pub struct FieldFailure {
    pub path: Vec<PathSegment>,
    pub cause: ResolveError,
}

/// Parent value of a `null` element in a list of objects. Fields under it
/// fail with this marker so the element resolves to `null`; the formatter
/// drops the marker errors.
#[derive(Debug, Error)]
#[error("null list element")]
pub(crate) struct NullElement;
