use async_graphql::{PathSegment, Response, ServerError, Value as GqlValue};
use serde::Serialize;
use serde_json::Value;

use super::error::{FieldFailure, NullElement};

/// The only error shape the gateway promises to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FormattedError {
    /// A backend's own error payload, remapped.
    Domain {
        message: String,
        code: Value,
        description: Value,
        path: Vec<PathSegment>,
    },
    /// Parse, validation and every other execution error, as the engine
    /// reports them.
    Standard(ServerError),
}

impl FormattedError {
    pub fn message(&self) -> &str {
        match self {
            FormattedError::Domain { message, .. } => message,
            FormattedError::Standard(error) => &error.message,
        }
    }

    pub fn path(&self) -> &[PathSegment] {
        match self {
            FormattedError::Domain { path, .. } => path,
            FormattedError::Standard(error) => &error.path,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormattedResponse {
    pub data: GqlValue,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FormattedError>,
}

impl FormattedResponse {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_json(self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Remaps a backend payload `{id, code, description}` to
/// `{message: id, code, description, path}`; other errors pass through.
pub fn format_error(mut error: ServerError) -> FormattedError {
    let (path, payload) = match error.source::<FieldFailure>() {
        Some(failure) => (
            failure.path.clone(),
            failure.cause.domain_payload().cloned(),
        ),
        None => (Vec::new(), None),
    };
    if error.path.is_empty() {
        error.path = path;
    }

    let Some(payload) = payload else {
        return FormattedError::Standard(error);
    };

    let message = match payload.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(id) if !id.is_null() => id.to_string(),
        _ => error.message.clone(),
    };
    let code = payload.get("code").cloned().unwrap_or(Value::Null);
    let description = payload.get("description").cloned().unwrap_or(Value::Null);
    tracing::debug!("Backend error at {:?}: {}", error.path, message);

    FormattedError::Domain {
        message,
        code,
        description,
        path: error.path,
    }
}

pub fn format_response(response: Response) -> FormattedResponse {
    FormattedResponse {
        data: response.data,
        errors: response
            .errors
            .into_iter()
            .filter(|error| error.source::<NullElement>().is_none())
            .map(format_error)
            .collect(),
    }
}
