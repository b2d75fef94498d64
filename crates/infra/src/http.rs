use reqwest::header::HeaderMap;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::UpstreamError;
use crate::query::build_query_url;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpstreamMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<UpstreamMethod> for reqwest::Method {
    fn from(method: UpstreamMethod) -> Self {
        match method {
            UpstreamMethod::Get => reqwest::Method::GET,
            UpstreamMethod::Post => reqwest::Method::POST,
            UpstreamMethod::Put => reqwest::Method::PUT,
            UpstreamMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Full answer of a backend, for callers that need status and headers.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Value,
}

/// JSON-over-HTTP client used by every resolver.
///
/// Cloning is cheap: the inner `reqwest::Client` shares its connection pool.
#[derive(Clone, Debug, Default)]
pub struct HttpClient {
    client: reqwest::Client,
    show_urls: bool,
}

impl HttpClient {
    pub fn new(show_urls: bool) -> Self {
        Self {
            client: reqwest::Client::new(),
            show_urls,
        }
    }

    /// Sends one request and returns the decoded JSON body.
    ///
    /// An empty body decodes to `null`, a non-JSON body to a JSON string.
    pub async fn call(
        &self,
        url: &str,
        method: UpstreamMethod,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Value, UpstreamError> {
        self.call_full(url, method, body, token)
            .await
            .map(|response| response.body)
    }

    /// Like [`HttpClient::call`] but keeps the status line and headers.
    pub async fn call_full(
        &self,
        url: &str,
        method: UpstreamMethod,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<RawResponse, UpstreamError> {
        let parsed = Url::parse(url).map_err(|source| UpstreamError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        if self.show_urls {
            info!("{}", parsed);
        }
        debug!(method = ?method, url = %parsed, "Outbound request");

        let mut request = self.client.request(method.into(), parsed.clone());
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(url = %parsed, "Upstream unreachable: {e}");
            UpstreamError::Transport(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        let body = decode_body(&bytes);

        if !status.is_success() {
            warn!(url = %parsed, status = status.as_u16(), "Upstream returned an error");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(RawResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }

    /// `GET {url}/{path}?{params}` with the query string assembled by
    /// [`build_query_url`].
    pub async fn get(
        &self,
        url: &str,
        path: &str,
        params: &Map<String, Value>,
        token: Option<&str>,
    ) -> Result<Value, UpstreamError> {
        let query_url = build_query_url(&format!("{url}/{path}"), params);
        self.call(&query_url, UpstreamMethod::Get, None, token).await
    }
}

fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
