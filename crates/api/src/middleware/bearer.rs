use axum::{extract::Request, http::header::AUTHORIZATION, middleware::Next, response::Response};

use crate::gql::RequestContext;

/// Places a [`RequestContext`] carrying the bearer token (if any) into the
/// request extensions. Tokens are not validated here.
pub async fn bearer_middleware(mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_bearer);

    request
        .extensions_mut()
        .insert(RequestContext::new(token));

    next.run(request).await
}

/// The run of ASCII alphanumerics following the first `Bearer ` that is
/// followed by at least one, anywhere in the header.
pub fn extract_bearer(header: &str) -> Option<String> {
    header.match_indices("Bearer ").find_map(|(start, marker)| {
        let token: String = header[start + marker.len()..]
            .chars()
            .take_while(char::is_ascii_alphanumeric)
            .collect();
        (!token.is_empty()).then_some(token)
    })
}
