mod common;

use api::app::build_router;
use api::middleware::bearer::extract_bearer;
use api::{AppState, GatewayConfig};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header as header_is, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

fn app_for(server: &MockServer) -> axum::Router {
    let config = GatewayConfig {
        port: 0,
        backends: backends_for(server),
        allowed_origins: None,
        introspection: true,
    };
    build_router(AppState::new(config).expect("state should build"))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn test_extract_bearer() {
    assert_eq!(extract_bearer("Bearer abc123"), Some("abc123".into()));
    assert_eq!(extract_bearer("Bearer abc.def"), Some("abc".into()));
    assert_eq!(extract_bearer("Token Bearer xyz"), Some("xyz".into()));
    assert_eq!(extract_bearer("Bearer "), None);
    assert_eq!(extract_bearer("Basic dXNlcjpwdw=="), None);
}

#[test]
fn test_extract_bearer_skips_markers_without_token() {
    assert_eq!(extract_bearer("Bearer !x Bearer abc"), Some("abc".into()));
    assert_eq!(extract_bearer("Bearer  Bearer 42"), Some("42".into()));
    assert_eq!(extract_bearer("Bearer - Bearer ."), None);
}

#[tokio::test]
async fn test_post_graphql_forwards_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me/"))
        .and(header_is("authorization", "Bearer sekret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1", "name": "Ada", "email": "ada@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);
    let request = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, "Bearer sekret")
        .body(Body::from(json!({"query": "{ me { name } }"}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"data": {"me": {"name": "Ada"}}}));
}

#[tokio::test]
async fn test_get_graphql_runs_simple_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topics/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "rust", "img_id": 1}])))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let request = Request::builder()
        .uri("/graphql?query=%7B%20allTopics%20%7B%20name%20%7D%20%7D")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"data": {"allTopics": [{"name": "rust"}]}})
    );
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let server = MockServer::start().await;
    let app = app_for(&server);

    let request = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("bad request"));
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let app = app_for(&server);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), 64).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}
