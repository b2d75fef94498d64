mod common;

use api::gql::FormattedError;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::*;

#[tokio::test]
async fn test_backend_error_payload_is_remapped() {
    let (server, schema) = setup().await;
    Mock::given(method("GET"))
        .and(path("/courses/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "id": "CourseNotFound",
            "code": 404,
            "description": "No course with code 999"
        })))
        .mount(&server)
        .await;

    let response = execute_graphql(&schema, "{ courseByCode(code: 999) { name } }", None, None).await;
    assert_eq!(response.errors.len(), 1, "{:?}", response.errors);
    assert!(matches!(response.errors[0], FormattedError::Domain { .. }));

    let body = response.into_json().unwrap();
    assert!(body["data"].is_null());
    assert_eq!(
        body["errors"][0],
        json!({
            "message": "CourseNotFound",
            "code": 404,
            "description": "No course with code 999",
            "path": ["courseByCode"]
        })
    );
}

#[tokio::test]
async fn test_error_on_nullable_field_keeps_siblings() {
    let (server, schema) = setup().await;
    Mock::given(method("GET"))
        .and(path("/centers/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "id": "CentersDown",
            "code": "E_UNAVAILABLE",
            "description": "maintenance"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/topics/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "rust", "img_id": 1}])))
        .mount(&server)
        .await;

    let query = "{ centerById(code: 1) { code } allTopics { name } }";
    let response = execute_graphql(&schema, query, None, None).await;
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message(), "CentersDown");

    let body = response.into_json().unwrap();
    assert!(body["data"]["centerById"].is_null());
    assert_eq!(body["data"]["allTopics"], json!([{"name": "rust"}]));
    assert_eq!(body["errors"][0]["code"], "E_UNAVAILABLE");
    assert_eq!(body["errors"][0]["path"], json!(["centerById"]));
}

#[tokio::test]
async fn test_error_without_domain_payload_passes_through() {
    let (server, schema) = setup().await;
    Mock::given(method("GET"))
        .and(path("/courses/3"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let response = execute_graphql(&schema, "{ courseByCode(code: 3) { name } }", None, None).await;
    assert_eq!(response.errors.len(), 1);
    assert!(matches!(response.errors[0], FormattedError::Standard(_)));

    let body = response.into_json().unwrap();
    let error = &body["errors"][0];
    assert_eq!(error["message"], "upstream responded with status 502");
    assert_eq!(error["path"], json!(["courseByCode"]));
    assert!(error["locations"].is_array());
}

#[tokio::test]
async fn test_unreachable_backend_is_a_single_field_error() {
    // bind then drop to get a port nothing listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let schema = gateway_schema(&backends_on_port(port));

    let response = execute_graphql(&schema, "{ allCourses { code } }", None, None).await;
    assert_eq!(response.errors.len(), 1);

    let error = &response.errors[0];
    assert!(matches!(error, FormattedError::Standard(_)));
    assert!(
        error.message().starts_with("upstream request failed"),
        "unexpected message: {}",
        error.message()
    );
    assert_eq!(error.path().len(), 1);
}

#[tokio::test]
async fn test_validation_errors_are_unchanged() {
    let (_server, schema) = setup().await;

    let response = execute_graphql(&schema, "{ notAField }", None, None).await;
    assert_eq!(response.errors.len(), 1);
    let error = &response.errors[0];
    assert!(matches!(error, FormattedError::Standard(_)));
    assert!(error.message().contains("notAField"), "{}", error.message());
    assert!(error.path().is_empty());
}

#[tokio::test]
async fn test_unmatched_backend_route_is_reported() {
    let (_server, schema) = setup().await;

    // registerUser's argument is optional, so the call goes out without a body
    // and the empty mock server answers 404
    let response = execute_graphql(&schema, "mutation { registerUser { token } }", None, None).await;
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message(), "upstream responded with status 404");
    assert_eq!(response.errors[0].path().len(), 1);
}

#[tokio::test]
async fn test_nested_field_error_carries_full_path() {
    let (server, schema) = setup().await;
    Mock::given(method("GET"))
        .and(path("/newsletters/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "title": "Weekly",
            "description": "News",
            "url_to_image": "http://img/1.png",
            "topics": "rust"
        }])))
        .mount(&server)
        .await;

    let query = "{ allNewsletters { title topics { name } } }";
    let response = execute_graphql(&schema, query, None, None).await;
    assert_eq!(response.errors.len(), 1, "{:?}", response.errors);
    assert!(response.errors[0].message().starts_with("expected a list"));

    let body = response.into_json().unwrap();
    assert_eq!(body["errors"][0]["path"], json!(["allNewsletters", 0, "topics"]));
    assert_eq!(body["data"]["allNewsletters"][0]["title"], "Weekly");
}
