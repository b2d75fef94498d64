mod common;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::*;

#[tokio::test]
async fn test_all_newsletters_with_nested_topics() {
    let (server, schema) = setup().await;
    Mock::given(method("GET"))
        .and(path("/newsletters/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "title": "Weekly",
            "description": "News",
            "url_to_image": "http://img/1.png",
            "topics": [{"name": "rust", "img_id": 7}]
        }])))
        .mount(&server)
        .await;

    let query = "{ allNewsletters { title topics { name img_id } } }";
    let response = execute_graphql(&schema, query, None, None).await;
    assert!(response.is_ok(), "{:?}", response.errors);

    let data = response.into_json().unwrap();
    assert_eq!(
        data["data"]["allNewsletters"],
        json!([{"title": "Weekly", "topics": [{"name": "rust", "img_id": 7}]}])
    );
}

#[tokio::test]
async fn test_all_topics() {
    let (server, schema) = setup().await;
    Mock::given(method("GET"))
        .and(path("/topics/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "rust", "img_id": 1},
            null
        ])))
        .mount(&server)
        .await;

    let response = execute_graphql(&schema, "{ allTopics { name } }", None, None).await;
    assert!(response.is_ok(), "{:?}", response.errors);
    assert_eq!(
        response.into_json().unwrap()["data"]["allTopics"],
        json!([{"name": "rust"}, null])
    );
}

#[tokio::test]
async fn test_save_mutations_post_to_their_collections() {
    let (server, schema) = setup().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({"name": "Ada", "email": "ada@example.com"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 3,
            "name": "Ada",
            "email": "ada@example.com",
            "created_at": "2024-01-01",
            "updated_at": "2024-01-01",
            "url": "http://newsletters/users/3"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user_topics"))
        .and(body_json(json!({"user_id": 3, "topic_id": 7})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"user_id": 3, "topic_id": 7})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/newsletters"))
        .and(body_json(json!({
            "title": "Weekly",
            "description": "News",
            "url_to_image": "http://img/1.png",
            "topics": [7]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "title": "Weekly",
            "description": "News",
            "url_to_image": "http://img/1.png",
            "topics": [{"name": "rust", "img_id": 7}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = r#"
        mutation {
            saveUser(user: {name: "Ada", email: "ada@example.com"}) { id url }
            saveUserTopic(userTopic: {user_id: 3, topic_id: 7}) { user_id topic_id }
            saveNewsletter(newsletter: {
                title: "Weekly", description: "News", url_to_image: "http://img/1.png", topics: [7]
            }) { title }
        }
    "#;
    let response = execute_graphql(&schema, query, None, None).await;
    assert!(response.is_ok(), "{:?}", response.errors);

    let data = response.into_json().unwrap();
    assert_eq!(data["data"]["saveUser"]["id"], 3);
    assert_eq!(data["data"]["saveUserTopic"], json!({"user_id": 3, "topic_id": 7}));
    assert_eq!(data["data"]["saveNewsletter"]["title"], "Weekly");
}
