mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use snaplink::domain::repositories::LinkRepository;
use snaplink::routes::router;

#[tokio::test]
async fn test_create_link_success() {
    let (server, repo) = common::make_server().await;

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "originalUrl": "https://example.com/page" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    let short_id = body["shortId"].as_str().unwrap();
    assert_eq!(short_id.len(), 8);
    assert!(short_id.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["originalUrl"], "https://example.com/page");
    assert_eq!(body["customAlias"], Value::Null);
    assert_eq!(body["shortUrl"], format!("https://sho.rt/{short_id}"));
    assert!(body["id"].is_i64());
    assert!(body["createdAt"].is_string());

    let stored = repo.find_by_short_id(short_id).await.unwrap().unwrap();
    assert_eq!(stored.owner.as_str(), common::OWNER);
}

#[tokio::test]
async fn test_create_link_normalizes_missing_scheme() {
    let (server, _repo) = common::make_server().await;

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "originalUrl": "  example.com/path  " }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["originalUrl"], "http://example.com/path");
}

#[tokio::test]
async fn test_create_link_accepts_destination_url_field() {
    let (server, _repo) = common::make_server().await;

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "destinationUrl": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_link_with_alias_advertises_alias() {
    let (server, _repo) = common::make_server().await;

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "originalUrl": "https://example.com", "customAlias": " promo " }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["customAlias"], "promo");
    assert_eq!(body["shortUrl"], "https://sho.rt/promo");
    assert_eq!(body["shortId"].as_str().unwrap().len(), 8);
}

#[tokio::test]
async fn test_create_link_blank_alias_is_ignored() {
    let (server, _repo) = common::make_server().await;

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "originalUrl": "https://example.com", "customAlias": "   " }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["customAlias"], Value::Null);
    assert_eq!(
        body["shortUrl"],
        format!("https://sho.rt/{}", body["shortId"].as_str().unwrap())
    );
}

#[tokio::test]
async fn test_create_link_missing_url() {
    let (server, repo) = common::make_server().await;

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "customAlias": "nourl" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_link_blank_url() {
    let (server, _repo) = common::make_server().await;

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "originalUrl": "   " }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_link_non_string_url() {
    let (server, _repo) = common::make_server().await;

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "originalUrl": 42 }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_link_malformed_body() {
    let (server, _repo) = common::make_server().await;

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .text("originalUrl=example.com")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_link_url_too_long() {
    let (server, _repo) = common::make_server().await;
    let url = format!("https://example.com/{}", "a".repeat(2048));

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "originalUrl": url }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_link_control_characters_rejected_before_storage() {
    let (server, repo) = common::make_server().await;

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "originalUrl": "example.com/a\nb", "customAlias": "nl" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    assert_eq!(repo.count().await.unwrap(), 0);

    // Nothing was stored, so the alias stays unresolvable instead of broken.
    server.get("/nl").await.assert_status_not_found();
}

#[tokio::test]
async fn test_create_link_invalid_alias() {
    let (server, _repo) = common::make_server().await;

    for alias in ["has space", "slash/alias", "api", "health"] {
        let response = server
            .post("/api/urls")
            .add_header("Authorization", common::bearer())
            .json(&json!({ "originalUrl": "https://example.com", "customAlias": alias }))
            .await;

        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_create_link_alias_conflict() {
    let (server, repo) = common::make_server().await;

    server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "originalUrl": "https://first.example", "customAlias": "taken" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "originalUrl": "https://second.example", "customAlias": "taken" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "conflict");

    // The first link keeps the alias and nothing else was stored.
    assert_eq!(repo.count().await.unwrap(), 1);
    let link = repo.find_by_alias("taken").await.unwrap().unwrap();
    assert_eq!(link.destination_url, "https://first.example");
}

#[tokio::test]
async fn test_create_link_requires_token() {
    let (server, repo) = common::make_server().await;

    let response = server
        .post("/api/urls")
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.header("www-authenticate").to_str().unwrap(),
        "Bearer"
    );
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_link_rejects_unknown_token() {
    let (server, _repo) = common::make_server().await;

    let response = server
        .post("/api/urls")
        .add_header("Authorization", "Bearer not-a-real-token")
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_short_url_falls_back_to_host_header() {
    let (state, _repo) = common::create_test_state(None).await;
    let server = TestServer::new(router(state)).unwrap();

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .add_header("Host", "s.example.com")
        .json(&json!({ "originalUrl": "https://example.com", "customAlias": "docs" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["shortUrl"], "http://s.example.com/docs");
}
