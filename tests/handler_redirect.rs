mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use snaplink::domain::entities::{NewLink, OwnerId};
use snaplink::domain::repositories::LinkRepository;
use snaplink::routes::app_router;
use tower::ServiceExt;

fn new_link(short_id: &str, url: &str, alias: Option<&str>) -> NewLink {
    NewLink {
        owner: OwnerId::new(common::OWNER),
        destination_url: url.to_string(),
        short_id: short_id.to_string(),
        custom_alias: alias.map(str::to_string),
    }
}

#[tokio::test]
async fn test_redirect_by_short_id() {
    let (server, repo) = common::make_server().await;
    repo.create(new_link("abcd1234", "https://example.com/a", None))
        .await
        .unwrap();

    let response = server.get("/abcd1234").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://example.com/a"
    );
}

#[tokio::test]
async fn test_redirect_by_alias() {
    let (server, repo) = common::make_server().await;
    repo.create(new_link("abcd1234", "https://example.com/a", Some("promo")))
        .await
        .unwrap();

    let response = server.get("/promo").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://example.com/a"
    );

    // The generated id keeps working alongside the alias.
    server
        .get("/abcd1234")
        .await
        .assert_status(StatusCode::FOUND);
}

#[tokio::test]
async fn test_alias_takes_precedence_over_short_id() {
    let (server, repo) = common::make_server().await;
    repo.create(new_link("shadowed", "https://by-short-id.example", None))
        .await
        .unwrap();
    repo.create(new_link("zzzz9999", "https://by-alias.example", Some("shadowed")))
        .await
        .unwrap();

    let response = server.get("/shadowed").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://by-alias.example"
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, _repo) = common::make_server().await;

    let response = server.get("/missing1").await;

    response.assert_status_not_found();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "Short URL not found");
}

#[tokio::test]
async fn test_redirect_is_case_sensitive() {
    let (server, repo) = common::make_server().await;
    repo.create(new_link("AbCd1234", "https://example.com", None))
        .await
        .unwrap();

    server.get("/abcd1234").await.assert_status_not_found();
    server.get("/AbCd1234").await.assert_status(StatusCode::FOUND);
}

#[tokio::test]
async fn test_create_then_redirect_round_trip() {
    let (server, _repo) = common::make_server().await;

    let created = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "originalUrl": "example.com/landing" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let short_id = created.json::<Value>()["shortId"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server.get(&format!("/{short_id}")).await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "http://example.com/landing"
    );
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let (state, repo) = common::create_test_state(Some("https://sho.rt")).await;
    repo.create(new_link("abcd1234", "https://example.com/a", Some("promo")))
        .await
        .unwrap();
    let app = app_router(state);

    for uri in ["/abcd1234/", "/promo/"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND, "{uri}");
        assert_eq!(
            response.headers()[header::LOCATION].to_str().unwrap(),
            "https://example.com/a"
        );
    }

    let response = app
        .oneshot(Request::builder().uri("/health/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
