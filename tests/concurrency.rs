mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use snaplink::application::services::LinkService;
use snaplink::domain::entities::OwnerId;
use snaplink::domain::repositories::LinkRepository;
use snaplink::error::AppError;
use snaplink::infrastructure::persistence::MemoryLinkRepository;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_creations_get_distinct_short_ids() {
    let repo = Arc::new(MemoryLinkRepository::new());
    let service = Arc::new(LinkService::new(repo.clone()));

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_link(
                        OwnerId::new("alice"),
                        &format!("https://example.com/{i}"),
                        None,
                    )
                    .await
            })
        })
        .collect();

    let mut short_ids = HashSet::new();
    for handle in handles {
        let link = handle.await.unwrap().unwrap();
        assert!(short_ids.insert(link.short_id));
    }

    assert_eq!(short_ids.len(), 64);
    assert_eq!(repo.count().await.unwrap(), 64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_same_alias_has_single_winner() {
    let repo = Arc::new(MemoryLinkRepository::new());
    let service = Arc::new(LinkService::new(repo.clone()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_link(
                        OwnerId::new(format!("owner-{i}")),
                        &format!("https://example.com/{i}"),
                        Some("contested"),
                    )
                    .await
            })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(link) => {
                winners += 1;
                assert_eq!(link.custom_alias.as_deref(), Some("contested"));
            }
            Err(e) => assert!(matches!(e, AppError::Conflict { .. })),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_alias_requests_over_http() {
    let (server, repo) = common::make_server().await;

    let request = |url: &'static str| {
        let server = &server;
        async move {
            server
                .post("/api/urls")
                .add_header("Authorization", common::bearer())
                .json(&json!({ "originalUrl": url, "customAlias": "launch" }))
                .await
        }
    };

    let (first, second) = tokio::join!(
        request("https://first.example"),
        request("https://second.example")
    );

    let statuses = [first.status_code(), second.status_code()];
    assert!(statuses.contains(&StatusCode::CREATED));
    assert!(statuses.contains(&StatusCode::CONFLICT));

    let winner = if first.status_code() == StatusCode::CREATED {
        first
    } else {
        second
    };
    let stored = repo.find_by_alias("launch").await.unwrap().unwrap();
    assert_eq!(winner.json::<Value>()["originalUrl"], stored.destination_url);
    assert_eq!(repo.count().await.unwrap(), 1);
}
