#![allow(dead_code)]

use axum_test::TestServer;
use snaplink::application::services::auth_service::hash_token;
use snaplink::domain::entities::OwnerId;
use snaplink::domain::repositories::TokenRepository;
use snaplink::infrastructure::persistence::{MemoryLinkRepository, MemoryTokenRepository};
use snaplink::routes::router;
use snaplink::state::AppState;
use std::sync::Arc;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const OWNER: &str = "alice";
pub const TOKEN: &str = "alice-test-token";

/// Builds state over in-memory stores with one active token for [`OWNER`].
pub async fn create_test_state(base_url: Option<&str>) -> (AppState, Arc<MemoryLinkRepository>) {
    let link_repo = Arc::new(MemoryLinkRepository::new());
    let token_repo = Arc::new(MemoryTokenRepository::new());

    token_repo
        .create_token(
            &OwnerId::new(OWNER),
            "test",
            &hash_token(SIGNING_SECRET, TOKEN),
        )
        .await
        .unwrap();

    let state = AppState::new(
        link_repo.clone(),
        token_repo,
        SIGNING_SECRET.to_string(),
        base_url.map(str::to_string),
    );

    (state, link_repo)
}

/// Test server over the full router, with `BASE_URL` set to `https://sho.rt`.
pub async fn make_server() -> (TestServer, Arc<MemoryLinkRepository>) {
    let (state, link_repo) = create_test_state(Some("https://sho.rt")).await;
    (TestServer::new(router(state)).unwrap(), link_repo)
}

pub fn bearer() -> String {
    format!("Bearer {TOKEN}")
}
