//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, RedirectService};
use crate::domain::repositories::{LinkRepository, TokenRepository};

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
    pub auth_service: Arc<AuthService<dyn TokenRepository>>,
    /// Public base for advertised short URLs; `None` falls back to the `Host` header.
    pub base_url: Option<String>,
}

impl AppState {
    /// Wires the services on top of the given repositories.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        token_repository: Arc<dyn TokenRepository>,
        token_signing_secret: String,
        base_url: Option<String>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository.clone())),
            redirect_service: Arc::new(RedirectService::new(link_repository)),
            auth_service: Arc::new(AuthService::new(token_repository, token_signing_secret)),
            base_url,
        }
    }
}
