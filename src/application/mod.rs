//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation and short id allocation
//! - [`services::redirect_service::RedirectService`] - Alias-first key resolution
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
