//! HTTP request handlers for API endpoints.

pub mod health;
pub mod links;
pub mod redirect;

pub use health::{health_handler, status_handler};
pub use links::create_link_handler;
pub use redirect::redirect_handler;
