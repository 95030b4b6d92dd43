//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL link registry
//! - [`PgTokenRepository`] - PostgreSQL API token storage
//! - [`MemoryLinkRepository`] / [`MemoryTokenRepository`] - In-process stores
//!   with the same uniqueness guarantees, used by tests

pub mod memory;
pub mod pg_link_repository;
pub mod pg_token_repository;

pub use memory::{MemoryLinkRepository, MemoryTokenRepository};
pub use pg_link_repository::PgLinkRepository;
pub use pg_token_repository::PgTokenRepository;
