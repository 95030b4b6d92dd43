//! Core domain entities.
//!
//! - [`Link`] - A persisted short link
//! - [`NewLink`] - Input for creating a link
//! - [`OwnerId`] - Opaque reference to the link's creator

pub mod link;
pub mod owner;

pub use link::{Link, NewLink};
pub use owner::OwnerId;
