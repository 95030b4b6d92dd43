//! Utility functions shared across layers.
//!
//! - [`short_id`] - Short id generation and alias validation
//! - [`url_normalizer`] - Destination URL normalization
//! - [`db_error`] - PostgreSQL uniqueness violation classification

pub mod db_error;
pub mod short_id;
pub mod url_normalizer;
