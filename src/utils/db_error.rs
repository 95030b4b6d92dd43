//! Classification of PostgreSQL uniqueness violations on the `links` table.

/// Constraint guarding the short id namespace.
pub const SHORT_ID_CONSTRAINT: &str = "links_short_id_key";

/// Constraint guarding the custom alias namespace.
pub const ALIAS_CONSTRAINT: &str = "links_custom_alias_key";

/// Which link namespace a failed insert collided in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkConstraint {
    ShortId,
    Alias,
}

/// Returns the violated link constraint, if `e` is a unique violation on one.
pub fn unique_violation(e: &sqlx::Error) -> Option<LinkConstraint> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    match db_err.constraint() {
        Some(SHORT_ID_CONSTRAINT) => Some(LinkConstraint::ShortId),
        Some(ALIAS_CONSTRAINT) => Some(LinkConstraint::Alias),
        _ => None,
    }
}
