use thiserror::Error;

/// Typed outcomes of store operations. Authorization and invariant
/// failures are distinct variants so callers can map them to the right
/// HTTP status instead of pattern-matching message strings.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("cannot demote the last admin")]
    LastAdminProtected,

    #[error("database lock poisoned")]
    Poisoned,

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
