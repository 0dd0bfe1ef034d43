//! Repository error type and the helpers that normalize "no matching row".
//!
//! Every repository operation resolves to success, [`RepoError::NotFound`],
//! or one of the internal variants. Callers branch on [`RepoError::kind`].

use catalog_core::types::EntityId;
use sqlx::postgres::PgQueryResult;

/// Why a store operation was abandoned before it completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The caller's cancellation token fired.
    Cancelled,
    /// The caller's deadline passed.
    DeadlineExceeded,
}

impl std::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CancelReason::Cancelled => f.write_str("cancelled"),
            CancelReason::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{entity} with id {id} not found")]
    NotFound {
        entity: &'static str,
        id: EntityId,
    },

    #[error("Store operation {0}")]
    Cancelled(CancelReason),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Coarse classification of a [`RepoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Internal,
}

impl RepoError {
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        RepoError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RepoError::NotFound { .. } => ErrorKind::NotFound,
            RepoError::Cancelled(_) | RepoError::Database(_) => ErrorKind::Internal,
        }
    }
}

/// Map an optional row to `NotFound` when absent.
pub fn found<T>(row: Option<T>, entity: &'static str, id: &str) -> Result<T, RepoError> {
    row.ok_or_else(|| RepoError::not_found(entity, id))
}

/// Map a mutating statement that touched zero rows to `NotFound`.
pub fn affected(result: PgQueryResult, entity: &'static str, id: &str) -> Result<(), RepoError> {
    if result.rows_affected() == 0 {
        return Err(RepoError::not_found(entity, id));
    }
    Ok(())
}
