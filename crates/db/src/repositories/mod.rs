//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` and the caller's `&QueryContext` as the first
//! arguments. Every store call runs under the context, so it can be
//! cancelled or time out.

pub mod category_repo;
pub mod product_repo;

pub use category_repo::CategoryRepo;
pub use product_repo::ProductRepo;

/// Result of a partial update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome<T> {
    /// The row was rewritten; carries the row as stored.
    Updated(T),
    /// The patch named no fields, so no statement was executed.
    Unchanged,
}

impl<T> UpdateOutcome<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, UpdateOutcome::Unchanged)
    }

    pub fn updated(self) -> Option<T> {
        match self {
            UpdateOutcome::Updated(row) => Some(row),
            UpdateOutcome::Unchanged => None,
        }
    }
}
