//! Repository for the `categories` table.

use sqlx::PgPool;

use crate::context::QueryContext;
use crate::error::{affected, found, RepoError};
use crate::models::category::{Category, CategoryTree, CreateCategory, UpdateCategory};
use crate::query::{bind_values_as, trace_statement, SetClause};
use crate::repositories::UpdateOutcome;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, parent_id, created_at, updated_at";

const ENTITY: &str = "Category";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category under the given id, returning the created row.
    pub async fn create(
        pool: &PgPool,
        ctx: &QueryContext,
        id: &str,
        input: &CreateCategory,
    ) -> Result<Category, RepoError> {
        let query = format!(
            "INSERT INTO categories (id, name, parent_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        ctx.run(async {
            sqlx::query_as::<_, Category>(&query)
                .bind(id)
                .bind(input.name.trim())
                .bind(input.parent_ref())
                .fetch_one(pool)
                .await
                .map_err(RepoError::from)
        })
        .await
    }

    /// List all categories ordered by id. Children are never attached here.
    pub async fn list(pool: &PgPool, ctx: &QueryContext) -> Result<Vec<Category>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY id");
        ctx.run(async {
            sqlx::query_as::<_, Category>(&query)
                .fetch_all(pool)
                .await
                .map_err(RepoError::from)
        })
        .await
    }

    /// Find a category by id.
    pub async fn find_by_id(
        pool: &PgPool,
        ctx: &QueryContext,
        id: &str,
    ) -> Result<Category, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let row = ctx
            .run(async {
                sqlx::query_as::<_, Category>(&query)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
                    .map_err(RepoError::from)
            })
            .await?;
        found(row, ENTITY, id)
    }

    /// Direct children of a category, ordered by id. Unknown ids yield an
    /// empty list.
    pub async fn find_children(
        pool: &PgPool,
        ctx: &QueryContext,
        id: &str,
    ) -> Result<Vec<Category>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE parent_id = $1 ORDER BY id");
        ctx.run(async {
            sqlx::query_as::<_, Category>(&query)
                .bind(id)
                .fetch_all(pool)
                .await
                .map_err(RepoError::from)
        })
        .await
    }

    /// Find a category and attach its direct children.
    ///
    /// Two separate reads, not one snapshot: a child inserted or removed
    /// between them may be missed or still returned.
    pub async fn find_with_children(
        pool: &PgPool,
        ctx: &QueryContext,
        id: &str,
    ) -> Result<CategoryTree, RepoError> {
        let category = Self::find_by_id(pool, ctx, id).await?;
        let children = Self::find_children(pool, ctx, id).await?;
        Ok(CategoryTree::assemble(category, children))
    }

    /// Apply the present fields of `input` to one category.
    ///
    /// Returns [`UpdateOutcome::Unchanged`] without touching the store when
    /// `input` names no field, and `NotFound` when no row has the given id.
    pub async fn update(
        pool: &PgPool,
        ctx: &QueryContext,
        id: &str,
        input: &UpdateCategory,
    ) -> Result<UpdateOutcome<Category>, RepoError> {
        let Some(set) = build_category_set_clause(input) else {
            return Ok(UpdateOutcome::Unchanged);
        };

        let (query, args) = set.into_update("categories", id, COLUMNS);
        trace_statement(&query, &args);

        let row = ctx
            .run(async {
                bind_values_as(sqlx::query_as::<_, Category>(&query), &args)
                    .fetch_optional(pool)
                    .await
                    .map_err(RepoError::from)
            })
            .await?;
        found(row, ENTITY, id).map(UpdateOutcome::Updated)
    }

    /// Delete a category by id. Children are detached by the
    /// `ON DELETE SET NULL` reference, not removed.
    pub async fn delete(pool: &PgPool, ctx: &QueryContext, id: &str) -> Result<(), RepoError> {
        let result = ctx
            .run(async {
                sqlx::query("DELETE FROM categories WHERE id = $1")
                    .bind(id)
                    .execute(pool)
                    .await
                    .map_err(RepoError::from)
            })
            .await?;
        affected(result, ENTITY, id)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Compile the SET clause for a category patch, or `None` when the patch is
/// empty. Field order: `name`, `parent_id`.
pub(crate) fn build_category_set_clause(input: &UpdateCategory) -> Option<SetClause> {
    SetClause::new()
        .field("name=", input.name.clone().into_write())
        .field("parent_id=", input.parent_id.clone().into_write())
        .finish()
}
