//! Repository for the `products` table.

use sqlx::PgPool;

use crate::context::QueryContext;
use crate::error::{affected, found, RepoError};
use crate::models::product::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::query::{bind_values_as, trace_statement, SetClause, WhereClause};
use crate::repositories::UpdateOutcome;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, category_id, barcode, name, measure, cost, producer_country, \
    brand_name, description, image, is_weighted, created_at, updated_at";

const ENTITY: &str = "Product";

/// Provides CRUD and filtered listing for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product under the given id, returning the created row.
    pub async fn create(
        pool: &PgPool,
        ctx: &QueryContext,
        id: &str,
        input: &CreateProduct,
    ) -> Result<Product, RepoError> {
        let query = format!(
            "INSERT INTO products
                (id, category_id, barcode, name, measure, cost, producer_country,
                 brand_name, description, image, is_weighted)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        ctx.run(async {
            sqlx::query_as::<_, Product>(&query)
                .bind(id)
                .bind(input.category_id.trim())
                .bind(&input.barcode)
                .bind(input.name.trim())
                .bind(&input.measure)
                .bind(input.cost)
                .bind(&input.producer_country)
                .bind(&input.brand_name)
                .bind(&input.description)
                .bind(&input.image)
                .bind(input.is_weighted)
                .fetch_one(pool)
                .await
                .map_err(RepoError::from)
        })
        .await
    }

    /// List products matching every present predicate of `filter`.
    pub async fn list(
        pool: &PgPool,
        ctx: &QueryContext,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, RepoError> {
        let (where_clause, args) = build_product_filter(filter).finish();
        let query = format!("SELECT {COLUMNS} FROM products {where_clause} ORDER BY id");
        trace_statement(&query, &args);

        ctx.run(async {
            bind_values_as(sqlx::query_as::<_, Product>(&query), &args)
                .fetch_all(pool)
                .await
                .map_err(RepoError::from)
        })
        .await
    }

    /// Find a product by id.
    pub async fn find_by_id(
        pool: &PgPool,
        ctx: &QueryContext,
        id: &str,
    ) -> Result<Product, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        let row = ctx
            .run(async {
                sqlx::query_as::<_, Product>(&query)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
                    .map_err(RepoError::from)
            })
            .await?;
        found(row, ENTITY, id)
    }

    /// Apply the present fields of `input` to one product.
    ///
    /// Returns [`UpdateOutcome::Unchanged`] without touching the store when
    /// `input` names no field, and `NotFound` when no row has the given id.
    pub async fn update(
        pool: &PgPool,
        ctx: &QueryContext,
        id: &str,
        input: &UpdateProduct,
    ) -> Result<UpdateOutcome<Product>, RepoError> {
        let Some(set) = build_product_set_clause(input) else {
            return Ok(UpdateOutcome::Unchanged);
        };

        let (query, args) = set.into_update("products", id, COLUMNS);
        trace_statement(&query, &args);

        let row = ctx
            .run(async {
                bind_values_as(sqlx::query_as::<_, Product>(&query), &args)
                    .fetch_optional(pool)
                    .await
                    .map_err(RepoError::from)
            })
            .await?;
        found(row, ENTITY, id).map(UpdateOutcome::Updated)
    }

    /// Delete a product by id.
    pub async fn delete(pool: &PgPool, ctx: &QueryContext, id: &str) -> Result<(), RepoError> {
        let result = ctx
            .run(async {
                sqlx::query("DELETE FROM products WHERE id = $1")
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

/// Compile the SET clause for a product patch, or `None` when the patch is
/// empty. Fields are visited in column declaration order.
pub(crate) fn build_product_set_clause(input: &UpdateProduct) -> Option<SetClause> {
    let input = input.clone();
    SetClause::new()
        .field("category_id=", input.category_id.into_write())
        .field("barcode=", input.barcode.into_write())
        .field("name=", input.name.into_write())
        .field("measure=", input.measure.into_write())
        .field("cost=", input.cost.into_write())
        .field("producer_country=", input.producer_country.into_write())
        .field("brand_name=", input.brand_name.into_write())
        .field("description=", input.description.into_write())
        .field("image=", input.image.into_write())
        .field("is_weighted=", input.is_weighted.into_write())
        .finish()
}

/// Compile the list predicates in the order `cost_gte`, `cost_lte`, `search`.
///
/// The search term is bound as a lower-cased `%term%` pattern; it never
/// becomes part of the statement text.
pub(crate) fn build_product_filter(filter: &ProductFilter) -> WhereClause {
    WhereClause::new()
        .predicate("cost >= ", filter.cost_gte)
        .predicate("cost <= ", filter.cost_lte)
        .predicate("name ILIKE ", filter.search_pattern())
}
