//! Persistence layer for the catalog: row models, clause compilation,
//! store-error normalization, and the category/product repositories.

pub mod context;
pub mod error;
pub mod models;
pub mod query;
pub mod repositories;

use serde::Serialize;
use sqlx::postgres::PgPoolOptions;

pub use context::QueryContext;
pub use error::{ErrorKind, RepoError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Presence of the catalog tables, as seen by the connected role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct SchemaStatus {
    pub categories: bool,
    pub products: bool,
}

impl SchemaStatus {
    pub fn is_ready(&self) -> bool {
        self.categories && self.products
    }
}

/// Report which catalog tables exist. Fails only when the database
/// cannot be queried at all.
pub async fn schema_status(pool: &DbPool, ctx: &QueryContext) -> Result<SchemaStatus, RepoError> {
    ctx.run(async {
        sqlx::query_as::<_, SchemaStatus>(
            "SELECT to_regclass('categories') IS NOT NULL AS categories,
                    to_regclass('products') IS NOT NULL AS products",
        )
        .fetch_one(pool)
        .await
        .map_err(RepoError::from)
    })
    .await
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
