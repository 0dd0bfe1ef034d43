//! Root-level readiness check for the catalog.
//!
//! Reports whether the database answers and whether the `categories` and
//! `products` tables exist. Anything short of that is a 503 so load
//! balancers stop routing catalog traffic here.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use catalog_db::SchemaStatus;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, `degraded` (schema incomplete) or `unavailable` (no database).
    pub status: &'static str,
    pub version: &'static str,
    /// Table presence; `null` when the database could not be queried.
    pub schema: Option<SchemaStatus>,
}

/// GET /health
async fn catalog_health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let ctx = state.query_ctx();

    let (code, status, schema) = match catalog_db::schema_status(&state.pool, &ctx).await {
        Ok(schema) if schema.is_ready() => (StatusCode::OK, "ok", Some(schema)),
        Ok(schema) => {
            tracing::warn!(?schema, "Catalog tables missing");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", Some(schema))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Catalog database unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable", None)
        }
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        schema,
    };
    (code, Json(body))
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(catalog_health))
}
