//! Handlers for the `/products` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::types::{new_entity_id, EntityId};
use catalog_db::models::product::{CreateProduct, Product, ProductFilter, UpdateProduct};
use catalog_db::repositories::{ProductRepo, UpdateOutcome};
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/products
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<Product>>)> {
    input.validate()?;

    let ctx = state.query_ctx();
    let product = ProductRepo::create(&state.pool, &ctx, &new_entity_id(), &input).await?;

    tracing::info!(
        product_id = %product.id,
        category_id = ?product.category_id,
        "Product created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /api/v1/products?cost_gte=&cost_lte=&search=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let ctx = state.query_ctx();
    let products = ProductRepo::list(&state.pool, &ctx, &filter).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<DataResponse<Product>>> {
    let ctx = state.query_ctx();
    let product = ProductRepo::find_by_id(&state.pool, &ctx, &id).await?;
    Ok(Json(DataResponse { data: product }))
}

/// PUT / PATCH /api/v1/products/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<DataResponse<Product>>> {
    input.validate()?;

    let ctx = state.query_ctx();
    let product = match ProductRepo::update(&state.pool, &ctx, &id, &input).await? {
        UpdateOutcome::Updated(product) => {
            tracing::info!(product_id = %product.id, "Product updated");
            product
        }
        UpdateOutcome::Unchanged => ProductRepo::find_by_id(&state.pool, &ctx, &id).await?,
    };

    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let ctx = state.query_ctx();
    ProductRepo::delete(&state.pool, &ctx, &id).await?;

    tracing::info!(product_id = %id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}
