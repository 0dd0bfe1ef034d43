//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::types::{new_entity_id, EntityId};
use catalog_db::models::category::{Category, CategoryTree, CreateCategory, UpdateCategory};
use catalog_db::repositories::{CategoryRepo, UpdateOutcome};
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    input.validate()?;

    let ctx = state.query_ctx();
    let category = CategoryRepo::create(&state.pool, &ctx, &new_entity_id(), &input).await?;

    tracing::info!(
        category_id = %category.id,
        parent_id = ?category.parent_id,
        "Category created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let ctx = state.query_ctx();
    let categories = CategoryRepo::list(&state.pool, &ctx).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
///
/// Returns the category with its direct children nested one level deep.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<DataResponse<CategoryTree>>> {
    let ctx = state.query_ctx();
    let tree = CategoryRepo::find_with_children(&state.pool, &ctx, &id).await?;
    Ok(Json(DataResponse { data: tree }))
}

/// PUT / PATCH /api/v1/categories/{id}
///
/// An empty body changes nothing and returns the current row.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    input.validate()?;
    if input.parent_id.as_set().map(|p| p.trim()) == Some(id.as_str()) {
        return Err(CoreError::Validation(
            "parent_id: a category cannot be its own parent".into(),
        )
        .into());
    }

    let ctx = state.query_ctx();
    let category = match CategoryRepo::update(&state.pool, &ctx, &id, &input).await? {
        UpdateOutcome::Updated(category) => {
            tracing::info!(category_id = %category.id, "Category updated");
            category
        }
        UpdateOutcome::Unchanged => CategoryRepo::find_by_id(&state.pool, &ctx, &id).await?,
    };

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Children of the deleted category become roots.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let ctx = state.query_ctx();
    CategoryRepo::delete(&state.pool, &ctx, &id).await?;

    tracing::info!(category_id = %id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
