//! Product entity model, DTOs, and list filters.

use catalog_core::patch::Patch;
use catalog_core::types::{EntityId, Timestamp};
use catalog_core::validation::{not_blank, patch_not_blank};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `products` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Product {
    pub id: EntityId,
    pub category_id: Option<EntityId>,
    pub barcode: Option<String>,
    pub name: Option<String>,
    pub measure: Option<String>,
    pub cost: Option<i32>,
    pub producer_country: Option<String>,
    pub brand_name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_weighted: Option<bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(custom(function = "not_blank"))]
    pub category_id: EntityId,
    pub barcode: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub measure: Option<String>,
    pub cost: Option<i32>,
    pub producer_country: Option<String>,
    pub brand_name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_weighted: Option<bool>,
}

/// DTO for partially updating a product. Fields are applied in declaration
/// order; `null` clears a nullable attribute.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProduct {
    #[serde(default)]
    #[validate(custom(function = "patch_not_blank"))]
    pub category_id: Patch<EntityId>,
    #[serde(default)]
    pub barcode: Patch<String>,
    #[serde(default)]
    #[validate(custom(function = "patch_not_blank"))]
    pub name: Patch<String>,
    #[serde(default)]
    pub measure: Patch<String>,
    #[serde(default)]
    pub cost: Patch<i32>,
    #[serde(default)]
    pub producer_country: Patch<String>,
    #[serde(default)]
    pub brand_name: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub image: Patch<String>,
    #[serde(default)]
    pub is_weighted: Patch<bool>,
}

/// Query parameters for `GET /products` (`?cost_gte=&cost_lte=&search=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cost_gte: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cost_lte: Option<i32>,
    /// Case-insensitive substring of `name`. Empty means unconstrained.
    pub search: Option<String>,
}

impl ProductFilter {
    /// The search term as it is bound: lower-cased, LIKE metacharacters
    /// escaped, and wrapped in `%`.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(&s.to_lowercase())))
    }
}

/// Backslash-escape `\`, `%` and `_` so they match literally under `ILIKE`.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Query strings send `?cost_gte=` for an untouched form field; treat it as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
