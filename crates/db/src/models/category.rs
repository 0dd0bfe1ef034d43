//! Category entity model, DTOs, and the one-level tree response.

use catalog_core::patch::Patch;
use catalog_core::types::{EntityId, Timestamp};
use catalog_core::validation::{not_blank, patch_not_blank, patch_reference};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Category {
    pub id: EntityId,
    pub name: Option<String>,
    pub parent_id: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category together with its direct children.
///
/// Children are plain [`Category`] rows, so the nesting is exactly one level
/// deep by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTree {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
}

impl CategoryTree {
    /// Attach `children` to `category`, ordered by id.
    ///
    /// Rows whose `parent_id` does not point at `category` are dropped.
    pub fn assemble(category: Category, children: Vec<Category>) -> Self {
        let mut children: Vec<Category> = children
            .into_iter()
            .filter(|c| c.parent_id.as_deref() == Some(category.id.as_str()))
            .collect();
        children.sort_by(|a, b| a.id.cmp(&b.id));
        Self { category, children }
    }
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// Omitted, `null`, or empty means a root category.
    #[serde(default)]
    pub parent_id: Option<EntityId>,
}

impl CreateCategory {
    /// The parent reference with empty strings folded into "no parent".
    pub fn parent_ref(&self) -> Option<&str> {
        self.parent_id
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// DTO for partially updating a category.
///
/// `parent_id: null` moves the category to the root.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategory {
    #[serde(default)]
    #[validate(custom(function = "patch_not_blank"))]
    pub name: Patch<String>,
    #[serde(default)]
    #[validate(custom(function = "patch_reference"))]
    pub parent_id: Patch<EntityId>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn row(id: &str, parent_id: Option<&str>) -> Category {
        let now = Utc::now();
        Category {
            id: id.to_string(),
            name: Some(format!("name-{id}")),
            parent_id: parent_id.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn assemble_orders_children_by_id() {
        let tree = CategoryTree::assemble(
            row("root", None),
            vec![row("b", Some("root")), row("a", Some("root"))],
        );
        let ids: Vec<&str> = tree.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(tree.category.id, "root");
    }

    #[test]
    fn assemble_with_no_children_is_empty_not_error() {
        let tree = CategoryTree::assemble(row("leaf", Some("root")), Vec::new());
        assert!(tree.children.is_empty());
    }

    #[test]
    fn assemble_drops_rows_of_other_parents() {
        let tree = CategoryTree::assemble(
            row("root", None),
            vec![row("a", Some("root")), row("x", Some("elsewhere"))],
        );
        assert_eq!(tree.children.len(), 1);
    }

    #[test]
    fn tree_serializes_flat_with_children() {
        let tree = CategoryTree::assemble(row("root", None), vec![row("a", Some("root"))]);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["id"], "root");
        assert_eq!(json["children"][0]["id"], "a");
        assert_eq!(json["children"][0]["parent_id"], "root");
        assert!(json["children"][0].get("children").is_none());
    }

    #[test]
    fn create_parent_ref_folds_empty_to_none() {
        let dto = CreateCategory {
            name: "Dairy".into(),
            parent_id: Some("  ".into()),
        };
        assert_eq!(dto.parent_ref(), None);
    }

    #[test]
    fn create_requires_non_blank_name() {
        let dto = CreateCategory {
            name: " ".into(),
            parent_id: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn update_rejects_cleared_name_but_allows_cleared_parent() {
        let dto: UpdateCategory = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(dto.validate().is_err());

        let dto: UpdateCategory = serde_json::from_str(r#"{"parent_id": null}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.parent_id, Patch::Clear);
    }
}
