//! Catalog categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog category, possibly nested under a parent.
///
/// Main categories have `level == 0` and no parent.
///
/// # Example
///
/// ```rust
/// use showcase_storefront::resources::Category;
///
/// let category: Category = serde_json::from_str(r#"{
///     "id": 4, "name": "Audio", "slug": "audio", "parent": null,
///     "product_count": 12, "is_main_category": true, "level": 0
/// }"#).unwrap();
///
/// assert!(category.is_root());
/// assert_eq!(category.product_count, 12);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Backend identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// URL slug, used as the `category` filter value.
    pub slug: String,
    /// Icon name chosen in the back office.
    #[serde(default)]
    pub icon: Option<String>,
    /// Uploaded icon file URL.
    #[serde(default)]
    pub icon_file: Option<String>,
    /// Parent category identifier.
    #[serde(default)]
    pub parent: Option<u64>,
    /// Parent category name.
    #[serde(default)]
    pub parent_name: Option<String>,
    /// Nested children, when the endpoint expands them.
    #[serde(default)]
    pub children: Vec<Category>,
    /// Number of products in this category and its descendants.
    #[serde(default)]
    pub product_count: u64,
    /// Number of products attached directly to this category.
    #[serde(default)]
    pub direct_product_count: Option<u64>,
    /// Whether this is a top-level category.
    #[serde(default)]
    pub is_main_category: bool,
    /// Depth in the hierarchy (0 for main categories).
    #[serde(default)]
    pub level: Option<u32>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Returns `true` for top-level categories.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none() && self.level.unwrap_or(0) == 0
    }
}
