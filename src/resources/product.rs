//! Catalog products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::resources::amount;

/// An image attached to a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Backend identifier.
    pub id: u64,
    /// Image URL.
    pub image: String,
    /// Alternative text.
    #[serde(default)]
    pub alt_text: Option<String>,
    /// Whether this is the product's main image.
    #[serde(default)]
    pub is_primary: bool,
    /// Display order.
    #[serde(default)]
    pub order: i32,
}

/// The category reference embedded in a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    /// Backend identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Depth in the hierarchy.
    #[serde(default)]
    pub level: u32,
    /// Parent category identifier.
    #[serde(default)]
    pub parent: Option<u64>,
}

/// A catalog product.
///
/// Prices are decoded leniently: decimal strings and numbers are both
/// accepted, anything else becomes `None`.
///
/// # Example
///
/// ```rust
/// use showcase_storefront::resources::Product;
///
/// let product: Product = serde_json::from_str(r#"{
///     "id": 1, "name": "Casque", "slug": "casque",
///     "price": "1000.00", "display_price": "800", "is_in_stock": true
/// }"#).unwrap();
///
/// assert_eq!(product.price, Some(1000.0));
/// assert_eq!(product.display_price, Some(800.0));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Newline separated characteristics.
    #[serde(default)]
    pub characteristics: String,
    /// Short marketing description.
    #[serde(default)]
    pub short_description: Option<String>,
    /// Base price.
    #[serde(default, deserialize_with = "amount::lenient")]
    pub price: Option<f64>,
    /// Crossed-out reference price.
    #[serde(default, deserialize_with = "amount::lenient")]
    pub compare_at_price: Option<f64>,
    /// Price shown to the customer, when it differs from `price`.
    #[serde(default, deserialize_with = "amount::lenient")]
    pub display_price: Option<f64>,
    /// Final price computed by the backend.
    #[serde(default, deserialize_with = "amount::lenient")]
    pub final_price: Option<f64>,
    /// Discount amount computed by the backend.
    #[serde(default, deserialize_with = "amount::lenient")]
    pub discount_amount: Option<f64>,
    /// Brand name; empty when unknown.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub brand: String,
    /// Main image URL.
    #[serde(default)]
    pub main_image: Option<String>,
    /// Legacy single image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// All product images.
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Embedded category reference (absent when the backend sends a bare id).
    #[serde(default, deserialize_with = "embedded_category")]
    pub category: Option<ProductCategory>,
    /// Category display name.
    #[serde(default)]
    pub category_name: Option<String>,
    /// Stock availability.
    #[serde(default, alias = "in_stock")]
    pub is_in_stock: bool,
    /// Promoted by the shop.
    #[serde(default, alias = "featured")]
    pub is_featured: bool,
    /// Recommended by the backend.
    #[serde(default)]
    pub is_recommended: bool,
    /// Whether a discount applies.
    #[serde(default)]
    pub has_discount: bool,
    /// Prefilled WhatsApp order link.
    #[serde(default)]
    pub whatsapp_link: Option<String>,
    /// Stock keeping unit.
    #[serde(default)]
    pub sku: Option<String>,
    /// Barcode.
    #[serde(default)]
    pub barcode: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes the `category` field, ignoring bare identifiers.
fn embedded_category<'de, D>(deserializer: D) -> Result<Option<ProductCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .filter(serde_json::Value::is_object)
        .and_then(|object| serde_json::from_value(object).ok()))
}

impl Product {
    /// Returns the slug of the product's category.
    ///
    /// Uses the embedded category when present, otherwise derives it from
    /// the category name (lowercased, spaces replaced by `-`).
    #[must_use]
    pub fn category_slug(&self) -> Option<String> {
        if let Some(category) = &self.category {
            return Some(category.slug.clone());
        }
        self.category_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| name.to_lowercase().replace(' ', "-"))
    }

    /// Returns the primary image URL, falling back to the legacy image field.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        let non_empty = |url: &&str| !url.is_empty();
        self.main_image
            .as_deref()
            .filter(non_empty)
            .or_else(|| self.image.as_deref().filter(non_empty))
    }

    /// Returns the non-primary gallery images in display order.
    #[must_use]
    pub fn gallery_images(&self) -> Vec<&str> {
        let mut extras: Vec<&ProductImage> =
            self.images.iter().filter(|img| !img.is_primary).collect();
        extras.sort_by_key(|img| img.order);
        extras.into_iter().map(|img| img.image.as_str()).collect()
    }

    /// Returns the non-empty, trimmed characteristic lines.
    #[must_use]
    pub fn characteristic_lines(&self) -> Vec<&str> {
        self.characteristics
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(value: serde_json::Value) -> Product {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_minimal_product_decodes_with_defaults() {
        let p = product(json!({"id": 1, "name": "Casque", "slug": "casque"}));
        assert!(!p.is_in_stock);
        assert!(p.images.is_empty());
        assert!(p.price.is_none());
        assert!(p.category_slug().is_none());
    }

    #[test]
    fn test_legacy_stock_and_featured_aliases() {
        let p = product(json!({
            "id": 1, "name": "Casque", "slug": "casque",
            "in_stock": true, "featured": true
        }));
        assert!(p.is_in_stock);
        assert!(p.is_featured);
    }

    #[test]
    fn test_category_slug_prefers_embedded_category() {
        let p = product(json!({
            "id": 1, "name": "Casque", "slug": "casque",
            "category": {"id": 3, "name": "Son & Audio", "slug": "son-audio", "level": 1},
            "category_name": "Son & Audio"
        }));
        assert_eq!(p.category_slug().as_deref(), Some("son-audio"));
    }

    #[test]
    fn test_bare_category_id_is_ignored() {
        let p = product(json!({
            "id": 1, "name": "Casque", "slug": "casque",
            "category": 7, "category_name": "Audio"
        }));
        assert!(p.category.is_none());
        assert_eq!(p.category_slug().as_deref(), Some("audio"));
    }

    #[test]
    fn test_category_slug_derived_from_name() {
        let p = product(json!({
            "id": 1, "name": "Casque", "slug": "casque",
            "category_name": "Accessoires Audio"
        }));
        assert_eq!(p.category_slug().as_deref(), Some("accessoires-audio"));
    }

    #[test]
    fn test_gallery_images_exclude_primary_and_follow_order() {
        let p = product(json!({
            "id": 1, "name": "Casque", "slug": "casque",
            "main_image": "/m.jpg",
            "images": [
                {"id": 1, "image": "/m.jpg", "is_primary": true, "order": 0},
                {"id": 2, "image": "/b.jpg", "is_primary": false, "order": 2},
                {"id": 3, "image": "/a.jpg", "is_primary": false, "order": 1}
            ]
        }));
        assert_eq!(p.gallery_images(), vec!["/a.jpg", "/b.jpg"]);
        assert_eq!(p.primary_image(), Some("/m.jpg"));
    }

    #[test]
    fn test_primary_image_falls_back_to_legacy_field() {
        let p = product(json!({
            "id": 1, "name": "Casque", "slug": "casque",
            "main_image": "", "image": "/legacy.jpg"
        }));
        assert_eq!(p.primary_image(), Some("/legacy.jpg"));

        let p = product(json!({"id": 1, "name": "Casque", "slug": "casque"}));
        assert_eq!(p.primary_image(), None);
    }

    #[test]
    fn test_characteristic_lines_skip_blank_lines() {
        let p = product(json!({
            "id": 1, "name": "Casque", "slug": "casque",
            "characteristics": "Bluetooth 5.0\n\n  30h d'autonomie  \n"
        }));
        assert_eq!(
            p.characteristic_lines(),
            vec!["Bluetooth 5.0", "30h d'autonomie"]
        );
    }
}
