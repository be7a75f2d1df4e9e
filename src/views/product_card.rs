//! Product card view model.

use chrono::{DateTime, Duration, Utc};

use crate::resources::Product;
use crate::views::format::{format_price, product_order_message, whatsapp_link};

/// How long after creation a product is labelled as new.
pub const NEW_PRODUCT_WINDOW_DAYS: i64 = 30;

/// Which status badge a card may show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BadgeMode {
    /// Only the featured badge.
    Featured,
    /// Only the new badge.
    New,
    /// New, then recommended, then featured, first match wins.
    #[default]
    Full,
}

/// Status badge shown over the product image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusBadge {
    /// Created within the last [`NEW_PRODUCT_WINDOW_DAYS`] days.
    New,
    /// Recommended by the backend.
    Recommended,
    /// Promoted by the shop.
    Featured,
}

impl StatusBadge {
    /// Returns the badge text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::New => "Nouveau",
            Self::Recommended => "Recommandé",
            Self::Featured => "À la une",
        }
    }
}

/// Everything a product card renders, derived from one [`Product`].
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use showcase_storefront::resources::Product;
/// use showcase_storefront::views::{BadgeMode, ProductCardView};
///
/// let product: Product = serde_json::from_str(r#"{
///     "id": 1, "name": "Casque", "slug": "casque",
///     "price": "1000", "display_price": "800", "is_in_stock": true
/// }"#).unwrap();
///
/// let card = ProductCardView::new(&product, BadgeMode::Full, Utc::now());
/// assert_eq!(card.discount_percent, Some(20));
/// assert_eq!(card.discount_badge().as_deref(), Some("-20%"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProductCardView {
    /// Product identifier.
    pub id: u64,
    /// Product slug, used for the detail link.
    pub slug: String,
    /// Product name.
    pub name: String,
    /// Image URL, if any.
    pub image: Option<String>,
    /// Category badge text.
    pub category_label: Option<String>,
    /// Status badge, if one applies under the badge mode.
    pub status_badge: Option<StatusBadge>,
    /// Whole discount percentage, when the display price is lower.
    pub discount_percent: Option<u32>,
    /// Price to show.
    pub display_price: Option<f64>,
    /// Crossed-out price, shown only with a discount.
    pub original_price: Option<f64>,
    /// Out of stock: the overlay is shown and ordering is disabled.
    pub out_of_stock: bool,
    /// The product's own WhatsApp order link.
    pub whatsapp_link: Option<String>,
}

impl ProductCardView {
    /// Builds the card for `product` as seen at `now`.
    #[must_use]
    pub fn new(product: &Product, mode: BadgeMode, now: DateTime<Utc>) -> Self {
        let discount_percent = discount_percent(product.price, product.display_price);
        let display_price = product.display_price.or(product.price);

        Self {
            id: product.id,
            slug: product.slug.clone(),
            name: product.name.clone(),
            image: product.primary_image().map(str::to_string),
            category_label: product
                .category_name
                .clone()
                .filter(|name| !name.trim().is_empty()),
            status_badge: status_badge(product, mode, now),
            discount_percent,
            display_price,
            original_price: discount_percent.and(product.price),
            out_of_stock: !product.is_in_stock,
            whatsapp_link: product.whatsapp_link.clone().filter(|link| !link.is_empty()),
        }
    }

    /// Returns the discount badge text (e.g. `-20%`).
    #[must_use]
    pub fn discount_badge(&self) -> Option<String> {
        self.discount_percent.map(|percent| format!("-{percent}%"))
    }

    /// Returns the formatted display price.
    #[must_use]
    pub fn price_label(&self, currency: &str) -> Option<String> {
        self.display_price.map(|price| format_price(price, currency))
    }

    /// Returns the formatted crossed-out price.
    #[must_use]
    pub fn original_price_label(&self, currency: &str) -> Option<String> {
        self.original_price.map(|price| format_price(price, currency))
    }

    /// Returns the order link, or `None` when the product is out of stock.
    ///
    /// The product's own link is preferred; otherwise a link to
    /// `whatsapp_number` is built with a prefilled message.
    #[must_use]
    pub fn order_link(&self, whatsapp_number: &str, currency: &str) -> Option<String> {
        if self.out_of_stock {
            return None;
        }
        if let Some(link) = &self.whatsapp_link {
            return Some(link.clone());
        }
        let price = self.price_label(currency);
        Some(whatsapp_link(
            whatsapp_number,
            &product_order_message(&self.name, price.as_deref()),
        ))
    }
}

/// Percentage saved when `display` is below `price`, rounded to the nearest integer.
#[must_use]
pub fn discount_percent(price: Option<f64>, display: Option<f64>) -> Option<u32> {
    let (price, display) = (price?, display?);
    if price <= 0.0 || display <= 0.0 || price <= display {
        return None;
    }
    let percent = ((price - display) / price * 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = percent as u32;
    (percent > 0).then_some(percent)
}

/// Returns `true` when `product` was created within the new-product window.
#[must_use]
pub fn is_new(product: &Product, now: DateTime<Utc>) -> bool {
    product
        .created_at
        .is_some_and(|created| now - created < Duration::days(NEW_PRODUCT_WINDOW_DAYS))
}

fn status_badge(product: &Product, mode: BadgeMode, now: DateTime<Utc>) -> Option<StatusBadge> {
    let new = is_new(product, now);
    match mode {
        BadgeMode::Featured => product.is_featured.then_some(StatusBadge::Featured),
        BadgeMode::New => new.then_some(StatusBadge::New),
        BadgeMode::Full => {
            if new {
                Some(StatusBadge::New)
            } else if product.is_recommended {
                Some(StatusBadge::Recommended)
            } else if product.is_featured {
                Some(StatusBadge::Featured)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn product(value: serde_json::Value) -> Product {
        let mut base = json!({"id": 7, "name": "Casque", "slug": "casque"});
        if let (Some(base), Some(extra)) = (base.as_object_mut(), value.as_object()) {
            base.extend(extra.clone());
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn test_discount_rounds_to_nearest() {
        assert_eq!(discount_percent(Some(1000.0), Some(800.0)), Some(20));
        assert_eq!(discount_percent(Some(3000.0), Some(1999.0)), Some(33));
        assert_eq!(discount_percent(Some(800.0), Some(800.0)), None);
        assert_eq!(discount_percent(Some(800.0), Some(900.0)), None);
        assert_eq!(discount_percent(None, Some(800.0)), None);
    }

    #[test]
    fn test_display_price_falls_back_to_price() {
        let card = ProductCardView::new(&product(json!({"price": "5000"})), BadgeMode::Full, now());
        assert_eq!(card.display_price, Some(5000.0));
        assert_eq!(card.original_price, None);
        assert_eq!(card.discount_badge(), None);
    }

    #[test]
    fn test_full_mode_priority() {
        let recent = json!({
            "created_at": "2024-05-20T00:00:00Z",
            "is_recommended": true,
            "is_featured": true,
        });
        let card = ProductCardView::new(&product(recent), BadgeMode::Full, now());
        assert_eq!(card.status_badge, Some(StatusBadge::New));

        let old = json!({
            "created_at": "2023-01-01T00:00:00Z",
            "is_recommended": true,
            "is_featured": true,
        });
        let card = ProductCardView::new(&product(old), BadgeMode::Full, now());
        assert_eq!(card.status_badge, Some(StatusBadge::Recommended));
        assert_eq!(StatusBadge::Recommended.label(), "Recommandé");
    }

    #[test]
    fn test_restricted_modes() {
        let featured_old = product(json!({"is_featured": true, "created_at": "2020-01-01T00:00:00Z"}));
        assert_eq!(
            ProductCardView::new(&featured_old, BadgeMode::Featured, now()).status_badge,
            Some(StatusBadge::Featured)
        );
        assert_eq!(
            ProductCardView::new(&featured_old, BadgeMode::New, now()).status_badge,
            None
        );
    }

    #[test]
    fn test_out_of_stock_has_no_order_link() {
        let card = ProductCardView::new(
            &product(json!({"is_in_stock": false, "whatsapp_link": "https://wa.me/1"})),
            BadgeMode::Full,
            now(),
        );
        assert!(card.out_of_stock);
        assert_eq!(card.order_link("+237690000000", "FCFA"), None);
    }

    #[test]
    fn test_order_link_prefers_product_link() {
        let card = ProductCardView::new(
            &product(json!({"is_in_stock": true, "whatsapp_link": "https://wa.me/1?text=x"})),
            BadgeMode::Full,
            now(),
        );
        assert_eq!(
            card.order_link("+237690000000", "FCFA").as_deref(),
            Some("https://wa.me/1?text=x")
        );

        let card = ProductCardView::new(
            &product(json!({"is_in_stock": true, "price": 800})),
            BadgeMode::Full,
            now(),
        );
        let link = card.order_link("+237 690 000 000", "FCFA").unwrap();
        assert!(link.starts_with("https://wa.me/237690000000?text=Bonjour"));
    }
}
