//! Presentation view models.
//!
//! These types derive what a UI shell renders from backend records. They
//! hold no rendering code.
//!
//! - [`ProductCardView`]: Catalog grid cards with discount and status badges
//! - [`ProductDetailView`]: Product page with related products and order link
//! - [`Gallery`]: Image carousel with autoplay
//! - [`format_price`], [`whatsapp_link`]: Shared formatting helpers

mod format;
mod gallery;
mod product_card;
mod product_detail;

pub use format::{
    format_number, format_price, product_order_message, whatsapp_link, GROUP_SEPARATOR,
    SERVICES_CONTACT_MESSAGE,
};
pub use gallery::{Gallery, AUTOPLAY_INTERVAL};
pub use product_card::{
    discount_percent, is_new, BadgeMode, ProductCardView, StatusBadge, NEW_PRODUCT_WINDOW_DAYS,
};
pub use product_detail::{Crumb, DetailBadge, ProductDetailView, RELATED_PRODUCTS_LIMIT};
