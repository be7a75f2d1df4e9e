//! Records mirrored from the storefront backend.
//!
//! The backend is the source of truth; these types only hold the shape of
//! the last successful fetch. Unknown fields are ignored and optional fields
//! default, so additive backend changes do not break decoding.
//!
//! - [`Category`]: Catalog categories
//! - [`Product`], [`ProductImage`], [`ProductCategory`]: Catalog products
//! - [`Service`]: Services page entries
//! - [`SiteSettings`]: Contact and company settings
//! - [`SubscribeRequest`], [`SubscribeOutcome`], [`SubscriptionStatus`]: Newsletter
//! - [`ListResponse`]: The `{count, next, previous, results}` envelope

pub mod amount;
mod category;
mod list;
mod newsletter;
mod product;
mod service;
mod site_settings;

pub use category::Category;
pub use list::ListResponse;
pub use newsletter::{ConfirmRequest, SubscribeOutcome, SubscribeRequest, SubscriptionStatus};
pub use product::{Product, ProductCategory, ProductImage};
pub use service::Service;
pub use site_settings::{SiteSettings, FALLBACK_WHATSAPP_NUMBER};
