//! # Showcase Storefront
//!
//! A headless client library for the customer-facing side of a catalog
//! storefront: product browsing with filters, product pages, newsletter
//! signup and WhatsApp-based ordering, all backed by a REST API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`StorefrontConfig`] and [`StorefrontConfigBuilder`]
//! - An async HTTP client with retry and backoff in [`clients`]
//! - Typed backend records in [`resources`]
//! - One method per backend resource on [`StorefrontApi`], with a staleness cache
//! - Catalog browsing state (filters in the URL, page accumulation) in [`catalog`]
//! - Product card, product page and gallery view models in [`views`]
//! - The newsletter subscription flow with status polling in [`newsletter`]
//!
//! ## Quick Start
//!
//! ```rust
//! use showcase_storefront::{ApiBaseUrl, StorefrontConfig};
//!
//! let config = StorefrontConfig::builder()
//!     .api_base_url(ApiBaseUrl::new("https://shop.example.com/api/v1").unwrap())
//!     .user_agent_prefix("vitrine-web")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.newsletter_source(), "page");
//! ```
//!
//! ## Browsing the Catalog
//!
//! ```rust,ignore
//! use showcase_storefront::{StorefrontApi, StorefrontConfig};
//! use showcase_storefront::catalog::{BrowserEffect, CatalogBrowser};
//!
//! let api = StorefrontApi::new(&config)?;
//! let mut browser = CatalogBrowser::from_url("category=audio&in_stock=true");
//! browser.refresh(&api).await?;
//!
//! for effect in browser.toggle_brand("Sony") {
//!     match effect {
//!         BrowserEffect::SyncUrl(query) => history.replace(&query),
//!         BrowserEffect::ScrollToTop => window.scroll_to_top(),
//!     }
//! }
//! browser.refresh(&api).await?;
//! ```
//!
//! ## Product Pages
//!
//! ```rust,ignore
//! use showcase_storefront::views::ProductDetailView;
//!
//! let settings = api.site_settings().await.unwrap_or_default();
//! let page = ProductDetailView::load(&api, "casque-bluetooth").await?;
//! let order = page.order_link(settings.whatsapp_number_or_fallback(), config.currency_label());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Configuration newtypes validate on construction
//! - **Thread-safe**: Clients are `Send + Sync` and cheap to clone
//! - **Async-first**: Designed for use with the Tokio runtime
//! - **No rendering**: View models describe what to show, never how

pub mod api;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod newsletter;
pub mod resources;
pub mod views;

// Re-export public types at crate root for convenience
pub use config::{ApiBaseUrl, StorefrontConfig, StorefrontConfigBuilder};
pub use error::ConfigError;

pub use api::{ApiError, CachePolicy, QueryCache, StorefrontApi};

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
