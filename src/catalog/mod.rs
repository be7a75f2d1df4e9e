//! Catalog browsing.
//!
//! - [`CatalogFilters`]: The visitor's filters and their URL form
//! - [`ProductQuery`]: Parameters of the product listing endpoint
//! - [`CatalogBrowser`]: Page accumulation and stale response suppression

mod browser;
mod filters;
mod query;

pub use browser::{BrowserEffect, CatalogBrowser, LoadState, PageRequest};
pub use filters::CatalogFilters;
pub use query::ProductQuery;
