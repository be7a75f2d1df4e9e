//! Storefront resource operations.
//!
//! [`StorefrontApi`] wraps the [`HttpClient`](crate::clients::HttpClient) with
//! one method per backend resource, decoding bodies into the records of
//! [`resources`](crate::resources) and caching reads according to a
//! [`CachePolicy`].

mod cache;
mod client;
mod errors;

pub use cache::{CachePolicy, QueryCache, MAX_CACHE_ENTRIES};
pub use client::{StorefrontApi, DEFAULT_CONFIRM_MESSAGE, DEFAULT_SUBSCRIBE_MESSAGE};
pub use errors::ApiError;
