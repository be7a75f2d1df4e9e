//! HTTP client types for storefront backend communication.
//!
//! This module provides the transport layer: request building and
//! validation, response parsing, and retry logic.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client
//! - [`HttpRequest`]: A request to be sent to the backend
//! - [`HttpResponse`]: A parsed response
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST)
//! - [`DataType`]: Content types for request bodies
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After`, or exponential backoff if absent.
//!   A `Retry-After` longer than [`MAX_RETRY_DELAY`] ends the retries.
//! - **5xx (Server Error)**: Retries with exponential backoff from the configured base delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` on a bare [`HttpRequest`] is 1. The higher level
//! [`crate::api::StorefrontApi`] uses the configured value (3 by default).

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, MAX_RETRY_DELAY, SDK_VERSION};
pub use http_request::{encode_query, DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
