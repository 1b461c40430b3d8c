//! HTTP implementation of the PTP API client.
//!
//! Provides [`HttpApiClient`], an [`ApiClient`](ptp_api::ApiClient) that
//! calls the WordPress REST plugin (`/wp-json/ptp/v1/...`) and the JWT
//! login endpoint with `reqwest`.
//!
//! # Feature Flags
//!
//! - `rustls` (default): TLS via rustls, no system OpenSSL needed

mod client;
mod error;

pub use client::{HttpApiClient, HttpClientConfig};
pub use error::HttpError;
