//! Storefront REST API plumbing

mod client;

pub(crate) use client::decode;
pub use client::{ApiClient, ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
