//! API Config

use std::time::Duration;

use clap::Args;
use storefront_app::api::{ClientConfig, DEFAULT_API_URL};

/// Storefront REST API connection settings.
#[derive(Debug, Args)]
pub(crate) struct ApiConfig {
    /// REST API base URL
    #[arg(long, global = true, env = "STOREFRONT_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "STOREFRONT_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub timeout_seconds: u64,
}

impl ApiConfig {
    pub(crate) fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}
