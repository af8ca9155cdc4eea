//! Client library of the school health portal: typed access to the REST
//! backend, response normalization, multi-step forms and page services.

pub mod api;
pub mod domain;
pub mod dto;
pub mod envelope;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod services;
pub mod transport;

#[cfg(feature = "client")]
pub use client::connect;

#[cfg(feature = "client")]
mod client {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::api::ApiClient;
    use crate::api::errors::ApiResult;
    use crate::models::config::ClientConfig;
    use crate::transport::{HttpTransport, NoAuth, StaticToken, TokenSource};

    /// Builds an [`ApiClient`] talking HTTP to the configured backend.
    pub fn connect(config: &ClientConfig) -> ApiResult<ApiClient> {
        let token_source: Arc<dyn TokenSource> = match config
            .api_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            Some(token) => Arc::new(StaticToken::new(token)),
            None => Arc::new(NoAuth),
        };

        let transport = HttpTransport::new(
            config.api_base_url.as_str(),
            token_source,
            Duration::from_secs(config.timeout_secs.max(1)),
        )?;
        log::info!("Using backend at {}", transport.base_url());

        Ok(ApiClient::new(Arc::new(transport)).with_page_size(config.page_size))
    }
}
