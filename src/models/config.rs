//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u64 {
    crate::pagination::DEFAULT_ITEMS_PER_PAGE
}

#[derive(Clone, Debug, Deserialize)]
/// Settings of the backend connection shared by every page service.
pub struct ClientConfig {
    /// Base URL of the REST backend, e.g. `https://api.example.com/api`.
    pub api_base_url: String,
    /// Bearer token forwarded with every request when present.
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

#[cfg(feature = "client")]
impl ClientConfig {
    /// Layers `{dir}/default`, the optional `{dir}/{app_env}` profile and
    /// `APP_*` environment variables, in that order.
    pub fn load(config_dir: &std::path::Path, app_env: &str) -> Result<Self, config::ConfigError> {
        let default_file = config_dir.join("default");
        let profile_file = config_dir.join(app_env);

        config::Config::builder()
            .add_source(config::File::from(default_file))
            .add_source(config::File::from(profile_file).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
