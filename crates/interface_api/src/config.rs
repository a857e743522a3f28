//! API configuration

use std::time::Duration;

use serde::Deserialize;

use infra_strapi::StrapiConfig;

/// API configuration
///
/// Read from `API_*` environment variables; anything unset keeps the value
/// from [`ApiConfig::default`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Origin of the Strapi CMS
    pub strapi_url: String,
    /// Per-request timeout towards the CMS, in seconds
    pub strapi_timeout_secs: u64,
    /// Page size used when walking CMS collections
    pub strapi_page_size: u32,
    /// Log level
    pub log_level: String,
    /// `pretty` or `json`
    pub log_format: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            strapi_url: "http://localhost:1337".to_string(),
            strapi_timeout_secs: 30,
            strapi_page_size: 100,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("strapi_url", defaults.strapi_url)?
            .set_default("strapi_timeout_secs", defaults.strapi_timeout_secs as i64)?
            .set_default("strapi_page_size", i64::from(defaults.strapi_page_size))?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", defaults.log_format)?
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether logs should be emitted as JSON lines
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Connection settings for the CMS client
    pub fn strapi(&self) -> StrapiConfig {
        StrapiConfig::new(self.strapi_url.clone())
            .timeout(Duration::from_secs(self.strapi_timeout_secs))
            .page_size(self.strapi_page_size)
    }
}
