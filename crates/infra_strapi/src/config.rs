//! Strapi connection settings

use std::time::Duration;

/// Configuration options for the Strapi client
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use infra_strapi::StrapiConfig;
///
/// let config = StrapiConfig::new("https://cms.example.com")
///     .timeout(Duration::from_secs(10))
///     .page_size(50);
/// assert_eq!(config.page_size, 50);
/// ```
#[derive(Debug, Clone)]
pub struct StrapiConfig {
    /// Origin of the CMS, without the `/api` suffix
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Page size used when walking paginated collections
    pub page_size: u32,
}

impl StrapiConfig {
    /// Creates a configuration with a 30 second timeout and pages of 100
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
            page_size: 100,
        }
    }

    /// Sets the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the pagination page size; values below 1 are raised to 1
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

impl Default for StrapiConfig {
    fn default() -> Self {
        Self::new("http://localhost:1337")
    }
}
