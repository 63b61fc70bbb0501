//! Client configuration.
//!
//! All client behaviour is controlled through [`ClientConfig`], built via
//! [`ClientConfigBuilder`] or read from the environment with
//! [`ClientConfig::from_env`]. The only knob the service contract needs is the
//! base URL; the builder also carries a `User-Agent` override.
//!
//! There is no timeout or retry field: a hung request keeps the
//! caller's loading state active until the call settles.

use crate::error::DotOcrError;

/// Environment variable holding the service base URL.
pub const BASE_URL_ENV: &str = "DOTOCR_API_BASE_URL";

/// Base URL used when [`BASE_URL_ENV`] is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for an [`crate::client::ApiClient`].
///
/// # Example
/// ```rust
/// use dotocr_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("https://ocr.example.com/")
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url, "https://ocr.example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root, without a trailing slash. Default: `http://localhost:8000`.
    pub base_url: String,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("dotocr-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// Read the base URL from `DOTOCR_API_BASE_URL`, falling back to the default.
    pub fn from_env() -> Result<Self, DotOcrError> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                builder = builder.base_url(url);
            }
        }
        builder.build()
    }

    /// Join an endpoint path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.base_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, DotOcrError> {
        let c = &self.config;
        if c.base_url.is_empty() {
            return Err(DotOcrError::InvalidConfig("base URL must not be empty".into()));
        }
        if !c.base_url.starts_with("http://") && !c.base_url.starts_with("https://") {
            return Err(DotOcrError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got '{}'",
                c.base_url
            )));
        }
        if reqwest::Url::parse(&c.base_url).is_err() {
            return Err(DotOcrError::InvalidConfig(format!(
                "base URL is not a valid URL: '{}'",
                c.base_url
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        let c = ClientConfig::default();
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert!(c.user_agent.starts_with("dotocr-client/"));
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let c = ClientConfig::builder()
            .base_url("http://api.local:9000///")
            .build()
            .unwrap();
        assert_eq!(c.base_url, "http://api.local:9000");
        assert_eq!(c.endpoint("/api/v1/prompts/"), "http://api.local:9000/api/v1/prompts/");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ClientConfig::builder()
            .base_url("ftp://files.local")
            .build()
            .unwrap_err();
        assert!(matches!(err, DotOcrError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_empty_url() {
        assert!(ClientConfig::builder().base_url("  ").build().is_err());
    }
}
