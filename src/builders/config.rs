//! Configuration Builder
//!
//! Fluent builder for the WeChat OAuth client configuration.

use secrecy::SecretString;
use std::time::Duration;

use crate::core::RequestOptions;
use crate::types::{OAuthConfig, ProviderEndpoints, DEFAULT_TIMEOUT_MS};

/// Error building an [`OAuthConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigBuildError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
}

/// WeChat OAuth configuration builder.
#[derive(Default)]
pub struct OAuthConfigBuilder {
    app_id: Option<String>,
    app_secret: Option<SecretString>,
    endpoints: Option<ProviderEndpoints>,
    timeout: Option<Duration>,
    defaults: RequestOptions,
}

impl OAuthConfigBuilder {
    /// Create new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application ID (`appid`).
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Set the application secret.
    pub fn app_secret(mut self, app_secret: impl Into<String>) -> Self {
        self.app_secret = Some(SecretString::new(app_secret.into()));
        self
    }

    /// Override the provider endpoint set (defaults to production WeChat).
    pub fn endpoints(mut self, endpoints: ProviderEndpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the default request options merged into every provider call.
    pub fn default_options(mut self, defaults: RequestOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Add one default request header.
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.headers.insert(key.into(), value.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<OAuthConfig, ConfigBuildError> {
        let app_id = self
            .app_id
            .ok_or(ConfigBuildError::MissingField { field: "app_id" })?;
        let app_secret = self
            .app_secret
            .ok_or(ConfigBuildError::MissingField { field: "app_secret" })?;

        Ok(OAuthConfig {
            app_id,
            app_secret,
            endpoints: self.endpoints.unwrap_or_default(),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_millis(DEFAULT_TIMEOUT_MS)),
            defaults: self.defaults,
        })
    }
}

/// Create a new configuration builder.
pub fn wechat_config() -> OAuthConfigBuilder {
    OAuthConfigBuilder::new()
}
