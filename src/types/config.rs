//! Configuration Types
//!
//! WeChat OAuth client configuration types.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::RequestOptions;

/// WeChat OAuth client configuration.
#[derive(Clone)]
pub struct OAuthConfig {
    /// Application ID issued by the WeChat open platform (`appid`).
    pub app_id: String,
    /// Application secret (`secret`).
    pub app_secret: SecretString,
    /// Provider endpoint configuration.
    pub endpoints: ProviderEndpoints,
    /// HTTP timeout applied when no per-call override is given.
    pub timeout: Duration,
    /// Default request options merged into every provider call.
    pub defaults: RequestOptions,
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("app_id", &self.app_id)
            .field("app_secret", &"[REDACTED]")
            .field("endpoints", &self.endpoints)
            .field("timeout", &self.timeout)
            .field("defaults", &self.defaults)
            .finish()
    }
}

/// WeChat provider endpoint set. Defaults point at production; every URL is
/// overridable so tests can target a local mock server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderEndpoints {
    /// Authorize redirect base for the in-app (popup/redirect) variant.
    pub authorize_endpoint: String,
    /// Authorize redirect base for the website QR-login variant.
    pub website_authorize_endpoint: String,
    /// Code-exchange endpoint.
    pub access_token_endpoint: String,
    /// Token refresh endpoint.
    pub refresh_token_endpoint: String,
    /// User profile endpoint.
    pub userinfo_endpoint: String,
    /// Token introspection endpoint.
    pub verify_endpoint: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            authorize_endpoint: "https://open.weixin.qq.com/connect/oauth2/authorize".to_string(),
            website_authorize_endpoint: "https://open.weixin.qq.com/connect/qrconnect".to_string(),
            access_token_endpoint: "https://api.weixin.qq.com/sns/oauth2/access_token".to_string(),
            refresh_token_endpoint: "https://api.weixin.qq.com/sns/oauth2/refresh_token".to_string(),
            userinfo_endpoint: "https://api.weixin.qq.com/sns/userinfo".to_string(),
            verify_endpoint: "https://api.weixin.qq.com/sns/auth".to_string(),
        }
    }
}

impl ProviderEndpoints {
    /// Point every API endpoint at a single base URL, keeping the production
    /// paths. Intended for tests against a local server.
    pub fn with_api_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            authorize_endpoint: format!("{base}/connect/oauth2/authorize"),
            website_authorize_endpoint: format!("{base}/connect/qrconnect"),
            access_token_endpoint: format!("{base}/sns/oauth2/access_token"),
            refresh_token_endpoint: format!("{base}/sns/oauth2/refresh_token"),
            userinfo_endpoint: format!("{base}/sns/userinfo"),
            verify_endpoint: format!("{base}/sns/auth"),
        }
    }
}

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30000;
