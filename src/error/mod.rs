//! Error Types
//!
//! Error hierarchy for the WeChat OAuth client.

use std::time::Duration;
use thiserror::Error;

/// Root error type for WeChat OAuth operations.
#[derive(Error, Debug)]
pub enum OAuthError {
    /// No cached token exists for the openid. The user must complete web
    /// authorization before any authenticated call can succeed.
    #[error("no token cached for `{openid}`, please authorize first")]
    NoToken { openid: String },

    /// The cached token is expired and carries no refresh token, so it
    /// cannot be renewed without a new authorization round trip.
    #[error("token for `{openid}` is expired and no refresh token is cached")]
    RefreshUnavailable { openid: String },

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl OAuthError {
    /// Short error code for logging and telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoToken { .. } => "WECHAT_NO_TOKEN",
            Self::RefreshUnavailable { .. } => "WECHAT_REFRESH_UNAVAILABLE",
            Self::Provider(_) => "WECHAT_PROVIDER",
            Self::Transport(_) => "WECHAT_TRANSPORT",
            Self::Storage(_) => "WECHAT_STORAGE",
        }
    }

    /// Check if the error requires the user to re-authorize.
    pub fn needs_reauth(&self) -> bool {
        matches!(self, Self::NoToken { .. } | Self::RefreshUnavailable { .. })
    }
}

/// Business-level failure reported by the provider: any response body carrying
/// a non-zero `errcode`, regardless of HTTP status. Surfaced verbatim and
/// never retried.
#[derive(Error, Debug, Clone)]
#[error("errcode {code}: {message}")]
pub struct ProviderError {
    /// Provider error code (`errcode`).
    pub code: i64,
    /// Provider error message (`errmsg`).
    pub message: String,
}

/// Network/transport failure, distinguishable from provider-level business
/// failures.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("malformed response body: {message}")]
    InvalidBody { message: String },
}

/// Credential store failure, propagated without masking.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("load failed: {message}")]
    LoadFailed { message: String },

    #[error("save failed: {message}")]
    SaveFailed { message: String },
}

/// Result type for WeChat OAuth operations.
pub type OAuthResult<T> = Result<T, OAuthError>;
