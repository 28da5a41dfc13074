//! WeChat OAuth Client
//!
//! Async client for WeChat's OAuth2-style web authorization: build the
//! authorize redirect URL, exchange an authorization code for an
//! access/refresh token pair, cache tokens per openid through a pluggable
//! store, refresh expired tokens transparently, and fetch the authenticated
//! user's profile.
//!
//! # Example
//!
//! ```rust,ignore
//! use wechat_oauth::{wechat_config, Lang, WechatOAuth};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = wechat_config()
//!         .app_id("my-appid")
//!         .app_secret("my-secret")
//!         .build()?;
//!
//!     let client = WechatOAuth::new(config);
//!
//!     // Send the user here to authorize:
//!     let url = client.authorize_url("https://myapp.com/callback", Some("state"), None);
//!     println!("authorize at: {url}");
//!
//!     // Back from the redirect with a code:
//!     let token = client.exchange_code("the-code").await?;
//!
//!     // Later, anywhere: expired tokens are refreshed transparently.
//!     let profile = client.fetch_profile(&token.openid, Lang::En).await?;
//!     println!("hello, {}", profile.nickname);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `types`: configuration, token, profile and authorization types
//! - `error`: error hierarchy (`NoToken`, `RefreshUnavailable`, provider,
//!   transport and storage failures)
//! - `core`: HTTP transport seam, request-option merging, provider API
//!   plumbing
//! - `token`: credential store seam and the token lifecycle state machine
//! - `builders`: fluent configuration builder
//! - `client`: high-level client combining all workflows

pub mod builders;
pub mod client;
pub mod core;
pub mod error;
pub mod token;
pub mod types;

// Re-export main client
pub use client::WechatOAuth;

// Re-export builders
pub use builders::{wechat_config, ConfigBuildError, OAuthConfigBuilder};

// Re-export errors
pub use error::{OAuthError, OAuthResult, ProviderError, StorageError, TransportError};

// Re-export types
pub use types::{
    AuthorizeParams, AuthorizeVariant, CachedToken, Lang, OAuthConfig, ProviderEndpoints, Sex,
    TokenResponse, UserProfile, Verification,
};

// Re-export core components
pub use core::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MockHttpTransport, ReqwestHttpTransport,
    RequestOptions,
};

// Re-export token management
pub use token::{CredentialStore, InMemoryCredentialStore, MockCredentialStore, TokenLifecycle};
