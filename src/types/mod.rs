//! WeChat OAuth data types.

pub mod auth;
pub mod config;
pub mod profile;
pub mod token;

pub use auth::{AuthorizeParams, AuthorizeVariant, Verification};
pub use config::{OAuthConfig, ProviderEndpoints, DEFAULT_TIMEOUT_MS};
pub use profile::{Lang, Sex, UserProfile};
pub use token::{CachedToken, TokenResponse};
