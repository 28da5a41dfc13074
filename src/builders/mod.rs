//! Fluent builders for configuration.

pub mod config;

pub use config::{wechat_config, ConfigBuildError, OAuthConfigBuilder};
