//! Token Lifecycle
//!
//! Decides whether a cached token is usable as-is or must be refreshed, and
//! wraps provider token payloads into the canonical cached shape before
//! persisting them.

use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use crate::core::{api, HttpTransport, RequestOptions};
use crate::error::{OAuthError, OAuthResult};
use crate::token::CredentialStore;
use crate::types::{CachedToken, OAuthConfig, TokenResponse};

/// Token lifecycle for one client configuration.
pub struct TokenLifecycle<T: HttpTransport, S: CredentialStore> {
    config: OAuthConfig,
    transport: Arc<T>,
    store: Arc<S>,
}

impl<T: HttpTransport, S: CredentialStore> TokenLifecycle<T, S> {
    /// Create a lifecycle over a transport and a credential store.
    pub fn new(config: OAuthConfig, transport: Arc<T>, store: Arc<S>) -> Self {
        Self {
            config,
            transport,
            store,
        }
    }

    /// Mint a cached token from a provider payload and persist it.
    ///
    /// This is the single point where "now" is captured; callers never set
    /// `created_at`. Exactly one store write per call. If the write fails the
    /// error propagates and the provider-side grant is lost to this process;
    /// no retry or revoke is attempted.
    pub async fn stamp(&self, response: TokenResponse) -> OAuthResult<CachedToken> {
        let token = CachedToken::from_response(response, Utc::now().timestamp_millis());
        self.store.save(&token.openid, token.clone()).await?;
        Ok(token)
    }

    /// Resolve a usable access credential for an openid, refreshing
    /// transparently when the cached token has expired.
    ///
    /// Fails with [`OAuthError::NoToken`] when nothing is cached and with
    /// [`OAuthError::RefreshUnavailable`] when the expired token carries no
    /// refresh token; neither performs a network call. Provider and transport
    /// failures during the refresh are terminal for this call; nothing is
    /// retried here.
    ///
    /// Two concurrent resolves for the same openid may both refresh. The
    /// provider accepts the latest valid refresh token, so the double refresh
    /// is benign and deliberately not deduplicated.
    pub async fn resolve(&self, openid: &str) -> OAuthResult<String> {
        let token = self
            .store
            .load(openid)
            .await?
            .ok_or_else(|| OAuthError::NoToken {
                openid: openid.to_string(),
            })?;

        if token.is_valid() {
            return Ok(token.access_token);
        }

        let refresh_token = token
            .refresh_token
            .as_deref()
            .ok_or_else(|| OAuthError::RefreshUnavailable {
                openid: openid.to_string(),
            })?;

        debug!(openid, "access token expired, refreshing");
        let refreshed = self.refresh(refresh_token).await?;
        Ok(refreshed.access_token)
    }

    /// Exchange a refresh token for a new grant and persist it.
    pub async fn refresh(&self, refresh_token: &str) -> OAuthResult<CachedToken> {
        let url = api::build_url(
            &self.config.endpoints.refresh_token_endpoint,
            &[
                ("appid", self.config.app_id.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ],
        )?;

        let response: TokenResponse =
            api::get_json(self.transport.as_ref(), url, &self.request_options()).await?;

        self.stamp(response).await
    }

    fn request_options(&self) -> RequestOptions {
        RequestOptions::new()
            .timeout(self.config.timeout)
            .merge(&self.config.defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::wechat_config;
    use crate::core::MockHttpTransport;
    use crate::error::{ProviderError, StorageError};
    use crate::token::MockCredentialStore;

    fn lifecycle(
        transport: MockHttpTransport,
        store: MockCredentialStore,
    ) -> TokenLifecycle<MockHttpTransport, MockCredentialStore> {
        let config = wechat_config()
            .app_id("appid")
            .app_secret("appsecret")
            .build()
            .unwrap();
        TokenLifecycle::new(config, Arc::new(transport), Arc::new(store))
    }

    fn cached(openid: &str, created_at: i64, refresh_token: Option<&str>) -> CachedToken {
        CachedToken {
            access_token: "access_token".to_string(),
            refresh_token: refresh_token.map(String::from),
            created_at,
            expires_in: 60,
            openid: openid.to_string(),
            scope: None,
        }
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    #[tokio::test]
    async fn test_resolve_without_cached_token() {
        let transport = MockHttpTransport::new();
        let lifecycle = lifecycle(transport, MockCredentialStore::new());

        let result = lifecycle.resolve("openid").await;
        match result {
            Err(OAuthError::NoToken { openid }) => assert_eq!(openid, "openid"),
            other => panic!("expected NoToken, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_failure_makes_no_network_call() {
        let transport = MockHttpTransport::new();
        let store = MockCredentialStore::new();
        let config = wechat_config()
            .app_id("appid")
            .app_secret("appsecret")
            .build()
            .unwrap();
        let transport = Arc::new(transport);
        let lifecycle = TokenLifecycle::new(config, transport.clone(), Arc::new(store));

        let _ = lifecycle.resolve("openid").await;
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_valid_token_skips_network() {
        let store = MockCredentialStore::new();
        store.add_token("openid", cached("openid", now_ms(), None));
        let config = wechat_config()
            .app_id("appid")
            .app_secret("appsecret")
            .build()
            .unwrap();
        let transport = Arc::new(MockHttpTransport::new());
        let lifecycle = TokenLifecycle::new(config, transport.clone(), Arc::new(store));

        let access_token = lifecycle.resolve("openid").await.unwrap();
        assert_eq!(access_token, "access_token");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_expired_without_refresh_token() {
        let store = MockCredentialStore::new();
        store.add_token("openid", cached("openid", now_ms() - 70_000, None));
        let lifecycle = lifecycle(MockHttpTransport::new(), store);

        let result = lifecycle.resolve("openid").await;
        assert!(matches!(
            result,
            Err(OAuthError::RefreshUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_expired_refreshes_and_saves_once() {
        let transport = MockHttpTransport::new();
        transport.queue_json_response(
            200,
            &serde_json::json!({
                "access_token": "NEW_ACCESS_TOKEN",
                "expires_in": 7200,
                "refresh_token": "NEW_REFRESH_TOKEN",
                "openid": "openid",
                "scope": "SCOPE"
            }),
        );

        let store = MockCredentialStore::new();
        store.add_token("openid", cached("openid", now_ms() - 70_000, Some("refresh_token")));

        let config = wechat_config()
            .app_id("appid")
            .app_secret("appsecret")
            .build()
            .unwrap();
        let store = Arc::new(store);
        let before = now_ms();
        let lifecycle = TokenLifecycle::new(config, Arc::new(transport), store.clone());

        let access_token = lifecycle.resolve("openid").await.unwrap();
        assert_eq!(access_token, "NEW_ACCESS_TOKEN");

        // Exactly one save, stamped at the refresh time.
        let saves = store.get_save_history();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].0, "openid");
        assert!(saves[0].1.created_at >= before);
        assert!(saves[0].1.created_at <= now_ms());
        assert_eq!(saves[0].1.refresh_token, Some("NEW_REFRESH_TOKEN".to_string()));
    }

    #[tokio::test]
    async fn test_refresh_request_shape() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_json_response(
            200,
            &serde_json::json!({
                "access_token": "NEW_ACCESS_TOKEN",
                "expires_in": 7200,
                "openid": "openid"
            }),
        );

        let config = wechat_config()
            .app_id("appid")
            .app_secret("appsecret")
            .build()
            .unwrap();
        let lifecycle =
            TokenLifecycle::new(config, transport.clone(), Arc::new(MockCredentialStore::new()));

        lifecycle.refresh("the_refresh_token").await.unwrap();

        let request = transport.get_last_request().unwrap();
        assert!(request.url.starts_with("https://api.weixin.qq.com/sns/oauth2/refresh_token?"));
        assert!(request.url.contains("appid=appid"));
        assert!(request.url.contains("grant_type=refresh_token"));
        assert!(request.url.contains("refresh_token=the_refresh_token"));
    }

    #[tokio::test]
    async fn test_refresh_provider_error_propagates_without_save() {
        let transport = MockHttpTransport::new();
        transport.queue_json_response(
            200,
            &serde_json::json!({"errcode": 40030, "errmsg": "invalid refresh_token"}),
        );

        let store = MockCredentialStore::new();
        store.add_token("openid", cached("openid", now_ms() - 70_000, Some("refresh_token")));
        let config = wechat_config()
            .app_id("appid")
            .app_secret("appsecret")
            .build()
            .unwrap();
        let store = Arc::new(store);
        let lifecycle = TokenLifecycle::new(config, Arc::new(transport), store.clone());

        let result = lifecycle.resolve("openid").await;
        match result {
            Err(OAuthError::Provider(ProviderError { code, .. })) => assert_eq!(code, 40030),
            other => panic!("expected provider error, got {other:?}"),
        }
        assert!(store.get_save_history().is_empty());
    }

    #[tokio::test]
    async fn test_stamp_save_failure_propagates() {
        let store = MockCredentialStore::new();
        store.set_fail_saves(true);
        let lifecycle = lifecycle(MockHttpTransport::new(), store);

        let response = TokenResponse {
            access_token: "ACCESS_TOKEN".to_string(),
            expires_in: 7200,
            refresh_token: None,
            openid: "openid".to_string(),
            scope: None,
        };

        let result = lifecycle.stamp(response).await;
        assert!(matches!(
            result,
            Err(OAuthError::Storage(StorageError::SaveFailed { .. }))
        ));
    }

    #[tokio::test]
    async fn test_store_load_failure_propagates() {
        let store = MockCredentialStore::new();
        store.set_fail_loads(true);
        let lifecycle = lifecycle(MockHttpTransport::new(), store);

        let result = lifecycle.resolve("openid").await;
        assert!(matches!(result, Err(OAuthError::Storage(_))));
    }
}
