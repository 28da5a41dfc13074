//! WeChat OAuth Client
//!
//! High-level client sequencing the authorize, code-exchange, profile and
//! verification workflows over the token lifecycle.

use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::warn;
use url::form_urlencoded;

use crate::core::{api, HttpTransport, ReqwestHttpTransport, RequestOptions};
use crate::error::{OAuthError, OAuthResult};
use crate::token::{CredentialStore, InMemoryCredentialStore, TokenLifecycle};
use crate::types::{
    AuthorizeParams, AuthorizeVariant, CachedToken, Lang, OAuthConfig, TokenResponse, UserProfile,
    Verification,
};

/// WeChat OAuth client.
///
/// Every authenticated workflow follows the same sequence: resolve a usable
/// access credential through the token lifecycle (refreshing transparently
/// when the cached token expired), then call the protected endpoint.
pub struct WechatOAuth<T: HttpTransport = ReqwestHttpTransport, S: CredentialStore = InMemoryCredentialStore>
{
    config: OAuthConfig,
    transport: Arc<T>,
    store: Arc<S>,
}

impl WechatOAuth<ReqwestHttpTransport, InMemoryCredentialStore> {
    /// Create a client with the default transport and an in-memory credential
    /// store. The in-memory store is scoped to this process; supply a real
    /// store via [`WechatOAuth::with_components`] for multi-process
    /// deployments.
    pub fn new(config: OAuthConfig) -> Self {
        warn!(
            app_id = %config.app_id,
            "using the in-memory credential store; tokens will not survive this process"
        );
        let transport = Arc::new(ReqwestHttpTransport::with_timeout(config.timeout));
        Self {
            config,
            transport,
            store: Arc::new(InMemoryCredentialStore::new()),
        }
    }
}

impl<T: HttpTransport, S: CredentialStore> WechatOAuth<T, S> {
    /// Create a client with a custom transport and credential store.
    pub fn with_components(config: OAuthConfig, transport: T, store: S) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
            store: Arc::new(store),
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    // ========== Authorize redirect ==========

    /// Build an authorize redirect URL. Pure formatting, no network call.
    ///
    /// Query order is fixed (`appid, redirect_uri, response_type, scope,
    /// state`), values are form-urlencoded, and the provider-required
    /// `#wechat_redirect` fragment is appended.
    pub fn build_authorize_url(&self, params: AuthorizeParams<'_>) -> String {
        let endpoint = match params.variant {
            AuthorizeVariant::Base => &self.config.endpoints.authorize_endpoint,
            AuthorizeVariant::Website => &self.config.endpoints.website_authorize_endpoint,
        };
        let scope = params.scope.unwrap_or_else(|| params.variant.default_scope());
        let state = params.state.unwrap_or("");

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("appid", &self.config.app_id)
            .append_pair("redirect_uri", params.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", scope)
            .append_pair("state", state)
            .finish();

        format!("{endpoint}?{query}#wechat_redirect")
    }

    /// Authorize URL for the in-app popup/redirect variant
    /// (default scope `snsapi_base`).
    pub fn authorize_url(
        &self,
        redirect_uri: &str,
        state: Option<&str>,
        scope: Option<&str>,
    ) -> String {
        self.build_authorize_url(AuthorizeParams {
            redirect_uri,
            state,
            scope,
            variant: AuthorizeVariant::Base,
        })
    }

    /// Authorize URL for the website QR-login variant
    /// (default scope `snsapi_login`).
    pub fn website_authorize_url(
        &self,
        redirect_uri: &str,
        state: Option<&str>,
        scope: Option<&str>,
    ) -> String {
        self.build_authorize_url(AuthorizeParams {
            redirect_uri,
            state,
            scope,
            variant: AuthorizeVariant::Website,
        })
    }

    // ========== Code exchange ==========

    /// Exchange an authorization code for an access/refresh token pair.
    ///
    /// On success the grant is stamped and persisted to the credential store.
    /// A provider error (e.g. an invalid or expired code) propagates with
    /// nothing persisted.
    pub async fn exchange_code(&self, code: &str) -> OAuthResult<CachedToken> {
        let url = api::build_url(
            &self.config.endpoints.access_token_endpoint,
            &[
                ("appid", self.config.app_id.as_str()),
                ("secret", self.config.app_secret.expose_secret().as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ],
        )?;

        let response: TokenResponse =
            api::get_json(self.transport.as_ref(), url, &self.request_options()).await?;

        self.lifecycle().stamp(response).await
    }

    // ========== Profile ==========

    /// Resolve a usable access credential for an openid, refreshing
    /// transparently when the cached token has expired.
    pub async fn resolve_access_token(&self, openid: &str) -> OAuthResult<String> {
        self.lifecycle().resolve(openid).await
    }

    /// Fetch the user profile for an openid, resolving (and refreshing if
    /// needed) the access credential first. Errors from the resolution step
    /// propagate unchanged.
    pub async fn fetch_profile(&self, openid: &str, lang: Lang) -> OAuthResult<UserProfile> {
        let access_token = self.lifecycle().resolve(openid).await?;

        let url = api::build_url(
            &self.config.endpoints.userinfo_endpoint,
            &[
                ("access_token", access_token.as_str()),
                ("openid", openid),
                ("lang", lang.as_str()),
            ],
        )?;

        api::get_json(self.transport.as_ref(), url, &self.request_options()).await
    }

    /// Full grant-to-profile round trip: exchange the code, then fetch the
    /// profile for the granted openid. If the exchange fails the profile call
    /// is not attempted.
    pub async fn fetch_profile_by_code(&self, code: &str) -> OAuthResult<UserProfile> {
        let token = self.exchange_code(code).await?;
        self.fetch_profile(&token.openid, Lang::default()).await
    }

    // ========== Verification ==========

    /// Verify an access credential against the introspection endpoint.
    ///
    /// Does not consult or mutate the token cache and never triggers a
    /// refresh. A provider rejection is a [`Verification::Invalid`] result,
    /// not an error; transport and other failures still error.
    pub async fn verify_credential(
        &self,
        openid: &str,
        access_token: &str,
    ) -> OAuthResult<Verification> {
        let url = api::build_url(
            &self.config.endpoints.verify_endpoint,
            &[("access_token", access_token), ("openid", openid)],
        )?;

        let result: OAuthResult<serde_json::Value> =
            api::get_json(self.transport.as_ref(), url, &self.request_options()).await;

        match result {
            Ok(_) => Ok(Verification::Valid),
            Err(OAuthError::Provider(e)) => Ok(Verification::Invalid {
                code: e.code,
                message: e.message,
            }),
            Err(e) => Err(e),
        }
    }

    fn lifecycle(&self) -> TokenLifecycle<T, S> {
        TokenLifecycle::new(
            self.config.clone(),
            self.transport.clone(),
            self.store.clone(),
        )
    }

    fn request_options(&self) -> RequestOptions {
        RequestOptions::new()
            .timeout(self.config.timeout)
            .merge(&self.config.defaults)
    }
}
