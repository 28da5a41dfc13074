//! Token Types
//!
//! Wire and cached token definitions for one authorization grant.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Token payload returned by the code-exchange and refresh endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    /// Access token for calling protected endpoints.
    pub access_token: String,
    /// Validity window in seconds, as declared by the provider.
    pub expires_in: i64,
    /// Refresh token; absent for some grants.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Subject identifier the grant is scoped to.
    pub openid: String,
    /// Granted scope, opaque passthrough.
    #[serde(default)]
    pub scope: Option<String>,
}

/// One cached authorization grant for one end-user identity.
///
/// Immutable once minted: a refresh produces a brand-new value that supersedes
/// the old one in the store, never a mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
    /// Access token for calling protected endpoints.
    pub access_token: String,
    /// Refresh token; absent for some grants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Epoch milliseconds at which the token was issued or last refreshed.
    /// Set only by the lifecycle's stamp operation, never by callers.
    pub created_at: i64,
    /// Validity window in seconds.
    pub expires_in: i64,
    /// Subject identifier; the cache key.
    pub openid: String,
    /// Granted scope, opaque passthrough.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl CachedToken {
    /// Mint a token from a provider payload, capturing `created_at` from the
    /// supplied clock reading.
    pub fn from_response(response: TokenResponse, created_at: i64) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            created_at,
            expires_in: response.expires_in,
            openid: response.openid,
            scope: response.scope,
        }
    }

    /// Validity predicate at an explicit clock reading (epoch milliseconds).
    /// Pure, no I/O: the token is valid while the access token is non-empty
    /// and `now_ms` is strictly before `created_at + expires_in * 1000`.
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        !self.access_token.is_empty() && now_ms < self.created_at + self.expires_in * 1000
    }

    /// Validity predicate against the current wall clock.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now().timestamp_millis())
    }

    /// Check if a refresh token is cached.
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(access_token: &str, created_at: i64, expires_in: i64) -> CachedToken {
        CachedToken {
            access_token: access_token.to_string(),
            refresh_token: None,
            created_at,
            expires_in,
            openid: "OPENID".to_string(),
            scope: None,
        }
    }

    #[test]
    fn test_token_response_parsing() {
        let json = r#"{
            "access_token": "ACCESS_TOKEN",
            "expires_in": 7200,
            "refresh_token": "REFRESH_TOKEN",
            "openid": "OPENID",
            "scope": "SCOPE"
        }"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "ACCESS_TOKEN");
        assert_eq!(response.expires_in, 7200);
        assert_eq!(response.refresh_token, Some("REFRESH_TOKEN".to_string()));
        assert_eq!(response.openid, "OPENID");
        assert_eq!(response.scope, Some("SCOPE".to_string()));
    }

    #[test]
    fn test_empty_access_token_is_never_valid() {
        // Empty credential fails the predicate for any window or clock.
        assert!(!token("", 0, 7200).is_valid_at(0));
        assert!(!token("", i64::MAX / 2, i64::MAX / 4000).is_valid_at(0));
        assert!(!token("", 1_000_000, 7200).is_valid_at(1_000_001));
    }

    #[test]
    fn test_validity_window_boundaries() {
        let t0 = 1_700_000_000_000;
        let t = token("access_token", t0, 60);

        assert!(t.is_valid_at(t0));
        assert!(t.is_valid_at(t0 + 59_999));
        // Expiry boundary is exclusive: exactly at the deadline is expired.
        assert!(!t.is_valid_at(t0 + 60_000));
        assert!(!t.is_valid_at(t0 + 60_001));
    }

    #[test]
    fn test_is_valid_against_wall_clock() {
        let now = Utc::now().timestamp_millis();
        assert!(token("access_token", now, 60).is_valid());
        assert!(!token("access_token", now - 70_000, 60).is_valid());
    }

    #[test]
    fn test_from_response_captures_created_at() {
        let response = TokenResponse {
            access_token: "ACCESS_TOKEN".to_string(),
            expires_in: 7200,
            refresh_token: Some("REFRESH_TOKEN".to_string()),
            openid: "OPENID".to_string(),
            scope: Some("SCOPE".to_string()),
        };

        let minted = CachedToken::from_response(response, 42);
        assert_eq!(minted.created_at, 42);
        assert!(minted.has_refresh_token());
        assert_eq!(minted.openid, "OPENID");
    }
}
