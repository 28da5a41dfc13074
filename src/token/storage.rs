//! Credential Store
//!
//! Pluggable `openid -> token` association. The core never assumes durability
//! or atomicity beyond read-your-writes within one process; cross-process
//! coordination is the store implementation's responsibility.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{OAuthError, StorageError};
use crate::types::CachedToken;

/// Credential store interface, supplied by the caller.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the cached token for an openid.
    async fn load(&self, openid: &str) -> Result<Option<CachedToken>, OAuthError>;

    /// Save a token under its openid, superseding any previous grant.
    async fn save(&self, openid: &str, token: CachedToken) -> Result<(), OAuthError>;
}

/// In-memory credential store scoped to the process.
///
/// This is the default when no store is supplied and is unsuitable for
/// multi-process deployments: tokens cached here are invisible to other
/// processes and lost on restart.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    tokens: Mutex<HashMap<String, CachedToken>>,
}

impl InMemoryCredentialStore {
    /// Create new in-memory credential store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self, openid: &str) -> Result<Option<CachedToken>, OAuthError> {
        Ok(self.tokens.lock().unwrap().get(openid).cloned())
    }

    async fn save(&self, openid: &str, token: CachedToken) -> Result<(), OAuthError> {
        self.tokens.lock().unwrap().insert(openid.to_string(), token);
        Ok(())
    }
}

/// Mock credential store for testing, with call history.
#[derive(Default)]
pub struct MockCredentialStore {
    tokens: Mutex<HashMap<String, CachedToken>>,
    load_history: Mutex<Vec<String>>,
    save_history: Mutex<Vec<(String, CachedToken)>>,
    fail_loads: Mutex<bool>,
    fail_saves: Mutex<bool>,
}

impl MockCredentialStore {
    /// Create new mock credential store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a token.
    pub fn add_token(&self, openid: &str, token: CachedToken) -> &Self {
        self.tokens.lock().unwrap().insert(openid.to_string(), token);
        self
    }

    /// Make subsequent loads fail.
    pub fn set_fail_loads(&self, fail: bool) -> &Self {
        *self.fail_loads.lock().unwrap() = fail;
        self
    }

    /// Make subsequent saves fail.
    pub fn set_fail_saves(&self, fail: bool) -> &Self {
        *self.fail_saves.lock().unwrap() = fail;
        self
    }

    /// Get load history.
    pub fn get_load_history(&self) -> Vec<String> {
        self.load_history.lock().unwrap().clone()
    }

    /// Get save history.
    pub fn get_save_history(&self) -> Vec<(String, CachedToken)> {
        self.save_history.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn load(&self, openid: &str) -> Result<Option<CachedToken>, OAuthError> {
        self.load_history.lock().unwrap().push(openid.to_string());

        if *self.fail_loads.lock().unwrap() {
            return Err(OAuthError::Storage(StorageError::LoadFailed {
                message: "mock load failure".to_string(),
            }));
        }

        Ok(self.tokens.lock().unwrap().get(openid).cloned())
    }

    async fn save(&self, openid: &str, token: CachedToken) -> Result<(), OAuthError> {
        self.save_history
            .lock()
            .unwrap()
            .push((openid.to_string(), token.clone()));

        if *self.fail_saves.lock().unwrap() {
            return Err(OAuthError::Storage(StorageError::SaveFailed {
                message: "mock save failure".to_string(),
            }));
        }

        self.tokens.lock().unwrap().insert(openid.to_string(), token);
        Ok(())
    }
}
