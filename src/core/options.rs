//! Request Options
//!
//! Per-instance default options merged with per-call overrides.

use std::collections::HashMap;
use std::time::Duration;

/// Options applied to a provider HTTP call.
///
/// A client carries one default set; each call may supply overrides. The merge
/// rule: `headers` merges key-by-key (call-specific entries augment the
/// defaults), every other field is fully overridden by a present call-specific
/// value.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    /// Request timeout.
    pub timeout: Option<Duration>,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Merge call-specific overrides over these defaults.
    pub fn merge(&self, overrides: &RequestOptions) -> RequestOptions {
        let mut merged = self.clone();

        if overrides.timeout.is_some() {
            merged.timeout = overrides.timeout;
        }
        for (key, value) in &overrides.headers {
            merged.headers.insert(key.clone(), value.clone());
        }

        merged
    }
}
