//! Authorization Types
//!
//! Authorize-redirect parameters and credential verification results.

/// Authorize redirect variant. Selects the base endpoint and the default
/// scope for the generated URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizeVariant {
    /// In-app authorization (popup or redirect); default scope `snsapi_base`.
    Base,
    /// Website QR-code login; default scope `snsapi_login`.
    Website,
}

impl AuthorizeVariant {
    /// Default scope requested when the caller supplies none.
    pub fn default_scope(&self) -> &'static str {
        match self {
            Self::Base => "snsapi_base",
            Self::Website => "snsapi_login",
        }
    }
}

/// Parameters for building an authorize redirect URL.
#[derive(Clone, Debug)]
pub struct AuthorizeParams<'a> {
    /// URI the provider redirects back to after authorization.
    pub redirect_uri: &'a str,
    /// Opaque state echoed back on the redirect; empty when not supplied.
    pub state: Option<&'a str>,
    /// Requested scope; the variant's default when not supplied.
    pub scope: Option<&'a str>,
    /// Endpoint/scope variant.
    pub variant: AuthorizeVariant,
}

impl<'a> AuthorizeParams<'a> {
    pub fn new(redirect_uri: &'a str, variant: AuthorizeVariant) -> Self {
        Self {
            redirect_uri,
            state: None,
            scope: None,
            variant,
        }
    }

    pub fn state(mut self, state: &'a str) -> Self {
        self.state = Some(state);
        self
    }

    pub fn scope(mut self, scope: &'a str) -> Self {
        self.scope = Some(scope);
        self
    }
}

/// Outcome of verifying an access credential against the introspection
/// endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
    /// The credential is valid for the openid.
    Valid,
    /// The provider rejected the credential.
    Invalid { code: i64, message: String },
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}
