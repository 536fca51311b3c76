use std::fmt;

use crate::domain::ports::CredentialStore;

/// Store key holding the token header name
pub const TOKEN_NAME_KEY: &str = "tokenName";

/// Store key holding the token header value
pub const TOKEN_VALUE_KEY: &str = "tokenValue";

/// Store key holding the legacy API key
pub const LEGACY_KEY: &str = "fishpi_api_key";

/// Query parameter / body field name the legacy key is injected under
pub const API_KEY_PARAM: &str = "apiKey";

/// Credential applied to a single outgoing request
///
/// The token scheme always wins: the legacy key is only consulted when no
/// complete token pair is stored.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Header-based token: `headers[name] = value`
    Token {
        /// Header name chosen by the server at login
        name: String,
        /// Header value
        value: String,
    },

    /// Static key placed in the URL, query or body depending on request shape
    LegacyKey(String),
}

impl Credential {
    /// Resolve the credential to use from the store
    ///
    /// Empty strings are treated as absent, so a half-written token pair
    /// falls back to the legacy key.
    pub fn resolve(store: &dyn CredentialStore) -> Option<Self> {
        let name = non_empty(store.get(TOKEN_NAME_KEY));
        let value = non_empty(store.get(TOKEN_VALUE_KEY));

        if let (Some(name), Some(value)) = (name, value) {
            return Some(Self::Token { name, value });
        }

        non_empty(store.get(LEGACY_KEY)).map(Self::LegacyKey)
    }

    /// Short label for diagnostics
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Token { .. } => "token",
            Self::LegacyKey(_) => "legacy_key",
        }
    }
}

// Never print secret values.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token { name, .. } => f
                .debug_struct("Token")
                .field("name", name)
                .field("value", &"[REDACTED]")
                .finish(),
            Self::LegacyKey(_) => f.debug_tuple("LegacyKey").field(&"[REDACTED]").finish(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
