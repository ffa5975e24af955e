//! The claims carried inside a bearer token.

use serde::{Deserialize, Serialize};

/// Structured data decoded from a token payload.
///
/// Field names on the wire follow the JWT registered claim names
/// (`sub`, `exp`, `iat`) plus the server's custom `scopes` array:
///
/// ```json
/// { "sub": "a@b.com", "scopes": ["ROLE_USER"], "iat": 1700000000, "exp": 1700003600 }
/// ```
///
/// `sub`, `scopes` and `exp` are required. They carry no
/// `#[serde(default)]`: a payload without a subject or an
/// expiration is rejected as malformed instead of turning into an
/// anonymous, never-expiring identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The identifier of the signed-in customer (their email).
    #[serde(rename = "sub")]
    pub subject: String,

    /// Roles granted to the subject, in the order the server listed them.
    pub scopes: Vec<String>,

    /// Expiration as Unix epoch SECONDS.
    #[serde(rename = "exp")]
    pub expires_at: u64,

    /// Issue time as Unix epoch seconds, when the server includes it.
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<u64>,
}

impl Claims {
    /// Creates claims without an issue time.
    pub fn new(
        subject: impl Into<String>,
        scopes: Vec<String>,
        expires_at: u64,
    ) -> Self {
        Self {
            subject: subject.into(),
            scopes,
            expires_at,
            issued_at: None,
        }
    }

    /// Returns `true` if `scope` is one of the granted scopes.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// The expiration converted to milliseconds, the unit clocks report in.
    ///
    /// Saturates instead of overflowing for absurdly large `exp` values,
    /// which then simply never expire.
    pub fn expires_at_millis(&self) -> u64 {
        self.expires_at.saturating_mul(1000)
    }
}
