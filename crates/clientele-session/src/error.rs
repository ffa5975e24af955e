//! Error types for the session layer.

use clientele_store::StoreError;
use clientele_token::TokenError;

/// Errors that can reach callers of the [`SessionManager`](crate::SessionManager).
///
/// Malformed or expired STORED tokens never show up here: the manager
/// handles those itself by signing out. What does surface is what the UI
/// has to tell the user about.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The login response didn't carry a bearer token. Nothing was
    /// written; the previous session, if any, is untouched.
    #[error("login response did not include a bearer token")]
    MissingToken,

    /// The login response carried a token that doesn't decode.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Reading or writing persisted session state failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The [`AuthService`](crate::AuthService) failed (network down,
    /// bad credentials, server error). The service's own error is kept
    /// as the source so callers can downcast it.
    #[error("authentication request failed: {0}")]
    Auth(#[source] Box<dyn std::error::Error + Send + Sync>),
}
