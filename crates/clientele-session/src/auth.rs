//! The login collaborator.
//!
//! Clientele doesn't speak HTTP itself. Whatever client the application
//! already uses (reqwest, a browser `fetch` binding, a test double) is
//! wrapped in an [`AuthService`]: one async method that posts credentials
//! and hands back the response.
//!
//! The session manager only needs one thing from that response: the
//! `Authorization` header carrying the bearer token. Everything else is
//! passed back to the caller untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the customer typed into the login form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Hand-written so a stray `{:?}` in a log line can't leak the password.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The login endpoint's reply, as far as the session layer cares.
///
/// `body` is kept as raw JSON. The customer API answers with
/// `{ "token": …, "customerDTO": { … } }`, but the session
/// reads identity from the token alone; the body is for the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

impl AuthResponse {
    /// Creates a response with the given status, no headers, and a `null` body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Adds a header.
    pub fn with_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = body;
        self
    }

    /// Returns the first header named `name`, compared case-insensitively
    /// as HTTP header names are.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The raw `Authorization` header value, prefix and all.
    pub fn authorization(&self) -> Option<&str> {
        self.header("authorization")
    }
}

/// Exchanges credentials for an [`AuthResponse`].
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → the service lives inside the session
///   manager for the whole life of the client.
/// - `Error: std::error::Error + Send + Sync + 'static` → the manager
///   boxes it into [`SessionError::Auth`](crate::SessionError::Auth)
///   unchanged.
///
/// # Example
///
/// ```rust
/// use clientele_session::{AuthResponse, AuthService, Credentials};
///
/// /// Signs everyone in with the same token. Tests and demos only!
/// struct FixedTokenAuth(String);
///
/// impl AuthService for FixedTokenAuth {
///     type Error = std::io::Error;
///
///     async fn login(
///         &self,
///         _credentials: &Credentials,
///     ) -> Result<AuthResponse, Self::Error> {
///         Ok(AuthResponse::new(200)
///             .with_header("Authorization", format!("Bearer {}", self.0)))
///     }
/// }
/// ```
pub trait AuthService: Send + Sync + 'static {
    /// The error the underlying transport produces.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Posts `credentials` to the authentication endpoint.
    ///
    /// # Returns
    /// - `Ok(AuthResponse)`: the server answered; it may or may not have
    ///   included a token, the manager checks
    /// - `Err(Self::Error)`: transport failure or a rejected login
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<AuthResponse, Self::Error>> + Send;
}
