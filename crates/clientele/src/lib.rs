//! # Clientele
//!
//! Client-side session management for the customer portal.
//!
//! Clientele derives "who is signed in" from the bearer token the
//! customer API issues at login, overlays the profile fields the customer
//! edits locally, and keeps both in persisted storage across restarts.
//! Application code talks to one object, [`SessionManager`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clientele::prelude::*;
//!
//! # struct Api;
//! # impl AuthService for Api {
//! #     type Error = std::io::Error;
//! #     async fn login(&self, _: &Credentials) -> Result<AuthResponse, Self::Error> {
//! #         Ok(AuthResponse::new(200))
//! #     }
//! # }
//! # async fn run() -> Result<(), ClienteleError> {
//! let mut sessions = SessionManager::new(
//!     SessionStore::new(FileStore::new("session.json")),
//!     JwtCodec,
//!     Api,
//!     SessionConfig::default(),
//! );
//!
//! // Before anything renders:
//! sessions.hydrate()?;
//!
//! if !sessions.is_authenticated()? {
//!     sessions.login(&Credentials::new("a@b.com", "secret")).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod telemetry;

pub use error::ClienteleError;
pub use telemetry::init_tracing;

pub use clientele_session::{
    AuthResponse, AuthService, AuthState, Clock, Credentials,
    DEFAULT_PROFILE_PICTURE, ManualClock, ProfileUpdate, Session,
    SessionConfig, SessionError, SessionManager, Snapshot, SystemClock,
    TokenStatus,
};
pub use clientele_store::{
    FileStore, KeyValueStore, MemoryStore, PROFILE_KEY, ProfileOverlay,
    SessionStore, StoreError, TOKEN_KEY,
};
pub use clientele_token::{
    BEARER_PREFIX, Claims, JwtCodec, TokenCodec, TokenError,
    strip_bearer_prefix,
};

/// Everything an application typically needs, in one import.
pub mod prelude {
    pub use crate::{
        AuthResponse, AuthService, AuthState, ClienteleError, Credentials,
        FileStore, JwtCodec, MemoryStore, ProfileUpdate, Session,
        SessionConfig, SessionError, SessionManager, SessionStore, Snapshot,
    };
}
