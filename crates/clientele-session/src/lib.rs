//! Signed-in identity for Clientele.
//!
//! This crate answers "who is signed in?" for the rest of the client:
//!
//! 1. **Login**: exchanging credentials for a bearer token through an
//!    [`AuthService`] and persisting it
//! 2. **Session tracking**: combining the token's claims with the
//!    locally-stored profile into a [`Session`] ([`SessionManager`])
//! 3. **Expiry**: noticing, lazily, that the token is no longer good
//!    and falling back to signed-out
//!
//! # How it fits in the stack
//!
//! ```text
//! UI (above)  ← reads Snapshots, calls login / logout / update_profile
//!     ↕
//! Session Layer (this crate)  ← owns the state machine
//!     ↕
//! Token + Store Layers (below)  ← decode claims, persist raw strings
//! ```

#![allow(async_fn_in_trait)]

mod auth;
mod clock;
mod error;
mod manager;
mod session;

pub use auth::{AuthResponse, AuthService, Credentials};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::SessionError;
pub use manager::{SessionManager, TokenStatus};
pub use session::{
    AuthState, DEFAULT_PROFILE_PICTURE, ProfileUpdate, Session, SessionConfig,
    Snapshot,
};
