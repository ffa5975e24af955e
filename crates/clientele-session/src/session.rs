//! Session types: the values the rest of the client reads.
//!
//! A "session" is the client's record of who is signed in. It combines:
//! - WHO the customer is and WHAT they may do ([`Claims`], from the token)
//! - HOW they want to be shown ([`ProfileOverlay`], stored locally)
//!
//! Sessions are immutable snapshots. Every change produces a new
//! [`Session`] value rather than mutating the old one, so anything holding
//! an older snapshot keeps seeing a consistent (if stale) picture.

use std::fmt;

use clientele_store::ProfileOverlay;
use clientele_token::Claims;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Placeholder avatar shown until the customer picks their own picture.
pub const DEFAULT_PROFILE_PICTURE: &str = "https://images.unsplash.com/photo-1619946794135-5bc917a27793?ixlib=rb-0.3.5&q=80&fm=jpg&crop=faces&fit=crop&h=200&w=200&s=b616b2c5b373a80ffc9636ba24f7a4a9";

/// Configuration for session behavior.
///
/// Sensible defaults are provided; override just the fields you care
/// about with `..SessionConfig::default()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Picture URI used when the stored profile has none (missing or
    /// empty).
    pub default_profile_picture: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_profile_picture: DEFAULT_PROFILE_PICTURE.to_string(),
        }
    }
}

impl SessionConfig {
    /// Fills in what a stored overlay is missing.
    ///
    /// Absent overlay → empty names. Absent or empty picture →
    /// [`default_profile_picture`](Self::default_profile_picture).
    pub fn resolve_profile(
        &self,
        stored: Option<ProfileOverlay>,
    ) -> ProfileOverlay {
        let mut profile = stored.unwrap_or_default();
        if profile.profile_picture.is_empty() {
            profile
                .profile_picture
                .clone_from(&self.default_profile_picture);
        }
        profile
    }
}

// ---------------------------------------------------------------------------
// AuthState
// ---------------------------------------------------------------------------

/// Where the session manager is in its lifecycle.
///
/// ```text
///   Unknown ──(hydrate)──→ Authenticated ⇄ Unauthenticated
///      │                        ↑  (login / logout, expiry)
///      └──────(hydrate)──→ Unauthenticated
/// ```
///
/// - **Unknown**: the client just started and hasn't looked at storage.
///   Consumers should wait (see [`Snapshot::loading`]).
/// - **Unauthenticated**: nobody is signed in.
/// - **Authenticated**: a valid token is stored and a [`Session`] exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unknown,
    Unauthenticated,
    Authenticated,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Unauthenticated => write!(f, "Unauthenticated"),
            Self::Authenticated => write!(f, "Authenticated"),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The signed-in customer: token claims plus local profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    claims: Claims,
    profile: ProfileOverlay,
}

impl Session {
    pub fn new(claims: Claims, profile: ProfileOverlay) -> Self {
        Self { claims, profile }
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn profile(&self) -> &ProfileOverlay {
        &self.profile
    }

    pub fn into_parts(self) -> (Claims, ProfileOverlay) {
        (self.claims, self.profile)
    }

    /// The customer's identifier (their email).
    pub fn subject(&self) -> &str {
        &self.claims.subject
    }

    pub fn scopes(&self) -> &[String] {
        &self.claims.scopes
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.claims.has_scope(scope)
    }

    /// Token expiration, Unix seconds.
    pub fn expires_at(&self) -> u64 {
        self.claims.expires_at
    }

    pub fn first_name(&self) -> &str {
        &self.profile.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.profile.last_name
    }

    pub fn profile_picture(&self) -> &str {
        &self.profile.profile_picture
    }

    /// `"First Last"`, skipping whichever half is empty.
    pub fn full_name(&self) -> String {
        [self.first_name(), self.last_name()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns a new session with `update` applied to the profile.
    ///
    /// Claims are copied as-is; nothing in a [`ProfileUpdate`] can reach
    /// them.
    pub fn merge(&self, update: &ProfileUpdate) -> Session {
        let mut profile = self.profile.clone();
        if let Some(first_name) = &update.first_name {
            profile.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &update.last_name {
            profile.last_name.clone_from(last_name);
        }
        if let Some(picture) = &update.profile_picture {
            profile.profile_picture.clone_from(picture);
        }
        Session {
            claims: self.claims.clone(),
            profile,
        }
    }
}

// ---------------------------------------------------------------------------
// ProfileUpdate
// ---------------------------------------------------------------------------

/// A partial [`ProfileOverlay`]: `None` fields are left alone.
///
/// ```rust
/// use clientele_session::ProfileUpdate;
///
/// let update = ProfileUpdate::new().first_name("Jane");
/// assert!(update.last_name.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
}

impl ProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn profile_picture(mut self, value: impl Into<String>) -> Self {
        self.profile_picture = Some(value.into());
        self
    }

    /// Returns `true` if applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.profile_picture.is_none()
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything a consumer needs to render, published after each change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: AuthState,
    /// `true` until the first [`hydrate`](crate::SessionManager::hydrate)
    /// finishes. While set, `session` being `None` means "don't know
    /// yet", not "signed out".
    pub loading: bool,
    pub session: Option<Session>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            state: AuthState::Unknown,
            loading: true,
            session: None,
        }
    }
}
