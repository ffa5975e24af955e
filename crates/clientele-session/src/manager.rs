//! The session manager: the one object the UI talks to.
//!
//! It's responsible for:
//! - Restoring the session from storage at startup (`hydrate`)
//! - Signing in through the [`AuthService`] (`login`)
//! - Signing out (`logout`)
//! - Noticing expired or broken tokens, lazily, when asked
//! - Applying local profile edits (`update_profile`)
//!
//! # Concurrency note
//!
//! `SessionManager` takes `&mut self` for every change and holds no
//! locks: there is exactly one logical session per client. Two managers
//! sharing one persisted store (two browser tabs, two processes on one
//! file) are NOT coordinated. If one signs out, the other keeps its
//! in-memory session until it next calls [`is_authenticated`] or
//! [`hydrate`].
//!
//! [`is_authenticated`]: SessionManager::is_authenticated
//! [`hydrate`]: SessionManager::hydrate

use clientele_store::{KeyValueStore, SessionStore};
use clientele_token::{
    Claims, JwtCodec, TokenCodec, TokenError, strip_bearer_prefix,
};
use tokio::sync::watch;

use crate::{
    AuthResponse, AuthService, AuthState, Clock, Credentials, ProfileUpdate,
    Session, SessionConfig, SessionError, Snapshot, SystemClock,
};

/// What the stored token looks like right now, without acting on it.
///
/// Returned by [`SessionManager::token_status`], which is a pure read.
#[derive(Debug)]
pub enum TokenStatus {
    /// No token is stored.
    Missing,
    /// A token is stored but doesn't decode.
    Malformed(TokenError),
    /// The token decodes but its expiration has passed.
    Expired(Claims),
    /// The token decodes and hasn't expired.
    Valid(Claims),
}

impl TokenStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Owns the signed-in state of the client.
///
/// ## Lifecycle
///
/// ```text
///            hydrate()                login()
/// [Unknown] ───────────→ [Unauthenticated] ──────→ [Authenticated]
///     │                         ↑                        │  ↺ update_profile()
///     │        hydrate()        │  logout() / expired    │
///     └─────────────────────────┼────────────────────────┘
///                               └────────────────────────┘
/// ```
///
/// Every observable change is published as a [`Snapshot`] to receivers
/// obtained from [`subscribe`](Self::subscribe).
pub struct SessionManager<A, B, C = JwtCodec>
where
    A: AuthService,
    B: KeyValueStore,
    C: TokenCodec,
{
    store: SessionStore<B>,
    codec: C,
    auth: A,
    clock: Box<dyn Clock>,
    config: SessionConfig,

    state: AuthState,
    /// Cleared once the first `hydrate()` completes.
    loading: bool,
    /// `Some` exactly when `state == Authenticated`.
    session: Option<Session>,

    publisher: watch::Sender<Snapshot>,
}

impl<A, B, C> SessionManager<A, B, C>
where
    A: AuthService,
    B: KeyValueStore,
    C: TokenCodec,
{
    /// Creates a manager in the `Unknown` state with `loading` set.
    ///
    /// Nothing is read from the store until [`hydrate`](Self::hydrate).
    /// Expiry is checked against the system clock; see
    /// [`with_clock`](Self::with_clock).
    pub fn new(
        store: SessionStore<B>,
        codec: C,
        auth: A,
        config: SessionConfig,
    ) -> Self {
        let (publisher, _) = watch::channel(Snapshot::default());
        Self {
            store,
            codec,
            auth,
            clock: Box::new(SystemClock),
            config,
            state: AuthState::Unknown,
            loading: true,
            session: None,
            publisher,
        }
    }

    /// Replaces the clock used for expiry checks.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // -- Read accessors ---------------------------------------------------

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The current session, if signed in as of the last check.
    ///
    /// This does NOT re-check expiry. Call
    /// [`is_authenticated`](Self::is_authenticated) first when it matters.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            loading: self.loading,
            session: self.session.clone(),
        }
    }

    pub fn store(&self) -> &SessionStore<B> {
        &self.store
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns a receiver that sees a new [`Snapshot`] after every
    /// observable change.
    ///
    /// The receiver starts with the current snapshot marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.publisher.subscribe()
    }

    // -- Lifecycle --------------------------------------------------------

    /// Restores the session from storage. Call once at startup, and
    /// finish it before anything reads the session.
    ///
    /// - No token → `Unauthenticated`.
    /// - Token doesn't decode or has expired → both keys are cleared,
    ///   `Unauthenticated`.
    /// - Otherwise → `Authenticated`, with the stored profile (missing
    ///   fields defaulted).
    ///
    /// `loading` is cleared whatever happens. If the store itself fails,
    /// the manager ends up `Unauthenticated` and the error is returned.
    pub fn hydrate(&mut self) -> Result<Option<Session>, SessionError> {
        let result = self.restore();
        if let Err(e) = &result {
            tracing::warn!(error = %e, "hydrate failed, starting signed out");
            self.session = None;
            self.state = AuthState::Unauthenticated;
        }
        self.loading = false;
        self.publish();
        result
    }

    /// Signs in.
    ///
    /// Sends `credentials` to the [`AuthService`], takes the token from
    /// the response's `Authorization` header (dropping a leading
    /// `"Bearer "`), stores it, and builds a session from its claims plus
    /// whatever profile is already stored. The response is returned so
    /// the caller can decide what happens next (navigation, toasts).
    ///
    /// # Errors
    /// - [`SessionError::Auth`]: the service failed; nothing changed.
    /// - [`SessionError::MissingToken`]: no (or an empty) token in the
    ///   response; nothing changed.
    /// - [`SessionError::Token`]: the token doesn't decode; it is not
    ///   stored and nothing changed.
    /// - [`SessionError::Store`]: persisting failed.
    pub async fn login(
        &mut self,
        credentials: &Credentials,
    ) -> Result<AuthResponse, SessionError> {
        let response = self
            .auth
            .login(credentials)
            .await
            .map_err(|e| SessionError::Auth(Box::new(e)))?;

        let Some(token) = response
            .authorization()
            .map(strip_bearer_prefix)
            .filter(|token| !token.is_empty())
        else {
            tracing::warn!(
                username = %credentials.username,
                status = response.status,
                "login response carried no token"
            );
            return Err(SessionError::MissingToken);
        };

        let claims = self.codec.decode(token)?;
        let stored = self.store.get_profile()?;
        self.store.set_token(token)?;

        let session =
            Session::new(claims, self.config.resolve_profile(stored));
        tracing::info!(
            subject = %session.subject(),
            scopes = ?session.scopes(),
            "signed in"
        );

        self.session = Some(session);
        self.state = AuthState::Authenticated;
        self.publish();
        Ok(response)
    }

    /// Signs out: clears both stored keys and the in-memory session.
    ///
    /// Idempotent. Calling it while already signed out leaves the same
    /// store contents and state, and publishes nothing new.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        if let Some(session) = &self.session {
            tracing::info!(subject = %session.subject(), "signed out");
        }
        let result = self.discard();
        self.publish();
        result
    }

    /// Returns whether a valid token is stored, signing out if not.
    ///
    /// This is a lazy check, not a cached flag: every call re-reads and
    /// re-decodes the stored token, and a malformed or expired token
    /// triggers [`logout`](Self::logout) as a side effect. Equivalent to
    /// [`reconcile`](Self::reconcile); use
    /// [`token_status`](Self::token_status) for a check that changes
    /// nothing.
    pub fn is_authenticated(&mut self) -> Result<bool, SessionError> {
        self.reconcile()
    }

    /// Reads the stored token and classifies it. Changes nothing.
    pub fn token_status(&self) -> Result<TokenStatus, SessionError> {
        let Some(token) = self.store.get_token()? else {
            return Ok(TokenStatus::Missing);
        };

        let claims = match self.codec.decode(&token) {
            Ok(claims) => claims,
            Err(e) => return Ok(TokenStatus::Malformed(e)),
        };

        if self.codec.is_expired(&claims, self.clock.now_millis()) {
            Ok(TokenStatus::Expired(claims))
        } else {
            Ok(TokenStatus::Valid(claims))
        }
    }

    /// Brings in-memory state in line with the stored token.
    ///
    /// - Valid token → `true`, nothing changes.
    /// - Malformed or expired token → signs out, `false`.
    /// - No token → `false`; an in-memory session left over from before
    ///   (another client on the same store signed out) is dropped.
    ///
    /// A valid token that appeared in the store behind this manager's
    /// back is reported as `true` but not turned into a session; that is
    /// what [`hydrate`](Self::hydrate) is for.
    pub fn reconcile(&mut self) -> Result<bool, SessionError> {
        match self.token_status()? {
            TokenStatus::Valid(_) => Ok(true),
            TokenStatus::Missing => {
                if self.session.is_some() {
                    tracing::info!("stored token is gone, dropping session");
                    self.logout()?;
                }
                Ok(false)
            }
            status => {
                warn_invalid(&status);
                self.logout()?;
                Ok(false)
            }
        }
    }

    /// Applies a local profile edit.
    ///
    /// Returns `Ok(None)` and changes nothing if nobody is signed in.
    /// Otherwise merges `update` into the current profile, persists the
    /// result, and replaces the session with the merged snapshot. Claims
    /// are never touched.
    ///
    /// Purely local: nothing is sent to the server.
    pub fn update_profile(
        &mut self,
        update: ProfileUpdate,
    ) -> Result<Option<Session>, SessionError> {
        let Some(current) = &self.session else {
            tracing::debug!("profile update ignored, not signed in");
            return Ok(None);
        };

        let (claims, profile) = current.merge(&update).into_parts();
        let session =
            Session::new(claims, self.config.resolve_profile(Some(profile)));

        // Persist first: if the write fails, memory still matches storage.
        self.store.set_profile(session.profile())?;

        tracing::debug!(subject = %session.subject(), "profile updated");
        self.session = Some(session.clone());
        self.publish();
        Ok(Some(session))
    }

    // -- Internals --------------------------------------------------------

    fn restore(&mut self) -> Result<Option<Session>, SessionError> {
        match self.token_status()? {
            TokenStatus::Missing => {
                tracing::debug!("no stored token");
                self.session = None;
                self.state = AuthState::Unauthenticated;
                Ok(None)
            }
            TokenStatus::Valid(claims) => {
                let profile =
                    self.config.resolve_profile(self.store.get_profile()?);
                let session = Session::new(claims, profile);
                tracing::info!(subject = %session.subject(), "session restored");
                self.session = Some(session.clone());
                self.state = AuthState::Authenticated;
                Ok(Some(session))
            }
            status => {
                warn_invalid(&status);
                self.discard()?;
                Ok(None)
            }
        }
    }

    /// Drops the in-memory session, then clears storage. Memory goes
    /// first so a failing store still leaves us signed out.
    fn discard(&mut self) -> Result<(), SessionError> {
        self.session = None;
        self.state = AuthState::Unauthenticated;
        self.store.clear()?;
        Ok(())
    }

    fn publish(&self) {
        let next = self.snapshot();
        self.publisher.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

fn warn_invalid(status: &TokenStatus) {
    match status {
        TokenStatus::Malformed(e) => {
            tracing::warn!(error = %e, "stored token is malformed, signing out");
        }
        TokenStatus::Expired(claims) => {
            tracing::warn!(
                subject = %claims.subject,
                expires_at = claims.expires_at,
                "stored token has expired, signing out"
            );
        }
        TokenStatus::Missing | TokenStatus::Valid(_) => {}
    }
}

// =========================================================================
// Tests
// =========================================================================
