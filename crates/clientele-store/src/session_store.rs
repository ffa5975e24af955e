//! The typed session view over a [`KeyValueStore`].

use crate::{KeyValueStore, ProfileOverlay, StoreError};

/// Key holding the raw bearer token (no `Bearer ` prefix).
pub const TOKEN_KEY: &str = "access_token";

/// Key holding the JSON-encoded [`ProfileOverlay`].
pub const PROFILE_KEY: &str = "customer_profile";

/// Reads and writes the two session entries.
///
/// The two keys are independent: every method touches exactly one of them
/// (except [`clear`](Self::clear), which is two separate removals). Nothing
/// here decides whether a token is any good; that's the session
/// manager's job.
#[derive(Debug, Clone)]
pub struct SessionStore<B: KeyValueStore> {
    backend: B,
}

impl<B: KeyValueStore> SessionStore<B> {
    /// Wraps a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the stored token, or `None` if there is none.
    ///
    /// An empty string counts as no token.
    pub fn get_token(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .backend
            .get(TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    /// Persists `token` as-is.
    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.backend.set(TOKEN_KEY, token)
    }

    /// Removes the stored token.
    pub fn clear_token(&self) -> Result<(), StoreError> {
        self.backend.remove(TOKEN_KEY)
    }

    /// Returns the stored profile overlay.
    ///
    /// Returns `Ok(None)` when nothing is stored AND when the stored value
    /// can't be parsed as a profile object. A corrupt value is logged and
    /// otherwise ignored; it never takes the session down with it.
    pub fn get_profile(&self) -> Result<Option<ProfileOverlay>, StoreError> {
        let Some(raw) = self.backend.get(PROFILE_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<ProfileOverlay>(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                tracing::warn!(
                    key = PROFILE_KEY,
                    error = %e,
                    "stored profile is corrupt, treating as absent"
                );
                Ok(None)
            }
        }
    }

    /// Serializes `profile` to JSON and persists it.
    pub fn set_profile(
        &self,
        profile: &ProfileOverlay,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(profile)?;
        self.backend.set(PROFILE_KEY, &json)
    }

    /// Removes the stored profile.
    pub fn clear_profile(&self) -> Result<(), StoreError> {
        self.backend.remove(PROFILE_KEY)
    }

    /// Removes both entries, token first.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.clear_token()?;
        self.clear_profile()
    }
}
