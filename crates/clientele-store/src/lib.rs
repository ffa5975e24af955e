//! Client-side session storage for Clientele.
//!
//! Provides the [`KeyValueStore`] trait that abstracts over where the
//! client keeps its state (in memory, a file on disk, a browser's local
//! storage), and [`SessionStore`], the typed view the session layer uses
//! on top of it.
//!
//! # Layout
//!
//! Two independent string-keyed entries:
//!
//! | Key | Contents |
//! |---|---|
//! | [`TOKEN_KEY`] (`access_token`) | raw bearer token, no prefix |
//! | [`PROFILE_KEY`] (`customer_profile`) | JSON `{firstName, lastName, profilePicture}` |
//!
//! There is no transaction spanning both keys. A crash between two writes
//! can leave one updated and the other stale; readers must cope.

mod backend;
mod error;
mod profile;
mod session_store;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::StoreError;
pub use profile::ProfileOverlay;
pub use session_store::{PROFILE_KEY, SessionStore, TOKEN_KEY};
