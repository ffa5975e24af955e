//! The locally-editable profile fields.

use serde::{Deserialize, Serialize};

/// Profile fields the token doesn't carry, kept by the client.
///
/// Stored as JSON with the front-end's camelCase keys:
///
/// ```json
/// { "firstName": "Jane", "lastName": "Doe", "profilePicture": "https://…" }
/// ```
///
/// `#[serde(default)]` on the struct means any key missing from the stored
/// JSON comes back as an empty string. Keys of the wrong type are still an
/// error; [`SessionStore::get_profile`](crate::SessionStore::get_profile)
/// treats that as "no profile".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileOverlay {
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: String,
}

impl ProfileOverlay {
    /// Creates an overlay from its three fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        profile_picture: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            profile_picture: profile_picture.into(),
        }
    }
}
