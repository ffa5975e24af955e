//! Error types for the token layer.
//!
//! Each crate in Clientele defines its own error enum. When you see a
//! `TokenError`, you know the problem is the shape of a token string, not
//! storage or the network.

/// Errors that can occur while encoding or decoding a bearer token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token could not be turned into [`Claims`](crate::Claims).
    ///
    /// Covers every way a token can be unreadable: wrong number of
    /// segments, a payload that isn't base64url, a payload that isn't
    /// JSON, or JSON that is missing a required claim (or has it with the
    /// wrong type). The string describes which one.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Serializing claims into a token payload failed.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),
}
