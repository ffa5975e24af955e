//! Codec trait and the JWT implementation.
//!
//! A "codec" here converts between a token string and [`Claims`]. The
//! session layer doesn't care what format the server uses; it only needs
//! something that implements [`TokenCodec`]. Tests and alternative
//! backends can swap in their own implementation without touching the
//! session manager.

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

use crate::{Claims, TokenError};

/// The marker some servers put in front of the token in the
/// `Authorization` header. Matched case-sensitively, including the space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Removes one leading [`BEARER_PREFIX`] from an authorization value.
///
/// Anything else (a bare token, `"bearer xyz"`, an empty string) is
/// returned unchanged.
///
/// ```rust
/// use clientele_token::strip_bearer_prefix;
///
/// assert_eq!(strip_bearer_prefix("Bearer xyz123"), "xyz123");
/// assert_eq!(strip_bearer_prefix("xyz123"), "xyz123");
/// ```
pub fn strip_bearer_prefix(value: &str) -> &str {
    value.strip_prefix(BEARER_PREFIX).unwrap_or(value)
}

/// Converts between token strings and [`Claims`].
///
/// ## Trait bounds
///
/// - `Send + Sync` → a codec can be shared between tasks.
/// - `'static` → it owns everything it needs; the session manager keeps
///   it for its whole lifetime.
pub trait TokenCodec: Send + Sync + 'static {
    /// Parses a token string into claims.
    ///
    /// # Errors
    /// Returns [`TokenError::Malformed`] if the token lacks the expected
    /// structure or its payload doesn't parse into [`Claims`].
    fn decode(&self, token: &str) -> Result<Claims, TokenError>;

    /// Produces a token carrying `claims`.
    ///
    /// Real tokens come from the server; this exists so fixtures and
    /// in-process auth services can mint tokens the codec accepts.
    ///
    /// # Errors
    /// Returns [`TokenError::Encode`] if the claims can't be serialized.
    fn encode(&self, claims: &Claims) -> Result<String, TokenError>;

    /// Returns `true` if the token is no longer valid at `now_ms`
    /// (milliseconds since the Unix epoch).
    ///
    /// Token times are in seconds, clocks report milliseconds, so the
    /// comparison is `now_ms >= exp * 1000`. A token is already expired
    /// AT its expiration instant, not one millisecond after.
    fn is_expired(&self, claims: &Claims, now_ms: u64) -> bool {
        now_ms >= claims.expires_at_millis()
    }
}

// ---------------------------------------------------------------------------
// JwtCodec
// ---------------------------------------------------------------------------

/// base64url, tolerant of padding on decode, unpadded on encode (RFC 7515).
const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Header written by [`JwtCodec::encode`]. `alg: none` because nothing is
/// signed on the client.
const UNSIGNED_HEADER: &str = r#"{"alg":"none","typ":"JWT"}"#;

/// A [`TokenCodec`] for compact JWTs: `header.payload.signature`.
///
/// Only the payload segment is read. The header and signature must be
/// present as segments (so `a.b` is rejected) but their contents are not
/// inspected; the signature may be empty.
///
/// ## Example
///
/// ```rust
/// use clientele_token::{Claims, JwtCodec, TokenCodec};
///
/// let codec = JwtCodec;
/// let claims = Claims::new("a@b.com", vec!["ROLE_USER".into()], 1_700_000_000);
///
/// let token = codec.encode(&claims).unwrap();
/// assert_eq!(codec.decode(&token).unwrap(), claims);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtCodec;

impl TokenCodec for JwtCodec {
    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(TokenError::Malformed(format!(
                "expected 3 segments separated by '.', got {}",
                segments.len()
            )));
        }

        let payload = segments[1];
        if payload.is_empty() {
            return Err(TokenError::Malformed("empty payload segment".into()));
        }

        let bytes = SEGMENT_ENGINE.decode(payload).map_err(|e| {
            TokenError::Malformed(format!("payload is not base64url: {e}"))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            TokenError::Malformed(format!("payload is not valid claims: {e}"))
        })
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let payload =
            serde_json::to_vec(claims).map_err(TokenError::Encode)?;

        Ok(format!(
            "{}.{}.",
            SEGMENT_ENGINE.encode(UNSIGNED_HEADER),
            SEGMENT_ENGINE.encode(payload)
        ))
    }
}
