//! Unified error type for Clientele.

use clientele_session::SessionError;
use clientele_store::StoreError;
use clientele_token::TokenError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `clientele` facade, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant lets `?` convert sub-crate errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum ClienteleError {
    /// A token-level error (malformed token, encode failure).
    #[error(transparent)]
    Token(#[from] TokenError),

    /// A storage-level error (file I/O, serialization).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A session-level error (missing token, auth service failure).
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_error() {
        let err = TokenError::Malformed("bad".into());
        let clientele_err: ClienteleError = err.into();
        assert!(matches!(clientele_err, ClienteleError::Token(_)));
        assert!(clientele_err.to_string().contains("bad"));
    }

    #[test]
    fn test_from_store_error() {
        let err = StoreError::Io(std::io::Error::other("disk full"));
        let clientele_err: ClienteleError = err.into();
        assert!(matches!(clientele_err, ClienteleError::Store(_)));
        assert!(clientele_err.to_string().contains("disk full"));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::MissingToken;
        let clientele_err: ClienteleError = err.into();
        assert!(matches!(clientele_err, ClienteleError::Session(_)));
        assert_eq!(
            clientele_err.to_string(),
            "login response did not include a bearer token"
        );
    }
}
