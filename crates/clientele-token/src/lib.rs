//! Bearer token parsing for Clientele.
//!
//! This crate turns the opaque credential string the server hands out at
//! login into structured data the rest of the client can reason about:
//!
//! - **Claims** ([`Claims`]): who the token is for, what roles it
//!   grants, and when it stops being valid.
//! - **Codec** ([`TokenCodec`] trait, [`JwtCodec`]): how a token string
//!   is split, base64-decoded, and parsed into claims.
//! - **Errors** ([`TokenError`]): what can go wrong while decoding.
//!
//! # Architecture
//!
//! The token layer is pure: no storage, no clock, no network. It sits
//! underneath the session layer, which decides what to DO with a token
//! that is malformed or expired.
//!
//! ```text
//! Store (raw strings) → Token (Claims) → Session (who is signed in)
//! ```
//!
//! Signatures are NOT verified. The client trusts the server that issued
//! the token; the server verifies it on every request anyway.

mod claims;
mod codec;
mod error;

pub use claims::Claims;
pub use codec::{BEARER_PREFIX, JwtCodec, TokenCodec, strip_bearer_prefix};
pub use error::TokenError;
