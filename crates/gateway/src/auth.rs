//! Token verification boundary.
//!
//! Token *issuance* is another service's job; this module only resolves a
//! presented bearer token to an [`Owner`] via a single synchronous call
//! returning a tagged success/failure result.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use fd_domain::Owner;

/// Why a token was rejected. Callers map every variant to the same
/// "invalid or expired token" response; the distinction is for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Malformed,
    BadSignature,
}

/// Resolves a bearer token to the owner it authenticates.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Owner, TokenError>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// HMAC verifier
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Verifies `<owner>.<hex hmac-sha256 tag>` tokens against a shared
/// secret. The tag covers the owner identifier; comparison is constant
/// time.
pub struct HmacTokenVerifier {
    secret: Vec<u8>,
}

impl HmacTokenVerifier {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }
}

impl TokenVerifier for HmacTokenVerifier {
    fn verify(&self, token: &str) -> Result<Owner, TokenError> {
        let (owner, tag_hex) = token.rsplit_once('.').ok_or(TokenError::Malformed)?;
        if owner.is_empty() {
            return Err(TokenError::Malformed);
        }
        let presented = hex::decode(tag_hex).map_err(|_| TokenError::Malformed)?;

        let mut mac = Hmac::<Sha256>::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any size");
        mac.update(owner.as_bytes());
        let expected = mac.finalize().into_bytes();

        if bool::from(expected.as_slice().ct_eq(&presented)) {
            Ok(Owner::new(owner))
        } else {
            Err(TokenError::BadSignature)
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Dev verifier
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Treats the raw bearer token as the owner identifier. Only wired up
/// when no secret is configured; bootstrap logs a loud warning.
pub struct DevTokenVerifier;

impl TokenVerifier for DevTokenVerifier {
    fn verify(&self, token: &str) -> Result<Owner, TokenError> {
        if token.is_empty() {
            return Err(TokenError::Malformed);
        }
        Ok(Owner::new(token))
    }
}
