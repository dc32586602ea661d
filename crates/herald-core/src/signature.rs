//! Inbound signature verification.
//!
//! Linear signs each delivery with HMAC-SHA256 over the raw request body,
//! keyed by a shared secret, and sends the lowercase hex digest in the
//! `linear-signature` header. [`SignatureVerifier`] recomputes the digest
//! and compares it to the header value.
//!
//! # Open mode
//!
//! When no secret is configured the verifier accepts every signature value
//! without computing anything. This is an explicit insecure fallback for
//! local development; construction logs a `WARN` so operators notice before
//! it reaches production.
//!
//! # Raw body requirement
//!
//! Verification must run over the exact bytes received on the wire. Parsing
//! the JSON and re-serializing it can reorder keys or change whitespace and
//! will break the digest, so the HTTP layer hands the untouched body to
//! [`SignatureVerifier::verify`] before any parsing happens.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Verifies webhook signatures against a shared secret.
pub struct SignatureVerifier {
    secret: Option<String>,
}

impl SignatureVerifier {
    /// Construct a verifier from an optional secret.
    ///
    /// An empty secret is treated the same as an absent one: open mode.
    /// Emits a `WARN` when running open.
    pub fn new(secret: Option<String>) -> Self {
        let secret = secret.filter(|value| !value.is_empty());
        if secret.is_none() {
            warn!("No signing secret configured; accepting all requests without verification");
        }
        Self { secret }
    }

    /// Whether the verifier is running without a secret.
    pub fn is_open(&self) -> bool {
        self.secret.is_none()
    }

    /// Check `signature` against the HMAC-SHA256 digest of `raw_body`.
    ///
    /// The comparison is an exact, case-sensitive match of the lowercase hex
    /// digest, performed in constant time. In open mode every signature is
    /// accepted. The caller is responsible for rejecting requests that carry
    /// no signature header at all; that check applies in open mode too.
    pub fn verify(&self, raw_body: &[u8], signature: &str) -> bool {
        let Some(secret) = self.secret.as_deref() else {
            return true;
        };

        // Hmac accepts keys of any length; the Err arm is unreachable.
        let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
            return false;
        };
        mac.update(raw_body);
        let expected = hex::encode(mac.finalize().into_bytes());

        expected.as_bytes().ct_eq(signature.as_bytes()).into()
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &self.secret.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
