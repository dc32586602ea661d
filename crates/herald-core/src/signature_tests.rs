//! Tests for [`SignatureVerifier`].
//!
//! Covers HMAC-SHA256 acceptance and rejection, open-mode behaviour, the
//! case-sensitive hex comparison, and secret redaction.

use super::*;

// ============================================================================
// Helpers
// ============================================================================

/// Compute the lowercase hex HMAC-SHA256 of `payload` keyed by `secret`,
/// matching the digest Linear puts in the `linear-signature` header.
fn sign(secret: &str, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

// ============================================================================
// verify tests
// ============================================================================

mod verify_tests {
    use super::*;

    /// The digest of the exact body bytes must be accepted.
    #[test]
    fn test_valid_signature_accepted() {
        let secret = "linear-signing-secret";
        let body = br#"{"action":"create","type":"Issue","data":{}}"#;
        let verifier = SignatureVerifier::new(Some(secret.to_string()));

        assert!(verifier.verify(body, &sign(secret, body)));
    }

    /// A digest computed with a different secret must be rejected.
    #[test]
    fn test_wrong_secret_rejected() {
        let body = b"payload bytes";
        let verifier = SignatureVerifier::new(Some("right-secret".to_string()));

        assert!(!verifier.verify(body, &sign("wrong-secret", body)));
    }

    /// Any single-byte change to the body must invalidate the signature.
    #[test]
    fn test_mutated_body_rejected() {
        let secret = "mutation-secret";
        let body = br#"{"action":"create","type":"Issue","data":{"priority":1}}"#;
        let signature = sign(secret, body);
        let verifier = SignatureVerifier::new(Some(secret.to_string()));

        for index in 0..body.len() {
            let mut mutated = body.to_vec();
            mutated[index] ^= 0x01;
            assert!(
                !verifier.verify(&mutated, &signature),
                "mutation at byte {} must be rejected",
                index
            );
        }
    }

    /// The hex comparison is case-sensitive: an uppercase digest fails even
    /// though it decodes to the same bytes.
    #[test]
    fn test_uppercase_hex_rejected() {
        let secret = "case-secret";
        let body = b"case sensitivity";
        let verifier = SignatureVerifier::new(Some(secret.to_string()));

        assert!(!verifier.verify(body, &sign(secret, body).to_uppercase()));
    }

    /// An empty body signs and verifies like any other payload.
    #[test]
    fn test_empty_body_verifies() {
        let secret = "empty-body-secret";
        let verifier = SignatureVerifier::new(Some(secret.to_string()));

        assert!(verifier.verify(b"", &sign(secret, b"")));
        assert!(!verifier.verify(b"", "0000"));
    }

    /// A signature of the wrong length must be rejected, not panic.
    #[test]
    fn test_wrong_length_signature_rejected() {
        let verifier = SignatureVerifier::new(Some("secret".to_string()));

        assert!(!verifier.verify(b"body", ""));
        assert!(!verifier.verify(b"body", "abc123"));
    }
}

// ============================================================================
// Open-mode tests
// ============================================================================

mod open_mode_tests {
    use super::*;

    /// Without a secret, any signature value passes.
    #[test]
    fn test_no_secret_accepts_anything() {
        let verifier = SignatureVerifier::new(None);

        assert!(verifier.is_open());
        assert!(verifier.verify(b"body", "garbage"));
        assert!(verifier.verify(b"body", ""));
    }

    /// An empty secret string is normalized to open mode.
    #[test]
    fn test_empty_secret_is_open_mode() {
        let verifier = SignatureVerifier::new(Some(String::new()));

        assert!(verifier.is_open());
        assert!(verifier.verify(b"body", "anything"));
    }

    /// A configured secret switches the verifier to closed mode.
    #[test]
    fn test_configured_secret_is_closed_mode() {
        let verifier = SignatureVerifier::new(Some("secret".to_string()));

        assert!(!verifier.is_open());
    }
}

// ============================================================================
// Debug formatting tests
// ============================================================================

mod debug_formatting_tests {
    use super::*;

    /// The `Debug` output must not reveal the secret.
    #[test]
    fn test_debug_redacts_secret() {
        let verifier = SignatureVerifier::new(Some("top-secret-value".to_string()));
        let debug_str = format!("{:?}", verifier);

        assert!(
            !debug_str.contains("top-secret-value"),
            "secret must not appear in debug output; got: {}",
            debug_str
        );
        assert!(
            debug_str.contains("<REDACTED>"),
            "debug output should contain <REDACTED>; got: {}",
            debug_str
        );
    }
}
