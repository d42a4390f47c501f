use ed25519_dalek::{Signature, Verifier, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

use crate::error::AppError;

/// Checks the Ed25519 signature the chat platform attaches to every interaction.
///
/// The signed message is the timestamp header followed by the raw request body.
#[derive(Clone, Debug)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    pub fn from_hex(public_key_hex: &str) -> Result<Self, AppError> {
        let bytes = hex::decode(public_key_hex.trim())
            .map_err(|e| AppError::ConfigError(format!("PUBLIC_KEY is not hex: {}", e)))?;

        let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes
            .try_into()
            .map_err(|_| AppError::ConfigError("PUBLIC_KEY must be 32 bytes".into()))?;

        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| AppError::ConfigError(format!("PUBLIC_KEY is not a valid key: {}", e)))?;

        Ok(Self { key })
    }

    /// Missing or undecodable headers count as a failed verification.
    pub fn verify(&self, signature_hex: Option<&str>, timestamp: Option<&str>, body: &[u8]) -> bool {
        let (Some(signature_hex), Some(timestamp)) = (signature_hex, timestamp) else {
            return false;
        };

        let Ok(signature_bytes) = hex::decode(signature_hex) else {
            return false;
        };
        let Ok(signature_bytes) = <[u8; SIGNATURE_LENGTH]>::try_from(signature_bytes) else {
            return false;
        };
        let signature = Signature::from_bytes(&signature_bytes);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key.verify(&message, &signature).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    fn verifier() -> SignatureVerifier {
        let public_hex = hex::encode(signing_key().verifying_key().to_bytes());
        SignatureVerifier::from_hex(&public_hex).unwrap()
    }

    fn sign(timestamp: &str, body: &[u8]) -> String {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        hex::encode(signing_key().sign(&message).to_bytes())
    }

    #[test]
    fn accepts_matching_signature() {
        let body = br#"{"type":1}"#;
        let signature = sign("1700000000", body);

        assert!(verifier().verify(Some(&signature), Some("1700000000"), body));
    }

    #[test]
    fn rejects_tampered_body_and_timestamp() {
        let body = br#"{"type":1}"#;
        let signature = sign("1700000000", body);

        assert!(!verifier().verify(Some(&signature), Some("1700000000"), br#"{"type":2}"#));
        assert!(!verifier().verify(Some(&signature), Some("1700000001"), body));
    }

    #[test]
    fn missing_headers_fail_without_panicking() {
        let body = br#"{"type":1}"#;
        let signature = sign("1700000000", body);

        assert!(!verifier().verify(None, Some("1700000000"), body));
        assert!(!verifier().verify(Some(&signature), None, body));
        assert!(!verifier().verify(None, None, body));
    }

    #[test]
    fn malformed_signature_fails() {
        assert!(!verifier().verify(Some("zz"), Some("1"), b"{}"));
        assert!(!verifier().verify(Some("abcd"), Some("1"), b"{}"));
    }

    #[test]
    fn rejects_bad_public_keys() {
        assert!(SignatureVerifier::from_hex("not hex").is_err());
        assert!(SignatureVerifier::from_hex("abcd").is_err());
    }
}
