//! Signature verification for identity-provider webhook events.
//!
//! Events arrive with three headers: a message id, a unix-seconds
//! timestamp, and a signature header holding one or more
//! `v1,<base64-hmac>` candidates. The signed content is
//! `"{id}.{timestamp}.{body}"`, keyed with the base64 portion of a
//! `whsec_`-prefixed shared secret. Comparison is constant-time via
//! [`hmac::Mac::verify_slice`].

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed skew between the timestamp header and server time.
pub const TIMESTAMP_TOLERANCE_SECS: i64 = 5 * 60;

/// Prefix carried by shared secrets as issued by the identity provider.
const SECRET_PREFIX: &str = "whsec_";

/// Signature scheme version tag expected in the signature header.
const SIGNATURE_VERSION: &str = "v1";

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Malformed signing secret")]
    MalformedSecret,

    #[error("Malformed timestamp header")]
    MalformedTimestamp,

    #[error("Timestamp outside the tolerance window")]
    StaleTimestamp,

    #[error("No matching signature")]
    SignatureMismatch,
}

/// A parsed webhook signing secret.
#[derive(Clone)]
pub struct SigningSecret {
    key: Vec<u8>,
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret(..)")
    }
}

impl SigningSecret {
    /// Parse a `whsec_<base64>` secret (the prefix is optional).
    pub fn parse(raw: &str) -> Result<Self, WebhookError> {
        let encoded = raw.strip_prefix(SECRET_PREFIX).unwrap_or(raw);
        let key = BASE64
            .decode(encoded)
            .map_err(|_| WebhookError::MalformedSecret)?;
        if key.is_empty() {
            return Err(WebhookError::MalformedSecret);
        }
        Ok(Self { key })
    }

    /// Compute the `v1,<base64>` signature for a message.
    ///
    /// Used by the test harness to forge valid requests; the server side
    /// only ever calls [`SigningSecret::verify`].
    pub fn sign(&self, msg_id: &str, timestamp: &str, payload: &[u8]) -> String {
        let mac = self.mac(msg_id, timestamp, payload);
        let digest = BASE64.encode(mac.finalize().into_bytes());
        format!("{SIGNATURE_VERSION},{digest}")
    }

    /// Verify a signature header against the signed content.
    ///
    /// The timestamp must be within [`TIMESTAMP_TOLERANCE_SECS`] of
    /// `now` (unix seconds). The header may contain several
    /// space-separated candidates; verification succeeds if any
    /// `v1`-tagged candidate matches.
    pub fn verify(
        &self,
        msg_id: &str,
        timestamp: &str,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<(), WebhookError> {
        let ts: i64 = timestamp
            .parse()
            .map_err(|_| WebhookError::MalformedTimestamp)?;
        if (now - ts).abs() > TIMESTAMP_TOLERANCE_SECS {
            return Err(WebhookError::StaleTimestamp);
        }

        let version_prefix = format!("{SIGNATURE_VERSION},");
        for candidate in signature_header.split_whitespace() {
            let Some(encoded) = candidate.strip_prefix(version_prefix.as_str()) else {
                continue;
            };
            let Ok(sig) = BASE64.decode(encoded) else {
                continue;
            };
            let mac = self.mac(msg_id, timestamp, payload);
            if mac.verify_slice(&sig).is_ok() {
                return Ok(());
            }
        }
        Err(WebhookError::SignatureMismatch)
    }

    fn mac(&self, msg_id: &str, timestamp: &str, payload: &[u8]) -> HmacSha256 {
        // HMAC-SHA256 accepts keys of any length, so this cannot fail.
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(msg_id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_secret() -> SigningSecret {
        // base64("very-secret-signing-key")
        SigningSecret::parse("whsec_dmVyeS1zZWNyZXQtc2lnbmluZy1rZXk=")
            .expect("test secret should parse")
    }

    #[test]
    fn sign_then_verify_roundtrip() {
        let secret = test_secret();
        let payload = br#"{"type":"user.created","data":{"id":"user_123"}}"#;
        let sig = secret.sign("msg_1", "1700000000", payload);

        secret
            .verify("msg_1", "1700000000", payload, &sig, 1_700_000_000)
            .expect("freshly signed payload must verify");
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let secret = test_secret();
        let sig = secret.sign("msg_1", "1700000000", b"original");

        let result = secret.verify("msg_1", "1700000000", b"tampered", &sig, 1_700_000_000);
        assert!(matches!(result, Err(WebhookError::SignatureMismatch)));
    }

    #[test]
    fn different_message_id_is_rejected() {
        let secret = test_secret();
        let sig = secret.sign("msg_1", "1700000000", b"payload");

        let result = secret.verify("msg_2", "1700000000", b"payload", &sig, 1_700_000_000);
        assert!(matches!(result, Err(WebhookError::SignatureMismatch)));
    }

    #[test]
    fn stale_timestamp_is_rejected() {
        let secret = test_secret();
        let sig = secret.sign("msg_1", "1700000000", b"payload");

        // Ten minutes past the header timestamp.
        let result = secret.verify(
            "msg_1",
            "1700000000",
            b"payload",
            &sig,
            1_700_000_000 + 600,
        );
        assert!(matches!(result, Err(WebhookError::StaleTimestamp)));
    }

    #[test]
    fn timestamp_skew_within_tolerance_is_accepted() {
        let secret = test_secret();
        let sig = secret.sign("msg_1", "1700000000", b"payload");

        secret
            .verify(
                "msg_1",
                "1700000000",
                b"payload",
                &sig,
                1_700_000_000 + TIMESTAMP_TOLERANCE_SECS,
            )
            .expect("skew at the tolerance boundary must verify");
    }

    #[test]
    fn non_numeric_timestamp_is_rejected() {
        let secret = test_secret();
        let result = secret.verify("msg_1", "not-a-number", b"payload", "v1,AAAA", 0);
        assert!(matches!(result, Err(WebhookError::MalformedTimestamp)));
    }

    #[test]
    fn any_valid_candidate_in_header_is_enough() {
        let secret = test_secret();
        let good = secret.sign("msg_1", "1700000000", b"payload");
        let header = format!("v1,Z2FyYmFnZQ== {good} v2,ignored");

        secret
            .verify("msg_1", "1700000000", b"payload", &header, 1_700_000_000)
            .expect("a single matching candidate must verify");
    }

    #[test]
    fn secret_prefix_is_optional() {
        let with = SigningSecret::parse("whsec_dGVzdA==").expect("prefixed secret parses");
        let without = SigningSecret::parse("dGVzdA==").expect("bare secret parses");

        let sig = with.sign("m", "0", b"x");
        without
            .verify("m", "0", b"x", &sig, 0)
            .expect("both forms must derive the same key");
    }

    #[test]
    fn garbage_secret_is_rejected() {
        assert!(matches!(
            SigningSecret::parse("whsec_!!not-base64!!"),
            Err(WebhookError::MalformedSecret)
        ));
        assert!(matches!(
            SigningSecret::parse("whsec_"),
            Err(WebhookError::MalformedSecret)
        ));
    }
}
