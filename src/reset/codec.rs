//! Signed reset-token issuance and verification.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::auth::{AuthError, AuthResult};

/// Signed payload of a reset token
///
/// Deliberately carries no expiry claim: the validity window belongs to the
/// verifier's configuration, so a token holder cannot extend it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResetClaims {
    /// Account ID the token is bound to
    sub: AccountId,
    /// Issued-at timestamp, trusted only after the signature checks out
    iat: i64,
}

/// Issues and verifies stateless, expiring password-reset tokens
///
/// A token is an opaque URL-safe string encoding `{account_id, issued_at}`
/// under an HMAC-SHA256 signature. Nothing is persisted: validity is purely a
/// function of signature and time, so an outstanding token cannot be revoked
/// early except by rotating the signing secret, which invalidates all
/// outstanding tokens at once.
#[derive(Clone)]
pub struct ResetTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_secs: i64,
}

impl ResetTokenCodec {
    /// Create a codec from the signing secret and default validity window
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_secs,
        }
    }

    /// Issue a token bound to one account, stamped with the current time
    pub fn issue(&self, account_id: AccountId) -> AuthResult<String> {
        let claims = ResetClaims {
            sub: account_id,
            iat: Utc::now().timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::SigningFailed)
    }

    /// Verify a token against the configured validity window
    pub fn verify(&self, token: &str) -> AuthResult<AccountId> {
        self.verify_within(token, self.expiry_secs)
    }

    /// Verify a token against an explicit validity window in seconds
    ///
    /// Checks run in order: parse, signature (timing-safe), then the window
    /// against the signed `iat`. Every rejection collapses to the single
    /// `InvalidOrExpiredToken` result so a caller cannot distinguish a bad
    /// signature from an expired or malformed token. The verifying process's
    /// clock is authoritative; a token apparently from the future is valid.
    pub fn verify_within(&self, token: &str, window_secs: i64) -> AuthResult<AccountId> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<ResetClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::InvalidOrExpiredToken)?;

        let elapsed = Utc::now().timestamp() - data.claims.iat;
        if window_secs <= 0 || elapsed > window_secs {
            return Err(AuthError::InvalidOrExpiredToken);
        }

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: i64 = 1800;

    fn codec() -> ResetTokenCodec {
        ResetTokenCodec::new("reset-test-secret", WINDOW)
    }

    fn invalid(result: AuthResult<AccountId>) -> bool {
        matches!(result, Err(AuthError::InvalidOrExpiredToken))
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let codec = codec();
        let token = codec.issue(7).unwrap();

        assert_eq!(codec.verify(&token).unwrap(), 7);
    }

    #[test]
    fn test_token_is_url_safe() {
        let codec = codec();
        let token = codec.issue(7).unwrap();

        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')),
            "Token must survive a URL path segment unescaped: {token}"
        );
    }

    #[test]
    fn test_zero_window_is_instantly_elapsed() {
        let codec = codec();
        let token = codec.issue(7).unwrap();

        assert!(invalid(codec.verify_within(&token, 0)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let codec = codec();
        let stale = ResetClaims {
            sub: 7,
            iat: Utc::now().timestamp() - (WINDOW + 1),
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(b"reset-test-secret"),
        )
        .unwrap();

        assert!(invalid(codec.verify(&token)));
    }

    #[test]
    fn test_future_token_tolerated() {
        // Clock skew is not compensated; an issued-at in the future is valid
        let codec = codec();
        let future = ResetClaims {
            sub: 7,
            iat: Utc::now().timestamp() + 600,
        };
        let token = encode(
            &Header::default(),
            &future,
            &EncodingKey::from_secret(b"reset-test-secret"),
        )
        .unwrap();

        assert_eq!(codec.verify(&token).unwrap(), 7);
    }

    #[test]
    fn test_tampered_payload_uniformly_invalid() {
        let codec = codec();
        let token = codec.issue(7).unwrap();

        // Flip one character inside the payload segment
        let payload_start = token.find('.').unwrap() + 1;
        let mut bytes = token.clone().into_bytes();
        bytes[payload_start] = if bytes[payload_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(invalid(codec.verify(&tampered)));
    }

    #[test]
    fn test_malformed_tokens_uniformly_invalid() {
        let codec = codec();

        assert!(invalid(codec.verify("")));
        assert!(invalid(codec.verify("no-separators-here")));
        assert!(invalid(codec.verify("a.b.c")));
        assert!(invalid(codec.verify("..")));
    }

    #[test]
    fn test_secret_rotation_invalidates_outstanding_tokens() {
        let old = codec();
        let token = old.issue(7).unwrap();
        assert_eq!(old.verify(&token).unwrap(), 7);

        let rotated = ResetTokenCodec::new("rotated-secret", WINDOW);
        assert!(invalid(rotated.verify(&token)));
    }

    #[test]
    fn test_tokens_bind_to_exactly_one_account() {
        let codec = codec();
        let for_seven = codec.issue(7).unwrap();
        let for_eight = codec.issue(8).unwrap();

        assert_eq!(codec.verify(&for_seven).unwrap(), 7);
        assert_eq!(codec.verify(&for_eight).unwrap(), 8);
    }
}
