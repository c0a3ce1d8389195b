//! Caller-held session tokens.
//!
//! A session is an ephemeral, signed binding of a request context to an
//! account id. The token travels with the caller (cookie equivalent); the
//! core only issues and validates it, so there is no server-side session
//! table to clean up.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use crate::account::AccountId;

/// Signed claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account ID
    pub sub: AccountId,
    /// Unique session ID
    pub jti: String,
    /// Whether the long "remember me" lifetime was requested
    pub remember: bool,
    /// Issued-at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Active session handle
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque signed token to hand back to the caller
    pub token: String,
    pub account_id: AccountId,
    pub remember: bool,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether this session has outlived its lifetime
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Issues and validates signed session tokens
#[derive(Clone)]
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_secs: i64,
    remember_secs: i64,
}

impl SessionCodec {
    /// Create a codec from the signing secret and the two configured lifetimes
    ///
    /// Lifetimes are configuration constants, never derived from request data.
    pub fn new(secret: &str, session_secs: i64, remember_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_secs,
            remember_secs,
        }
    }

    /// Issue a fresh session token for an account
    pub fn establish(&self, account_id: AccountId, remember: bool) -> AuthResult<Session> {
        let lifetime = if remember {
            self.remember_secs
        } else {
            self.session_secs
        };
        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::seconds(lifetime);

        let claims = SessionClaims {
            sub: account_id,
            jti: Uuid::new_v4().to_string(),
            remember,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::SigningFailed)?;

        Ok(Session {
            token,
            account_id,
            remember,
            issued_at,
            expires_at,
        })
    }

    /// Validate a caller-presented token and rebuild the session handle
    ///
    /// # Errors
    ///
    /// * `AuthError::Unauthorized` - Malformed, tampered, or expired token,
    ///   uniformly
    pub fn resume(&self, token: &str) -> AuthResult<Session> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::Unauthorized)?;

        Ok(Session {
            token: token.to_string(),
            account_id: data.claims.sub,
            remember: data.claims.remember,
            issued_at: DateTime::from_timestamp(data.claims.iat, 0).unwrap_or_else(Utc::now),
            expires_at: DateTime::from_timestamp(data.claims.exp, 0).unwrap_or_else(Utc::now),
        })
    }
}
