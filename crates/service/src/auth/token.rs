//! HS256 access tokens.
//!
//! A token is self-contained: validity depends only on the signature, the
//! issuer/audience and `exp`. There is no server-side revocation list, so any
//! node holding the shared key can verify independently.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::domain::AuthUser;
use super::errors::AuthError;

pub const DEFAULT_VALIDITY_MINUTES: i64 = 5 * 60;

/// Keys shorter than this still work but are logged as weak.
const RECOMMENDED_KEY_LEN: usize = 32;

/// Claim set carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Principal email
    pub sub: String,
    /// Random per-token id, for audit correlation
    pub jti: String,
    /// Principal id
    pub nameid: String,
    #[serde(default)]
    pub role: Vec<String>,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies access tokens with one process-wide symmetric key.
#[derive(Clone)]
pub struct TokenIssuer {
    issuer: String,
    validity: Duration,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("validity", &self.validity)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Build an issuer. An empty key or issuer, or a non-positive validity, is a
    /// `Configuration` error; callers treat it as fatal at startup.
    pub fn new(issuer: impl Into<String>, key: &[u8], validity: Duration) -> Result<Self, AuthError> {
        let issuer = issuer.into();
        if key.is_empty() {
            return Err(AuthError::Configuration("signing key is absent or empty".into()));
        }
        if issuer.trim().is_empty() {
            return Err(AuthError::Configuration("token issuer is empty".into()));
        }
        if validity <= Duration::zero() {
            return Err(AuthError::Configuration("token validity must be positive".into()));
        }
        if Utc::now().checked_add_signed(validity).is_none() {
            return Err(AuthError::Configuration("token validity is out of range".into()));
        }
        if key.len() < RECOMMENDED_KEY_LEN {
            warn!(key_len = key.len(), recommended = RECOMMENDED_KEY_LEN, "signing key is shorter than recommended");
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_audience(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        Ok(Self {
            issuer,
            validity,
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            validation,
        })
    }

    pub fn issuer(&self) -> &str { &self.issuer }

    pub fn validity(&self) -> Duration { self.validity }

    /// Mint a token for `user` carrying one role claim per entry in `roles`.
    pub fn issue(&self, user: &AuthUser, roles: &[String]) -> Result<AccessToken, AuthError> {
        self.issue_at(user, roles, Utc::now())
    }

    /// Same as [`issue`](Self::issue) with an explicit issuance instant.
    pub fn issue_at(&self, user: &AuthUser, roles: &[String], issued_at: DateTime<Utc>) -> Result<AccessToken, AuthError> {
        debug_assert!(!user.email.is_empty(), "token subject requires an email");
        let expires_at = issued_at
            .checked_add_signed(self.validity)
            .ok_or_else(|| AuthError::TokenError("token expiry is out of range".into()))?;
        let token_id = Uuid::new_v4().to_string();
        let claims = Claims {
            sub: user.email.clone(),
            jti: token_id.clone(),
            nameid: user.id.to_string(),
            role: roles.to_vec(),
            iss: self.issuer.clone(),
            aud: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        debug!(user_id = %user.id, token_id = %token_id, roles = roles.len(), "token issued");
        Ok(AccessToken { token, token_id, expires_at })
    }

    /// Check signature, algorithm, issuer/audience and expiry; return the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }
}
