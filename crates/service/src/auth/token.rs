use std::str::FromStr;

use chrono::{Duration, Utc};
use configs::AuthSettings;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::domain::{AccessToken, Identity};
use super::errors::AuthError;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    sub: &'a str,
    id: i32,
    exp: i64,
}

/// Claims as read back; identity claims may be missing in foreign tokens.
#[derive(Debug, Deserialize)]
struct DecodedClaims {
    sub: Option<String>,
    id: Option<i32>,
}

/// Stateless issuer/verifier of HMAC-signed bearer tokens.
pub struct TokenService {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(settings: &AuthSettings) -> Result<Self, AuthError> {
        let algorithm = Algorithm::from_str(settings.algorithm.trim())
            .map_err(|e| AuthError::TokenError(format!("unsupported algorithm {}: {e}", settings.algorithm)))?;
        Self::from_secret(&settings.secret_key, algorithm, Duration::minutes(settings.access_token_expire_minutes))
    }

    pub fn from_secret(secret: &str, algorithm: Algorithm, ttl: Duration) -> Result<Self, AuthError> {
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(AuthError::TokenError(format!("{algorithm:?} is not an HMAC algorithm")));
        }
        if secret.is_empty() {
            return Err(AuthError::TokenError("secret key is empty".into()));
        }
        Ok(Self {
            algorithm,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration { self.ttl }

    /// Issue a token with the configured lifetime.
    pub fn issue(&self, user_id: i32, username: &str) -> Result<AccessToken, AuthError> {
        self.issue_with_ttl(user_id, username, self.ttl)
    }

    #[instrument(skip(self, ttl))]
    pub fn issue_with_ttl(&self, user_id: i32, username: &str, ttl: Duration) -> Result<AccessToken, AuthError> {
        let exp = (Utc::now() + ttl).timestamp();
        let claims = Claims { sub: username, id: user_id, exp };
        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        debug!(exp, "access token issued");
        Ok(AccessToken { access_token: token, token_type: "bearer".into(), expires_at: exp })
    }

    /// Validate signature, algorithm and expiry, then require both identity claims.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        let data = decode::<DecodedClaims>(token, &self.decoding, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        match (data.claims.sub, data.claims.id) {
            (Some(username), Some(user_id)) if !username.is_empty() => Ok(Identity { user_id, username }),
            _ => Err(AuthError::InvalidToken("token is missing identity claims".into())),
        }
    }
}
