//! Session tokens - HS256 JWTs naming the user they were issued to.
//!
//! Tokens carry no role; the access guard reloads the user on every
//! request and checks the live role instead.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppResult;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration: Duration,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret_bytes()),
            expiration: Duration::hours(config.jwt_expiration_hours),
        }
    }

    /// Sign a token for the given user, expiring after the configured duration.
    pub fn issue(&self, user_id: Uuid) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + self.expiration).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Check signature and expiry, returning the user id the token names.
    pub fn verify(&self, token: &str) -> AppResult<Uuid> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims.sub)
    }
}
