//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_COOKIE_EXPIRE_DAYS, DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS,
    DEFAULT_PUBLIC_BASE_URL, DEFAULT_UPLOAD_DIR, MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub cookie_expire_days: i64,
    pub upload_dir: String,
    pub public_base_url: String,
    pub frontend_origins: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("cookie_expire_days", &self.cookie_expire_days)
            .field("upload_dir", &self.upload_dir)
            .field("public_base_url", &self.public_base_url)
            .field("frontend_origins", &self.frontend_origins)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        let frontend_origins = ["FRONTEND_URL_ONE", "FRONTEND_URL_TWO"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_expiration_hours: parse_or("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS),
            cookie_expire_days: parse_or("COOKIE_EXPIRE_DAYS", DEFAULT_COOKIE_EXPIRE_DAYS),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string()),
            frontend_origins,
        }
    }

    /// Build a configuration with an explicit secret and defaults elsewhere.
    ///
    /// Used by tests and tooling that must not read the process environment.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: jwt_secret.into(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            cookie_expire_days: DEFAULT_COOKIE_EXPIRE_DAYS,
            upload_dir: DEFAULT_UPLOAD_DIR.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            frontend_origins: Vec::new(),
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
