//! Argon2 password hashes.

use std::fmt;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// A stored credential in PHC string form.
///
/// [`Password::new`] is the one place a plain-text password is hashed;
/// everything loaded from storage comes through [`Password::from_hash`].
#[derive(Clone)]
pub struct Password(String);

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl Password {
    /// Hash `plain` with a fresh salt.
    pub fn new(plain: &str) -> AppResult<Self> {
        if plain.chars().count() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self(phc.to_string()))
    }

    pub fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether `candidate` hashes to this credential. A malformed stored
    /// hash never matches.
    pub fn verify(&self, candidate: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            tracing::warn!("Stored password hash is not a PHC string");
            return false;
        };

        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_never_stores_plain_text() {
        let password = Password::new("SecurePass123").unwrap();

        assert!(password.as_str().starts_with("$argon2"));
        assert!(!password.as_str().contains("SecurePass123"));
        assert!(password.verify("SecurePass123"));
        assert!(!password.verify("SecurePass124"));
    }

    #[test]
    fn test_stored_hash_still_verifies() {
        let stored = Password::new("NurseStation9").unwrap().into_string();
        assert!(Password::from_hash(stored).verify("NurseStation9"));
    }

    #[test]
    fn test_salted_per_hash() {
        let a = Password::new("SamePassword123").unwrap();
        let b = Password::new("SamePassword123").unwrap();
        assert_ne!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_seven_characters_rejected() {
        assert!(matches!(
            Password::new("Short12"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_debug_redacts() {
        let password = Password::new("SecurePass123").unwrap();
        assert_eq!(format!("{:?}", password), "Password([REDACTED])");
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!Password::from_hash("plaintext".into()).verify("plaintext"));
    }
}
