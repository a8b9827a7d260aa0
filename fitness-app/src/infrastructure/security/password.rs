//! Password hashing with Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use fitness_errors::AppError;

pub struct PasswordHasherService;

impl PasswordHasherService {
    pub fn hash(password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AppError::Internal(format!("password hash failed: {}", e)))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("stored hash is malformed: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = PasswordHasherService::hash("correct horse battery").unwrap();
        assert_ne!(hash, "correct horse battery");
        assert!(PasswordHasherService::verify("correct horse battery", &hash).unwrap());
        assert!(!PasswordHasherService::verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(PasswordHasherService::verify("x", "not-a-phc-string").is_err());
    }
}
