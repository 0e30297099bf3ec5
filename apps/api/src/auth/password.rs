//! Argon2id password hashes in PHC string format.
//!
//! Hashing is CPU and memory bound, so handlers go through the `*_blocking`
//! wrappers, which run on tokio's blocking pool.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use once_cell::sync::Lazy;

use crate::errors::AppError;

/// Stand-in hash verified when the account does not exist, so unknown and
/// known emails cost the same.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("skillbridge-no-such-user").ok());

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// False for a wrong password and for any malformed stored hash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
}

/// Verifies against `stored`, or against a dummy hash when there is no account.
/// Always false in the latter case.
pub async fn verify_password_blocking(password: String, stored: Option<String>) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || match stored {
        Some(stored) => verify_password(&password, &stored),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                verify_password(&password, dummy);
            }
            false
        }
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let stored = hash_password("hunter2").unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(verify_password("hunter2", &stored));
        assert!(!verify_password("hunter3", &stored));
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn test_malformed_hash_rejected() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "sha256$10000$salt$abc"));
        assert!(!verify_password("pw", "$argon2id$garbage"));
    }

    #[tokio::test]
    async fn test_blocking_round_trip() {
        let stored = hash_password_blocking("s3cret".to_string()).await.unwrap();
        assert!(verify_password_blocking("s3cret".to_string(), Some(stored.clone()))
            .await
            .unwrap());
        assert!(!verify_password_blocking("wrong".to_string(), Some(stored))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_missing_account_still_pays_for_verification() {
        assert!(DUMMY_HASH.is_some());
        let started = std::time::Instant::now();
        let known = hash_password("s3cret").unwrap();
        assert!(verify_password("s3cret", &known));
        let one_verify = started.elapsed();

        let started = std::time::Instant::now();
        let ok = verify_password_blocking("s3cret".to_string(), None).await.unwrap();
        assert!(!ok);
        // a full argon2 verification ran, not an early return
        assert!(started.elapsed() * 20 > one_verify / 2);
    }
}
