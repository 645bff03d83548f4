//! Argon2id password hashing
//!
//! Hashing and verification are CPU-bound, so the async entry points run them
//! on tokio's blocking pool.

use std::sync::LazyLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

#[derive(Debug, thiserror::Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordHashError(String);

/// Hash checked when the account does not exist, so unknown and known users cost the same
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password_sync("audiobook-dummy-password").ok());

/// Hash a password into a PHC string with a fresh random salt
pub async fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || hash_password_sync(&password))
        .await
        .map_err(|e| PasswordHashError(format!("hashing task failed: {}", e)))?
}

/// Check a password against a stored PHC string
///
/// With no stored hash the password is checked against a dummy hash and the
/// result is always `false`. A malformed stored hash never verifies.
pub async fn verify_password(password: &str, password_hash: Option<&str>) -> bool {
    let password = password.to_string();
    let password_hash = password_hash.map(str::to_string);

    let result = tokio::task::spawn_blocking(move || match password_hash {
        Some(hash) => verify_password_sync(&password, &hash),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                verify_password_sync(&password, dummy);
            }
            false
        },
    })
    .await;

    match result {
        Ok(verified) => verified,
        Err(e) => {
            tracing::error!(error = %e, "Password verification task failed");
            false
        },
    }
}

fn hash_password_sync(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordHashError(e.to_string()))
}

fn verify_password_sync(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            false
        },
    }
}
