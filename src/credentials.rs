use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::RngCore;

use crate::error::AppError;

/// Hashes a plaintext password with a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)?
        .to_string();
    Ok(digest)
}

/// Verifies a plaintext password against a stored digest.
///
/// Fails closed: a malformed digest is treated as a mismatch rather than
/// surfaced as an error.
pub fn verify_password(plain: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// Generates the 6-digit code used for email confirmation and password reset.
pub fn generate_short_code() -> String {
    let n = 100_000 + OsRng.next_u32() % 900_000;
    n.to_string()
}
