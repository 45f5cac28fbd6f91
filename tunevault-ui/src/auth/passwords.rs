//! Password hashing
//!
//! Stored form is `salt$digest` where digest = SHA-256(salt || password) as
//! 64 hex characters and the salt is 128 random bits.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Hash a cleartext password with a fresh random salt
pub fn hash_password(password: &str) -> String {
    let salt: u128 = rand::thread_rng().gen();
    let salt = format!("{:032x}", salt);
    let digest = salted_digest(&salt, password);
    format!("{}${}", salt, digest)
}

/// Verify a cleartext password against a stored `salt$digest` value
pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, digest)) => salted_digest(salt, password) == digest,
        None => false,
    }
}

fn salted_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let stored = hash_password("correct horse");
        assert!(verify_password("correct horse", &stored));
    }

    #[test]
    fn wrong_password_fails() {
        let stored = hash_password("correct horse");
        assert!(!verify_password("battery staple", &stored));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("secret");
        let b = hash_password("secret");
        assert_ne!(a, b);
        assert!(verify_password("secret", &a));
        assert!(verify_password("secret", &b));
    }

    #[test]
    fn malformed_stored_value_never_verifies() {
        assert!(!verify_password("secret", "no-separator"));
        assert!(!verify_password("secret", ""));
    }
}
