//! Salted password hashing.
//!
//! Hashes are SHA-256 over `salt || password`, re-hashed for
//! [`HASH_ROUNDS`] rounds. Salt and hash are stored hex-encoded.

use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Number of SHA-256 rounds applied after the initial digest.
pub const HASH_ROUNDS: u32 = 10_000;

const SALT_LEN: usize = 16;

/// A salted password hash ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    /// Hex-encoded random salt
    pub salt: String,
    /// Hex-encoded stretched digest
    pub hash: String,
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> PasswordHash {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt = to_hex(&salt);
    let hash = to_hex(&derive(&salt, password));
    PasswordHash { salt, hash }
}

/// Check a password against a stored salt and hash in constant time.
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    let computed = to_hex(&derive(salt, password));
    computed.as_bytes().ct_eq(expected_hash.as_bytes()).into()
}

fn derive(salt: &str, password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());

    for _ in 0..HASH_ROUNDS {
        let mut hasher = Sha256::new();
        hasher.update(digest);
        hasher.update(salt.as_bytes());
        digest.copy_from_slice(&hasher.finalize());
    }
    digest
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let stored = hash_password("hunter2");
        assert!(verify_password("hunter2", &stored.salt, &stored.hash));
        assert!(!verify_password("hunter3", &stored.salt, &stored.hash));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("same");
        let b = hash_password("same");
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let stored = hash_password("plaintext");
        assert_eq!(stored.hash.len(), 64);
        assert_eq!(stored.salt.len(), SALT_LEN * 2);
        assert!(!stored.hash.contains("plaintext"));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let stored = hash_password("pw");
        assert!(!verify_password("pw", &stored.salt, "abc"));
    }
}
