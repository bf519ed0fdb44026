//! Argon2id password hashing in PHC string format.
//!
//! A PHC string (`$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`) carries
//! the algorithm, version, cost parameters and salt, so re-hashing a
//! candidate password only needs the stored string.

use argon2::password_hash::{PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, Params};
use rand::RngCore;

use crate::errors::{StoreError, Result};

/// Length of a freshly generated salt in bytes (128 bits).
const SALT_LEN: usize = 16;

/// Prefix shared by every Argon2 variant's PHC identifier.
const PHC_PREFIX: &str = "$argon2";

/// Generate a cryptographically random salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

/// Returns `true` if `hash` looks like an Argon2 PHC string.
pub fn identify(hash: &str) -> bool {
    hash.starts_with(PHC_PREFIX)
}

/// Hash `plaintext`, reusing salt and parameters from `existing` when given.
pub fn generate(plaintext: &str, existing: Option<&str>) -> Result<String> {
    match existing {
        Some(existing) => rehash(plaintext, existing),
        None => hash_fresh(plaintext),
    }
}

/// Hash with a new random salt and the default Argon2id parameters.
fn hash_fresh(plaintext: &str) -> Result<String> {
    let salt = SaltString::encode_b64(&generate_salt()).map_err(hash_failed)?;
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(hash_failed)?;
    Ok(hash.to_string())
}

/// Re-derive a PHC string using everything but the output from `existing`.
///
/// Produces `existing` again exactly when `plaintext` is the password
/// that created it.
fn rehash(plaintext: &str, existing: &str) -> Result<String> {
    let parsed = PasswordHash::new(existing).map_err(hash_failed)?;
    let salt = parsed
        .salt
        .ok_or_else(|| StoreError::HashFailed("argon2 hash carries no salt".into()))?;
    let params = Params::try_from(&parsed).map_err(hash_failed)?;

    let hash = Argon2::default()
        .hash_password_customized(
            plaintext.as_bytes(),
            Some(parsed.algorithm),
            parsed.version,
            params,
            salt,
        )
        .map_err(hash_failed)?;
    Ok(hash.to_string())
}

fn hash_failed(e: argon2::password_hash::Error) -> StoreError {
    StoreError::HashFailed(format!("argon2: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salts_are_random() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn fresh_hash_is_phc_string() {
        let hash = generate("hunter2", None).unwrap();
        assert!(hash.starts_with("$argon2id$"), "unexpected hash: {hash}");
        assert!(identify(&hash));
    }

    #[test]
    fn rehash_reproduces_existing() {
        let hash = generate("hunter2", None).unwrap();
        assert_eq!(generate("hunter2", Some(&hash)).unwrap(), hash);
        assert_ne!(generate("hunter3", Some(&hash)).unwrap(), hash);
    }

    #[test]
    fn identify_rejects_other_schemes() {
        assert!(!identify("$6$saltsalt$abc"));
        assert!(!identify("su7aWQyEG4lo."));
    }

    #[test]
    fn rehash_requires_salt() {
        let result = generate("pw", Some("$argon2id$v=19$m=19456,t=2,p=1"));
        assert!(matches!(result, Err(StoreError::HashFailed(_))));
    }
}
