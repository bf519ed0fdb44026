//! The crypt(3) family of hashes found in htpasswd and shadow files.
//!
//! Every variant except DES crypt is a `$id$...` string; DES crypt is 13
//! characters whose first two are the salt. In all of them the stored
//! hash is also a valid salt setup, so verification passes the whole
//! stored string back in as the setup for the candidate password.

use pwhash::error::Error as CryptError;
use pwhash::{bcrypt, md5_crypt, sha256_crypt, sha512_crypt, unix_crypt};

use crate::errors::{StoreError, Result};

/// Alphabet of crypt(3) salts and DES crypt output.
const CRYPT_ALPHABET: &str = "./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of a DES crypt hash: 2 salt characters + 11 hash characters.
const DES_HASH_LEN: usize = 13;

fn hash_failed(scheme: &str, e: CryptError) -> StoreError {
    StoreError::HashFailed(format!("{scheme}: {e}"))
}

// ---------------------------------------------------------------------------
// DES crypt
// ---------------------------------------------------------------------------

pub fn identify_des(hash: &str) -> bool {
    hash.len() == DES_HASH_LEN && hash.chars().all(|c| CRYPT_ALPHABET.contains(c))
}

pub fn generate_des(plaintext: &str, existing: Option<&str>) -> Result<String> {
    match existing {
        Some(existing) => {
            let salt = existing
                .get(..2)
                .filter(|salt| salt.chars().all(|c| CRYPT_ALPHABET.contains(c)))
                .ok_or_else(|| StoreError::HashFailed("crypt: hash has no valid salt".into()))?;
            unix_crypt::hash_with(salt, plaintext)
        }
        None => unix_crypt::hash(plaintext),
    }
    .map_err(|e| hash_failed("crypt", e))
}

// ---------------------------------------------------------------------------
// Modular crypt variants
// ---------------------------------------------------------------------------

pub fn identify_md5(hash: &str) -> bool {
    hash.starts_with("$1$")
}

pub fn generate_md5(plaintext: &str, existing: Option<&str>) -> Result<String> {
    match existing {
        Some(existing) => md5_crypt::hash_with(existing, plaintext),
        None => md5_crypt::hash(plaintext),
    }
    .map_err(|e| hash_failed("md5", e))
}

pub fn identify_sha256(hash: &str) -> bool {
    hash.starts_with("$5$")
}

pub fn generate_sha256(plaintext: &str, existing: Option<&str>) -> Result<String> {
    match existing {
        Some(existing) => sha256_crypt::hash_with(existing, plaintext),
        None => sha256_crypt::hash(plaintext),
    }
    .map_err(|e| hash_failed("sha256", e))
}

pub fn identify_sha512(hash: &str) -> bool {
    hash.starts_with("$6$")
}

pub fn generate_sha512(plaintext: &str, existing: Option<&str>) -> Result<String> {
    match existing {
        Some(existing) => sha512_crypt::hash_with(existing, plaintext),
        None => sha512_crypt::hash(plaintext),
    }
    .map_err(|e| hash_failed("sha512", e))
}

pub fn identify_bcrypt(hash: &str) -> bool {
    ["$2a$", "$2b$", "$2y$"]
        .iter()
        .any(|prefix| hash.starts_with(prefix))
}

pub fn generate_bcrypt(plaintext: &str, existing: Option<&str>) -> Result<String> {
    match existing {
        Some(existing) => bcrypt::hash_with(existing, plaintext),
        None => bcrypt::hash(plaintext),
    }
    .map_err(|e| hash_failed("bcrypt", e))
}
