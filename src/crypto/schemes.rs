//! Registry of password hashing schemes.
//!
//! Every scheme compiled into this build is listed in a static table.
//! Schemes whose backing implementation is not compiled in (the crypt(3)
//! family without the `legacy-crypt` feature) are simply absent.

use std::fmt;

use crate::errors::{StoreError, Result};

use super::kdf;
#[cfg(feature = "legacy-crypt")]
use super::unix_crypt;

/// A named algorithm turning a plaintext into a verifiable hash string.
pub struct HashScheme {
    name: &'static str,
    description: &'static str,
    identify: fn(&str) -> bool,
    generate: fn(&str, Option<&str>) -> Result<String>,
}

impl HashScheme {
    /// Scheme name as used in configuration (`method = "sha512"`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Short human-readable description.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Returns `true` if `hash` was produced by this scheme.
    pub fn identify(&self, hash: &str) -> bool {
        (self.identify)(hash)
    }

    /// Hash `plaintext`.
    ///
    /// With `existing`, the salt and cost parameters embedded in it are
    /// reused and the result equals `existing` iff `plaintext` is the
    /// password that produced it. Without it, a fresh random salt is
    /// drawn.
    pub fn generate(&self, plaintext: &str, existing: Option<&str>) -> Result<String> {
        (self.generate)(plaintext, existing)
    }
}

impl fmt::Debug for HashScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashScheme").field(&self.name).finish()
    }
}

impl PartialEq for HashScheme {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for HashScheme {}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

const ARGON2: HashScheme = HashScheme {
    name: "argon2",
    description: "Argon2id, PHC string format",
    identify: kdf::identify,
    generate: kdf::generate,
};

#[cfg(feature = "legacy-crypt")]
static SCHEMES: &[HashScheme] = &[
    HashScheme {
        name: "crypt",
        description: "Traditional DES crypt(3), 2-character salt",
        identify: unix_crypt::identify_des,
        generate: unix_crypt::generate_des,
    },
    HashScheme {
        name: "md5",
        description: "MD5-crypt ($1$)",
        identify: unix_crypt::identify_md5,
        generate: unix_crypt::generate_md5,
    },
    HashScheme {
        name: "sha256",
        description: "SHA-256-crypt ($5$)",
        identify: unix_crypt::identify_sha256,
        generate: unix_crypt::generate_sha256,
    },
    HashScheme {
        name: "sha512",
        description: "SHA-512-crypt ($6$)",
        identify: unix_crypt::identify_sha512,
        generate: unix_crypt::generate_sha512,
    },
    HashScheme {
        name: "bcrypt",
        description: "bcrypt ($2b$)",
        identify: unix_crypt::identify_bcrypt,
        generate: unix_crypt::generate_bcrypt,
    },
    ARGON2,
];

#[cfg(not(feature = "legacy-crypt"))]
static SCHEMES: &[HashScheme] = &[ARGON2];

/// Scheme used by hashing formats when no method is configured.
#[cfg(feature = "legacy-crypt")]
pub const DEFAULT_SCHEME: &str = "sha512";

/// Scheme used by hashing formats when no method is configured.
#[cfg(not(feature = "legacy-crypt"))]
pub const DEFAULT_SCHEME: &str = "argon2";

/// All schemes available in this build, in registry order.
pub fn available_schemes() -> &'static [HashScheme] {
    SCHEMES
}

/// Look up a scheme by name.
pub fn find(name: &str) -> Result<&'static HashScheme> {
    SCHEMES
        .iter()
        .find(|scheme| scheme.name == name)
        .ok_or_else(|| {
            StoreError::UnsupportedScheme(format!(
                "'{name}' (available: {})",
                scheme_names().join(", ")
            ))
        })
}

/// The scheme used when none is configured.
pub fn default_scheme() -> &'static HashScheme {
    SCHEMES
        .iter()
        .find(|scheme| scheme.name == DEFAULT_SCHEME)
        .unwrap_or(&ARGON2)
}

/// Find the scheme that produced `hash`, if it is available.
pub fn identify_scheme(hash: &str) -> Option<&'static HashScheme> {
    SCHEMES.iter().find(|scheme| scheme.identify(hash))
}

/// Names of every available scheme, in registry order.
pub fn scheme_names() -> Vec<&'static str> {
    SCHEMES.iter().map(HashScheme::name).collect()
}
