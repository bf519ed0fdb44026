//! Password hashing for credstore.
//!
//! This module provides:
//! - The static registry of named hash schemes (`schemes`)
//! - Argon2id PHC-string hashing and salt generation (`kdf`)
//! - The crypt(3) family used by htpasswd files (`unix_crypt`, behind the
//!   `legacy-crypt` feature)

pub mod kdf;
pub mod schemes;
#[cfg(feature = "legacy-crypt")]
pub mod unix_crypt;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{find, HashScheme, ...};
pub use kdf::generate_salt;
pub use schemes::{
    available_schemes, default_scheme, find, identify_scheme, scheme_names, HashScheme,
    DEFAULT_SCHEME,
};
