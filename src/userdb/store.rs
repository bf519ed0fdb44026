//! High-level user database operations.
//!
//! `CredentialStore` binds one `FileFormat` to one file path. It keeps no
//! state between calls: every operation reads the whole file, and every
//! mutation edits the records in memory and writes the whole file back.
//! Callers that share a file between threads or processes must serialize
//! writers themselves.

use std::path::{Path, PathBuf};

use subtle::ConstantTimeEq;

use crate::errors::{StoreError, Result};

use super::format::{self, FileFormat};
use super::record::{validate_username, RecordSet, UserRecord};

/// A user database bound to a file path and a format.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    /// Path to the user database on disk.
    path: PathBuf,

    /// On-disk format, including its hash scheme.
    format: FileFormat,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>, format: FileFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// Usernames in the order they appear in the file.
    pub fn usernames(&self) -> Result<Vec<String>> {
        let records = self.load()?;
        Ok(records.usernames().map(str::to_string).collect())
    }

    /// Returns `true` if the file has a record for `username`.
    pub fn contains(&self, username: &str) -> Result<bool> {
        Ok(self.load()?.contains(username))
    }

    /// The stored secret of `username`.
    pub fn get(&self, username: &str) -> Result<String> {
        self.load()?
            .get(username)
            .map(|record| record.secret.clone())
            .ok_or_else(|| StoreError::NotFound(username.to_string()))
    }

    /// Every record, in file order.
    pub fn records(&self) -> Result<Vec<UserRecord>> {
        Ok(self.load()?.into_iter().collect())
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Append a new record and persist.
    ///
    /// `secret` is stored exactly as given; use `hash_for_storage` first
    /// on hashing formats.
    pub fn add(&self, username: &str, secret: &str, extra: Option<&str>) -> Result<()> {
        let record = UserRecord::new(username, secret, extra.map(str::to_string))?;

        let mut records = self.load()?;
        records.insert(record)?;
        self.persist(&records)?;

        tracing::debug!(path = %self.path.display(), username, "user added");
        Ok(())
    }

    /// Remove the record of `username` and persist.
    pub fn delete(&self, username: &str) -> Result<()> {
        let mut records = self.load()?;
        records
            .remove(username)
            .ok_or_else(|| StoreError::NotFound(username.to_string()))?;
        self.persist(&records)?;

        tracing::debug!(path = %self.path.display(), username, "user deleted");
        Ok(())
    }

    /// Replace the secret of an existing user, keeping its position and
    /// extra data.
    pub fn set_secret(&self, username: &str, secret: &str) -> Result<()> {
        let mut records = self.load()?;
        let record = records
            .get_mut(username)
            .ok_or_else(|| StoreError::NotFound(username.to_string()))?;
        record.secret = secret.to_string();
        record.validate()?;
        self.persist(&records)?;

        tracing::debug!(path = %self.path.display(), username, "secret replaced");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Password handling
    // ------------------------------------------------------------------

    /// Whether the bound format can hash and verify passwords.
    pub fn supports_verification(&self) -> bool {
        self.format.supports_verification()
    }

    /// Hash `plaintext` with the format's scheme, reusing the salt of
    /// `existing` when given.
    pub fn crypt_password(
        &self,
        username: &str,
        plaintext: &str,
        existing: Option<&str>,
    ) -> Result<String> {
        tracing::trace!(username, reuse_salt = existing.is_some(), "crypt password");
        self.format.crypt_password(plaintext, existing)
    }

    /// The secret to store for a new password: a freshly salted hash on
    /// hashing formats, the plaintext itself otherwise.
    pub fn hash_for_storage(&self, username: &str, plaintext: &str) -> Result<String> {
        validate_username(username)?;
        if self.supports_verification() {
            self.crypt_password(username, plaintext, None)
        } else {
            Ok(plaintext.to_string())
        }
    }

    /// Check `plaintext` against the stored secret of `username`.
    ///
    /// An unknown user is `Ok(false)`, indistinguishable from a wrong
    /// password. On hashing formats a stored secret that no available
    /// scheme recognizes (an empty secret, Apache's `$apr1$`) is
    /// `Err(UnsupportedScheme)`: the record cannot be verified either way.
    pub fn authenticate(&self, username: &str, plaintext: &str) -> Result<bool> {
        let stored = match self.get(username) {
            Ok(stored) => stored,
            Err(StoreError::NotFound(_)) => {
                tracing::debug!(username, "authentication for unknown user");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        let candidate = if self.supports_verification() {
            self.crypt_password(username, plaintext, Some(&stored))?
        } else {
            plaintext.to_string()
        };

        Ok(bool::from(candidate.as_bytes().ct_eq(stored.as_bytes())))
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    fn load(&self) -> Result<RecordSet> {
        format::read_records(&self.format, &self.path)
    }

    fn persist(&self, records: &RecordSet) -> Result<()> {
        format::write_records(&self.format, &self.path, records)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the user database.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the bound format.
    pub fn format(&self) -> &FileFormat {
        &self.format
    }
}
