//! User records and the ordered set that holds them in memory.
//!
//! A `RecordSet` keeps records in the order they were first read from
//! the file, with new records appended at the end, so a load → mutate →
//! save cycle never reorders the records it did not touch.

use std::slice;

use crate::errors::{StoreError, Result};

use super::format::FIELD_SEPARATOR;

/// One `username:secret[:extra]` entry of a user database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique key of the record.
    pub username: String,

    /// Plaintext or scheme-encoded hash, depending on the file format.
    pub secret: String,

    /// Trailing fields, kept verbatim and never interpreted.
    ///
    /// `Some("")` is distinct from `None`: it is a line that ends in a
    /// separator (`bob:b0b:`).
    pub extra: Option<String>,
}

impl UserRecord {
    /// Build a record, checking that every field can be written to a
    /// line and parsed back unchanged.
    pub fn new(
        username: impl Into<String>,
        secret: impl Into<String>,
        extra: Option<String>,
    ) -> Result<Self> {
        let record = Self {
            username: username.into(),
            secret: secret.into(),
            extra,
        };
        record.validate()?;
        Ok(record)
    }

    /// Check the invariants `new` enforces on an existing record.
    pub fn validate(&self) -> Result<()> {
        validate_username(&self.username)?;
        validate_secret(&self.secret)?;
        if let Some(extra) = &self.extra {
            if has_line_break(extra) {
                return Err(StoreError::InvalidRecord(format!(
                    "extra data for '{}' cannot contain line breaks",
                    self.username
                )));
            }
        }
        Ok(())
    }
}

/// Validate that a username can be stored as the first field of a line.
///
/// Must be non-empty and contain neither the field separator nor a
/// line break.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(StoreError::InvalidRecord("username cannot be empty".into()));
    }
    if username.contains(FIELD_SEPARATOR) || has_line_break(username) {
        return Err(StoreError::InvalidRecord(format!(
            "username '{}' cannot contain '{FIELD_SEPARATOR}' or line breaks",
            username.escape_debug()
        )));
    }
    Ok(())
}

fn validate_secret(secret: &str) -> Result<()> {
    if secret.contains(FIELD_SEPARATOR) || has_line_break(secret) {
        return Err(StoreError::InvalidRecord(format!(
            "secret cannot contain '{FIELD_SEPARATOR}' or line breaks"
        )));
    }
    Ok(())
}

fn has_line_break(value: &str) -> bool {
    value.contains(['\n', '\r'])
}

// ---------------------------------------------------------------------------
// RecordSet
// ---------------------------------------------------------------------------

/// Insertion-ordered collection of records with unique usernames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<UserRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.position(username).is_some()
    }

    pub fn get(&self, username: &str) -> Option<&UserRecord> {
        self.records.iter().find(|r| r.username == username)
    }

    pub fn get_mut(&mut self, username: &str) -> Option<&mut UserRecord> {
        self.records.iter_mut().find(|r| r.username == username)
    }

    /// Append a record; fails if the username is already present.
    pub fn insert(&mut self, record: UserRecord) -> Result<()> {
        if self.contains(&record.username) {
            return Err(StoreError::AlreadyExists(record.username));
        }
        self.records.push(record);
        Ok(())
    }

    /// Remove a record, keeping the relative order of the others.
    pub fn remove(&mut self, username: &str) -> Option<UserRecord> {
        self.position(username).map(|i| self.records.remove(i))
    }

    pub fn iter(&self) -> slice::Iter<'_, UserRecord> {
        self.records.iter()
    }

    /// Usernames in set order.
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.username.as_str())
    }

    fn position(&self, username: &str) -> Option<usize> {
        self.records.iter().position(|r| r.username == username)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a UserRecord;
    type IntoIter = slice::Iter<'a, UserRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for RecordSet {
    type Item = UserRecord;
    type IntoIter = std::vec::IntoIter<UserRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> UserRecord {
        UserRecord::new(name, "pw", None).unwrap()
    }

    #[test]
    fn insert_keeps_append_order() {
        let mut set = RecordSet::new();
        set.insert(record("peter")).unwrap();
        set.insert(record("bob")).unwrap();
        set.insert(record("alice")).unwrap();
        assert_eq!(
            set.usernames().collect::<Vec<_>>(),
            ["peter", "bob", "alice"]
        );
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut set = RecordSet::new();
        set.insert(record("bob")).unwrap();
        let err = set.insert(record("bob")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(name) if name == "bob"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_preserves_survivor_order() {
        let mut set = RecordSet::new();
        for name in ["a", "b", "c", "d"] {
            set.insert(record(name)).unwrap();
        }
        assert_eq!(set.remove("b").unwrap().username, "b");
        assert!(set.remove("b").is_none());
        assert_eq!(set.usernames().collect::<Vec<_>>(), ["a", "c", "d"]);
    }

    #[test]
    fn username_validation() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("al:ice").is_err());
        assert!(validate_username("al\nice").is_err());
    }

    #[test]
    fn record_validation() {
        assert!(UserRecord::new("bob", "b0b", Some("x:y:z".into())).is_ok());
        assert!(UserRecord::new("bob", "b:0b", None).is_err());
        assert!(UserRecord::new("bob", "b0b", Some("line\nbreak".into())).is_err());
        assert!(UserRecord::new("bob", "", None).is_ok());
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut set = RecordSet::new();
        set.insert(record("bob")).unwrap();
        set.get_mut("bob").unwrap().secret = "new".into();
        assert_eq!(set.get("bob").unwrap().secret, "new");
    }
}
