//! Store families and the configuration-driven factory.
//!
//! A store family is a named way of backing a `CredentialStore`. Families
//! are declared in a static table; `find` and `from_config` consult it
//! directly.

use std::fmt;

use serde_json::Value;

use crate::config::StoreConfig;
use crate::errors::Result;
use crate::userdb::CredentialStore;

/// A named store family and its constructor.
pub struct StoreFamily {
    name: &'static str,
    description: &'static str,
    build: fn(&Value) -> Result<CredentialStore>,
}

impl StoreFamily {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Validate `config` and build a store of this family.
    ///
    /// Validation happens before any file is opened, so a bad
    /// configuration never creates or modifies a file.
    pub fn from_config(&self, config: &Value) -> Result<CredentialStore> {
        (self.build)(config)
    }
}

impl fmt::Debug for StoreFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StoreFamily").field(&self.name).finish()
    }
}

impl PartialEq for StoreFamily {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Name of the flat-file family.
pub const FILE_FAMILY: &str = "plain";

static FAMILIES: &[StoreFamily] = &[StoreFamily {
    name: FILE_FAMILY,
    description: "Flat `username:secret[:extra]` file, plain or htpasswd secrets",
    build: build_file_store,
}];

fn build_file_store(config: &Value) -> Result<CredentialStore> {
    let validated = StoreConfig::validate(config)?;
    tracing::debug!(
        path = %validated.path.display(),
        format = %validated.format,
        "building file-backed store"
    );
    Ok(CredentialStore::new(validated.path, validated.format))
}

/// Look up a store family by name.
pub fn find(name: &str) -> Option<&'static StoreFamily> {
    FAMILIES.iter().find(|family| family.name == name)
}

/// Build a flat-file store from `config`.
pub fn from_config(config: &Value) -> Result<CredentialStore> {
    build_file_store(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn find_file_family() {
        let family = find("plain").unwrap();
        assert_eq!(family.name(), FILE_FAMILY);
        assert!(!family.description().is_empty());
        assert_eq!(find("ldap"), None);
    }

    #[test]
    fn families_are_unique() {
        let mut names: Vec<_> = FAMILIES.iter().map(StoreFamily::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FAMILIES.len());
    }

    #[test]
    fn family_builds_store() {
        let store = find("plain")
            .unwrap()
            .from_config(&json!({ "path": "path/to/passwd" }))
            .unwrap();
        assert_eq!(store.path(), std::path::Path::new("path/to/passwd"));
        assert!(!store.supports_verification());
    }
}
