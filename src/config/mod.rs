//! Store configuration: shape validation and the on-disk settings file.
//!
//! A store is described by a small configuration object:
//!
//! ```toml
//! path = "/etc/myapp/htpasswd"   # required
//! format = "htpasswd"            # optional, default "plain"
//! method = "sha512"              # optional, hashing formats only
//! ```
//!
//! Unknown keys are ignored so the same table can carry settings meant
//! for other components.

pub mod settings;

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

use crate::crypto;
use crate::errors::{StoreError, Result};
use crate::userdb::{format_names, FileFormat, FormatKind};

pub use settings::Settings;

/// The shape of a store configuration, before registry checks.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path of the user database file.
    pub path: String,

    /// Registered format name.
    #[serde(default = "default_format")]
    pub format: String,

    /// Hash scheme for hashing formats.
    #[serde(default)]
    pub method: Option<String>,
}

fn default_format() -> String {
    FormatKind::Plain.name().to_string()
}

/// A configuration that passed every check, ready to build a store from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    pub path: PathBuf,
    pub format: FileFormat,
}

impl StoreConfig {
    /// Deserialize and validate a configuration value.
    ///
    /// Never touches the file system.
    pub fn validate(value: &Value) -> Result<ValidatedConfig> {
        let config = StoreConfig::deserialize(value)
            .map_err(|e| StoreError::InvalidConfig(e.to_string()))?;
        config.check()
    }

    /// Check the fields against the format and scheme registries.
    pub fn check(&self) -> Result<ValidatedConfig> {
        if self.path.trim().is_empty() {
            return Err(StoreError::InvalidConfig("`path` cannot be empty".into()));
        }

        let kind = FormatKind::from_name(&self.format).ok_or_else(|| {
            StoreError::InvalidConfig(format!(
                "unknown format '{}' (expected one of: {})",
                self.format,
                format_names().join(", ")
            ))
        })?;

        let method = if kind.requires_scheme() {
            if let Some(method) = &self.method {
                crypto::find(method).map_err(|_| {
                    StoreError::InvalidConfig(format!(
                        "unknown method '{method}' for the {kind} format (expected one of: {})",
                        crypto::scheme_names().join(", ")
                    ))
                })?;
            }
            self.method.as_deref()
        } else {
            if let Some(method) = &self.method {
                tracing::warn!(format = %kind, method = %method, "`method` ignored by a format that does not hash");
            }
            None
        };

        Ok(ValidatedConfig {
            path: PathBuf::from(&self.path),
            format: FileFormat::from_kind(kind, method)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_config_defaults_to_plain() {
        let config = StoreConfig::validate(&json!({ "path": "path/to/passwd" })).unwrap();
        assert_eq!(config.path, PathBuf::from("path/to/passwd"));
        assert_eq!(config.format, FileFormat::Plain);
    }

    #[test]
    fn htpasswd_without_method_uses_default_scheme() {
        let config =
            StoreConfig::validate(&json!({ "path": "p", "format": "htpasswd" })).unwrap();
        assert_eq!(
            config.format.scheme().unwrap().name(),
            crypto::DEFAULT_SCHEME
        );
    }

    #[test]
    fn method_is_ignored_for_plain() {
        let config =
            StoreConfig::validate(&json!({ "path": "p", "method": "bogus" })).unwrap();
        assert_eq!(config.format, FileFormat::Plain);
    }

    #[test]
    fn null_method_is_absent() {
        let config = StoreConfig::validate(
            &json!({ "path": "p", "format": "htpasswd", "method": null }),
        )
        .unwrap();
        assert!(config.format.supports_verification());
    }

    #[test]
    fn whitespace_path_rejected() {
        let err = StoreConfig::validate(&json!({ "path": "  " })).unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfig(_)));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = StoreConfig::validate(&json!({})).unwrap_err();
        assert!(err.to_string().contains("path"), "{err}");

        let err = StoreConfig::validate(&json!({ "path": "p", "format": "bogus" })).unwrap_err();
        assert!(err.to_string().contains("bogus"), "{err}");
    }
}
