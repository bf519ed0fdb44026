use std::path::Path;

use serde_json::{Map, Value};

use crate::errors::{StoreError, Result};

/// Store settings as read from `.credstore.toml`, plus overrides.
///
/// Values are kept untyped so that every source (file, environment,
/// command line) goes through the same validation in `StoreConfig`.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: Map<String, Value>,
}

impl Settings {
    /// Name of the config file read from the working directory by default.
    pub const FILE_NAME: &'static str = ".credstore.toml";

    /// Load settings from an explicit TOML file.
    ///
    /// If the file does not exist, empty settings are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using empty settings");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)?;

        let values: Map<String, Value> =
            toml::from_str(&contents).map_err(|e| StoreError::ConfigFile {
                path: config_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Self { values })
    }

    /// Override `key` when `value` is set; leave it untouched otherwise.
    pub fn set_override(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.values
                .insert(key.to_string(), Value::String(value.to_string()));
        }
    }

    /// Look up a raw value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The settings as one configuration object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

// ── Tests ────────────────────────────────────────────────────────────
