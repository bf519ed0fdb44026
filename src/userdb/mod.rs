//! User database module: flat-file credential storage.
//!
//! This module provides:
//! - `UserRecord` and the insertion-ordered `RecordSet` (`record`)
//! - The `plain` and `htpasswd` line formats and atomic persistence (`format`)
//! - High-level `CredentialStore` for lookups, mutations and authentication (`store`)

pub mod format;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use format::{format_names, FileFormat, FormatKind, FIELD_SEPARATOR};
pub use record::{RecordSet, UserRecord};
pub use store::CredentialStore;
