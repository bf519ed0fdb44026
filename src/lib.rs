//! A pluggable, file-backed credential store.
//!
//! User databases are flat `username:secret[:extra]` files. The `plain`
//! format stores secrets verbatim; the `htpasswd` format stores hashes
//! from a registry of schemes. Stores are usually built from a
//! configuration value:
//!
//! ```no_run
//! use serde_json::json;
//!
//! # fn main() -> credstore::errors::Result<()> {
//! let store = credstore::from_config(&json!({
//!     "path": "/etc/myapp/htpasswd",
//!     "format": "htpasswd",
//!     "method": "bcrypt",
//! }))?;
//!
//! if store.authenticate("alice", "mirror")? {
//!     println!("welcome back");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod registry;
pub mod userdb;

pub use errors::{Result, StoreError};
pub use registry::{find, from_config, StoreFamily};
pub use userdb::{CredentialStore, FileFormat, FormatKind, RecordSet, UserRecord};
