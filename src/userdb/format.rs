//! Line-oriented user database formats.
//!
//! Both supported formats share one layout:
//!
//! ```text
//! username:secret[:extra]\n
//! ```
//!
//! - **plain**: `secret` is the literal password.
//! - **htpasswd**: `secret` is a hash string whose prefix identifies the
//!   scheme that produced it and embeds its salt.
//!
//! Anything after the second field is kept as one opaque `extra` string
//! so that loading and dumping an untouched file reproduces it byte for
//! byte.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::crypto::{self, HashScheme};
use crate::errors::{StoreError, Result};

use super::record::{RecordSet, UserRecord};

/// Separator between the fields of a record line.
pub const FIELD_SEPARATOR: char = ':';

// ---------------------------------------------------------------------------
// FormatKind
// ---------------------------------------------------------------------------

/// The registered format names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Plain,
    Htpasswd,
}

impl FormatKind {
    /// Every registered format, in the order they are listed to users.
    pub const ALL: [FormatKind; 2] = [FormatKind::Plain, FormatKind::Htpasswd];

    pub fn name(self) -> &'static str {
        match self {
            FormatKind::Plain => "plain",
            FormatKind::Htpasswd => "htpasswd",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether building this format needs a hash scheme.
    pub fn requires_scheme(self) -> bool {
        matches!(self, FormatKind::Htpasswd)
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Names of every registered format.
pub fn format_names() -> Vec<&'static str> {
    FormatKind::ALL.into_iter().map(FormatKind::name).collect()
}

// ---------------------------------------------------------------------------
// FileFormat
// ---------------------------------------------------------------------------

/// A concrete format, bound to its hash scheme when it has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Secrets are stored and compared as plaintext.
    Plain,
    /// Secrets are hashes; new ones are produced with the bound scheme.
    Htpasswd(&'static HashScheme),
}

impl FileFormat {
    /// An htpasswd format hashing new passwords with the named scheme.
    pub fn htpasswd(method: &str) -> Result<Self> {
        Ok(FileFormat::Htpasswd(crypto::find(method)?))
    }

    /// Build a format of `kind`; `method` is only used by hashing formats
    /// and falls back to the default scheme when absent.
    pub fn from_kind(kind: FormatKind, method: Option<&str>) -> Result<Self> {
        match kind {
            FormatKind::Plain => Ok(FileFormat::Plain),
            FormatKind::Htpasswd => match method {
                Some(method) => Self::htpasswd(method),
                None => Ok(FileFormat::Htpasswd(crypto::default_scheme())),
            },
        }
    }

    pub fn kind(&self) -> FormatKind {
        match self {
            FileFormat::Plain => FormatKind::Plain,
            FileFormat::Htpasswd(_) => FormatKind::Htpasswd,
        }
    }

    /// The scheme new passwords are hashed with, if this format hashes.
    pub fn scheme(&self) -> Option<&'static HashScheme> {
        match self {
            FileFormat::Plain => None,
            FileFormat::Htpasswd(scheme) => Some(scheme),
        }
    }

    /// Whether this format can hash and verify passwords.
    pub fn supports_verification(&self) -> bool {
        self.scheme().is_some()
    }

    /// Hash `plaintext` for this format.
    ///
    /// With `existing`, the scheme and salt are taken from that hash so
    /// the result equals it exactly when the password matches. Fails with
    /// `UnsupportedOperation` on formats that do not hash.
    pub fn crypt_password(&self, plaintext: &str, existing: Option<&str>) -> Result<String> {
        let bound = self.scheme().ok_or_else(|| {
            StoreError::UnsupportedOperation(format!(
                "the {} format stores passwords verbatim and cannot hash them",
                self.kind()
            ))
        })?;

        let scheme = match existing {
            Some(hash) if !bound.identify(hash) => crypto::identify_scheme(hash).ok_or_else(|| {
                StoreError::UnsupportedScheme(
                    "stored hash was not produced by any available scheme".into(),
                )
            })?,
            _ => bound,
        };

        scheme.generate(plaintext, existing)
    }

    // ------------------------------------------------------------------
    // Parsing and serialization
    // ------------------------------------------------------------------

    /// Parse every non-blank line of `reader` into a record.
    ///
    /// A username that appears twice is a `Parse` error on the second
    /// occurrence rather than collapsing into the first. The file is then
    /// ambiguous about which secret is current, and rewriting it would
    /// silently drop a line.
    pub fn load<R: Read>(&self, mut reader: R) -> Result<RecordSet> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;

        let mut records = RecordSet::new();
        for (index, line) in contents.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.trim().is_empty() {
                continue;
            }
            let line_no = index + 1;
            let record = parse_line(line).map_err(|reason| StoreError::Parse {
                line: line_no,
                reason,
            })?;
            if records.contains(&record.username) {
                return Err(StoreError::Parse {
                    line: line_no,
                    reason: format!("duplicate username '{}'", record.username),
                });
            }
            records.insert(record)?;
        }

        Ok(records)
    }

    /// Write `records` in set order, one newline-terminated line each.
    pub fn dump<W: Write>(&self, records: &RecordSet, mut writer: W) -> Result<()> {
        for record in records {
            writer.write_all(format_line(record).as_bytes())?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Plain => f.write_str("plain"),
            FileFormat::Htpasswd(scheme) => write!(f, "htpasswd ({})", scheme.name()),
        }
    }
}

fn parse_line(line: &str) -> std::result::Result<UserRecord, String> {
    let mut fields = line.splitn(3, FIELD_SEPARATOR);
    let username = fields.next().unwrap_or_default();
    let secret = fields
        .next()
        .ok_or_else(|| "expected at least username and secret fields".to_string())?;
    if username.is_empty() {
        return Err("username field is empty".into());
    }

    Ok(UserRecord {
        username: username.to_string(),
        secret: secret.to_string(),
        extra: fields.next().map(str::to_string),
    })
}

fn format_line(record: &UserRecord) -> String {
    match &record.extra {
        Some(extra) => format!(
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{extra}\n",
            record.username, record.secret
        ),
        None => format!("{}{FIELD_SEPARATOR}{}\n", record.username, record.secret),
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Read and parse the user database at `path`.
///
/// A missing file is an empty database, so the first `add` creates it.
pub fn read_records(format: &FileFormat, path: &Path) -> Result<RecordSet> {
    match fs::File::open(path) {
        Ok(file) => format.load(io::BufReader::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "user database does not exist yet");
            Ok(RecordSet::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Write the user database to disk **atomically**.
///
/// 1. Serialize every record into a temp file in the same directory.
/// 2. Copy the permissions of the file being replaced, if any.
/// 3. Rename the temp file over the target path.
///
/// Readers see either the old or the new file, never a half-written one.
pub fn write_records(format: &FileFormat, path: &Path, records: &RecordSet) -> Result<()> {
    let mut buf = Vec::new();
    format.dump(records, &mut buf)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, &buf)?;
    let replaced = fs::metadata(path)
        .map_or(Ok(()), |meta| fs::set_permissions(&tmp_path, meta.permissions()))
        .and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = replaced {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    tracing::debug!(path = %path.display(), records = records.len(), "user database written");
    Ok(())
}
