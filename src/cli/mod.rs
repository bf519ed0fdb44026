//! Command-line parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{StoreError, Result};
use crate::registry;
use crate::userdb::CredentialStore;

/// Environment variable consulted before prompting for a password.
pub const PASSWORD_ENV: &str = "CREDSTORE_PASSWORD";

/// credstore CLI: manage flat-file user databases.
#[derive(Parser)]
#[command(
    name = "credstore",
    about = "Manage plain and htpasswd-style user databases",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: .credstore.toml)
    #[arg(short, long, default_value = Settings::FILE_NAME, global = true)]
    pub config: PathBuf,

    /// User database file (overrides `path` in the config file)
    #[arg(short, long, env = "CREDSTORE_FILE", global = true)]
    pub file: Option<String>,

    /// File format: plain or htpasswd (overrides `format`)
    #[arg(long, env = "CREDSTORE_FORMAT", global = true)]
    pub format: Option<String>,

    /// Hash method for htpasswd files (overrides `method`)
    #[arg(short, long, env = "CREDSTORE_METHOD", global = true)]
    pub method: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// List all users
    List,

    /// Check a user's password
    Check {
        /// Username
        user: String,
    },

    /// Add a new user
    Add {
        /// Username
        user: String,
        /// Extra data stored after the secret, verbatim
        #[arg(long)]
        extra: Option<String>,
    },

    /// Change an existing user's password
    Passwd {
        /// Username
        user: String,
    },

    /// Delete a user
    Delete {
        /// Username
        user: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// List the available hash methods
    Schemes,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the store from the config file and command-line overrides.
pub fn open_store(cli: &Cli) -> Result<CredentialStore> {
    let mut settings = Settings::load_file(&cli.config)?;
    settings.set_override("path", cli.file.as_deref());
    settings.set_override("format", cli.format.as_deref());
    settings.set_override("method", cli.method.as_deref());

    if settings.get("path").is_none() {
        return Err(StoreError::InvalidConfig(format!(
            "no user database configured; pass --file or set `path` in {}",
            cli.config.display()
        )));
    }

    registry::from_config(&settings.to_value())
}

/// Get a password, trying in order:
/// 1. `CREDSTORE_PASSWORD` env var (scripts, CI)
/// 2. One line of piped stdin
/// 3. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = non_interactive_password()? {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| StoreError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation.
///
/// Also respects `CREDSTORE_PASSWORD` and piped stdin for scripted usage.
pub fn prompt_new_password(prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = non_interactive_password()? {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "Passwords do not match, try again")
        .interact()
        .map_err(|e| StoreError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

fn non_interactive_password() -> Result<Option<Zeroizing<String>>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Some(Zeroizing::new(pw)));
        }
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut line = Zeroizing::new(String::new());
    stdin.lock().read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.is_empty() {
        return Err(StoreError::CommandFailed(
            "no password on stdin and no terminal to prompt on".into(),
        ));
    }
    Ok(Some(Zeroizing::new(trimmed.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_overrides_parse_after_subcommand() {
        let cli = Cli::parse_from([
            "credstore",
            "list",
            "--file",
            "users.htpasswd",
            "--format",
            "htpasswd",
            "-m",
            "bcrypt",
        ]);
        assert!(matches!(cli.command, Commands::List));
        assert_eq!(cli.file.as_deref(), Some("users.htpasswd"));
        assert_eq!(cli.format.as_deref(), Some("htpasswd"));
        assert_eq!(cli.method.as_deref(), Some("bcrypt"));
    }

    #[test]
    fn open_store_requires_a_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = Cli {
            command: Commands::List,
            config: dir.path().join("missing.toml"),
            file: None,
            format: None,
            method: None,
        };
        let err = open_store(&cli).unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfig(_)), "{err}");
        assert!(err.to_string().contains("--file"), "{err}");
    }

    #[test]
    fn open_store_applies_overrides() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("cfg.toml");
        std::fs::write(&config, "path = \"from-file\"\nformat = \"htpasswd\"\n").unwrap();

        let cli = Cli::parse_from([
            "credstore",
            "--config",
            config.to_str().unwrap(),
            "--file",
            "from-flag",
            "list",
        ]);
        let store = open_store(&cli).unwrap();
        assert_eq!(store.path(), std::path::Path::new("from-flag"));
        assert!(store.supports_verification());
    }
}
