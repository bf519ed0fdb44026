//! `credstore check`: verify a user's password.

use crate::cli::output;
use crate::cli::{open_store, prompt_password, Cli};
use crate::errors::{StoreError, Result};

/// Execute the `check` command.
///
/// An unknown user and a wrong password produce the same failure.
pub fn execute(cli: &Cli, user: &str) -> Result<()> {
    let store = open_store(cli)?;
    let password = prompt_password(&format!("Password for {user}"))?;

    if store.authenticate(user, &password)? {
        output::success(&format!("Password for '{user}' is correct"));
        Ok(())
    } else {
        Err(StoreError::CommandFailed(format!(
            "authentication failed for '{user}'"
        )))
    }
}
