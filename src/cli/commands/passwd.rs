//! `credstore passwd`: change an existing user's password.

use crate::cli::output;
use crate::cli::{open_store, prompt_new_password, Cli};
use crate::errors::{StoreError, Result};

/// Execute the `passwd` command.
pub fn execute(cli: &Cli, user: &str) -> Result<()> {
    let store = open_store(cli)?;

    if !store.contains(user)? {
        return Err(StoreError::NotFound(user.to_string()));
    }

    let password = prompt_new_password(&format!("New password for {user}"))?;
    let secret = store.hash_for_storage(user, &password)?;
    store.set_secret(user, &secret)?;

    output::success(&format!("Password for '{user}' updated"));

    Ok(())
}
