//! `credstore add`: add a new user to the database.

use crate::cli::output;
use crate::cli::{open_store, prompt_new_password, Cli};
use crate::errors::{StoreError, Result};

/// Execute the `add` command.
pub fn execute(cli: &Cli, user: &str, extra: Option<&str>) -> Result<()> {
    let store = open_store(cli)?;

    // Fail before prompting when the user is already there.
    if store.contains(user)? {
        return Err(StoreError::AlreadyExists(user.to_string()));
    }

    let password = prompt_new_password(&format!("New password for {user}"))?;
    let secret = store.hash_for_storage(user, &password)?;
    if !store.supports_verification() {
        output::warning("The plain format stores this password unhashed.");
    }

    store.add(user, &secret, extra)?;

    output::success(&format!(
        "User '{user}' added to {}",
        store.path().display()
    ));

    Ok(())
}
