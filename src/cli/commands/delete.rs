//! `credstore delete`: remove a user from the database.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::{StoreError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, user: &str, force: bool) -> Result<()> {
    let store = open_store(cli)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete user '{user}'?"))
            .default(false)
            .interact()
            .map_err(|e| StoreError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            return Err(StoreError::UserCancelled);
        }
    }

    store.delete(user)?;

    output::success(&format!("Deleted user '{user}'"));

    Ok(())
}
