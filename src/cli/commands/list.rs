//! `credstore list`: display all users in a table.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let records = store.records()?;

    output::info(&format!(
        "{} ({}), {} user(s)",
        store.path().display(),
        store.format(),
        records.len()
    ));

    output::print_users_table(store.format(), &records);

    Ok(())
}
