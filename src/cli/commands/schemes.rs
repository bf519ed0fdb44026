//! `credstore schemes`: list the hash methods compiled into this build.

use crate::cli::output;
use crate::crypto;
use crate::errors::Result;

/// Execute the `schemes` command.
pub fn execute() -> Result<()> {
    output::print_schemes_table(crypto::available_schemes());
    output::tip("Select one with `--method <METHOD>` or `method = \"...\"` in .credstore.toml.");
    Ok(())
}
