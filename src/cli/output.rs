//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::crypto::{self, HashScheme};
use crate::userdb::{FileFormat, UserRecord};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of users (Username, Scheme, Extra).
pub fn print_users_table(format: &FileFormat, records: &[UserRecord]) {
    if records.is_empty() {
        info("No users in this database yet.");
        tip("Run `credstore add <USER>` to add the first one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Username", "Scheme", "Extra"]);

    for r in records {
        table.add_row(vec![
            r.username.clone(),
            scheme_label(format, &r.secret).to_string(),
            r.extra.clone().unwrap_or_default(),
        ]);
    }

    println!("{table}");
}

/// Print a table of hash schemes, marking the default.
pub fn print_schemes_table(schemes: &[HashScheme]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Method", "Description", "Default"]);

    for s in schemes {
        let is_default = if s.name() == crypto::DEFAULT_SCHEME { "yes" } else { "" };
        table.add_row(vec![s.name(), s.description(), is_default]);
    }

    println!("{table}");
}

fn scheme_label(format: &FileFormat, secret: &str) -> &'static str {
    if !format.supports_verification() {
        return "plaintext";
    }
    crypto::identify_scheme(secret).map_or("unknown", HashScheme::name)
}
