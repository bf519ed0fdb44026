//! One module per subcommand, each exposing an `execute` function.

pub mod add;
pub mod check;
pub mod completions;
pub mod delete;
pub mod list;
pub mod passwd;
pub mod schemes;
