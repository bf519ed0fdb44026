use clap::Parser;
use credstore::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `credstore=debug`).
const LOG_ENV: &str = "CREDSTORE_LOG";

fn main() {
    // Diagnostics go to stderr so they never mix with command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List => credstore::cli::commands::list::execute(&cli),
        Commands::Check { ref user } => credstore::cli::commands::check::execute(&cli, user),
        Commands::Add {
            ref user,
            ref extra,
        } => credstore::cli::commands::add::execute(&cli, user, extra.as_deref()),
        Commands::Passwd { ref user } => credstore::cli::commands::passwd::execute(&cli, user),
        Commands::Delete { ref user, force } => {
            credstore::cli::commands::delete::execute(&cli, user, force)
        }
        Commands::Schemes => credstore::cli::commands::schemes::execute(),
        Commands::Completions { shell } => credstore::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        credstore::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
