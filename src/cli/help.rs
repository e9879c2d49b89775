//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string used in log events (e.g. "apply", "batch").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Apply { .. } => "apply",
        Commands::Hash { .. } => "hash",
        Commands::Batch { .. } => "batch",
    }
}
