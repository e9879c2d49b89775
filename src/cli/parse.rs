//! CLI parse: clap types for defpatch. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// defpatch - apply hand-maintained patches to generated files
#[derive(Parser)]
#[command(name = "defpatch")]
#[command(about = "Apply a patch to a generated file and report its git blob hash")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config lookup, default tool working directory)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a patch to one file; prints its blob hash or <deleted>
    Apply {
        /// File the patch targets
        target: PathBuf,
        /// Unified diff to apply
        patch: PathBuf,
        /// Fail unless the outcome equals this hash (or <deleted>)
        #[arg(long)]
        expect: Option<String>,
    },
    /// Print the git blob hash of a file
    Hash {
        /// File to hash
        file: PathBuf,
    },
    /// Apply every entry of a manifest in order
    Batch {
        /// Manifest file (TOML, [[entry]] tables)
        manifest: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Fail when any entry does not match its expected outcome
        #[arg(long)]
        check: bool,
    },
}
