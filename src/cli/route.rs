//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::config::{ConfigLoader, DefpatchConfig};
use crate::error::ApiError;
use crate::hasher;
use crate::manifest::{run_manifest, Manifest};
use crate::patch::PatchApplier;
use crate::types::DELETED_MARKER;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::format_batch_report;

/// Runtime context for CLI execution: workspace and loaded config.
///
/// Relative paths given on the command line are resolved against the workspace
/// root, the same base the patch tools run in.
pub struct RunContext {
    workspace_root: PathBuf,
    config: DefpatchConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let mut config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        config.patch.resolve_working_dir(&workspace_root);

        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &DefpatchConfig {
        &self.config
    }

    /// Build the applier from the patch config. Only commands that patch need it.
    fn applier(&self) -> Result<PatchApplier, ApiError> {
        let applier = PatchApplier::from_config(&self.config.patch)?;
        debug!(
            primary = applier.primary_name(),
            fallback = applier.fallback_name(),
            working_dir = %self.config.patch.working_dir.display(),
            "Patch tools configured"
        );
        Ok(applier)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            self.workspace_root.join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Execute a command and return the text to print on stdout.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Apply {
                target,
                patch,
                expect,
            } => {
                let target = self.resolve(target);
                let patch = self.resolve(patch);
                let outcome = self.applier()?.apply(&target, &patch)?.to_string();
                if let Some(expected) = expect {
                    check_expected(&target, expected, &outcome)?;
                }
                Ok(outcome)
            }
            Commands::Hash { file } => Ok(hasher::to_hex(&hasher::hash_file(&self.resolve(file))?)),
            Commands::Batch {
                manifest,
                format,
                check,
            } => {
                // Entries resolve against the manifest's directory.
                let manifest = Manifest::load(&self.resolve(manifest))?;
                let report = run_manifest(&self.applier()?, &manifest)?;
                let rendered = format_batch_report(&report, format)?;
                let failed = report.mismatches().count();
                if *check && failed > 0 {
                    return Err(ApiError::ChecksFailed {
                        failed,
                        report: rendered,
                    });
                }
                Ok(rendered)
            }
        }
    }
}

fn check_expected(target: &Path, expected: &str, actual: &str) -> Result<(), ApiError> {
    if expected != DELETED_MARKER {
        hasher::parse_hex(expected)?;
    }
    if expected.eq_ignore_ascii_case(actual) {
        Ok(())
    } else {
        Err(ApiError::HashMismatch {
            path: target.to_path_buf(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}
