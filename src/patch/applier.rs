//! Primary/fallback patch application for a single target file.

use crate::config::PatchConfig;
use crate::error::{ApiError, PatchError};
use crate::hasher;
use crate::patch::tool::{CommandTool, PatchTool};
use crate::types::{PatchOutcome, DELETED_MARKER};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Applies patches with a primary tool, degrading once to a fallback tool.
pub struct PatchApplier {
    primary: Box<dyn PatchTool>,
    fallback: Box<dyn PatchTool>,
}

impl Default for PatchApplier {
    /// `git apply --ignore-whitespace`, then `patch`, both in the current directory.
    fn default() -> Self {
        Self::new(CommandTool::git_apply(), CommandTool::patch())
    }
}

impl PatchApplier {
    pub fn new(primary: impl PatchTool + 'static, fallback: impl PatchTool + 'static) -> Self {
        Self {
            primary: Box::new(primary),
            fallback: Box::new(fallback),
        }
    }

    /// Build an applier from validated patch configuration.
    pub fn from_config(config: &PatchConfig) -> Result<Self, ApiError> {
        config.validate().map_err(ApiError::ConfigError)?;
        Ok(Self::new(
            CommandTool::from_config(&config.primary, &config.working_dir),
            CommandTool::from_config(&config.fallback, &config.working_dir),
        ))
    }

    pub fn primary_name(&self) -> &str {
        self.primary.name()
    }

    pub fn fallback_name(&self) -> &str {
        self.fallback.name()
    }

    /// Apply `patch_path` to `path`.
    ///
    /// Returns the blob hash of the patched file, or [`PatchOutcome::Deleted`] when
    /// the patch removed it, in which case `path` now holds the deleted marker.
    pub fn apply(&self, path: &Path, patch_path: &Path) -> Result<PatchOutcome, PatchError> {
        debug!(
            target_path = %path.display(),
            patch = %patch_path.display(),
            primary = self.primary.name(),
            "Applying patch"
        );

        let primary = self.primary.run(path, patch_path);
        if !primary.success {
            warn!(
                tool = %primary.tool,
                status = %primary.status,
                patch = %patch_path.display(),
                "Primary patch tool failed, trying fallback"
            );
            let fallback = self.fallback.run(path, patch_path);
            if !fallback.success {
                return Err(PatchError::ApplyFailed {
                    path: path.to_path_buf(),
                    patch: patch_path.to_path_buf(),
                    primary,
                    fallback,
                });
            }
            debug!(tool = %fallback.tool, "Fallback patch tool succeeded");
        }

        match std::fs::metadata(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                write_deleted_marker(path)?;
                info!(target_path = %path.display(), "Patch deleted target, wrote marker");
                Ok(PatchOutcome::Deleted)
            }
            _ => {
                let hash = hasher::hash_file(path)?;
                info!(
                    target_path = %path.display(),
                    hash = %hasher::to_hex(&hash),
                    "Patch applied"
                );
                Ok(PatchOutcome::Patched { hash })
            }
        }
    }
}

fn write_deleted_marker(path: &Path) -> Result<(), PatchError> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    options
        .open(path)
        .and_then(|mut file| file.write_all(DELETED_MARKER.as_bytes()))
        .map_err(|source| PatchError::DeletionMarker {
            path: path.to_path_buf(),
            source,
        })
}
