//! Configuration System
//!
//! Layered configuration for the patch tools and logging. Sources are merged in
//! order: built-in defaults, the global config file, workspace config files, then
//! `DEFPATCH__*` environment variables. An explicit `--config` file replaces the
//! file layers and sits above the environment.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefpatchConfig {
    /// Patch tool configuration
    #[serde(default)]
    pub patch: PatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which tools apply patches, and where they run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchConfig {
    /// Directory the tools run in. Patch headers are resolved relative to it.
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    /// Tried first. A table given here replaces the default tool entirely.
    #[serde(default = "default_primary")]
    pub primary: ToolConfig,

    /// Tried once when the primary fails.
    #[serde(default = "default_fallback")]
    pub fallback: ToolConfig,
}

/// An external program and its argument template.
///
/// `{target}` and `{patch}` in `args` are replaced with the target file and
/// patch file paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,
}

fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_primary() -> ToolConfig {
    ToolConfig {
        program: "git".to_string(),
        args: vec![
            "apply".to_string(),
            "--ignore-whitespace".to_string(),
            "{patch}".to_string(),
        ],
    }
}

fn default_fallback() -> ToolConfig {
    ToolConfig {
        program: "patch".to_string(),
        args: vec!["{target}".to_string(), "{patch}".to_string()],
    }
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            working_dir: default_working_dir(),
            primary: default_primary(),
            fallback: default_fallback(),
        }
    }
}

impl ToolConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.program.trim().is_empty() {
            return Err("program cannot be empty".to_string());
        }
        if !self
            .args
            .iter()
            .any(|arg| arg.contains("{patch}"))
        {
            return Err(format!(
                "'{}' arguments must reference {{patch}}",
                self.program
            ));
        }
        Ok(())
    }
}

impl PatchConfig {
    /// Validate tool definitions and the working directory
    pub fn validate(&self) -> Result<(), String> {
        self.primary
            .validate()
            .map_err(|e| format!("Primary tool: {}", e))?;
        self.fallback
            .validate()
            .map_err(|e| format!("Fallback tool: {}", e))?;

        if !self.working_dir.is_dir() {
            return Err(format!(
                "Working directory {} does not exist",
                self.working_dir.display()
            ));
        }
        Ok(())
    }

    /// Resolve a relative working directory against `base`.
    pub fn resolve_working_dir(&mut self, base: &Path) {
        if self.working_dir.is_relative() {
            self.working_dir = if self.working_dir == Path::new(".") {
                base.to_path_buf()
            } else {
                base.join(&self.working_dir)
            };
        }
    }
}
