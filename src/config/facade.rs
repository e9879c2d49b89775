//! Config loading entry point.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::DefpatchConfig;
use crate::error::ApiError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Loads [`DefpatchConfig`] from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace: defaults, global file, workspace files, environment.
    pub fn load(workspace_root: &Path) -> Result<DefpatchConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: DefpatchConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from one explicit file. Global and workspace files are skipped,
    /// and the file takes precedence over `DEFPATCH__*` environment variables.
    pub fn load_from_file(config_path: &Path) -> Result<DefpatchConfig, ApiError> {
        if !config_path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        let builder = environment::add_to_builder(merge_policy::builder_with_defaults()?)
            .add_source(File::from(config_path).required(true));

        let config: DefpatchConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %config_path.display(), "Configuration loaded");
        Ok(config)
    }
}
