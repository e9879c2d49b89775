//! Patch Application
//!
//! Applies a unified diff to a single generated file by shelling out to external
//! tools: `git apply` first, plain `patch` as the fallback. After a successful
//! apply the target is either hashed, or, if the patch removed it, replaced by
//! the deleted marker.

pub mod applier;
pub mod tool;

pub use applier::PatchApplier;
pub use tool::{CommandTool, PatchTool};

use crate::error::PatchError;
use std::path::Path;

/// Apply `patch_path` to `path` with the default tools and return the string
/// form of the outcome: the hex blob hash, or `<deleted>`.
pub fn apply_patch(path: &Path, patch_path: &Path) -> Result<String, PatchError> {
    PatchApplier::default()
        .apply(path, patch_path)
        .map(|outcome| outcome.to_string())
}
