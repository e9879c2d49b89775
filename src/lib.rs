//! defpatch: patch generated files and report their content hash
//!
//! Applies hand-maintained unified diffs on top of machine-generated files, using
//! external tools (`git apply`, then `patch`), and reports the git blob hash of
//! the result so generation pipelines can cache and compare post-patch state.

pub mod cli;
pub mod config;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod manifest;
pub mod patch;
pub mod types;

pub use patch::{apply_patch, PatchApplier};
pub use types::{PatchOutcome, DELETED_MARKER};
