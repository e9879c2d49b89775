//! Core types shared by the hasher, the patch applier and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Git blob object id (SHA-1, 20 bytes).
pub type BlobHash = [u8; 20];

/// Content written to, and reported for, a target that the patch deleted.
pub const DELETED_MARKER: &str = "<deleted>";

/// Result of applying a patch to a single target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The target still exists; `hash` is the git blob hash of its new content.
    Patched { hash: BlobHash },
    /// The patch removed the target. The marker file has been written in its place.
    Deleted,
}

impl PatchOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, PatchOutcome::Deleted)
    }

    pub fn hash(&self) -> Option<&BlobHash> {
        match self {
            PatchOutcome::Patched { hash } => Some(hash),
            PatchOutcome::Deleted => None,
        }
    }
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOutcome::Patched { hash } => write!(f, "{}", hex::encode(hash)),
            PatchOutcome::Deleted => f.write_str(DELETED_MARKER),
        }
    }
}

/// A single external tool invocation: who ran, how it exited, what it printed.
///
/// `output` holds stdout followed by stderr. When the tool could not be
/// started at all, both `status` and `output` carry the spawn error text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRun {
    pub tool: String,
    pub success: bool,
    pub status: String,
    pub output: String,
}

impl fmt::Display for ToolRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tool, self.status)?;
        if self.output.trim().is_empty() {
            write!(f, "\nOUTPUT: <none>")
        } else {
            write!(f, "\nOUTPUT:\n{}", self.output.trim_end())
        }
    }
}
