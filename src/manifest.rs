//! Batch application from a TOML manifest.
//!
//! Each entry is one target, one patch and an optional expected outcome. Entries
//! are applied in order through the single-file applier; the first failure stops
//! the run.

use crate::error::ApiError;
use crate::hasher;
use crate::patch::PatchApplier;
use crate::types::DELETED_MARKER;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A manifest file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "entry")]
    pub entries: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub target: PathBuf,
    pub patch: PathBuf,
    /// 40-hex blob hash or `<deleted>`.
    #[serde(default)]
    pub expected: Option<String>,
}

impl Manifest {
    /// Load a manifest. Relative paths are resolved against the manifest's directory.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::ManifestError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut manifest = Self::parse(&content)
            .map_err(|e| ApiError::ManifestError(format!("{}: {}", path.display(), e)))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for entry in &mut manifest.entries {
            if entry.target.is_relative() {
                entry.target = base.join(&entry.target);
            }
            if entry.patch.is_relative() {
                entry.patch = base.join(&entry.patch);
            }
        }
        Ok(manifest)
    }

    /// Parse manifest text and validate expected values. Paths are left untouched.
    pub fn parse(content: &str) -> Result<Self, ApiError> {
        let manifest: Manifest =
            toml::from_str(content).map_err(|e| ApiError::ManifestError(e.to_string()))?;
        for entry in &manifest.entries {
            if let Some(expected) = &entry.expected {
                if expected != DELETED_MARKER {
                    hasher::parse_hex(expected)?;
                }
            }
        }
        Ok(manifest)
    }
}

/// Outcome of one manifest entry.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRow {
    pub target: PathBuf,
    pub patch: PathBuf,
    pub outcome: String,
    pub expected: Option<String>,
    /// `None` when the entry has no expectation.
    pub matches: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub rows: Vec<BatchRow>,
}

impl BatchReport {
    pub fn all_match(&self) -> bool {
        self.rows.iter().all(|row| row.matches != Some(false))
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &BatchRow> {
        self.rows.iter().filter(|row| row.matches == Some(false))
    }
}

/// Apply every manifest entry in order.
pub fn run_manifest(applier: &PatchApplier, manifest: &Manifest) -> Result<BatchReport, ApiError> {
    let mut report = BatchReport::default();

    for entry in &manifest.entries {
        let outcome = applier.apply(&entry.target, &entry.patch)?.to_string();
        let matches = entry
            .expected
            .as_ref()
            .map(|expected| expected.eq_ignore_ascii_case(&outcome));

        if matches == Some(false) {
            warn!(
                target_path = %entry.target.display(),
                expected = entry.expected.as_deref().unwrap_or_default(),
                actual = %outcome,
                "Patched file does not match expected hash"
            );
        }

        report.rows.push(BatchRow {
            target: entry.target.clone(),
            patch: entry.patch.clone(),
            outcome,
            expected: entry.expected.clone(),
            matches,
        });
    }

    info!(entries = report.rows.len(), "Manifest applied");
    Ok(report)
}
