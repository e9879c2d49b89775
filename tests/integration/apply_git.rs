//! End-to-end patch application with the default tools (`git apply`, then `patch`).
//!
//! Skipped when git is not installed.

use super::test_utils::{git_available, git_workspace, write_file};
use defpatch::config::PatchConfig;
use defpatch::error::PatchError;
use defpatch::hasher;
use defpatch::{PatchApplier, PatchOutcome, DELETED_MARKER};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const ORIGINAL: &str = "alpha\nbeta\ngamma\n";

const MODIFY_PATCH: &str = "\
diff --git a/defs.json b/defs.json
--- a/defs.json
+++ b/defs.json
@@ -1,3 +1,3 @@
 alpha
-beta
+BETA
 gamma
";

const DELETE_PATCH: &str = "\
diff --git a/defs.json b/defs.json
deleted file mode 100644
--- a/defs.json
+++ /dev/null
@@ -1,3 +0,0 @@
-alpha
-beta
-gamma
";

const STALE_PATCH: &str = "\
diff --git a/defs.json b/defs.json
--- a/defs.json
+++ b/defs.json
@@ -1,3 +1,3 @@
 one
-two
+TWO
 three
";

fn applier_for(ws: &std::path::Path) -> PatchApplier {
    let config = PatchConfig {
        working_dir: ws.to_path_buf(),
        ..PatchConfig::default()
    };
    PatchApplier::from_config(&config).unwrap()
}

#[test]
fn test_valid_patch_yields_post_patch_hash() {
    if !git_available() {
        eprintln!("git not installed; skipping");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let ws = git_workspace(&temp_dir);
    let target = ws.join("defs.json");
    let patch = temp_dir.path().join("defs.patch");
    write_file(&target, ORIGINAL);
    write_file(&patch, MODIFY_PATCH);

    let outcome = applier_for(&ws).apply(&target, &patch).unwrap();

    let expected = hasher::compute_blob_hash(b"alpha\nBETA\ngamma\n");
    assert_eq!(outcome, PatchOutcome::Patched { hash: expected });
    assert_eq!(fs::read_to_string(&target).unwrap(), "alpha\nBETA\ngamma\n");
}

#[test]
fn test_hash_agrees_with_git_hash_object() {
    if !git_available() {
        eprintln!("git not installed; skipping");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("defs.json");
    write_file(&file, "{\n  \"color\": \"<color>\"\n}\n");

    let output = Command::new("git")
        .arg("hash-object")
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    let git_hash = String::from_utf8(output.stdout).unwrap();

    assert_eq!(
        hasher::to_hex(&hasher::hash_file(&file).unwrap()),
        git_hash.trim()
    );
}

#[test]
fn test_deleting_patch_leaves_marker() {
    if !git_available() {
        eprintln!("git not installed; skipping");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let ws = git_workspace(&temp_dir);
    let target = ws.join("defs.json");
    let patch = temp_dir.path().join("defs.patch");
    write_file(&target, ORIGINAL);
    write_file(&patch, DELETE_PATCH);

    let outcome = applier_for(&ws).apply(&target, &patch).unwrap();

    assert_eq!(outcome.to_string(), DELETED_MARKER);
    assert_eq!(fs::read_to_string(&target).unwrap(), DELETED_MARKER);
}

#[test]
fn test_rejected_patch_reports_both_tools() {
    if !git_available() {
        eprintln!("git not installed; skipping");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let ws = git_workspace(&temp_dir);
    let target = ws.join("defs.json");
    let patch = temp_dir.path().join("defs.patch");
    write_file(&target, ORIGINAL);
    write_file(&patch, STALE_PATCH);

    let err = applier_for(&ws).apply(&target, &patch).unwrap_err();

    match &err {
        PatchError::ApplyFailed {
            primary, fallback, ..
        } => {
            assert_eq!(primary.tool, "git apply");
            assert!(!primary.success);
            assert!(!primary.output.is_empty(), "git should explain the rejection");
            assert_eq!(fallback.tool, "patch");
            assert!(!fallback.success);
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("git apply ("));
    assert!(message.contains("patch ("));
    assert!(fs::read_to_string(&target).unwrap().starts_with(ORIGINAL));
}
