//! Shared test utilities for integration tests
//!
//! Scratch workspaces, patch tool detection and isolated config environments.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that touch HOME / XDG_CONFIG_HOME in this process.
static CONFIG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }

    fn restore(self) {
        match self.home {
            Some(orig) => std::env::set_var("HOME", orig),
            None => std::env::remove_var("HOME"),
        }
        match self.xdg_config_home {
            Some(orig) => std::env::set_var("XDG_CONFIG_HOME", orig),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

/// Run `f` with XDG_CONFIG_HOME pointing at `<test_dir>/config` and HOME at `<test_dir>/home`.
pub fn with_config_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let config_home = test_dir.path().join("config");
    let home = test_dir.path().join("home");
    std::fs::create_dir_all(&config_home).unwrap();
    std::fs::create_dir_all(&home).unwrap();

    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);

    let result = f();

    env_state.restore();

    result
}

/// True when `git` can be executed. Tests needing the real primary tool skip otherwise.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Create a workspace directory initialized as its own git repository, so that
/// `git apply` resolves patch paths against it regardless of where temp dirs live.
pub fn git_workspace(temp_dir: &TempDir) -> PathBuf {
    let ws = temp_dir.path().join("ws");
    std::fs::create_dir_all(&ws).unwrap();
    let status = Command::new("git")
        .args(["init", "-q"])
        .current_dir(&ws)
        .status()
        .unwrap();
    assert!(status.success(), "git init failed");
    ws
}

/// Write a file, creating parent directories.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Config file content whose tools are `sh` scripts.
///
/// `primary` and `fallback` are shell snippets run as `sh -c <snippet> sh <target> <patch>`,
/// so `$1` is the target and `$2` the patch.
pub fn sh_tools_config(primary: &str, fallback: &str) -> String {
    format!(
        r#"
[patch.primary]
program = "sh"
args = ["-c", {primary:?}, "sh", "{{target}}", "{{patch}}"]

[patch.fallback]
program = "sh"
args = ["-c", {fallback:?}, "sh", "{{target}}", "{{patch}}"]
"#
    )
}
