//! Config layering: defaults, global file, workspace files.

use super::test_utils::{with_config_env, write_file};
use defpatch::config::{global_config_path, ConfigLoader};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_defaults_without_files() {
    let test_dir = TempDir::new().unwrap();
    let ws = test_dir.path().join("ws");
    std::fs::create_dir_all(&ws).unwrap();

    let config = with_config_env(&test_dir, || ConfigLoader::load(&ws).unwrap());

    assert_eq!(config.patch.working_dir, PathBuf::from("."));
    assert_eq!(config.patch.primary.program, "git");
    assert_eq!(config.patch.fallback.program, "patch");
    assert_eq!(config.logging.output, "stderr");
}

#[test]
fn test_global_file_is_read() {
    let test_dir = TempDir::new().unwrap();
    let ws = test_dir.path().join("ws");
    std::fs::create_dir_all(&ws).unwrap();

    let config = with_config_env(&test_dir, || {
        let global = global_config_path().unwrap();
        assert_eq!(global, test_dir.path().join("config/defpatch/config.toml"));
        write_file(
            &global,
            r#"
[patch.fallback]
program = "gpatch"
args = ["{target}", "{patch}"]
"#,
        );
        ConfigLoader::load(&ws).unwrap()
    });

    assert_eq!(config.patch.fallback.program, "gpatch");
    assert_eq!(config.patch.primary.program, "git");
}

#[test]
fn test_workspace_file_overrides_global() {
    let test_dir = TempDir::new().unwrap();
    let ws = test_dir.path().join("ws");

    let config = with_config_env(&test_dir, || {
        write_file(
            &global_config_path().unwrap(),
            r#"
[patch]
working_dir = "from-global"

[logging]
level = "warn"
"#,
        );
        write_file(
            &ws.join("config/config.toml"),
            r#"
[patch]
working_dir = "from-workspace"
"#,
        );
        ConfigLoader::load(&ws).unwrap()
    });

    assert_eq!(config.patch.working_dir, PathBuf::from("from-workspace"));
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_explicit_file_skips_global() {
    let test_dir = TempDir::new().unwrap();
    let explicit = test_dir.path().join("explicit.toml");
    write_file(&explicit, "[logging]\nformat = \"json\"\n");

    let config = with_config_env(&test_dir, || {
        write_file(
            &global_config_path().unwrap(),
            "[logging]\nlevel = \"error\"\n",
        );
        ConfigLoader::load_from_file(&explicit).unwrap()
    });

    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.level, "info");
}
