//! External patch tools.

use crate::config::ToolConfig;
use crate::types::ToolRun;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

const TARGET_PLACEHOLDER: &str = "{target}";
const PATCH_PLACEHOLDER: &str = "{patch}";

/// Something that can apply a patch file to a target.
///
/// Failures are reported through [`ToolRun::success`], never as an error, so the
/// applier can always move on to its fallback.
pub trait PatchTool {
    fn name(&self) -> &str;

    fn run(&self, target: &Path, patch: &Path) -> ToolRun;
}

/// A patch tool backed by an external program.
///
/// Arguments may contain `{target}` and `{patch}`; they are substituted with
/// absolute paths on every run.
#[derive(Debug, Clone)]
pub struct CommandTool {
    name: String,
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl CommandTool {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = program.into();
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let name = match args.first() {
            Some(sub) if !sub.starts_with('-') && !sub.contains('{') => {
                format!("{} {}", program, sub)
            }
            _ => program.clone(),
        };
        Self {
            name,
            program,
            args,
            working_dir: PathBuf::from("."),
        }
    }

    /// `git apply --ignore-whitespace {patch}`
    pub fn git_apply() -> Self {
        Self::new("git", ["apply", "--ignore-whitespace", PATCH_PLACEHOLDER])
    }

    /// `patch {target} {patch}`
    pub fn patch() -> Self {
        Self::new("patch", [TARGET_PLACEHOLDER, PATCH_PLACEHOLDER])
    }

    pub fn from_config(config: &ToolConfig, working_dir: &Path) -> Self {
        Self::new(config.program.clone(), config.args.iter().cloned()).with_working_dir(working_dir)
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn expand_args(&self, target: &Path, patch: &Path) -> Vec<OsString> {
        self.args
            .iter()
            .map(|arg| match arg.as_str() {
                TARGET_PLACEHOLDER => target.as_os_str().to_owned(),
                PATCH_PLACEHOLDER => patch.as_os_str().to_owned(),
                other => OsString::from(
                    other
                        .replace(TARGET_PLACEHOLDER, &target.to_string_lossy())
                        .replace(PATCH_PLACEHOLDER, &patch.to_string_lossy()),
                ),
            })
            .collect()
    }
}

impl PatchTool for CommandTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, target: &Path, patch: &Path) -> ToolRun {
        let failed = |reason: String| ToolRun {
            tool: self.name.clone(),
            success: false,
            status: reason.clone(),
            output: reason,
        };

        // The tool runs in `working_dir`, so hand it paths that do not depend on ours.
        let (target, patch) = match (absolute(target), absolute(patch)) {
            (Ok(t), Ok(p)) => (t, p),
            (Err(e), _) | (_, Err(e)) => {
                return failed(format!("failed to resolve paths: {}", e));
            }
        };
        let args = self.expand_args(&target, &patch);

        debug!(
            tool = %self.name,
            program = %self.program,
            working_dir = %self.working_dir.display(),
            ?args,
            "Running patch tool"
        );

        let output = match Command::new(&self.program)
            .args(&args)
            .current_dir(&self.working_dir)
            .output()
        {
            Ok(output) => output,
            Err(e) => return failed(format!("failed to start {}: {}", self.program, e)),
        };

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        ToolRun {
            tool: self.name.clone(),
            success: output.status.success(),
            status: output.status.to_string(),
            output: combined,
        }
    }
}

/// Resolve a path against the current directory without requiring it to exist.
fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(dunce::simplified(path).to_path_buf());
    }
    let cwd = dunce::canonicalize(std::env::current_dir()?)?;
    Ok(cwd.join(path))
}
