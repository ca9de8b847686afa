//! Thin subprocess wrapper around the `git` binary.
//!
//! This is the crate's sole process boundary: every other module calls
//! through [`GitRunner`] rather than invoking [`std::process::Command`]
//! directly, so the synchronizer's pipeline can be exercised against real
//! throwaway repositories in tests without a second mocking layer.

use std::path::Path;
use std::process::{Command, Stdio};

/// A single `git` invocation that failed, or failed to even start.
#[derive(Debug)]
pub enum VcsError {
    /// The subprocess could not be spawned at all (e.g. `git` not on PATH).
    Spawn(std::io::Error),
    /// `git` ran and exited non-zero.
    CommandFailed { args: Vec<String>, stderr: String },
    /// `git` produced output that was not valid UTF-8, or output this crate
    /// could not parse into the shape it expected.
    Parse(String),
}

impl std::fmt::Display for VcsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VcsError::Spawn(e) => write!(f, "failed to run git: {e}"),
            VcsError::CommandFailed { args, stderr } => {
                write!(f, "git {} failed: {}", args.join(" "), stderr.trim())
            }
            VcsError::Parse(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for VcsError {}

/// Working-tree cleanliness as reported by `git status --porcelain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub dirty: bool,
}

/// Runs `git` against a fixed working directory.
///
/// Stateless and `Sync`: concurrent calls against distinct working
/// directories are independent, which is what lets the parallel executor
/// drive one `GitRunner` from many worker threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitRunner;

impl GitRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run `git <args>` in `dir`, failing on non-zero exit.
    ///
    /// When `verbose` is true the child inherits stdout/stderr (used in
    /// sequential mode so the user sees live `git` output); otherwise both
    /// streams are captured and folded into the error on failure.
    pub fn run(&self, dir: &Path, args: &[&str], verbose: bool) -> Result<(), VcsError> {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(dir);

        if verbose {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
            let status = cmd.status().map_err(VcsError::Spawn)?;
            if !status.success() {
                return Err(VcsError::CommandFailed {
                    args: owned_args(args),
                    stderr: String::new(),
                });
            }
            Ok(())
        } else {
            let output = cmd.output().map_err(VcsError::Spawn)?;
            if !output.status.success() {
                return Err(VcsError::CommandFailed {
                    args: owned_args(args),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                });
            }
            Ok(())
        }
    }

    /// Run `git <args>` in `dir`, always capturing stdout and never failing
    /// on a non-zero exit — the caller inspects the exit code itself.
    pub fn run_captured(&self, dir: &Path, args: &[&str]) -> Result<(i32, String), VcsError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(VcsError::Spawn)?;

        let code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        Ok((code, stdout))
    }

    /// Current branch name, or `None` when HEAD is detached.
    pub fn current_branch(&self, dir: &Path) -> Result<Option<String>, VcsError> {
        let (code, out) = self.run_captured(dir, &["branch", "--show-current"])?;
        if code != 0 {
            return Err(VcsError::CommandFailed {
                args: owned_args(&["branch", "--show-current"]),
                stderr: out,
            });
        }
        let branch = out.trim();
        Ok(if branch.is_empty() {
            None
        } else {
            Some(branch.to_string())
        })
    }

    /// Working-tree cleanliness.
    pub fn status(&self, dir: &Path) -> Result<Status, VcsError> {
        let (code, out) = self.run_captured(dir, &["status", "--porcelain"])?;
        if code != 0 {
            return Err(VcsError::CommandFailed {
                args: owned_args(&["status", "--porcelain"]),
                stderr: out,
            });
        }
        Ok(Status {
            dirty: !out.trim().is_empty(),
        })
    }

    /// Resolve `rref` (a tag, branch, or sha) to its full commit hash.
    pub fn sha1(&self, dir: &Path, rref: &str) -> Result<String, VcsError> {
        let (code, out) = self.run_captured(dir, &["rev-parse", rref])?;
        if code != 0 {
            return Err(VcsError::CommandFailed {
                args: owned_args(&["rev-parse", rref]),
                stderr: out,
            });
        }
        Ok(out.trim().to_string())
    }

    /// URL currently configured for `name`, or `None` if no such remote exists.
    pub fn remote_url(&self, dir: &Path, name: &str) -> Result<Option<String>, VcsError> {
        let (code, out) = self.run_captured(dir, &["remote", "get-url", name])?;
        Ok(if code == 0 {
            Some(out.trim().to_string())
        } else {
            None
        })
    }
}

fn owned_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}
