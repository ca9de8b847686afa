//! The repository synchronizer: fetch, reconcile local state with the
//! manifest's pinned ref or branch, then update submodules.

use std::path::{Path, PathBuf};

use crate::error::SyncError;
use crate::outcome::Outcome;
use crate::repo::{Pin, Remote, Repo};
use crate::task::{ParallelFlag, Task};
use crate::vcs::GitRunner;

/// Reconciles one repository's on-disk state with its manifest entry.
///
/// One `Syncer` instance is shared across all repositories in a run (and,
/// in parallel mode, across worker threads) — it holds no per-repository
/// state, only the run-wide `force`/`remote_name` options and the shared
/// `parallel` flag.
pub struct Syncer {
    workspace: PathBuf,
    git: GitRunner,
    force: bool,
    remote_name: Option<String>,
    flag: ParallelFlag,
}

impl Syncer {
    pub fn new(workspace: impl Into<PathBuf>, force: bool, remote_name: Option<String>) -> Self {
        Syncer {
            workspace: workspace.into(),
            git: GitRunner::new(),
            force,
            remote_name,
            flag: ParallelFlag::new(),
        }
    }

    /// Remotes to fetch from, in the order `fetch` should try them.
    fn pick_remotes<'a>(&self, repo: &'a Repo) -> Result<Vec<&'a Remote>, SyncError> {
        match &self.remote_name {
            Some(name) => repo
                .remotes
                .iter()
                .find(|r| &r.name == name)
                .map(|r| vec![r])
                .ok_or_else(|| {
                    SyncError::Configuration(format!(
                        "Remote {name} not found for repository {}",
                        repo.dest
                    ))
                }),
            None => Ok(repo.remotes.iter().collect()),
        }
    }

    fn fetch(&self, path: &Path, repo: &Repo) -> Result<(), SyncError> {
        for remote in self.pick_remotes(repo)? {
            let mut args = vec!["fetch", "--tags", "--prune", remote.name.as_str()];
            if self.force {
                args.push("--force");
            }
            self.git
                .run(path, &args, self.flag.verbose())
                .map_err(|_| SyncError::Fetch(format!("fetch from '{}' failed", remote.name)))?;
        }
        Ok(())
    }

    /// Ref mode: reset hard to a tag or exact commit, refusing on a dirty tree.
    fn sync_to_ref(&self, path: &Path, rref: &str) -> Result<String, SyncError> {
        let status = self.git.status(path)?;
        if status.dirty {
            return Err(SyncError::DirtyWorkingTree(format!(
                "{} is dirty, skipping",
                path.display()
            )));
        }
        self.git
            .run(path, &["reset", "--hard", rref], self.flag.verbose())
            .map_err(|_| SyncError::RefUpdate)?;
        Ok(format!("Reset to {rref}"))
    }

    /// Branch mode: `None` when the checked-out branch matches the manifest,
    /// `Some(err)` (non-fatal — the caller continues the pipeline) on mismatch.
    fn check_branch(&self, repo: &Repo, path: &Path, expected: &str) -> Result<Option<SyncError>, SyncError> {
        let current = self.git.current_branch(path)?.ok_or(SyncError::DetachedHead)?;
        if current != expected {
            Ok(Some(SyncError::IncorrectBranch {
                dest: repo.dest.clone(),
                actual: current,
                expected: expected.to_string(),
            }))
        } else {
            Ok(None)
        }
    }

    /// Fast-forward the checked-out branch to its upstream.
    ///
    /// Sequential mode runs `git merge` with inherited stdio so the user
    /// sees live output; parallel mode captures output and skips the merge
    /// entirely when there is nothing to bring in, so idle repositories
    /// don't spam the aggregated summary with "Already up to date."
    fn sync_to_branch(&self, path: &Path, dest: &str) -> Result<Option<String>, SyncError> {
        if self.flag.get() {
            let (code, out) = self
                .git
                .run_captured(path, &["log", "--oneline", "HEAD..@{upstream}"])?;
            if code == 0 && out.trim().is_empty() {
                return Ok(None);
            }

            let (code, out) = self.git.run_captured(path, &["merge", "--ff-only", "@{upstream}"])?;
            if code != 0 {
                return Err(SyncError::Merge);
            }
            let underline = "-".repeat(dest.len());
            Ok(Some(format!("{dest}\n{underline}\n{out}")))
        } else {
            self.git
                .run(path, &["merge", "--ff-only", "@{upstream}"], true)
                .map_err(|_| SyncError::Merge)?;
            Ok(None)
        }
    }

    fn update_submodules(&self, path: &Path) -> Result<(), SyncError> {
        self.git
            .run(path, &["submodule", "update", "--init", "--recursive"], self.flag.verbose())?;
        Ok(())
    }
}

impl Task<Repo> for Syncer {
    fn describe_item(&self, repo: &Repo) -> String {
        repo.dest.clone()
    }

    fn describe_start(&self, repo: &Repo) -> String {
        format!("Syncing {}", repo.dest)
    }

    fn describe_end(&self, repo: &Repo) -> String {
        format!("ok {}", repo.dest)
    }

    fn process(&self, index: usize, count: usize, repo: &Repo) -> Outcome {
        let path = self.workspace.join(&repo.dest);
        self.flag
            .info_count(index, count, &format!("Synchronizing {}", repo.dest));

        if let Err(e) = self.fetch(&path, repo) {
            return Outcome::from_error(e);
        }

        let mut outcome = Outcome::empty();

        match repo.pin() {
            Pin::Tag(rref) | Pin::Sha1(rref) => match self.sync_to_ref(&path, rref) {
                Ok(summary) => outcome = Outcome::from_summary(summary),
                Err(e) => return Outcome::from_error(e),
            },
            Pin::Branch(branch) => {
                match self.check_branch(repo, &path, branch) {
                    Ok(Some(err)) => outcome = outcome.with_error(err),
                    Ok(None) => {}
                    Err(detached) => return Outcome::from_error(detached),
                }

                match self.sync_to_branch(&path, &repo.dest) {
                    Ok(Some(summary)) => {
                        outcome = match outcome {
                            Outcome::Empty => Outcome::from_summary(summary),
                            Outcome::Error(e) => Outcome::SummaryAndError(summary, e),
                            other => other,
                        };
                    }
                    Ok(None) => {}
                    Err(e) => outcome = outcome.with_error(e),
                }
            }
        }

        if let Err(e) = self.update_submodules(&path) {
            outcome = outcome.with_error(e);
        }

        outcome
    }

    fn set_parallel(&self, parallel: bool) {
        self.flag.set(parallel);
    }

    fn is_parallel(&self) -> bool {
        self.flag.get()
    }
}
