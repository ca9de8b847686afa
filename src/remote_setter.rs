//! Reconciles a repository's locally configured remotes with the manifest.

use std::path::PathBuf;

use crate::outcome::Outcome;
use crate::repo::Repo;
use crate::task::{ParallelFlag, Task};
use crate::vcs::GitRunner;

/// For each remote a repo declares, adds it if missing, updates its URL if
/// it has drifted, or leaves it alone if it already matches.
pub struct RemoteSetter {
    workspace: PathBuf,
    git: GitRunner,
    flag: ParallelFlag,
}

impl RemoteSetter {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        RemoteSetter {
            workspace: workspace.into(),
            git: GitRunner::new(),
            flag: ParallelFlag::new(),
        }
    }
}

impl Task<Repo> for RemoteSetter {
    fn describe_item(&self, repo: &Repo) -> String {
        repo.dest.clone()
    }

    fn describe_start(&self, repo: &Repo) -> String {
        format!("Setting remotes for {}", repo.dest)
    }

    fn describe_end(&self, repo: &Repo) -> String {
        format!("ok {}", repo.dest)
    }

    fn process(&self, index: usize, count: usize, repo: &Repo) -> Outcome {
        let path = self.workspace.join(&repo.dest);
        self.flag
            .info_count(index, count, &format!("Checking remotes for {}", repo.dest));

        let mut lines = Vec::new();

        for remote in &repo.remotes {
            let existing = match self.git.remote_url(&path, &remote.name) {
                Ok(url) => url,
                Err(e) => return Outcome::from_error(e.into()),
            };

            match existing {
                None => {
                    if let Err(e) = self.git.run(
                        &path,
                        &["remote", "add", &remote.name, &remote.url],
                        self.flag.verbose(),
                    ) {
                        return Outcome::from_error(e.into());
                    }
                    self.flag.info_2(&format!("Add remote {}", remote.name));
                    lines.push(format!("{}: add remote {} ({})", repo.dest, remote.name, remote.url));
                }
                Some(url) if url != remote.url => {
                    if let Err(e) = self.git.run(
                        &path,
                        &["remote", "set-url", &remote.name, &remote.url],
                        self.flag.verbose(),
                    ) {
                        return Outcome::from_error(e.into());
                    }
                    self.flag.info_2(&format!("Update remote {} to {}", remote.name, remote.url));
                    lines.push(format!(
                        "{}: update remote {} to {}",
                        repo.dest, remote.name, remote.url
                    ));
                }
                Some(_) => {}
            }
        }

        Outcome::from_summary_lines(&lines)
    }

    fn set_parallel(&self, parallel: bool) {
        self.flag.set(parallel);
    }

    fn is_parallel(&self) -> bool {
        self.flag.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::Remote;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        let git = GitRunner::new();
        git.run(dir.path(), &["init", "-q", "-b", "main"], false)
            .unwrap();
        dir
    }

    fn workspace_with(name: &str, repo_dir: &std::path::Path) -> TempDir {
        let workspace = TempDir::new().unwrap();
        let dest = workspace.path().join(name);
        fs::rename(repo_dir, &dest).unwrap();
        workspace
    }

    fn repo(dest: &str, remotes: Vec<Remote>) -> Repo {
        Repo::new(dest, remotes, Some("main".to_string()), None, None).unwrap()
    }

    #[test]
    fn adds_missing_remote() {
        let repo_dir = init_repo();
        let repo_path = repo_dir.path().to_path_buf();
        let workspace = workspace_with("foo", &repo_path);

        let r = repo(
            "foo",
            vec![Remote {
                name: "origin".to_string(),
                url: "git@example.com:foo.git".to_string(),
            }],
        );
        let setter = RemoteSetter::new(workspace.path());
        let outcome = setter.process(0, 1, &r);
        assert!(outcome.success());
        assert!(outcome.summary().unwrap().contains("add remote origin"));

        let git = GitRunner::new();
        let url = git
            .remote_url(&workspace.path().join("foo"), "origin")
            .unwrap();
        assert_eq!(url.as_deref(), Some("git@example.com:foo.git"));
    }

    #[test]
    fn updates_drifted_remote() {
        let repo_dir = init_repo();
        let git = GitRunner::new();
        git.run(
            repo_dir.path(),
            &["remote", "add", "origin", "git@old.example.com:foo.git"],
            false,
        )
        .unwrap();
        let repo_path = repo_dir.path().to_path_buf();
        let workspace = workspace_with("foo", &repo_path);

        let r = repo(
            "foo",
            vec![Remote {
                name: "origin".to_string(),
                url: "git@new.example.com:foo.git".to_string(),
            }],
        );
        let setter = RemoteSetter::new(workspace.path());
        let outcome = setter.process(0, 1, &r);
        assert!(outcome.success());
        assert!(outcome.summary().unwrap().contains("update remote origin"));

        let url = git
            .remote_url(&workspace.path().join("foo"), "origin")
            .unwrap();
        assert_eq!(url.as_deref(), Some("git@new.example.com:foo.git"));
    }

    #[test]
    fn leaves_matching_remote_untouched() {
        let repo_dir = init_repo();
        let git = GitRunner::new();
        git.run(
            repo_dir.path(),
            &["remote", "add", "origin", "git@example.com:foo.git"],
            false,
        )
        .unwrap();
        let repo_path = repo_dir.path().to_path_buf();
        let workspace = workspace_with("foo", &repo_path);

        let r = repo(
            "foo",
            vec![Remote {
                name: "origin".to_string(),
                url: "git@example.com:foo.git".to_string(),
            }],
        );
        let setter = RemoteSetter::new(workspace.path());
        let outcome = setter.process(0, 1, &r);
        assert!(outcome.success());
        assert!(matches!(outcome, Outcome::Empty));
    }
}
