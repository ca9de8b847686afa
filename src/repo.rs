//! The repository descriptor: one entry of a manifest.

use std::fmt;

/// A single named remote and the URL it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub url: String,
}

/// What a repo's working tree should be pinned to, per the selection rule in
/// §4.6: a tag or sha1 wins over a floating branch when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pin<'a> {
    /// Track the tip of a branch, fast-forwarding it on sync.
    Branch(&'a str),
    /// Reset hard to a tag.
    Tag(&'a str),
    /// Reset hard to an exact commit.
    Sha1(&'a str),
}

/// Raised when a repo entry's fields contradict each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoError(pub String);

impl fmt::Display for RepoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for RepoError {}

/// One manifest entry: where a repo lives on disk, what remotes it has, and
/// what ref it should be pinned to.
///
/// `dest` is always relative to the workspace root; callers join it with
/// that root before handing a path to [`crate::vcs::GitRunner`].
///
/// `branch` may be set alongside `tag`/`sha1` — a floating branch is still
/// useful bookkeeping (it's what [`Repo::pin`] falls back to, and what the
/// manifest-level "is this repo on the right branch" check is against) even
/// when a pinned ref takes priority for the actual sync target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    pub dest: String,
    pub remotes: Vec<Remote>,
    pub branch: Option<String>,
    pub tag: Option<String>,
    pub sha1: Option<String>,
}

impl Repo {
    /// Build a repo entry, rejecting the combinations the manifest format
    /// itself cannot express: no remotes, both a tag and a sha1, or none of
    /// branch/tag/sha1 at all.
    pub fn new(
        dest: impl Into<String>,
        remotes: Vec<Remote>,
        branch: Option<String>,
        tag: Option<String>,
        sha1: Option<String>,
    ) -> Result<Self, RepoError> {
        let dest = dest.into();
        if remotes.is_empty() {
            return Err(RepoError(format!("{dest}: at least one remote is required")));
        }

        if tag.is_some() && sha1.is_some() {
            return Err(RepoError(format!("{dest}: tag and sha1 are mutually exclusive")));
        }

        if branch.is_none() && tag.is_none() && sha1.is_none() {
            return Err(RepoError(format!(
                "{dest}: one of branch, tag, or sha1 is required"
            )));
        }

        Ok(Repo {
            dest,
            remotes,
            branch,
            tag,
            sha1,
        })
    }

    /// The ref this repo should be synced to: `tag` wins over `sha1` wins
    /// over the floating `branch`, per the selection rule in §4.6 step 2.
    pub fn pin(&self) -> Pin<'_> {
        if let Some(tag) = &self.tag {
            Pin::Tag(tag)
        } else if let Some(sha1) = &self.sha1 {
            Pin::Sha1(sha1)
        } else {
            Pin::Branch(
                self.branch
                    .as_deref()
                    .expect("Repo::new requires branch when tag and sha1 are both unset"),
            )
        }
    }

    /// The remote to clone/fetch from first, by convention `origin` if
    /// present, otherwise the first remote listed.
    pub fn default_remote(&self) -> &Remote {
        self.remotes
            .iter()
            .find(|r| r.name == "origin")
            .unwrap_or(&self.remotes[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote() -> Remote {
        Remote {
            name: "origin".to_string(),
            url: "git@example.com:foo.git".to_string(),
        }
    }

    #[test]
    fn rejects_no_remotes() {
        let err = Repo::new("foo", vec![], Some("main".to_string()), None, None).unwrap_err();
        assert!(err.0.contains("remote"));
    }

    #[test]
    fn rejects_no_pin() {
        let err = Repo::new("foo", vec![remote()], None, None, None).unwrap_err();
        assert!(err.0.contains("branch, tag, or sha1"));
    }

    #[test]
    fn rejects_tag_and_sha1_together() {
        let err = Repo::new(
            "foo",
            vec![remote()],
            None,
            Some("v1".to_string()),
            Some("abcdef0123456789abcdef0123456789abcdef01".to_string()),
        )
        .unwrap_err();
        assert!(err.0.contains("mutually exclusive"));
    }

    #[test]
    fn accepts_branch_pin() {
        let repo = Repo::new("foo", vec![remote()], Some("main".to_string()), None, None).unwrap();
        assert_eq!(repo.pin(), Pin::Branch("main"));
    }

    #[test]
    fn accepts_branch_alongside_tag_and_tag_wins() {
        let repo = Repo::new(
            "foo",
            vec![remote()],
            Some("main".to_string()),
            Some("v1.0".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(repo.pin(), Pin::Tag("v1.0"));
    }

    #[test]
    fn accepts_branch_alongside_sha1_and_sha1_wins() {
        let repo = Repo::new(
            "foo",
            vec![remote()],
            Some("main".to_string()),
            None,
            Some("abcdef0123456789abcdef0123456789abcdef01".to_string()),
        )
        .unwrap();
        assert_eq!(
            repo.pin(),
            Pin::Sha1("abcdef0123456789abcdef0123456789abcdef01")
        );
    }

    #[test]
    fn default_remote_prefers_origin() {
        let remotes = vec![
            Remote {
                name: "upstream".to_string(),
                url: "u".to_string(),
            },
            remote(),
        ];
        let repo = Repo::new("foo", remotes, Some("main".to_string()), None, None).unwrap();
        assert_eq!(repo.default_remote().name, "origin");
    }
}
