//! The synchronizer's domain error taxonomy.
//!
//! Each variant corresponds to one named failure mode of the sync pipeline
//! (`src/sync.rs`) or the remote reconciler (`src/remote_setter.rs`). Display
//! text is the exact user-facing message; callers that need the structured
//! fields (e.g. [`SyncError::IncorrectBranch`]) match on the variant instead
//! of parsing the string.

use crate::vcs::VcsError;
use std::fmt;

#[derive(Debug)]
pub enum SyncError {
    /// `remote <name> not found for repository <dest>` — caller misuse.
    Configuration(String),
    /// `fetch from '<name>' failed`.
    Fetch(String),
    /// `<path> is dirty, skipping`.
    DirtyWorkingTree(String),
    /// `updating ref failed`.
    RefUpdate,
    /// `Not on any branch`.
    DetachedHead,
    /// Local branch does not match the manifest; non-fatal to the pipeline
    /// but still surfaces as the repo's outcome error.
    IncorrectBranch {
        dest: String,
        actual: String,
        expected: String,
    },
    /// `updating branch failed`.
    Merge,
    /// A `git` subprocess failed in a way none of the above names.
    Vcs(VcsError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Configuration(msg) => write!(f, "{msg}"),
            SyncError::Fetch(msg) => write!(f, "{msg}"),
            SyncError::DirtyWorkingTree(msg) => write!(f, "{msg}"),
            SyncError::RefUpdate => write!(f, "updating ref failed"),
            SyncError::DetachedHead => write!(f, "Not on any branch"),
            SyncError::IncorrectBranch {
                dest,
                actual,
                expected,
            } => write!(
                f,
                "{dest} is on branch '{actual}' but manifest expects '{expected}'"
            ),
            SyncError::Merge => write!(f, "updating branch failed"),
            SyncError::Vcs(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<VcsError> for SyncError {
    fn from(e: VcsError) -> Self {
        SyncError::Vcs(e)
    }
}

/// Raised by the bundled manifest loader: malformed TOML, or a repo entry
/// that violates the branch/tag/sha1 invariant.
#[derive(Debug)]
pub struct ManifestError(pub String);

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ManifestError {}

/// Raised by [`crate::outcome::OutcomeCollection::handle_result`] when any
/// per-item error was collected. Carries no payload: the individual errors
/// were already reported to the terminal by the time this is raised.
#[derive(Debug)]
pub struct ExecutorFailed;

impl fmt::Display for ExecutorFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "one or more items failed")
    }
}

impl std::error::Error for ExecutorFailed {}
