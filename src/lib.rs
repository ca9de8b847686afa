//! Parallel task execution and repository synchronization core.
//!
//! The pieces compose bottom-up: [`vcs`] runs `git`, [`outcome`] models a
//! per-item result, [`task`] describes work over a list of items,
//! [`executor`] and [`dispatch`] drive a task sequentially or in parallel,
//! and [`sync`] / [`remote_setter`] are the two concrete tasks this crate
//! ships.

pub mod cli;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod manifest;
pub mod outcome;
pub mod remote_setter;
pub mod repo;
pub mod styling;
pub mod sync;
pub mod task;
pub mod vcs;

pub use dispatch::process_items;
pub use error::{ExecutorFailed, ManifestError, SyncError};
pub use outcome::{Outcome, OutcomeCollection};
pub use remote_setter::RemoteSetter;
pub use repo::{Remote, Repo};
pub use sync::Syncer;
pub use task::Task;
