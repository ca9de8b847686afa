//! The unit of work an executor drives: `describe`, `process`, repeat.

use crate::outcome::Outcome;
use std::sync::atomic::{AtomicBool, Ordering};

/// Something that can be driven by [`crate::dispatch::process_items`] over a
/// list of `T`.
///
/// Implementors carry their own `parallel` flag (backed by an `AtomicBool`
/// on the concrete type) so the trait can be driven through a shared
/// `&dyn Task<T>` across worker threads: the dispatcher sets it once before
/// handing the task to an executor and never mutates it concurrently with
/// `process`.
pub trait Task<T>: Sync {
    /// Stable short identifier used as the outcome map's key. Must be
    /// unique across the input list.
    fn describe_item(&self, item: &T) -> String;

    /// Progress text shown when work on `item` begins, in parallel mode.
    /// An empty string suppresses the start line.
    fn describe_start(&self, item: &T) -> String {
        let _ = item;
        String::new()
    }

    /// Progress text shown when work on `item` completes, in parallel mode.
    fn describe_end(&self, item: &T) -> String {
        let _ = item;
        String::new()
    }

    /// Perform the work. Must not write to the terminal directly when
    /// [`Task::is_parallel`] is true — presentation is the executor's job
    /// in that mode.
    fn process(&self, index: usize, count: usize, item: &T) -> Outcome;

    fn set_parallel(&self, parallel: bool);
    fn is_parallel(&self) -> bool;
}

/// Shared `parallel` flag plumbing for concrete [`Task`] implementors.
///
/// Embed one of these and delegate `set_parallel`/`is_parallel` to it;
/// [`ParallelFlag::info`] and friends then gate a task's own diagnostic
/// printing the same way the executor gates its progress lines.
#[derive(Debug, Default)]
pub struct ParallelFlag(AtomicBool);

impl ParallelFlag {
    pub fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn set(&self, parallel: bool) {
        self.0.store(parallel, Ordering::SeqCst);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Print `msg` at the top indentation level, only in sequential mode.
    pub fn info(&self, msg: &str) {
        if !self.get() {
            println!("{msg}");
        }
    }

    /// Print `msg` indented two spaces, only in sequential mode.
    pub fn info_2(&self, msg: &str) {
        if !self.get() {
            println!("  {msg}");
        }
    }

    /// Print `msg` indented four spaces, only in sequential mode.
    pub fn info_3(&self, msg: &str) {
        if !self.get() {
            println!("    {msg}");
        }
    }

    /// Print a `(index/count)` prefixed line, only in sequential mode.
    pub fn info_count(&self, index: usize, count: usize, msg: &str) {
        if !self.get() {
            println!("({}/{}) {msg}", index + 1, count);
        }
    }

    /// Whether a subprocess driven by this task should inherit stdio
    /// (sequential mode) or run silently (parallel mode).
    pub fn verbose(&self) -> bool {
        !self.get()
    }
}
