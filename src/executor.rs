//! The two ways to drive a [`Task`] over a list of items: one at a time, or
//! bounded-parallel across a dedicated thread pool.

use crate::task::Task;
use indexmap::IndexMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::outcome::Outcome;

/// Clear the current terminal line and print `line` with no trailing newline.
fn print_progress_line(line: &str) {
    print!("\r\x1b[2K{line}\r");
    let _ = std::io::stdout().flush();
}

/// Run `task` over `items` one at a time, in order.
///
/// No concurrency: the returned map's iteration order is exactly the input
/// order, since each `(desc, outcome)` pair is inserted as soon as it is
/// produced.
pub fn run_sequential<T>(items: &[T], task: &dyn Task<T>) -> IndexMap<String, Outcome> {
    task.set_parallel(false);
    let count = items.len();
    let mut results = IndexMap::with_capacity(count);

    for (index, item) in items.iter().enumerate() {
        let desc = task.describe_item(item);
        let outcome = task.process(index, count, item);
        results.insert(desc, outcome);
    }

    results
}

/// Run `task` over `items` using a dedicated `rayon::ThreadPool` sized to
/// `num_jobs`.
///
/// Results are collected as they complete, not in input order: the returned
/// map's iteration order is completion order. Terminal writes are
/// serialized by an internal mutex so no two workers interleave characters
/// on the same progress line.
pub fn run_parallel<T: Sync>(
    items: &[T],
    task: &dyn Task<T>,
    num_jobs: usize,
) -> IndexMap<String, Outcome> {
    task.set_parallel(true);
    let count = items.len();
    let num_jobs = num_jobs.max(1);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_jobs)
        .build()
        .expect("failed to build worker pool");

    let output_lock = Mutex::new(());
    let done_count = AtomicUsize::new(0);
    let (tx, rx) = crossbeam_channel::unbounded();

    pool.scope(|scope| {
        for (index, item) in items.iter().enumerate() {
            let tx = tx.clone();
            let output_lock = &output_lock;
            let done_count = &done_count;
            scope.spawn(move |_| {
                let desc = task.describe_item(item);

                {
                    let _guard = output_lock.lock().unwrap();
                    let start = task.describe_start(item);
                    if !start.is_empty() {
                        print_progress_line(&format!("({}/{count}) {start}", index + 1));
                    }
                }

                let outcome = task.process(index, count, item);

                let completed = done_count.fetch_add(1, Ordering::SeqCst) + 1;
                {
                    let _guard = output_lock.lock().unwrap();
                    let end = task.describe_end(item);
                    if !end.is_empty() {
                        print_progress_line(&format!("({}/{count}) {end}", completed - 1));
                    }
                    if completed == count {
                        println!();
                    }
                }

                let _ = tx.send((desc, outcome));
            });
        }
    });
    drop(tx);

    rx.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::ParallelFlag;
    use std::sync::atomic::AtomicU32;

    /// Mirrors the Python test suite's `Kaboom`/`FakeTask` fixture: an item
    /// named `"failing"` always fails, everything else succeeds.
    struct FakeTask {
        flag: ParallelFlag,
        started: AtomicU32,
    }

    impl FakeTask {
        fn new() -> Self {
            FakeTask {
                flag: ParallelFlag::new(),
                started: AtomicU32::new(0),
            }
        }
    }

    impl Task<String> for FakeTask {
        fn describe_item(&self, item: &String) -> String {
            item.clone()
        }

        fn process(&self, _index: usize, _count: usize, item: &String) -> Outcome {
            self.started.fetch_add(1, Ordering::SeqCst);
            if item == "failing" {
                Outcome::from_error(crate::error::SyncError::DetachedHead)
            } else {
                Outcome::from_summary(format!("{item} done"))
            }
        }

        fn set_parallel(&self, parallel: bool) {
            self.flag.set(parallel);
        }

        fn is_parallel(&self) -> bool {
            self.flag.get()
        }
    }

    #[test]
    fn sequential_doing_nothing() {
        let task = FakeTask::new();
        let results = run_sequential::<String>(&[], &task);
        assert!(results.is_empty());
    }

    #[test]
    fn sequential_happy_preserves_order() {
        let task = FakeTask::new();
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let results = run_sequential(&items, &task);
        assert_eq!(
            results.keys().collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        assert!(results.values().all(Outcome::success));
    }

    #[test]
    fn sequential_collects_errors_without_stopping() {
        let task = FakeTask::new();
        let items = vec!["a".to_string(), "failing".to_string(), "c".to_string()];
        let results = run_sequential(&items, &task);
        assert_eq!(results.len(), 3);
        assert!(!results["failing"].success());
        assert!(results["a"].success());
        assert!(results["c"].success());
    }

    #[test]
    fn parallel_happy() {
        let task = FakeTask::new();
        let items: Vec<String> = (0..8).map(|i| format!("item{i}")).collect();
        let results = run_parallel(&items, &task, 4);
        assert_eq!(results.len(), 8);
        assert!(results.values().all(Outcome::success));
        assert_eq!(task.started.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn parallel_sad_collects_failure() {
        let task = FakeTask::new();
        let items = vec![
            "a".to_string(),
            "failing".to_string(),
            "b".to_string(),
            "c".to_string(),
        ];
        let results = run_parallel(&items, &task, 2);
        assert_eq!(results.len(), 4);
        assert!(!results["failing"].success());
        assert_eq!(
            results.values().filter(|o| !o.success()).count(),
            1
        );
    }

    #[test]
    fn parallel_sets_flag_sequential_does_not() {
        let task = FakeTask::new();
        run_sequential::<String>(&[], &task);
        assert!(!task.is_parallel());
        run_parallel::<String>(&[], &task, 2);
        assert!(task.is_parallel());
    }
}
