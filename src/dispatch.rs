//! Top-level entry point: pick an executor, run a task, aggregate the result.

use crate::executor::{run_parallel, run_sequential};
use crate::outcome::OutcomeCollection;
use crate::task::Task;

/// Drive `task` over `items`, sequentially if `num_jobs` is `None` or `0`,
/// otherwise in parallel bounded to `num_jobs` workers.
pub fn process_items<T: Sync>(
    items: &[T],
    task: &dyn Task<T>,
    num_jobs: Option<usize>,
) -> OutcomeCollection {
    let outcomes = match num_jobs {
        Some(n) if n > 0 => run_parallel(items, task, n),
        _ => run_sequential(items, task),
    };
    OutcomeCollection::from_outcomes(outcomes)
}
