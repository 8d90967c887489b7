//! Parallel processing utilities

use rayon::prelude::*;

/// Run `f` on every item in parallel, writing each result into its own slot
///
/// Slot `i` always holds the result for `items[i]`, whatever order the
/// workers finish in. Every task has completed when this returns.
pub fn collect_slots<T, R, F>(items: &[T], f: F) -> Vec<Option<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Option<R> + Send + Sync,
{
    let mut slots: Vec<Option<R>> = Vec::with_capacity(items.len());
    slots.resize_with(items.len(), || None);

    slots
        .par_iter_mut()
        .zip(items.par_iter())
        .for_each(|(slot, item)| *slot = f(item));

    slots
}

/// Drop empty slots, keeping the remaining results in slot order
pub fn present<R>(slots: Vec<Option<R>>) -> Vec<R> {
    slots.into_iter().flatten().collect()
}

/// Build a dedicated pool when a thread count is configured
pub fn build_pool(threads: usize) -> std::result::Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|index| format!("depbuild-worker-{}", index))
        .build()
}
