//! Parallel merging and sorting on the current [`rayon`] thread pool.
//!
//! Work is forked exclusively via [`rayon::join`] over disjoint subviews, so the comparison
//! counts are deterministic regardless of scheduling. Run inside
//! [`rayon::ThreadPool::install`](https://docs.rs/rayon/latest/rayon/struct.ThreadPool.html#method.install)
//! to choose a pool.

pub(crate) mod merge;
pub(crate) mod merge_sort;
