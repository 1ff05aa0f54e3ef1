//! Stable run-adaptive merge sorts with exact comparison counting for 1-dimensional [`ndarray`]
//! arrays or (sub)views with arbitrary memory layout (e.g., non-contiguous).
//!
//! Every sort returns the number of element comparisons it evaluated, making the algorithms
//! directly measurable against their analytical bounds. All of them are stable and share one
//! counting rule: a comparison counts when it is evaluated, and draining an exhausted run in a
//! merge is free.
//!
//! # Example
//!
//! ```
//! use runsort::{Sort1Ext, ndarray::arr1};
//!
//! let mut v = arr1(&[9, 1, 2, 0, 7, 4, 3, 8, 5, 6, 10]);
//!
//! // Counts exactly the evaluated comparisons, here of a top-down merge sort.
//! let compares = v.merge_sort();
//!
//! assert_eq!(compares, 29);
//! assert_eq!(v, arr1(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]));
//!
//! // Already sorted, a run-adaptive sort gets by with one exploration pass.
//! let compares = v.level_sort_adaptive(8);
//!
//! assert_eq!(compares, v.len() as u64 - 1);
//! ```
//!
//! # Algorithms
//!
//! | Sort | Runs | Merge scheduling |
//! |------|------|------------------|
//! | [`merge_sort`] | recursive halving | top-down |
//! | [`merge_sort_cutoff`] | recursive halving to cutoff leaves | top-down |
//! | [`merge_sort_bottom_up`] | element pairs | binary carries |
//! | [`merge_sort_bottom_up_cutoff`] | cutoff chunks | binary carries |
//! | [`binomial_sort`] | cutoff chunks | binomial run stack |
//! | [`binomial_sort_adaptive`] | natural runs | binomial run stack |
//! | [`level_sort`] | cutoff chunks | boundary-level run stack |
//! | [`level_sort_adaptive`] | natural runs | boundary-level run stack |
//! | `par_merge_sort` (`rayon`) | recursive halving to cutoff leaves | fork-join, rank-split merges |
//!
//! The adaptive sorts detect natural runs via [`explore_run`], reversing strictly decreasing
//! runs in place, and additionally charge the explored length per run minus one overall, making
//! their counts comparable with the non-adaptive twins.
//!
//! [`merge_sort`]: Sort1Ext::merge_sort
//! [`merge_sort_cutoff`]: Sort1Ext::merge_sort_cutoff
//! [`merge_sort_bottom_up`]: Sort1Ext::merge_sort_bottom_up
//! [`merge_sort_bottom_up_cutoff`]: Sort1Ext::merge_sort_bottom_up_cutoff
//! [`binomial_sort`]: Sort1Ext::binomial_sort
//! [`binomial_sort_adaptive`]: Sort1Ext::binomial_sort_adaptive
//! [`level_sort`]: Sort1Ext::level_sort
//! [`level_sort_adaptive`]: Sort1Ext::level_sort_adaptive
//! [`explore_run`]: Sort1Ext::explore_run
//!
//! # Features
//!
//!   * `std` enabled by `default`.
//!   * `rayon` for parallel `par_merge*` and the `two_sequence_select` rank split.

#![deny(
	missing_docs,
	rustdoc::broken_intra_doc_links,
	rustdoc::missing_crate_level_docs
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod binomial_sort;
mod insertion_sort;
mod level_sort;
mod merge;
mod merge_sort;
mod run;

#[cfg(feature = "rayon")]
mod par;

use ndarray::{ArrayBase, Data, DataMut, Ix1};

pub use ndarray;

/// Extension trait for 1-dimensional [`ArrayBase<S, Ix1>`](`ArrayBase`) array or (sub)view with
/// arbitrary memory layout (e.g., non-contiguous) providing stable, comparison-counting sorts.
///
/// All sorts are in place up to one scratch buffer of the view's length, allocated per call by
/// cloning the view. Views shorter than two elements are left untouched at a count of zero.
pub trait Sort1Ext<A, S>
where
	S: Data<Elem = A>,
{
	/// Sorts the array by adjacent-swap insertion sort and returns the comparison count.
	///
	/// Every inner-loop comparison counts, including the one breaking the loop, so a sorted
	/// array of length `n >= 1` costs exactly `n - 1` comparisons. This sort is stable and
	/// *O*(*n*^2) worst-case, serving as the leaf sort of all cutoff variants.
	///
	/// # Examples
	///
	/// ```
	/// use runsort::{Sort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[3, 8, 5, 6, 10]);
	/// assert_eq!(v.insertion_sort(), 6);
	/// assert_eq!(v, arr1(&[3, 5, 6, 8, 10]));
	/// ```
	fn insertion_sort(&mut self) -> u64
	where
		A: Ord,
		S: DataMut;
	/// Sorts the array by recursive top-down merge sort and returns the comparison count.
	///
	/// This sort is stable and *O*(*n* log *n*) worst-case. The left half of an odd split takes
	/// the extra element.
	///
	/// # Examples
	///
	/// ```
	/// use runsort::{Sort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[2, 1, 0, -1]);
	/// assert_eq!(v.merge_sort(), 4);
	/// assert_eq!(v, arr1(&[-1, 0, 1, 2]));
	/// ```
	fn merge_sort(&mut self) -> u64
	where
		A: Ord + Clone,
		S: DataMut;
	/// Sorts like [`merge_sort`](Self::merge_sort), handing subviews of at most `cutoff`
	/// elements to insertion sort.
	///
	/// A `cutoff` of one is the plain top-down sort, a `cutoff` of at least the length is a
	/// plain insertion sort.
	///
	/// # Panics
	///
	/// Panics if `cutoff` is zero.
	fn merge_sort_cutoff(&mut self, cutoff: usize) -> u64
	where
		A: Ord + Clone,
		S: DataMut;
	/// Sorts the array by iterative bottom-up merge sort and returns the comparison count.
	///
	/// Pending runs are the bit pattern of the element count seen so far; a binary carry is a
	/// merge of two equal-length runs. This sort is stable and *O*(*n* log *n*) worst-case.
	fn merge_sort_bottom_up(&mut self) -> u64
	where
		A: Ord + Clone,
		S: DataMut;
	/// Sorts like [`merge_sort_bottom_up`](Self::merge_sort_bottom_up) over leaf runs of
	/// `cutoff` elements, each prepared by insertion sort.
	///
	/// # Panics
	///
	/// Panics if `cutoff` is zero.
	fn merge_sort_bottom_up_cutoff(&mut self, cutoff: usize) -> u64
	where
		A: Ord + Clone,
		S: DataMut;
	/// Sorts the array by binomial sort over leaf runs of `cutoff` elements and returns the
	/// comparison count.
	///
	/// An explicit stack keeps runs of strictly decreasing length; a new run absorbs the top
	/// while the top is shorter than twice the accumulated length. Compared to
	/// [`merge_sort_bottom_up_cutoff`](Self::merge_sort_bottom_up_cutoff), a trailing short run
	/// never waits for the final flush to participate in balanced merges.
	///
	/// # Panics
	///
	/// Panics if `cutoff` is zero.
	fn binomial_sort(&mut self, cutoff: usize) -> u64
	where
		A: Ord + Clone,
		S: DataMut;
	/// Sorts like [`binomial_sort`](Self::binomial_sort) over natural runs, extending runs
	/// shorter than `cutoff` by insertion sort, and returns its comparison charge.
	///
	/// On top of the merge and insertion comparisons, the charge includes the explored length
	/// of every run, minus one overall for the final run boundary.
	///
	/// # Examples
	///
	/// ```
	/// use runsort::{Sort1Ext, ndarray::arr1};
	///
	/// // One strictly decreasing run, reversed in place: no merge comparison at all.
	/// let mut v = arr1(&[2, 1, 0, -1]);
	/// assert_eq!(v.binomial_sort_adaptive(2), 3);
	/// assert_eq!(v, arr1(&[-1, 0, 1, 2]));
	/// ```
	///
	/// # Panics
	///
	/// Panics if `cutoff` is zero.
	fn binomial_sort_adaptive(&mut self, cutoff: usize) -> u64
	where
		A: Ord + Clone,
		S: DataMut;
	/// Sorts the array by level sort over leaf runs of `cutoff` elements and returns the
	/// comparison count.
	///
	/// Merges are scheduled by run-boundary levels, the most significant bit in which the
	/// midpoint intervals of adjacent runs differ. Levels strictly decrease along the stack of
	/// pending runs, so the stack is a `u64` bitmask with the lowest set bit as its top.
	///
	/// # Panics
	///
	/// Panics if `cutoff` is zero.
	fn level_sort(&mut self, cutoff: usize) -> u64
	where
		A: Ord + Clone,
		S: DataMut;
	/// Sorts like [`level_sort`](Self::level_sort) over natural runs, extending runs shorter
	/// than `cutoff` by insertion sort, and returns its comparison charge.
	///
	/// The charge is accounted as in [`binomial_sort_adaptive`](Self::binomial_sort_adaptive).
	///
	/// # Panics
	///
	/// Panics if `cutoff` is zero.
	fn level_sort_adaptive(&mut self, cutoff: usize) -> u64
	where
		A: Ord + Clone,
		S: DataMut;
	/// Finds the maximal natural run starting at `first` and returns its exclusive end.
	///
	/// A run is either weakly increasing or strictly decreasing; the latter is reversed in
	/// place, so the run is ascending on return. Requiring strict descent keeps equal elements
	/// out of reversed runs, preserving stability.
	///
	/// # Examples
	///
	/// ```
	/// use runsort::{Sort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[5, 3, 1, 2, 4]);
	/// assert_eq!(v.explore_run(0), 3);
	/// assert_eq!(v, arr1(&[1, 3, 5, 2, 4]));
	/// ```
	///
	/// # Panics
	///
	/// Panics if `first` is out of bounds.
	fn explore_run(&mut self, first: usize) -> usize
	where
		A: Ord,
		S: DataMut;
	/// Whether the array is weakly increasing.
	fn is_sorted(&self) -> bool
	where
		A: Ord;
	/// Finds the split `(i_a, i_b)` with `i_a + i_b = k` such that merging the first `i_a`
	/// elements of the sorted run `self[..mid]` with the first `i_b` elements of the sorted run
	/// `self[mid..]` yields the first `k` elements of their stable merge.
	///
	/// # Examples
	///
	/// ```
	/// use runsort::{Sort1Ext, ndarray::arr1};
	///
	/// let v = arr1(&[1, 4, 4, 2, 3, 4, 6]);
	/// assert_eq!(v.two_sequence_select(3, 3), (1, 2));
	/// ```
	///
	/// # Panics
	///
	/// Panics if `k >= self.len()` or if `mid` is out of bounds.
	#[cfg(feature = "rayon")]
	fn two_sequence_select(&self, mid: usize, k: usize) -> (usize, usize)
	where
		A: Ord;
	/// Merges the sorted runs `self[..mid]` and `self[mid..]` stably by up to `parallelism`
	/// concurrent section merges on the current [`rayon`] thread pool, and returns the
	/// comparison count.
	///
	/// A `parallelism` below two merges sequentially. The count is deterministic regardless of
	/// scheduling, though it differs from the sequential merge in general since the sections
	/// drain the runs independently.
	#[cfg(feature = "rayon")]
	fn par_merge(&mut self, mid: usize, parallelism: usize) -> u64
	where
		A: Ord + Clone + Send + Sync,
		S: DataMut;
	/// Sorts the array by fork-join parallel merge sort on the current [`rayon`] thread pool
	/// and returns the comparison count.
	///
	/// Subviews of at most `cutoff` elements sort sequentially by plain top-down merge sort.
	/// The `parallelism` budget halves per recursion level (never below one) and bounds the
	/// concurrent sections per merge, so merges near the root split the most. With a budget of
	/// one, the count equals [`merge_sort`](Self::merge_sort) exactly.
	///
	/// Run inside [`rayon::ThreadPool::install`](https://docs.rs/rayon/latest/rayon/struct.ThreadPool.html#method.install)
	/// to choose the pool.
	///
	/// # Panics
	///
	/// Panics if `cutoff` or `parallelism` is zero.
	#[cfg(feature = "rayon")]
	fn par_merge_sort(&mut self, cutoff: usize, parallelism: usize) -> u64
	where
		A: Ord + Clone + Send + Sync,
		S: DataMut;
	/// Sorts like [`par_merge_sort`](Self::par_merge_sort), additionally returning the span,
	/// the comparison count along the critical path of the task tree.
	///
	/// The quotient of count over span is the parallelism actually exposed by the recursion.
	///
	/// # Panics
	///
	/// Panics if `cutoff` or `parallelism` is zero.
	#[cfg(feature = "rayon")]
	fn par_merge_sort_span(&mut self, cutoff: usize, parallelism: usize) -> (u64, u64)
	where
		A: Ord + Clone + Send + Sync,
		S: DataMut;
}

impl<A, S> Sort1Ext<A, S> for ArrayBase<S, Ix1>
where
	S: Data<Elem = A>,
{
	fn insertion_sort(&mut self) -> u64
	where
		A: Ord,
		S: DataMut,
	{
		insertion_sort::insertion_sort(self.view_mut())
	}

	fn merge_sort(&mut self) -> u64
	where
		A: Ord + Clone,
		S: DataMut,
	{
		merge_sort::top_down(self.view_mut())
	}

	fn merge_sort_cutoff(&mut self, cutoff: usize) -> u64
	where
		A: Ord + Clone,
		S: DataMut,
	{
		merge_sort::top_down_cutoff(self.view_mut(), cutoff)
	}

	fn merge_sort_bottom_up(&mut self) -> u64
	where
		A: Ord + Clone,
		S: DataMut,
	{
		merge_sort::bottom_up(self.view_mut())
	}

	fn merge_sort_bottom_up_cutoff(&mut self, cutoff: usize) -> u64
	where
		A: Ord + Clone,
		S: DataMut,
	{
		merge_sort::bottom_up_cutoff(self.view_mut(), cutoff)
	}

	fn binomial_sort(&mut self, cutoff: usize) -> u64
	where
		A: Ord + Clone,
		S: DataMut,
	{
		binomial_sort::binomial_sort(self.view_mut(), cutoff)
	}

	fn binomial_sort_adaptive(&mut self, cutoff: usize) -> u64
	where
		A: Ord + Clone,
		S: DataMut,
	{
		binomial_sort::binomial_sort_adaptive(self.view_mut(), cutoff)
	}

	fn level_sort(&mut self, cutoff: usize) -> u64
	where
		A: Ord + Clone,
		S: DataMut,
	{
		level_sort::level_sort(self.view_mut(), cutoff)
	}

	fn level_sort_adaptive(&mut self, cutoff: usize) -> u64
	where
		A: Ord + Clone,
		S: DataMut,
	{
		level_sort::level_sort_adaptive(self.view_mut(), cutoff)
	}

	fn explore_run(&mut self, first: usize) -> usize
	where
		A: Ord,
		S: DataMut,
	{
		let mut view = self.view_mut();
		run::explore_run(&mut view, first)
	}

	fn is_sorted(&self) -> bool
	where
		A: Ord,
	{
		run::is_sorted(self.view())
	}

	#[cfg(feature = "rayon")]
	fn two_sequence_select(&self, mid: usize, k: usize) -> (usize, usize)
	where
		A: Ord,
	{
		par::merge::two_sequence_select(&self.view(), mid, k)
	}

	#[cfg(feature = "rayon")]
	fn par_merge(&mut self, mid: usize, parallelism: usize) -> u64
	where
		A: Ord + Clone + Send + Sync,
		S: DataMut,
	{
		let mut aux = self.to_owned();
		par::merge::par_merge(self.view_mut(), aux.view_mut(), mid, parallelism)
	}

	#[cfg(feature = "rayon")]
	fn par_merge_sort(&mut self, cutoff: usize, parallelism: usize) -> u64
	where
		A: Ord + Clone + Send + Sync,
		S: DataMut,
	{
		par::merge_sort::par_merge_sort(self.view_mut(), cutoff, parallelism)
	}

	#[cfg(feature = "rayon")]
	fn par_merge_sort_span(&mut self, cutoff: usize, parallelism: usize) -> (u64, u64)
	where
		A: Ord + Clone + Send + Sync,
		S: DataMut,
	{
		par::merge_sort::par_merge_sort_span(self.view_mut(), cutoff, parallelism)
	}
}
