//! Comparison-counted binomial sort, a run-stack merge sort keeping run lengths binomial.
//!
//! The stack holds runs of strictly decreasing length from bottom to top. A freshly formed run is
//! merged with the top as long as the top is shorter than twice the accumulated length, so the
//! stack mirrors the binary carry chain of a bottom-up sort while staying adaptive to a trailing
//! short run.

use crate::insertion_sort::insertion_sort;
use crate::merge::merge;
use crate::merge_sort::CUTOFF_PANIC;
use crate::run::explore_run;
use ndarray::{Array1, ArrayViewMut1, s};

/// Sorts `v` by binomial sort over leaf runs of `cutoff` elements, each prepared by
/// [`insertion_sort`], and returns the number of element comparisons.
///
/// # Panics
///
/// Panics if `cutoff` is zero.
pub fn binomial_sort<A>(mut v: ArrayViewMut1<'_, A>, cutoff: usize) -> u64
where
	A: Ord + Clone,
{
	assert!(cutoff >= 1, "{CUTOFF_PANIC}");
	let len = v.len();
	if len < 2 {
		return 0;
	}
	let mut aux = v.to_owned();
	let mut stack = RunStack::new(len);
	let mut compares = 0;
	let mut next = 0;
	while next < len {
		let end = (next + cutoff).min(len);
		compares += insertion_sort(v.slice_mut(s![next..end]));
		compares += stack.push(&mut v, &mut aux, next, end);
		next = end;
	}
	compares + stack.flush(&mut v, &mut aux, len)
}

/// Sorts `v` by binomial sort over natural runs detected by [`explore_run`], extending runs
/// shorter than `cutoff` by [`insertion_sort`], and returns its comparison charge.
///
/// The charge is the number of merge and insertion comparisons plus the explored length of every
/// run (charged before extension), minus one for the final run boundary.
///
/// # Panics
///
/// Panics if `cutoff` is zero.
pub fn binomial_sort_adaptive<A>(mut v: ArrayViewMut1<'_, A>, cutoff: usize) -> u64
where
	A: Ord + Clone,
{
	assert!(cutoff >= 1, "{CUTOFF_PANIC}");
	let len = v.len();
	if len < 2 {
		return 0;
	}
	let mut aux = v.to_owned();
	let mut stack = RunStack::new(len);
	let mut compares = 0;
	let mut next = 0;
	while next < len {
		let mut end = explore_run(&mut v, next);
		compares += (end - next) as u64;
		if end - next <= cutoff {
			end = (next + cutoff).min(len);
			compares += insertion_sort(v.slice_mut(s![next..end]));
		}
		compares += stack.push(&mut v, &mut aux, next, end);
		next = end;
	}
	compares + stack.flush(&mut v, &mut aux, len) - 1
}

/// Stack of pending runs with strictly decreasing lengths.
///
/// Entry zero is a `usize::MAX` length guard, so the merge loop in [`Self::push`] needs no
/// emptiness check. At most one run per power of two is pending, bounding the depth by
/// `bits(len) + 1` including the guard.
struct RunStack {
	starts: Vec<usize>,
	lengths: Vec<usize>,
	top: usize,
}

impl RunStack {
	fn new(len: usize) -> Self {
		let capacity = (usize::BITS - len.leading_zeros()) as usize + 1;
		let starts = vec![0; capacity];
		let mut lengths = vec![0; capacity];
		lengths[0] = usize::MAX;
		Self {
			starts,
			lengths,
			top: 0,
		}
	}

	/// Pushes the run `[next, end)`, first absorbing every top run shorter than twice the
	/// accumulated length.
	fn push<A>(
		&mut self,
		v: &mut ArrayViewMut1<'_, A>,
		aux: &mut Array1<A>,
		next: usize,
		end: usize,
	) -> u64
	where
		A: Ord + Clone,
	{
		let mut start = next;
		let mut length = end - next;
		let mut compares = 0;
		while self.lengths[self.top] < 2 * length {
			let mid = start;
			start = self.starts[self.top];
			length += self.lengths[self.top];
			compares += merge(
				v.slice_mut(s![start..end]),
				aux.slice_mut(s![start..end]),
				mid - start,
			);
			self.top -= 1;
		}
		self.top += 1;
		self.starts[self.top] = start;
		self.lengths[self.top] = length;
		compares
	}

	/// Merges all pending runs into the sorted suffix ending at `hi`, top down.
	fn flush<A>(&mut self, v: &mut ArrayViewMut1<'_, A>, aux: &mut Array1<A>, hi: usize) -> u64
	where
		A: Ord + Clone,
	{
		let mut compares = 0;
		while self.top > 1 {
			let mid = self.starts[self.top];
			self.top -= 1;
			let lo = self.starts[self.top];
			compares += merge(
				v.slice_mut(s![lo..hi]),
				aux.slice_mut(s![lo..hi]),
				mid - lo,
			);
		}
		compares
	}
}
