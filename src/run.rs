//! Natural run detection for the adaptive merge sorts.

use ndarray::{ArrayView1, ArrayViewMut1, s};

/// Finds the maximal natural run starting at `first` and returns its exclusive end.
///
/// A run is either weakly increasing (`v[i] <= v[i + 1]`) or strictly decreasing
/// (`v[i] > v[i + 1]`). Decreasing runs are reversed in place, so the run is ascending on return.
/// Requiring strict descent keeps equal elements out of reversed runs, preserving stability.
pub fn explore_run<A>(v: &mut ArrayViewMut1<'_, A>, first: usize) -> usize
where
	A: Ord,
{
	let len = v.len();
	debug_assert!(first < len);
	let mut last = first + 1;
	if last == len {
		return last;
	}
	if v[first] <= v[last] {
		while last + 1 < len && v[last] <= v[last + 1] {
			last += 1;
		}
	} else {
		while last + 1 < len && v[last] > v[last + 1] {
			last += 1;
		}
		reverse(v.slice_mut(s![first..=last]));
	}
	last + 1
}

/// Reverses `v` in place.
pub fn reverse<A>(mut v: ArrayViewMut1<'_, A>) {
	let len = v.len();
	for i in 0..len / 2 {
		v.swap(i, len - 1 - i);
	}
}

/// Whether `v` is weakly increasing.
pub fn is_sorted<A>(v: ArrayView1<'_, A>) -> bool
where
	A: Ord,
{
	(1..v.len()).all(|i| v[i - 1] <= v[i])
}
