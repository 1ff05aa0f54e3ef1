//! Comparison-counted top-down and bottom-up merge sorts.
//!
//! Both directions share [`merge`] and hence its counting rule. The bottom-up variants keep their
//! pending runs in an integer bit pattern where a set bit is a pending run of that power-of-two
//! length, so runs merge eagerly whenever two of equal length meet.

use crate::insertion_sort::insertion_sort;
use crate::merge::merge;
use ndarray::{ArrayViewMut1, s};

/// Message of the panic raised by all cutoff-taking sorts on a zero cutoff.
pub const CUTOFF_PANIC: &str = "Cutoff value must be at least 1.";

/// Sorts `v` by recursive top-down merge sort and returns the number of element comparisons.
pub fn top_down<A>(mut v: ArrayViewMut1<'_, A>) -> u64
where
	A: Ord + Clone,
{
	if v.len() < 2 {
		return 0;
	}
	let mut aux = v.to_owned();
	sort(v, aux.view_mut())
}

/// Top-down recursion over matching subviews of the data and the scratch buffer.
///
/// The left half takes the extra element of an odd split.
pub(crate) fn sort<A>(mut v: ArrayViewMut1<'_, A>, mut aux: ArrayViewMut1<'_, A>) -> u64
where
	A: Ord + Clone,
{
	let len = v.len();
	if len < 2 {
		return 0;
	}
	let mid = len.div_ceil(2);
	let mut compares = sort(v.slice_mut(s![..mid]), aux.slice_mut(s![..mid]));
	compares += sort(v.slice_mut(s![mid..]), aux.slice_mut(s![mid..]));
	compares + merge(v, aux, mid)
}

/// Sorts `v` by top-down merge sort, handing subviews of at most `cutoff` elements to
/// [`insertion_sort`], and returns the number of element comparisons.
///
/// A cutoff of one is the plain top-down sort, a cutoff of at least the length is a plain
/// insertion sort.
///
/// # Panics
///
/// Panics if `cutoff` is zero.
pub fn top_down_cutoff<A>(mut v: ArrayViewMut1<'_, A>, cutoff: usize) -> u64
where
	A: Ord + Clone,
{
	assert!(cutoff >= 1, "{CUTOFF_PANIC}");
	if v.len() < 2 {
		return 0;
	}
	let mut aux = v.to_owned();
	sort_cutoff(v, aux.view_mut(), cutoff)
}

fn sort_cutoff<A>(mut v: ArrayViewMut1<'_, A>, mut aux: ArrayViewMut1<'_, A>, cutoff: usize) -> u64
where
	A: Ord + Clone,
{
	let len = v.len();
	if len <= cutoff {
		return insertion_sort(v);
	}
	let mid = len.div_ceil(2);
	let mut compares = sort_cutoff(v.slice_mut(s![..mid]), aux.slice_mut(s![..mid]), cutoff);
	compares += sort_cutoff(v.slice_mut(s![mid..]), aux.slice_mut(s![mid..]), cutoff);
	compares + merge(v, aux, mid)
}

/// Sorts `v` by iterative bottom-up merge sort and returns the number of element comparisons.
///
/// Processes elements in pairs, keeping pending runs as the bit pattern of the element count seen
/// so far. A carry in that count is exactly a merge of two equal-length runs. The final flush
/// repeatedly merges the shortest pending run with the sorted suffix.
pub fn bottom_up<A>(mut v: ArrayViewMut1<'_, A>) -> u64
where
	A: Ord + Clone,
{
	let len = v.len();
	if len < 2 {
		return 0;
	}
	let mut aux = v.to_owned();
	let mut compares = 0;
	let mut i = 1;
	while i < len {
		let mut stack = i;
		let mut length = 1;
		while stack & length != 0 {
			let lo = stack - length;
			let hi = stack + length;
			compares += merge(
				v.slice_mut(s![lo..hi]),
				aux.slice_mut(s![lo..hi]),
				length,
			);
			stack -= length;
			length <<= 1;
		}
		i += 2;
	}
	let mut stack = len - lowest_one_bit(len);
	while stack != 0 {
		let length = lowest_one_bit(stack);
		let lo = stack - length;
		compares += merge(
			v.slice_mut(s![lo..len]),
			aux.slice_mut(s![lo..len]),
			length,
		);
		stack -= length;
	}
	compares
}

/// Sorts `v` by bottom-up merge sort over leaf runs of `cutoff` elements, each prepared by
/// [`insertion_sort`], and returns the number of element comparisons.
///
/// The run bit pattern now counts whole runs instead of elements. The sub-cutoff residue is
/// insertion-sorted before the final flush and merged during it.
///
/// # Panics
///
/// Panics if `cutoff` is zero.
pub fn bottom_up_cutoff<A>(mut v: ArrayViewMut1<'_, A>, cutoff: usize) -> u64
where
	A: Ord + Clone,
{
	assert!(cutoff >= 1, "{CUTOFF_PANIC}");
	let len = v.len();
	if len < 2 {
		return 0;
	}
	let mut aux = v.to_owned();
	let mut compares = 0;
	let mut stack = 0;
	let mut i = 0;
	while i + cutoff <= len {
		compares += insertion_sort(v.slice_mut(s![i..i + cutoff]));
		let mut length = 1;
		while stack & length != 0 {
			let lo = cutoff * (stack - length);
			let hi = cutoff * (stack + length);
			compares += merge(
				v.slice_mut(s![lo..hi]),
				aux.slice_mut(s![lo..hi]),
				cutoff * stack - lo,
			);
			stack &= !length;
			length <<= 1;
		}
		stack |= length;
		i += cutoff;
	}
	if cutoff * stack < len {
		compares += insertion_sort(v.slice_mut(s![cutoff * stack..len]));
	} else {
		stack &= !lowest_one_bit(stack);
	}
	while stack != 0 {
		let length = lowest_one_bit(stack);
		let lo = cutoff * (stack - length);
		compares += merge(
			v.slice_mut(s![lo..len]),
			aux.slice_mut(s![lo..len]),
			cutoff * stack - lo,
		);
		stack &= !length;
	}
	compares
}

fn lowest_one_bit(value: usize) -> usize {
	value & value.wrapping_neg()
}
