//! Comparison-counted level sort, a run-stack merge sort scheduling merges by boundary levels.
//!
//! The level of a run boundary is the most significant bit in which the midpoint intervals of the
//! two adjacent runs differ, so levels strictly decrease along the stack of pending runs. That
//! makes a `u64` bitmask a complete stack encoding, with the lowest set bit as the top.

use crate::insertion_sort::insertion_sort;
use crate::merge::merge;
use crate::merge_sort::CUTOFF_PANIC;
use crate::run::explore_run;
use ndarray::{Array1, ArrayViewMut1, s};

/// Sorts `v` by level sort over leaf runs of `cutoff` elements, each prepared by
/// [`insertion_sort`], and returns the number of element comparisons.
///
/// The trailing run may be shorter than `cutoff`; it takes part in the level scheduling like any
/// other run.
///
/// # Panics
///
/// Panics if `cutoff` is zero.
pub fn level_sort<A>(mut v: ArrayViewMut1<'_, A>, cutoff: usize) -> u64
where
	A: Ord + Clone,
{
	assert!(cutoff >= 1, "{CUTOFF_PANIC}");
	let len = v.len();
	if len < 2 {
		return 0;
	}
	let mut aux = v.to_owned();
	let mut stack = LevelStack::new(len);
	let mut start_l = 0;
	let mut end_l = cutoff.min(len);
	let mut compares = insertion_sort(v.slice_mut(s![start_l..end_l]));
	while end_l < len {
		let start_n = end_l;
		let end_n = (start_n + cutoff).min(len);
		compares += insertion_sort(v.slice_mut(s![start_n..end_n]));
		compares += stack.push(&mut v, &mut aux, &mut start_l, end_l, start_n, end_n);
		start_l = start_n;
		end_l = end_n;
	}
	compares + stack.flush(&mut v, &mut aux, len)
}

/// Sorts `v` by level sort over natural runs detected by [`explore_run`], extending runs shorter
/// than `cutoff` by [`insertion_sort`], and returns its comparison charge.
///
/// The charge is the number of merge and insertion comparisons plus the explored length of every
/// run (charged before extension), minus one for the final run boundary.
///
/// # Panics
///
/// Panics if `cutoff` is zero.
pub fn level_sort_adaptive<A>(mut v: ArrayViewMut1<'_, A>, cutoff: usize) -> u64
where
	A: Ord + Clone,
{
	assert!(cutoff >= 1, "{CUTOFF_PANIC}");
	let len = v.len();
	if len < 2 {
		return 0;
	}
	let mut aux = v.to_owned();
	let mut stack = LevelStack::new(len);
	let mut start_l = 0;
	let mut end_l = explore_run(&mut v, 0);
	let mut compares = end_l as u64;
	if end_l - start_l <= cutoff {
		end_l = cutoff.min(len);
		compares += insertion_sort(v.slice_mut(s![..end_l]));
	}
	while end_l < len {
		let start_n = end_l;
		let mut end_n = explore_run(&mut v, start_n);
		compares += (end_n - start_n) as u64;
		if end_n - start_n <= cutoff {
			end_n = (start_n + cutoff).min(len);
			compares += insertion_sort(v.slice_mut(s![start_n..end_n]));
		}
		compares += stack.push(&mut v, &mut aux, &mut start_l, end_l, start_n, end_n);
		start_l = start_n;
		end_l = end_n;
	}
	compares + stack.flush(&mut v, &mut aux, len) - 1
}

/// Pending runs keyed by boundary level.
///
/// `mask` has bit `level - 1` set per pending run; `start` and `end` record the run bounds at
/// that level. Strictly decreasing levels along the stack keep the encoding unambiguous.
struct LevelStack {
	mask: u64,
	start: Vec<usize>,
	end: Vec<usize>,
}

impl LevelStack {
	fn new(len: usize) -> Self {
		let capacity = 64 - (2 * len as u64 - 1).leading_zeros() as usize + 1;
		Self {
			mask: 0,
			start: vec![0; capacity],
			end: vec![0; capacity],
		}
	}

	fn top(&self) -> usize {
		self.mask.trailing_zeros() as usize + 1
	}

	/// Registers the boundary between the left accumulation `[start_l, end_l)` and the new run
	/// `[start_n, end_n)`, merging pending runs of lower level first.
	fn push<A>(
		&mut self,
		v: &mut ArrayViewMut1<'_, A>,
		aux: &mut Array1<A>,
		start_l: &mut usize,
		end_l: usize,
		start_n: usize,
		end_n: usize,
	) -> u64
	where
		A: Ord + Clone,
	{
		let current = level(*start_l, end_l, start_n, end_n);
		self.end[current] = end_l;
		let mut compares = 0;
		while self.mask != 0 && current > self.top() {
			let top = self.top();
			let lo = self.start[top];
			let mid = self.end[top];
			compares += merge(
				v.slice_mut(s![lo..end_l]),
				aux.slice_mut(s![lo..end_l]),
				mid - lo,
			);
			self.mask &= !(1 << (top - 1));
			*start_l = lo;
		}
		self.mask |= 1 << (current - 1);
		self.start[current] = *start_l;
		compares
	}

	/// Merges all pending runs into the sorted suffix ending at `hi`, by ascending level.
	fn flush<A>(&mut self, v: &mut ArrayViewMut1<'_, A>, aux: &mut Array1<A>, hi: usize) -> u64
	where
		A: Ord + Clone,
	{
		let mut compares = 0;
		while self.mask != 0 {
			let top = self.top();
			let lo = self.start[top];
			let mid = self.end[top];
			compares += merge(
				v.slice_mut(s![lo..hi]),
				aux.slice_mut(s![lo..hi]),
				mid - lo,
			);
			self.mask &= !(1 << (top - 1));
		}
		compares
	}
}

/// The most significant bit in which the midpoint intervals of two adjacent runs differ, with
/// exclusive run ends. Doubled midpoints avoid fractions.
fn level(start_l: usize, end_l: usize, start_n: usize, end_n: usize) -> usize {
	let differing = ((start_l + end_l) as u64) ^ ((start_n + end_n) as u64);
	64 - differing.leading_zeros() as usize
}
