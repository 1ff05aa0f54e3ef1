//! Fork-join parallel merge sort with a parallelism budget.
//!
//! The recursion forks halves via [`rayon::join`], halving the parallelism budget per level, and
//! merges with [`par_merge`] while the budget allows. Subtrees below the cutoff sort sequentially
//! by plain top-down merge sort.

use crate::merge::merge;
use crate::merge_sort::{self, CUTOFF_PANIC};
use crate::par::merge::par_merge;
use ndarray::{ArrayViewMut1, Axis};

/// Message of the panic raised on a zero parallelism budget.
pub const PARALLELISM_PANIC: &str = "Parallelism value must be at least 1.";

/// Sorts `v` by parallel merge sort and returns the number of element comparisons.
///
/// Subviews of at most `cutoff` elements sort sequentially. The `parallelism` budget bounds the
/// forked tasks per merge; it halves per recursion level (never below one), so merges near the
/// root split the most. A budget of one runs the whole recursion sequentially on the current
/// thread's deque.
///
/// # Panics
///
/// Panics if `cutoff` or `parallelism` is zero.
pub fn par_merge_sort<A>(v: ArrayViewMut1<'_, A>, cutoff: usize, parallelism: usize) -> u64
where
	A: Ord + Clone + Send + Sync,
{
	par_merge_sort_span(v, cutoff, parallelism).0
}

/// Sorts `v` like [`par_merge_sort`], additionally returning the span, the comparison count along
/// the critical path of the task tree.
///
/// The span of a sequential leaf is its comparison count; the span of a fork is the maximum of
/// the halves' spans plus the merge comparisons. The quotient of count over span is the
/// parallelism actually exposed by the recursion.
///
/// # Panics
///
/// Panics if `cutoff` or `parallelism` is zero.
pub fn par_merge_sort_span<A>(
	mut v: ArrayViewMut1<'_, A>,
	cutoff: usize,
	parallelism: usize,
) -> (u64, u64)
where
	A: Ord + Clone + Send + Sync,
{
	assert!(cutoff >= 1, "{CUTOFF_PANIC}");
	assert!(parallelism >= 1, "{PARALLELISM_PANIC}");
	if v.len() < 2 {
		return (0, 0);
	}
	let mut aux = v.to_owned();
	task(v, aux.view_mut(), cutoff, parallelism)
}

fn task<A>(
	mut v: ArrayViewMut1<'_, A>,
	mut aux: ArrayViewMut1<'_, A>,
	cutoff: usize,
	parallelism: usize,
) -> (u64, u64)
where
	A: Ord + Clone + Send + Sync,
{
	let len = v.len();
	if len <= cutoff {
		let compares = merge_sort::sort(v, aux);
		return (compares, compares);
	}
	let mid = len.div_ceil(2);
	let budget = (parallelism / 2).max(1);
	let (left, right) = {
		let (v_left, v_right) = v.view_mut().split_at(Axis(0), mid);
		let (aux_left, aux_right) = aux.view_mut().split_at(Axis(0), mid);
		rayon::join(
			|| task(v_left, aux_left, cutoff, budget),
			|| task(v_right, aux_right, cutoff, budget),
		)
	};
	let merged = if parallelism < 2 {
		merge(v, aux, mid)
	} else {
		par_merge(v, aux, mid, parallelism)
	};
	(
		left.0 + right.0 + merged,
		left.1.max(right.1) + merged,
	)
}

#[cfg(test)]
mod test {
	use super::{par_merge_sort, par_merge_sort_span};
	use crate::merge_sort::top_down;
	use ndarray::{Array1, arr1};
	use quickcheck_macros::quickcheck;
	use rand::Rng;

	#[derive(Clone, Debug, Eq, PartialEq)]
	struct Item {
		index: usize,
		value: u32,
	}

	impl PartialOrd for Item {
		fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
			Some(self.cmp(other))
		}
	}

	impl Ord for Item {
		fn cmp(&self, other: &Self) -> core::cmp::Ordering {
			self.value.cmp(&other.value)
		}
	}

	#[test]
	fn sequential_budget_counts_like_top_down() {
		let values = [9, 1, 2, 0, 7, 4, 3, 8, 5, 6, 10];
		let mut expected = arr1(&values);
		let expected_compares = top_down(expected.view_mut());
		for cutoff in 1..=values.len() + 1 {
			let mut array = arr1(&values);
			assert_eq!(par_merge_sort(array.view_mut(), cutoff, 1), expected_compares);
			assert_eq!(array, expected);
		}
	}

	#[test]
	fn sequential_budget_identical_elements() {
		let mut array = Array1::from_iter((0..10).map(|index| Item { index, value: 0 }));
		assert_eq!(par_merge_sort(array.view_mut(), 2, 1), 19);
		let indices = array.mapv(|item| item.index);
		assert_eq!(indices, Array1::from_iter(0..10));
	}

	#[test]
	fn trivial_inputs_cost_nothing() {
		assert_eq!(par_merge_sort(arr1::<i32>(&[]).view_mut(), 2, 2), 0);
		assert_eq!(par_merge_sort(arr1(&[1]).view_mut(), 2, 2), 0);
	}

	#[test]
	#[should_panic(expected = "Cutoff value must be at least 1.")]
	fn rejects_zero_cutoff() {
		par_merge_sort(arr1(&[1, 2]).view_mut(), 0, 2);
	}

	#[test]
	#[should_panic(expected = "Parallelism value must be at least 1.")]
	fn rejects_zero_parallelism() {
		par_merge_sort(arr1(&[1, 2]).view_mut(), 2, 0);
	}

	#[test]
	fn span_is_the_count_of_a_sequential_run() {
		let values = [9, 1, 2, 0, 7, 4, 3, 8, 5, 6, 10];
		let mut array = arr1(&values);
		let (compares, span) = par_merge_sort_span(array.view_mut(), values.len(), 1);
		assert_eq!(compares, span);
	}

	#[test]
	fn span_is_at_most_the_count() {
		let rng = &mut rand::rng();
		for _ in 0..20 {
			let len = rng.random_range(0..200usize);
			let values = Vec::from_iter((0..len).map(|_| rng.random_range(0..1000u32)));
			let mut array = Array1::from_vec(values);
			let (compares, span) = par_merge_sort_span(array.view_mut(), 8, 4);
			assert!(span <= compares);
		}
	}

	#[quickcheck]
	fn sorts_stably_for_any_budget(xs: Vec<u8>, cutoff: u8, parallelism: u8) {
		let cutoff = usize::from(cutoff % 8) + 1;
		let parallelism = usize::from(parallelism % 8) + 1;
		let mut expected = Vec::from_iter(
			xs.iter()
				.copied()
				.enumerate()
				.map(|(index, value)| Item {
					index,
					value: u32::from(value),
				}),
		);
		let mut array = Array1::from_vec(expected.clone());
		expected.sort_by_key(|item| (item.value, item.index));
		par_merge_sort(array.view_mut(), cutoff, parallelism);
		assert_eq!(array, Array1::from_vec(expected));
	}

	#[quickcheck]
	fn parallel_output_matches_sequential(xs: Vec<i32>, parallelism: u8) {
		let parallelism = usize::from(parallelism % 8) + 1;
		let mut expected = Array1::from_vec(xs.clone());
		top_down(expected.view_mut());
		let mut array = Array1::from_vec(xs);
		par_merge_sort(array.view_mut(), 4, parallelism);
		assert_eq!(array, expected);
	}
}
