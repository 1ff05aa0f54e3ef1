//! Rank-splitting parallel merge.
//!
//! The merge range is cut into sections of near-equal output length. For each section boundary at
//! output rank `k`, [`two_sequence_select`] finds how many elements each input run contributes to
//! the first `k` merged elements. Sections then merge independently, reading the shared scratch
//! buffer and writing disjoint subviews.

use crate::merge;
use ndarray::{ArrayView1, ArrayViewMut1, Axis};

/// Message of the panic raised by [`two_sequence_select`] on an invalid rank.
pub const RANK_PANIC: &str = "k is out of bounds";

/// Finds the split `(i_a, i_b)` with `i_a + i_b = k` such that merging the first `i_a` elements
/// of the sorted run `v[..mid]` with the first `i_b` elements of the sorted run `v[mid..]` yields
/// the first `k` elements of their stable merge.
///
/// Binary search over the left contribution. The left-prefix test uses `<=` and the right-prefix
/// test strict `<`, so of equal elements the left run contributes first, matching the stable
/// merge.
///
/// # Panics
///
/// Panics if `k >= v.len()`.
pub fn two_sequence_select<A>(v: &ArrayView1<'_, A>, mid: usize, k: usize) -> (usize, usize)
where
	A: Ord,
{
	let len_a = mid;
	let len_b = v.len() - mid;
	assert!(k < len_a + len_b, "{RANK_PANIC}");
	let mut lo_a = 0;
	let mut hi_a = k;
	let mut i_a = 0;
	let mut i_b = k;
	while lo_a <= hi_a {
		i_a = lo_a + (hi_a - lo_a) / 2;
		i_b = k - i_a;
		let left_fits = i_a == 0 || i_b >= len_b || (i_a <= len_a && v[i_a - 1] <= v[mid + i_b]);
		if !left_fits {
			hi_a = i_a - 1;
			continue;
		}
		let right_fits = i_b == 0 || i_a >= len_a || (i_b <= len_b && v[mid + i_b - 1] < v[i_a]);
		if !right_fits {
			lo_a = i_a + 1;
			continue;
		}
		break;
	}
	(i_a, i_b)
}

/// A section of the merge output and the input cursors producing it.
#[derive(Clone, Copy)]
struct Section {
	left: usize,
	right: usize,
	length: usize,
}

/// Merges sorted runs `v[..mid]` and `v[mid..]` using the same-length scratch view `aux`, split
/// into `parallelism` sections merged concurrently, and returns the number of element
/// comparisons.
///
/// A parallelism below two, as well as a trivial merge, falls back to the sequential
/// [`merge::merge`]. Each section counts by the sequential rule against the global run bounds, so
/// the total is deterministic regardless of scheduling, though it differs from the sequential
/// count in general since sections drain the runs independently.
pub fn par_merge<A>(
	mut v: ArrayViewMut1<'_, A>,
	mut aux: ArrayViewMut1<'_, A>,
	mid: usize,
	parallelism: usize,
) -> u64
where
	A: Ord + Clone + Send + Sync,
{
	let len = v.len();
	if parallelism < 2 || mid == 0 || mid == len {
		return merge::merge(v, aux, mid);
	}
	for i in 0..len {
		aux[i] = v[i].clone();
	}
	let aux = aux.view();
	let increment = len as f64 / parallelism as f64;
	let mut start = 0;
	let sections = Vec::from_iter((0..parallelism).map(|i| {
		let length = if i + 1 == parallelism {
			len - start
		} else {
			((i + 1) as f64 * increment) as usize - start
		};
		let (i_a, i_b) = two_sequence_select(&aux, mid, start);
		start += length;
		Section {
			left: i_a,
			right: mid + i_b,
			length,
		}
	}));
	split_merge(v, &aux, &sections, mid)
}

/// Forks the section list in halves until single sections merge sequentially.
fn split_merge<A>(
	v: ArrayViewMut1<'_, A>,
	aux: &ArrayView1<'_, A>,
	sections: &[Section],
	mid: usize,
) -> u64
where
	A: Ord + Clone + Send + Sync,
{
	if let [section] = sections {
		return merge_section(v, aux, *section, mid);
	}
	let half = sections.len() / 2;
	let split: usize = sections[..half].iter().map(|section| section.length).sum();
	let (left, right) = v.split_at(Axis(0), split);
	let (left, right) = rayon::join(
		|| split_merge(left, aux, &sections[..half], mid),
		|| split_merge(right, aux, &sections[half..], mid),
	);
	left + right
}

/// Merges one section from the scratch buffer into its output subview, counting a comparison per
/// placement while both runs are unexhausted.
fn merge_section<A>(
	mut v: ArrayViewMut1<'_, A>,
	aux: &ArrayView1<'_, A>,
	section: Section,
	mid: usize,
) -> u64
where
	A: Ord + Clone,
{
	debug_assert_eq!(v.len(), section.length);
	let len = aux.len();
	let mut left = section.left;
	let mut right = section.right;
	let mut compares = 0;
	for i in 0..section.length {
		if left == mid {
			v[i] = aux[right].clone();
			right += 1;
		} else if right == len {
			v[i] = aux[left].clone();
			left += 1;
		} else if aux[right] < aux[left] {
			v[i] = aux[right].clone();
			right += 1;
			compares += 1;
		} else {
			v[i] = aux[left].clone();
			left += 1;
			compares += 1;
		}
	}
	compares
}

#[cfg(test)]
mod test {
	use super::{par_merge, two_sequence_select};
	use ndarray::{Array1, arr1, s};
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
	fn selects_every_rank() {
		let array = arr1(&[6, 5, 1, 4, 4, 2, 3, 4, 6]);
		let view = array.slice(s![2..]);
		let splits = [(0, 0), (1, 0), (1, 1), (1, 2), (2, 2), (3, 2), (3, 3)];
		for (k, &split) in splits.iter().enumerate() {
			assert_eq!(two_sequence_select(&view, 3, k), split);
		}
	}

	#[test]
	#[should_panic(expected = "k is out of bounds")]
	fn rejects_rank_beyond_length() {
		let array = arr1(&[1, 2]);
		two_sequence_select(&array.view(), 1, 2);
	}

	#[test]
	fn select_prefers_the_left_run_on_ties() {
		let item = |index, value| Item { index, value };
		let array = arr1(&[item(0, 1), item(1, 1), item(2, 1)]);
		assert_eq!(two_sequence_select(&array.view(), 2, 1), (1, 0));
		assert_eq!(two_sequence_select(&array.view(), 2, 2), (2, 0));
	}

	#[quickcheck]
	fn selected_prefixes_rebuild_the_merge_prefix(mut left: Vec<u32>, mut right: Vec<u32>, k: usize) {
		if left.len() + right.len() == 0 {
			return;
		}
		let k = k % (left.len() + right.len());
		left.sort();
		right.sort();
		let mid = left.len();
		let array = Array1::from_vec([left.clone(), right.clone()].concat());
		let (i_a, i_b) = two_sequence_select(&array.view(), mid, k);
		assert_eq!(i_a + i_b, k);
		let mut prefix = [&left[..i_a], &right[..i_b]].concat();
		prefix.sort();
		let mut expected = [left, right].concat();
		expected.sort();
		assert_eq!(prefix, expected[..k]);
	}

	fn merged(mut array: Array1<i32>, mid: usize, parallelism: usize) -> (Array1<i32>, u64) {
		let mut aux = array.clone();
		let compares = par_merge(array.view_mut(), aux.view_mut(), mid, parallelism);
		(array, compares)
	}

	#[test]
	fn even_sections() {
		let (array, compares) = merged(arr1(&[3, 4, 1, 2]), 2, 2);
		assert_eq!(array, arr1(&[1, 2, 3, 4]));
		assert_eq!(compares, 2);
	}

	#[test]
	fn uneven_sections() {
		let mut array = arr1(&[7, 2, 3, 5, 4, 6, 0]);
		let mut aux = array.clone();
		let compares = par_merge(
			array.slice_mut(s![1..6]),
			aux.slice_mut(s![1..6]),
			3,
			2,
		);
		assert_eq!(array, arr1(&[7, 2, 3, 4, 5, 6, 0]));
		assert_eq!(compares, 4);
	}

	#[test]
	fn duplicates_across_runs_stably() {
		let item = |index, value| Item { index, value };
		let mut array = arr1(&[
			item(0, 1),
			item(1, 3),
			item(2, 5),
			item(3, 7),
			item(4, 1),
			item(5, 3),
			item(6, 5),
			item(7, 7),
		]);
		let mut aux = array.clone();
		let compares = par_merge(array.view_mut(), aux.view_mut(), 4, 2);
		assert_eq!(compares, 7);
		let indices = array.mapv(|item| item.index);
		assert_eq!(indices, arr1(&[0, 4, 1, 5, 2, 6, 3, 7]));
	}

	#[test]
	fn more_sections_than_elements() {
		let (array, compares) = merged(arr1(&[2, 3, 1]), 2, 8);
		assert_eq!(array, arr1(&[1, 2, 3]));
		assert_eq!(compares, 1);
	}

	#[quickcheck]
	fn matches_the_sequential_merge_output(mut left: Vec<u32>, mut right: Vec<u32>, parallelism: u8) {
		let parallelism = usize::from(parallelism % 8) + 1;
		left.sort();
		right.sort();
		let mid = left.len();
		let mut expected = [left, right].concat();
		let mut array = Array1::from_vec(expected.clone());
		let mut aux = array.clone();
		par_merge(array.view_mut(), aux.view_mut(), mid, parallelism);
		expected.sort();
		assert_eq!(array, Array1::from_vec(expected));
	}

	#[test]
	fn random_splits_partition_the_runs() {
		let rng = &mut rand::rng();
		for _ in 0..100 {
			let limit = rng.random_range(1..21u32);
			let left_len = rng.random_range(0..20usize);
			let right_len = rng.random_range(0..20usize);
			let mut values = Vec::from_iter(
				(0..left_len + right_len).map(|_| rng.random_range(0..limit)),
			);
			if values.is_empty() {
				continue;
			}
			values[..left_len].sort();
			values[left_len..].sort();
			let array = Array1::from_vec(values);
			let k = rng.random_range(0..array.len());
			let (i_a, i_b) = two_sequence_select(&array.view(), left_len, k);
			let left = array.slice(s![..left_len]);
			let right = array.slice(s![left_len..]);
			assert!(
				left.slice(s![..i_a])
					.iter()
					.all(|x| right.slice(s![i_b..]).iter().all(|y| x <= y))
			);
			assert!(
				right
					.slice(s![..i_b])
					.iter()
					.all(|x| left.slice(s![i_a..]).iter().all(|y| x < y))
			);
		}
	}

	#[test]
	fn trivial_merges_fall_back_sequentially() {
		let (array, compares) = merged(arr1(&[1, 2, 3]), 0, 4);
		assert_eq!(array, arr1(&[1, 2, 3]));
		assert_eq!(compares, 0);
		let (array, compares) = merged(arr1(&[1, 2, 3]), 3, 4);
		assert_eq!(array, arr1(&[1, 2, 3]));
		assert_eq!(compares, 0);
	}
}
