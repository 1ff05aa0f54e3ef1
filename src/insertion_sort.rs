use ndarray::ArrayViewMut1;

/// Sorts `v` by adjacent-swap insertion sort, which is *O*(*n*^2) worst-case, and returns the
/// number of element comparisons.
///
/// Every inner-loop comparison is counted, including the one breaking the loop without a swap.
/// Hence an already sorted view of length `n >= 1` costs exactly `n - 1` comparisons.
pub fn insertion_sort<A>(mut v: ArrayViewMut1<'_, A>) -> u64
where
	A: Ord,
{
	let mut compares = 0;
	for i in 1..v.len() {
		for j in (1..=i).rev() {
			compares += 1;
			if v[j] < v[j - 1] {
				v.swap(j, j - 1);
			} else {
				break;
			}
		}
	}
	compares
}

#[cfg(test)]
mod test {
	use super::insertion_sort;
	use ndarray::{Array1, arr1, s};
	use quickcheck_macros::quickcheck;

	#[quickcheck]
	fn sorted(xs: Vec<u32>) {
		let mut array = Array1::from_vec(xs);
		insertion_sort(array.view_mut());
		for i in 1..array.len() {
			assert!(array[i - 1] <= array[i]);
		}
	}

	#[test]
	fn empty_and_single_cost_nothing() {
		assert_eq!(insertion_sort(arr1::<i32>(&[]).view_mut()), 0);
		assert_eq!(insertion_sort(arr1(&[7]).view_mut()), 0);
	}

	#[test]
	fn sorted_costs_one_comparison_per_pair() {
		let mut array = arr1(&[-1, 0, 1, 2]);
		assert_eq!(insertion_sort(array.view_mut()), 3);
	}

	#[test]
	fn reversed_costs_every_shift() {
		let mut array = arr1(&[4, 3, 2, 1]);
		// 1 + 2 + 3 shifts, none of them breaking early.
		assert_eq!(insertion_sort(array.view_mut()), 6);
		assert_eq!(array, arr1(&[1, 2, 3, 4]));
	}

	#[test]
	fn counts_breaking_comparison() {
		let mut array = arr1(&[3, 8, 5, 6, 10]);
		assert_eq!(insertion_sort(array.view_mut()), 6);
		assert_eq!(array, arr1(&[3, 5, 6, 8, 10]));
	}

	#[test]
	fn subview_leaves_rest_untouched() {
		let mut array = arr1(&[9, 3, 1, 2, 0]);
		insertion_sort(array.slice_mut(s![1..4]));
		assert_eq!(array, arr1(&[9, 1, 2, 3, 0]));
	}

	#[quickcheck]
	fn stable(xs: Vec<u8>) {
		let mut array = Array1::from_iter(
			xs.iter()
				.copied()
				.enumerate()
				.map(|(index, value)| (value, index)),
		);
		let mut tagged = array.clone();
		insertion_sort(tagged.view_mut());
		let mut sorted = array.view_mut();
		sorted.as_slice_mut().unwrap().sort();
		assert_eq!(tagged, sorted);
	}
}
