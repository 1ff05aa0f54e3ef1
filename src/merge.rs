//! The comparison-counted stable merge all merge sorts in this crate are built on.

use crate::run::is_sorted;
use ndarray::{ArrayViewMut1, s};

/// Merges sorted runs `v[..mid]` and `v[mid..]` using the same-length scratch view `aux`, and
/// returns the number of element comparisons.
///
/// Copies `v[..]` into `aux[..]`, then merges back into `v` reading `aux`. On equal elements the
/// left run wins, maintaining stability. A comparison is counted for every placement made while
/// both runs are unexhausted; draining an exhausted side is free.
pub fn merge<A>(mut v: ArrayViewMut1<'_, A>, mut aux: ArrayViewMut1<'_, A>, mid: usize) -> u64
where
	A: Ord + Clone,
{
	let len = v.len();
	debug_assert!(mid <= len && aux.len() == len);
	debug_assert!(is_sorted(v.slice(s![..mid])));
	debug_assert!(is_sorted(v.slice(s![mid..])));
	for i in 0..len {
		aux[i] = v[i].clone();
	}
	let mut left = 0;
	let mut right = mid;
	let mut compares = 0;
	for i in 0..len {
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
