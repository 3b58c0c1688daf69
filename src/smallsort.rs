use core::cmp::Ordering;

/// Slices up to this length are sorted by insertion sort directly.
pub(crate) const SMALL_SORT_THRESHOLD: usize = 16;

/// Stable insertion sort. An element only moves left past strictly greater elements.
///
/// Every move is a swap, so a panicking comparison leaves `v` a permutation of its input.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn insertion_sort<T, F>(v: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && compare(&v[j - 1], &v[j]) == Ordering::Greater {
            v.swap(j - 1, j);
            j -= 1;
        }
    }
}
