//! Data movement and search primitives shared by every merge routine.

use core::cmp::Ordering;

/// Moves one element from `src` to `dst` inside a merge region.
///
/// Merges write their output into scratch cells that precede (or follow) the live data. With an
/// internal buffer those cells hold real elements that must survive, so the move is a swap. With
/// an external buffer the cells were stashed beforehand and can simply be overwritten.
pub(crate) trait Relocate<T> {
    fn relocate(v: &mut [T], dst: usize, src: usize);
}

/// Swap based relocation, valid for every `T`.
pub(crate) struct Exchange;

/// Copy based relocation, the previous value at `dst` is lost.
pub(crate) struct Overwrite;

impl<T> Relocate<T> for Exchange {
    #[inline(always)]
    fn relocate(v: &mut [T], dst: usize, src: usize) {
        v.swap(dst, src);
    }
}

impl<T: Copy> Relocate<T> for Overwrite {
    #[inline(always)]
    fn relocate(v: &mut [T], dst: usize, src: usize) {
        v[dst] = v[src];
    }
}

/// Relocates `count` consecutive elements, front to back.
#[inline]
pub(crate) fn relocate_n<T, R: Relocate<T>>(v: &mut [T], dst: usize, src: usize, count: usize) {
    for i in 0..count {
        R::relocate(v, dst + i, src + i);
    }
}

/// Swaps `v[a..a + count]` with `v[b..b + count]` element by element.
///
/// The ranges may overlap, in which case the result is the one produced by swapping pairs in
/// ascending order.
#[inline]
pub(crate) fn swap_n<T>(v: &mut [T], a: usize, b: usize, count: usize) {
    for i in 0..count {
        v.swap(a + i, b + i);
    }
}

/// Exchanges `v[..left_len]` and `v[left_len..]` using only swaps.
///
/// The shorter run is swapped against the adjacent end of the longer one until one of them is
/// exhausted.
pub(crate) fn rotate<T>(v: &mut [T], left_len: usize) {
    let mut pos = 0;
    let mut left_len = left_len;
    let mut right_len = v.len() - left_len;

    while left_len != 0 && right_len != 0 {
        if left_len <= right_len {
            swap_n(v, pos, pos + left_len, left_len);
            pos += left_len;
            right_len -= left_len;
        } else {
            swap_n(v, pos + (left_len - right_len), pos + left_len, right_len);
            left_len -= right_len;
        }
    }
}

/// Returns the index of the first element in the sorted `run` that is not less than `key`.
pub(crate) fn search_left<T, F>(run: &[T], key: &T, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut lo = 0;
    let mut hi = run.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if compare(&run[mid], key) == Ordering::Less {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    lo
}

/// Returns the index of the first element in the sorted `run` that is greater than `key`.
pub(crate) fn search_right<T, F>(run: &[T], key: &T, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut lo = 0;
    let mut hi = run.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if compare(&run[mid], key) == Ordering::Greater {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    lo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_uneven_runs() {
        let mut v = [1, 2, 3, 4, 5, 6, 7];
        rotate(&mut v, 2);
        assert_eq!(v, [3, 4, 5, 6, 7, 1, 2]);

        let mut v = [1, 2, 3, 4, 5, 6, 7];
        rotate(&mut v, 5);
        assert_eq!(v, [6, 7, 1, 2, 3, 4, 5]);

        let mut v = [1, 2, 3];
        rotate(&mut v, 0);
        assert_eq!(v, [1, 2, 3]);
        rotate(&mut v, 3);
        assert_eq!(v, [1, 2, 3]);
    }

    #[test]
    fn search_bounds() {
        let run = [1, 3, 3, 3, 7];
        let mut cmp = |a: &i32, b: &i32| a.cmp(b);

        assert_eq!(search_left(&run, &3, &mut cmp), 1);
        assert_eq!(search_right(&run, &3, &mut cmp), 4);
        assert_eq!(search_left(&run, &0, &mut cmp), 0);
        assert_eq!(search_right(&run, &9, &mut cmp), 5);
        assert_eq!(search_left(&[], &9, &mut cmp), 0);
    }
}
