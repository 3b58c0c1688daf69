//! Merges of two adjacent sorted runs.
//!
//! Buffered merges operate on a region that contains scratch cells next to the two runs. The
//! region is always passed as its own slice, the scratch length is implied by the run lengths.

use core::cmp::Ordering;

use crate::util::{relocate_n, rotate, search_left, search_right, Relocate};

/// Merges `v[..left_len]` and `v[left_len..]` in place without any scratch space.
///
/// The shorter run is moved into the longer one piece by piece: a binary search finds how much of
/// the longer run goes before the next element of the shorter run, the two are rotated, and
/// elements already in order are skipped.
///
/// Cost: `min(len1, len2)^2 + max(len1, len2)`.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn merge_without_buffer<T, F>(v: &mut [T], left_len: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut pos = 0;
    let mut len1 = left_len;
    let mut len2 = v.len() - left_len;

    if len1 < len2 {
        while len1 != 0 {
            let (left, right) = v[pos..].split_at(len1);
            let loc = search_left(&right[..len2], &left[0], compare);

            if loc != 0 {
                rotate(&mut v[pos..pos + len1 + loc], len1);
                pos += loc;
                len2 -= loc;
            }

            if len2 == 0 {
                break;
            }

            loop {
                pos += 1;
                len1 -= 1;
                if len1 == 0 || compare(&v[pos], &v[pos + len1]) == Ordering::Greater {
                    break;
                }
            }
        }
    } else {
        while len2 != 0 {
            let (left, right) = v[pos..].split_at(len1);
            let loc = search_right(left, &right[len2 - 1], compare);

            if loc != len1 {
                rotate(&mut v[pos + loc..pos + len1 + len2], len1 - loc);
                len1 = loc;
            }

            if len1 == 0 {
                break;
            }

            loop {
                len2 -= 1;
                if len2 == 0
                    || compare(&v[pos + len1 - 1], &v[pos + len1 + len2 - 1]) == Ordering::Greater
                {
                    break;
                }
            }
        }
    }
}

/// Merges two runs into the scratch cells in front of them.
///
/// Layout before: `[scratch; gap] [left; left_len] [right; rest]`.
/// Layout after: `[merged; left_len + rest] [scratch; gap]`.
///
/// `rest` must not exceed `gap`, otherwise the output would overrun unread left elements.
///
/// With [`Exchange`](crate::util::Exchange) the scratch contents are preserved (in some order),
/// with [`Overwrite`](crate::util::Overwrite) they are clobbered.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn merge_left<T, R, F>(v: &mut [T], gap: usize, left_len: usize, compare: &mut F)
where
    R: Relocate<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut dst = 0;
    let mut left = gap;
    let left_end = gap + left_len;
    let mut right = left_end;
    let right_end = v.len();

    while right < right_end {
        if left == left_end || compare(&v[left], &v[right]) == Ordering::Greater {
            R::relocate(v, dst, right);
            right += 1;
        } else {
            R::relocate(v, dst, left);
            left += 1;
        }
        dst += 1;
    }

    if dst != left {
        relocate_n::<T, R>(v, dst, left, left_end - left);
    }
}

/// Mirror image of [`merge_left`] with the scratch cells behind the runs, swap only.
///
/// Layout before: `[left; left_len] [right; right_len] [scratch; rest]`.
/// Layout after: `[scratch; rest] [merged; left_len + right_len]`.
///
/// `left_len` must not exceed `rest`.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn merge_right<T, F>(v: &mut [T], left_len: usize, right_len: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    // One past the next position to fill or take, walking right to left.
    let mut dst = v.len();
    let mut right = left_len + right_len;
    let mut left = left_len;

    while left > 0 {
        dst -= 1;
        if right == left_len || compare(&v[left - 1], &v[right - 1]) == Ordering::Greater {
            left -= 1;
            v.swap(dst, left);
        } else {
            right -= 1;
            v.swap(dst, right);
        }
    }

    if right != dst {
        while right > left_len {
            dst -= 1;
            right -= 1;
            v.swap(dst, right);
        }
    }
}

/// Bottom-up merge sort that only uses [`merge_without_buffer`].
///
/// Used when the input has too few distinct values to tag blocks. Few distinct values also keep
/// the rotations cheap, most of the merge work degenerates into skipping equal runs.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn lazy_stable_sort<T, F>(v: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();

    for i in (1..len).step_by(2) {
        if compare(&v[i - 1], &v[i]) == Ordering::Greater {
            v.swap(i - 1, i);
        }
    }

    let mut part = 2;
    while part < len {
        let mut left = 0;
        while left + 2 * part <= len {
            merge_without_buffer(&mut v[left..left + 2 * part], part, compare);
            left += 2 * part;
        }

        let rest = len - left;
        if rest > part {
            merge_without_buffer(&mut v[left..], part, compare);
        }

        part *= 2;
    }
}
