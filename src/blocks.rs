use core::cmp::Ordering;

use crate::buffer::Scratch;
use crate::merge::{merge_left, merge_right};
use crate::util::{relocate_n, rotate, Exchange, Relocate};

/// Sorts the data into runs of `2 * build_len` elements.
///
/// `v` starts with `build_len` buffer cells followed by the data. Runs are built bottom-up,
/// starting with sorted pairs. Every merge pass writes its output into the cells in front of its
/// input, so the data drifts left by the run length of each pass. While the runs fit into the
/// external buffer the passes copy, later passes swap with the internal buffer. A final pass
/// walks right to left with [`merge_right`], putting the data back behind the buffer.
///
/// On return `v[..build_len]` holds the buffer elements (in some order) and
/// `v[build_len..]` consists of sorted runs of `2 * build_len` elements, the last one possibly
/// shorter.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn build_blocks<T, S, F>(v: &mut [T], build_len: usize, scratch: &mut S, compare: &mut F)
where
    S: Scratch<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len() - build_len;
    let mut base = build_len;

    let mut build_buf = build_len.min(scratch.capacity());
    if build_buf != 0 {
        // Largest power of two that fits.
        build_buf = 1 << build_buf.ilog2();
    }

    let mut part;
    if build_buf > 1 {
        scratch.stash(&v[base - build_buf..base]);

        pairwise::<T, S::Relocate, F>(v, base, len, compare);
        base -= 2;

        part = 2;
        while part < build_buf {
            merge_pass::<T, S::Relocate, F>(v, base, len, part, compare);
            base -= part;
            part *= 2;
        }

        scratch.unstash(&mut v[base + len..base + len + build_buf]);
    } else {
        pairwise::<T, Exchange, F>(v, base, len, compare);
        base -= 2;
        part = 2;
    }

    while part < build_len {
        merge_pass::<T, Exchange, F>(v, base, len, part, compare);
        base -= part;
        part *= 2;
    }

    debug_assert_eq!(base, 0);

    let rest = len % (2 * build_len);
    let mut run_start = len - rest;

    if rest <= build_len {
        rotate(&mut v[run_start..run_start + rest + build_len], rest);
    } else {
        merge_right(
            &mut v[run_start..run_start + rest + build_len],
            build_len,
            rest - build_len,
            compare,
        );
    }

    while run_start > 0 {
        run_start -= 2 * build_len;
        merge_right(
            &mut v[run_start..run_start + 3 * build_len],
            build_len,
            build_len,
            compare,
        );
    }
}

/// Sorts each pair of `v[base..base + len]` into the two cells in front of it.
fn pairwise<T, R, F>(v: &mut [T], base: usize, len: usize, compare: &mut F)
where
    R: Relocate<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    for i in (1..len).step_by(2) {
        let swap = (compare(&v[base + i - 1], &v[base + i]) == Ordering::Greater) as usize;

        R::relocate(v, base + i - 3, base + i - 1 + swap);
        R::relocate(v, base + i - 2, base + i - swap);
    }

    if len % 2 != 0 {
        R::relocate(v, base + len - 3, base + len - 1);
    }
}

/// Merges neighbouring runs of `part` elements from `v[base..base + len]` into the `part` cells
/// in front of them.
fn merge_pass<T, R, F>(v: &mut [T], base: usize, len: usize, part: usize, compare: &mut F)
where
    R: Relocate<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut left = 0;
    while left + 2 * part <= len {
        let start = base + left - part;
        merge_left::<T, R, F>(&mut v[start..start + 3 * part], part, part, compare);
        left += 2 * part;
    }

    let rest = len - left;
    let start = base + left - part;
    if rest > part {
        merge_left::<T, R, F>(&mut v[start..base + len], part, part, compare);
    } else {
        // A single sorted run, it only has to move.
        relocate_n::<T, R>(v, start, start + part, rest);
    }
}
