use core::cmp::Ordering;

use crate::merge::{merge_left, merge_without_buffer};
use crate::smallsort::insertion_sort;
use crate::smart_merge::{smart_merge_buffered, smart_merge_unbuffered, Fragment, LeftOver};
use crate::util::{relocate_n, swap_n, Relocate};

/// Merges neighbouring pairs of sorted `build_len` runs.
///
/// `keys` holds distinct elements, at least one per block plus one. `region` is the data, preceded
/// by `block_len` scratch cells if `buffered` is set. Each pair of runs is cut into blocks of
/// `block_len` elements which are then ordered by their first element, ties broken by the key
/// that moves along with every block. Block order alone does not sort the pair, but it bounds how
/// far every element still has to travel, so a single left to right sweep of [`merge_blocks`]
/// finishes the job.
///
/// A trailing pair with a short right run is handled as an irregular group. A trailing single run
/// is already sorted and left alone.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn combine_blocks<T, R, F>(
    keys: &mut [T],
    region: &mut [T],
    build_len: usize,
    block_len: usize,
    buffered: bool,
    compare: &mut F,
) where
    R: Relocate<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let gap = if buffered { block_len } else { 0 };
    let group_len = 2 * build_len;

    let mut len = region.len() - gap;
    let group_count = len / group_len;
    let mut left_over = len % group_len;
    if left_over <= build_len {
        len -= left_over;
        left_over = 0;
    }

    for i in 0..=group_count {
        let last = i == group_count;
        if last && left_over == 0 {
            break;
        }

        let group_start = gap + i * group_len;
        let group_end = group_start + if last { left_over } else { group_len };
        let block_count = (group_end - group_start) / block_len;

        insertion_sort(&mut keys[..block_count + last as usize], compare);

        let blocks = &mut region[group_start..group_end];
        let midkey = sort_blocks(keys, blocks, block_count, build_len / block_len, block_len, compare);

        let mut a_block_count = 0;
        let last_len = if last { left_over % block_len } else { 0 };
        if last_len != 0 {
            let irregular = block_count * block_len;
            while a_block_count < block_count
                && compare(
                    &blocks[irregular],
                    &blocks[(block_count - a_block_count - 1) * block_len],
                ) == Ordering::Less
            {
                a_block_count += 1;
            }
        }

        merge_blocks::<T, R, F>(
            keys,
            midkey,
            &mut region[group_start - gap..group_end],
            buffered,
            block_count - a_block_count,
            block_len,
            a_block_count,
            last_len,
            compare,
        );
    }

    if buffered {
        // The merged data ended up `gap` cells to the left, move it back behind the scratch.
        for i in (0..len).rev() {
            R::relocate(region, gap + i, i);
        }
    }
}

/// Selection sort of the first `block_count` blocks by their first element, ties broken by key.
///
/// Keys move along with their blocks. Returns the new position of the key that was at `midkey`,
/// the first key of the right run.
fn sort_blocks<T, F>(
    keys: &mut [T],
    blocks: &mut [T],
    block_count: usize,
    mut midkey: usize,
    block_len: usize,
    compare: &mut F,
) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    for index in 1..block_count {
        let target = index - 1;
        let mut min = target;

        for candidate in index..block_count {
            let ord = compare(&blocks[min * block_len], &blocks[candidate * block_len]);
            if ord == Ordering::Greater
                || (ord == Ordering::Equal && compare(&keys[min], &keys[candidate]) == Ordering::Greater)
            {
                min = candidate;
            }
        }

        if min != target {
            swap_n(blocks, target * block_len, min * block_len, block_len);
            keys.swap(target, min);

            if midkey == target {
                midkey = min;
            } else if midkey == min {
                midkey = target;
            }
        }
    }

    midkey
}

/// Merges one group of block-sorted data.
///
/// `v` covers the group, preceded by `block_len` scratch cells if `buffered` is set. The first
/// `block_count` blocks are regular, their keys tell which run they came from (`keys[k] <
/// keys[midkey]` means the left run). They are followed by `a_block_count` regular blocks of the
/// left run and `last_len` elements of an irregular block of the right run, which sorts before
/// those `a_block_count` blocks.
#[allow(clippy::too_many_arguments)]
fn merge_blocks<T, R, F>(
    keys: &[T],
    midkey: usize,
    v: &mut [T],
    buffered: bool,
    block_count: usize,
    block_len: usize,
    a_block_count: usize,
    last_len: usize,
    compare: &mut F,
) where
    R: Relocate<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let gap = if buffered { block_len } else { 0 };

    if block_count == 0 {
        let a_len = a_block_count * block_len;
        merge_tail::<T, R, F>(&mut v[..gap + a_len + last_len], gap, a_len, compare);
        return;
    }

    let mut left_over = LeftOver {
        len: block_len,
        frag: Fragment::of_key(compare(&keys[0], &keys[midkey])),
    };
    let mut processed = block_len;

    for key_index in 1..block_count {
        // Start of the current remainder, relative to the scratch.
        let rest = processed - left_over.len;
        let next_frag = Fragment::of_key(compare(&keys[key_index], &keys[midkey]));

        if next_frag == left_over.frag {
            // Same run, the remainder is final. Hand the scratch over to the next block.
            if buffered {
                relocate_n::<T, R>(v, rest, rest + gap, left_over.len);
            }
            left_over.len = block_len;
        } else if buffered {
            let step = &mut v[rest..rest + gap + left_over.len + block_len];
            left_over = smart_merge_buffered::<T, R, F>(step, left_over, block_len, compare);
        } else {
            let step = &mut v[rest..rest + left_over.len + block_len];
            left_over = smart_merge_unbuffered(step, left_over, block_len, compare);
        }

        processed += block_len;
    }

    let mut rest = processed - left_over.len;

    if last_len != 0 {
        if left_over.frag == Fragment::B {
            if buffered {
                relocate_n::<T, R>(v, rest, rest + gap, left_over.len);
            }
            rest = processed;
            left_over.len = block_len * a_block_count;
        } else {
            left_over.len += block_len * a_block_count;
        }

        let tail = &mut v[rest..rest + gap + left_over.len + last_len];
        merge_tail::<T, R, F>(tail, gap, left_over.len, compare);
    } else if buffered {
        relocate_n::<T, R>(v, rest, rest + gap, left_over.len);
    }
}

/// Merges `v[gap..gap + left_len]` with the rest, through the scratch if there is any.
#[inline]
fn merge_tail<T, R, F>(v: &mut [T], gap: usize, left_len: usize, compare: &mut F)
where
    R: Relocate<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    if gap != 0 {
        merge_left::<T, R, F>(v, gap, left_len, compare);
    } else {
        merge_without_buffer(v, left_len, compare);
    }
}
