//! Grail sort, a stable in-place block merge sort by Andrey Astrelin.
//!
//! The sort runs in *O*(*n* \* log(*n*)) worst-case time without any heap allocation. Optionally
//! it can use a small external buffer, see [`BufferMode`], which speeds up the early merge passes
//! but never changes the result.
//!
//! # Current implementation
//!
//! A prefix of the slice is filled with up to `2 * sqrt(n)` distinct elements, collected by
//! [`keys::find_keys`]. Half of them tag blocks of `sqrt(n)` elements, the other half serves as a
//! swap buffer for merging. The rest of the slice is first sorted into short runs, which are then
//! merged pairwise by cutting both runs into blocks, ordering the blocks by their first element
//! and merging neighbouring blocks through the buffer. Finally the key prefix is sorted and
//! merged into the rest.
//!
//! Inputs with fewer than four distinct values fall back to a bottom-up merge sort built on
//! rotations. Inputs with few distinct values merge without a buffer and use larger blocks.

use core::cmp::Ordering;
use core::mem;

mod blocks;
mod buffer;
mod combine;
mod keys;
mod merge;
mod smallsort;
mod smart_merge;
mod util;

pub use buffer::{BufferError, BufferMode, STATIC_BUFFER_LEN};

use crate::blocks::build_blocks;
use crate::buffer::{ExternalBuffer, NoBuffer, Scratch};
use crate::combine::combine_blocks;
use crate::keys::find_keys;
use crate::merge::{lazy_stable_sort, merge_without_buffer};
use crate::smallsort::{insertion_sort, SMALL_SORT_THRESHOLD};
use crate::util::Exchange;

/// Fewer distinct keys than this make block tagging pointless.
const MIN_KEYS: usize = 4;

/// Sorts the slice, preserving the initial order of equal elements.
///
/// This sort is stable, in-place (i.e., does not allocate), and *O*(*n* \* log(*n*))
/// worst-case. Elements are only ever swapped, so if `T::cmp` panics the slice still contains
/// all of its original elements.
///
/// # Examples
///
/// ```
/// let mut v = [-5, 4, 1, -3, 2];
///
/// grailsort::sort(&mut v);
/// assert!(v == [-5, -3, 1, 2, 4]);
/// ```
#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    sort_by(v, T::cmp);
}

/// Sorts the slice with a comparator function, preserving the initial order of equal elements.
///
/// The comparator must define a total preorder for the elements in the slice. If it does not,
/// the order of the elements afterwards is unspecified, but the slice still holds exactly the
/// elements it held before.
///
/// # Examples
///
/// ```
/// let mut v = [5, 4, 1, 3, 2];
/// grailsort::sort_by(&mut v, |a, b| b.cmp(a));
/// assert!(v == [5, 4, 3, 2, 1]);
/// ```
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if mem::size_of::<T>() == 0 || v.len() < 2 {
        return;
    }

    common_sort(v, &mut NoBuffer, &mut compare);
}

/// Sorts the slice with a key extraction function, preserving the initial order of equal
/// elements.
///
/// The key function is called *O*(*n* \* log(*n*)) times.
pub fn sort_by_key<T, K, F>(v: &mut [T], mut f: F)
where
    F: FnMut(&T) -> K,
    K: Ord,
{
    sort_by(v, |a, b| f(a).cmp(&f(b)));
}

/// Sorts the slice using the external memory selected by `mode`.
///
/// Moves through the external buffer are plain copies, hence `T: Copy`. The output is identical
/// to [`sort`] for every mode.
///
/// # Panics
///
/// Aborts if the buffer cannot be allocated. Use [`try_sort_by_with_buffer`] to handle that case.
#[inline]
pub fn sort_with_buffer<T>(v: &mut [T], mode: BufferMode)
where
    T: Ord + Copy,
{
    sort_by_with_buffer(v, mode, T::cmp);
}

/// Like [`sort_with_buffer`], with a comparator function.
///
/// If the comparator panics while an external buffer is in use, some elements may have been
/// replaced by copies of others.
pub fn sort_by_with_buffer<T, F>(v: &mut [T], mode: BufferMode, mut compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    if mem::size_of::<T>() == 0 || v.len() < 2 {
        return;
    }

    let capacity = mode.capacity_for(v.len());
    if capacity == 0 {
        common_sort(v, &mut NoBuffer, &mut compare);
        return;
    }

    log::debug!("sorting {} elements with an external buffer of {capacity}", v.len());
    let mut scratch = ExternalBuffer::new(v, capacity);
    common_sort(v, &mut scratch, &mut compare);
}

/// Like [`sort_by_with_buffer`], but reports allocation failure instead of aborting.
///
/// On error the slice is left untouched. [`sort_by`] never allocates and can serve as fallback.
///
/// # Examples
///
/// ```
/// use grailsort::BufferMode;
///
/// let mut v = [3u32, 1, 2];
/// grailsort::try_sort_by_with_buffer(&mut v, BufferMode::Dynamic, |a, b| a.cmp(b))?;
/// assert!(v == [1, 2, 3]);
/// # Ok::<(), grailsort::BufferError>(())
/// ```
pub fn try_sort_by_with_buffer<T, F>(
    v: &mut [T],
    mode: BufferMode,
    mut compare: F,
) -> Result<(), BufferError>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    if mem::size_of::<T>() == 0 || v.len() < 2 {
        return Ok(());
    }

    let capacity = mode.capacity_for(v.len());
    if capacity == 0 {
        common_sort(v, &mut NoBuffer, &mut compare);
        return Ok(());
    }

    let mut scratch = ExternalBuffer::try_new(v, capacity)?;
    log::debug!("sorting {} elements with an external buffer of {capacity}", v.len());
    common_sort(v, &mut scratch, &mut compare);

    Ok(())
}

/// Sorts `v`, choosing between the keyed block merge and the lazy fallback.
///
/// The layout while sorting is `[keys] [internal buffer] [data]`, the first two parts are
/// sorted and merged into the data at the very end.
fn common_sort<T, S, F>(v: &mut [T], scratch: &mut S, compare: &mut F)
where
    S: Scratch<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len <= SMALL_SORT_THRESHOLD {
        insertion_sort(v, compare);
        return;
    }

    let mut block_len = 1;
    while block_len * block_len < len {
        block_len *= 2;
    }
    let mut key_count = (len - 1) / block_len + 1;
    let key_len = key_count + block_len;

    // Sorting the key candidates first makes key collection cheaper.
    common_sort(&mut v[..key_len], scratch, compare);

    let keys_found = find_keys(v, key_len, compare);

    let mut buffered = true;
    if keys_found < key_len {
        if keys_found < MIN_KEYS {
            log::trace!("{len} elements: {keys_found} distinct keys, lazy merge sort");
            lazy_stable_sort(v, compare);
            return;
        }

        key_count = block_len;
        while key_count > keys_found {
            key_count /= 2;
        }

        buffered = false;
        block_len = 0;
    }

    let dist = block_len + key_count;
    let mut build_len = if buffered { block_len } else { key_count };
    log::trace!(
        "{len} elements: {keys_found} keys found, block length {block_len}, internal buffer {}",
        if buffered { "enabled" } else { "disabled" }
    );

    if buffered {
        build_blocks(&mut v[dist - build_len..], build_len, scratch, compare);
    } else {
        build_blocks(&mut v[dist - build_len..], build_len, &mut NoBuffer, compare);
    }

    // Runs of 2 * build_len are built.
    loop {
        build_len *= 2;
        if len - dist <= build_len {
            break;
        }

        let mut pass_block_len = block_len;
        let mut pass_buffered = buffered;

        if !buffered {
            if key_count > 4 && key_count / 8 * key_count >= build_len {
                // Enough keys to spare half of them as buffer.
                pass_block_len = key_count / 2;
                pass_buffered = true;
            } else {
                let mut calc_keys = 1;
                let mut i = build_len * keys_found / 2;
                while calc_keys < key_count && i != 0 {
                    calc_keys *= 2;
                    i /= 8;
                }
                pass_block_len = (2 * build_len) / calc_keys;
            }
        }

        let gap = if pass_buffered { pass_block_len } else { 0 };
        let (keys, region) = v.split_at_mut(dist - gap);

        if pass_buffered && pass_block_len <= scratch.capacity() {
            scratch.stash(&region[..gap]);
            combine_blocks::<T, S::Relocate, F>(
                keys,
                region,
                build_len,
                pass_block_len,
                true,
                compare,
            );
            scratch.unstash(&mut region[..gap]);
        } else {
            combine_blocks::<T, Exchange, F>(
                keys,
                region,
                build_len,
                pass_block_len,
                pass_buffered,
                compare,
            );
        }
    }

    insertion_sort(&mut v[..dist], compare);
    merge_without_buffer(v, dist, compare);
}
