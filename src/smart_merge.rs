//! The per-block step of block combination.
//!
//! After the blocks of two neighbouring runs have been sorted by their first elements, they form
//! an interleaving of two streams, `A` (blocks of the left run) and `B` (blocks of the right run).
//! Walking over the blocks, the unmerged tail of the previous step is merged with the next block
//! of the opposite stream. Whatever remains of that merge is carried into the next step along
//! with the stream it came from.

use core::cmp::Ordering;

use crate::util::{rotate, search_left, search_right, Relocate};

/// The stream an unmerged remainder belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Fragment {
    A,
    B,
}

impl Fragment {
    /// Stream of a block, given how its key compares to the first key of stream `B`.
    #[inline]
    pub(crate) fn of_key(ord: Ordering) -> Self {
        if ord == Ordering::Less {
            Fragment::A
        } else {
            Fragment::B
        }
    }

    #[inline]
    pub(crate) fn other(self) -> Self {
        match self {
            Fragment::A => Fragment::B,
            Fragment::B => Fragment::A,
        }
    }

    /// Whether an element of a remainder from this stream goes before an element of the next
    /// block, given how the two compare.
    ///
    /// `A` elements originate left of every `B` element, so they win ties. `B` elements must
    /// yield to an equal `A` element.
    #[inline]
    pub(crate) fn goes_first(self, ord: Ordering) -> bool {
        match self {
            Fragment::A => ord != Ordering::Greater,
            Fragment::B => ord == Ordering::Less,
        }
    }
}

/// Unmerged remainder threaded from one block step to the next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct LeftOver {
    pub(crate) len: usize,
    pub(crate) frag: Fragment,
}

/// Merges a remainder with the next block through the `block_len` scratch cells in front of it.
///
/// Layout before: `[scratch; block_len] [remainder; left_over.len] [block; block_len]`.
///
/// Merged output is written from the front of the region. Once one side is exhausted, the rest of
/// the other side is parked at the back of the region, those elements form the returned
/// remainder.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn smart_merge_buffered<T, R, F>(
    v: &mut [T],
    left_over: LeftOver,
    block_len: usize,
    compare: &mut F,
) -> LeftOver
where
    R: Relocate<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut dst = 0;
    let mut left = block_len;
    let mut left_end = left + left_over.len;
    let mut right = left_end;
    let mut right_end = right + block_len;

    while left < left_end && right < right_end {
        if left_over.frag.goes_first(compare(&v[left], &v[right])) {
            R::relocate(v, dst, left);
            left += 1;
        } else {
            R::relocate(v, dst, right);
            right += 1;
        }
        dst += 1;
    }

    if left < left_end {
        let len = left_end - left;
        while left < left_end {
            left_end -= 1;
            right_end -= 1;
            R::relocate(v, right_end, left_end);
        }

        LeftOver {
            len,
            frag: left_over.frag,
        }
    } else {
        LeftOver {
            len: right_end - right,
            frag: left_over.frag.other(),
        }
    }
}

/// Merges a remainder with the next block in place, by binary search and rotation.
///
/// Layout: `[remainder; left_over.len] [block; block_len]`.
///
/// Elements of the remainder are only rotated into the block while the block still has elements
/// that sort after them. If the block runs out first, the rest of the remainder stays the
/// remainder.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn smart_merge_unbuffered<T, F>(
    v: &mut [T],
    left_over: LeftOver,
    block_len: usize,
    compare: &mut F,
) -> LeftOver
where
    F: FnMut(&T, &T) -> Ordering,
{
    if block_len == 0 {
        return left_over;
    }

    let frag = left_over.frag;
    let mut pos = 0;
    let mut len1 = left_over.len;
    let mut len2 = block_len;

    if len1 != 0 && !frag.goes_first(compare(&v[len1 - 1], &v[len1])) {
        while len1 != 0 {
            let (rem, block) = v[pos..].split_at(len1);
            let found = match frag {
                Fragment::A => search_left(&block[..len2], &rem[0], compare),
                Fragment::B => search_right(&block[..len2], &rem[0], compare),
            };

            if found != 0 {
                rotate(&mut v[pos..pos + len1 + found], len1);
                pos += found;
                len2 -= found;
            }

            if len2 == 0 {
                return LeftOver { len: len1, frag };
            }

            loop {
                pos += 1;
                len1 -= 1;
                if len1 == 0 || !frag.goes_first(compare(&v[pos], &v[pos + len1])) {
                    break;
                }
            }
        }
    }

    LeftOver {
        len: len2,
        frag: frag.other(),
    }
}
