use core::cmp::Ordering;

use crate::util::{rotate, search_left};

/// Collects up to `wanted` pairwise distinct elements into a sorted prefix of `v`.
///
/// The found keys travel along with the scan as a contiguous run, each new distinct value is
/// rotated into its rank. Duplicates stay behind in their original relative order, which keeps
/// the rearrangement stable. Returns the number of keys found.
///
/// Cost: `2 * len + wanted^2 / 2` moves.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn find_keys<T, F>(v: &mut [T], wanted: usize, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len == 0 {
        return 0;
    }

    let mut first_key = 0;
    let mut found = 1;
    let mut scan = 1;

    while scan < len && found < wanted {
        let (keys_and_gap, rest) = v.split_at(scan);
        let keys = &keys_and_gap[first_key..first_key + found];
        let candidate = &rest[0];

        let rank = search_left(keys, candidate, compare);
        if rank == found || compare(candidate, &keys[rank]) != Ordering::Equal {
            rotate(&mut v[first_key..scan], found);
            first_key = scan - found;
            rotate(&mut v[first_key + rank..=scan], found - rank);
            found += 1;
        }

        scan += 1;
    }

    rotate(&mut v[..first_key + found], first_key);

    found
}
