//! Turns fuzzer input into sortable values and checks the result.

/// Reinterprets `data` as little endian `u16` keys, a trailing odd byte is ignored.
///
/// Narrow keys produce many duplicates, which is where stability bugs show up.
pub fn keys_from_bytes(data: &[u8]) -> Vec<u16> {
    data.chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect()
}

/// Pairs every key with its position, so sorting by key alone must keep positions increasing.
pub fn with_positions(keys: &[u16]) -> Vec<(u16, u32)> {
    keys.iter()
        .enumerate()
        .map(|(i, &key)| (key, i as u32))
        .collect()
}

/// Panics unless `sorted` is what a stable sort by key of `original` yields.
pub fn check_stable_sorted(original: &[(u16, u32)], sorted: &[(u16, u32)]) {
    let mut expected = original.to_vec();
    expected.sort_by_key(|&(key, _)| key);

    assert_eq!(expected.as_slice(), sorted);
}
