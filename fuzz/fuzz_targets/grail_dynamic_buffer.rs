#![no_main]

use libfuzzer_sys::fuzz_target;

use grailsort::BufferMode;

use fuzz_util::{check_stable_sorted, keys_from_bytes, with_positions};

fuzz_target!(|data: &[u8]| {
    let original = with_positions(&keys_from_bytes(data));

    let mut v = original.clone();
    grailsort::sort_by_with_buffer(&mut v, BufferMode::Dynamic, |a, b| a.0.cmp(&b.0));

    check_stable_sorted(&original, &v);
});
