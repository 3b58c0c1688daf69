//! Element types that stress different aspects of a sort implementation.
//!
//! All of them are `Copy`, so they can be used with sorts that move elements through external
//! buffers.

use std::cmp::Ordering;

/// Large stack value, makes every move expensive.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct OneKiloByte {
    values: [i64; 128],
}

impl OneKiloByte {
    pub fn new(val: i32) -> Self {
        let mut values = [0i64; 128];
        for (i, elem) in values.iter_mut().enumerate() {
            *elem = std::hint::black_box(val as i64 + i as i64);
        }

        Self { values }
    }

    fn key(&self) -> i64 {
        self.values[3] + self.values[64] + self.values[127]
    }
}

impl PartialOrd for OneKiloByte {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OneKiloByte {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// 16 byte value with a comparatively expensive comparison.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct F128 {
    x: f64,
    y: f64,
}

impl F128 {
    pub fn new(val: i32) -> Self {
        let val_f = (val as f64) + (i32::MAX as f64) + 10.0;

        let x = val_f + 0.1;
        let y = val_f.log(4.1);

        assert!(y < x);
        assert!(x.is_normal() && y.is_normal());

        Self { x, y }
    }

    fn ratio(&self) -> f64 {
        self.x / self.y
    }
}

// Only normal floats are ever constructed, see `new`.
impl Eq for F128 {}

impl PartialOrd for F128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for F128 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ratio().total_cmp(&other.ratio())
    }
}

/// A sort key together with the occurrence of that key in the original input.
///
/// Sorting by `key` only and then checking that `occurrence` increases within every key verifies
/// stability.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy)]
pub struct Tagged {
    pub key: i32,
    pub occurrence: u32,
}

impl Tagged {
    /// Tags every value with how many times it was seen before.
    pub fn tag_all(values: &[i32]) -> Vec<Tagged> {
        let mut seen = std::collections::HashMap::<i32, u32>::new();

        values
            .iter()
            .map(|&key| {
                let count = seen.entry(key).or_insert(0);
                *count += 1;
                Tagged {
                    key,
                    occurrence: *count,
                }
            })
            .collect()
    }

    pub fn cmp_key(a: &Tagged, b: &Tagged) -> Ordering {
        a.key.cmp(&b.key)
    }
}
