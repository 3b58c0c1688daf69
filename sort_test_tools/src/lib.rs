/// A stable sort that accepts any element type.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering;
}

/// A stable sort restricted to `Copy` elements, e.g. because it copies through external memory.
pub trait CopySort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Copy;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Copy,
        F: FnMut(&T, &T) -> std::cmp::Ordering;
}

pub mod patterns;
pub mod types;
