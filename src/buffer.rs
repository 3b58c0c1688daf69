//! External scratch memory.

use std::collections::TryReserveError;

use crate::smallsort::SMALL_SORT_THRESHOLD;
use crate::util::{Exchange, Overwrite, Relocate};

/// Length of the external buffer used by [`BufferMode::Static`].
pub const STATIC_BUFFER_LEN: usize = 512;

/// Selects how much memory outside the slice a sort may use.
///
/// External memory lets merges copy elements instead of swapping them, which roughly halves the
/// writes of the early merge passes. The result is identical in every mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BufferMode {
    /// No allocation, all rearrangement is done with swaps and rotations.
    #[default]
    None,
    /// A buffer of [`STATIC_BUFFER_LEN`] elements.
    Static,
    /// A buffer of `L` elements, `L` being the smallest power of two with `L * L >= len`.
    Dynamic,
}

impl BufferMode {
    /// Number of elements this mode allocates for a slice of `len` elements.
    ///
    /// The sort never needs more scratch than the slice holds, so the result is capped at `len`.
    /// Short slices are handled by insertion sort and get no buffer at all.
    pub fn capacity_for(self, len: usize) -> usize {
        if len <= SMALL_SORT_THRESHOLD {
            return 0;
        }

        let wanted = match self {
            BufferMode::None => 0,
            BufferMode::Static => STATIC_BUFFER_LEN,
            BufferMode::Dynamic => {
                let mut side = 1usize;
                while side * side < len {
                    side *= 2;
                }
                side
            }
        };

        wanted.min(len)
    }
}

/// Failure to set up the external buffer.
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("could not allocate an external buffer of {requested} elements")]
    Alloc {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Scratch storage the block builder and combiner can park elements in.
///
/// Callers stash the cells they are about to overwrite, run merges with [`Scratch::Relocate`],
/// and unstash the saved elements into the cells that are left over afterwards.
pub(crate) trait Scratch<T> {
    type Relocate: Relocate<T>;

    fn capacity(&self) -> usize;

    fn stash(&mut self, src: &[T]);

    fn unstash(&self, dst: &mut [T]);
}

/// Stand-in for sorting without external memory. Its capacity is zero, so no code path ever
/// stashes into it.
pub(crate) struct NoBuffer;

impl<T> Scratch<T> for NoBuffer {
    type Relocate = Exchange;

    fn capacity(&self) -> usize {
        0
    }

    fn stash(&mut self, src: &[T]) {
        debug_assert!(src.is_empty());
    }

    fn unstash(&self, dst: &mut [T]) {
        debug_assert!(dst.is_empty());
    }
}

/// Heap allocated scratch, owned by a single sort call.
pub(crate) struct ExternalBuffer<T> {
    buf: Vec<T>,
}

impl<T: Copy> ExternalBuffer<T> {
    /// Allocates `len` elements, aborting on allocation failure like every infallible `Vec`
    /// allocation.
    ///
    /// The cells are initialised with copies of `v`'s prefix so `T` needs no default value.
    pub(crate) fn new(v: &[T], len: usize) -> Self {
        Self {
            buf: v[..len].to_vec(),
        }
    }

    pub(crate) fn try_new(v: &[T], len: usize) -> Result<Self, BufferError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|source| BufferError::Alloc {
                requested: len,
                source,
            })?;
        buf.extend_from_slice(&v[..len]);

        Ok(Self { buf })
    }
}

impl<T: Copy> Scratch<T> for ExternalBuffer<T> {
    type Relocate = Overwrite;

    fn capacity(&self) -> usize {
        self.buf.len()
    }

    fn stash(&mut self, src: &[T]) {
        self.buf[..src.len()].copy_from_slice(src);
    }

    fn unstash(&self, dst: &mut [T]) {
        let len = dst.len();
        dst.copy_from_slice(&self.buf[..len]);
    }
}
