//! Scratch Buffer

use bumpalo::Bump;

/// Initial capacity of a worker's scratch buffer in bytes.
const DEFAULT_CAPACITY: usize = 256;

/// A per-worker bump arena for allocations that only live for one camera
/// sample. Integrators allocate from it freely while evaluating a sample and
/// the render loop resets it once the sample is accumulated, so memory use is
/// bounded by the largest single sample.
pub struct ScratchBuffer {
    arena: Bump,
}

impl ScratchBuffer {
    /// Create a new `ScratchBuffer`.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new `ScratchBuffer` with room for `bytes` before it has to
    /// grow.
    ///
    /// * `bytes` - Initial capacity.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            arena: Bump::with_capacity(bytes),
        }
    }

    /// Moves a value into the buffer and returns a reference to it.
    ///
    /// * `value` - The value.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<T>(&self, value: T) -> &mut T {
        self.arena.alloc(value)
    }

    /// Allocates a slice of `len` copies of `value`.
    ///
    /// * `len`   - Number of elements.
    /// * `value` - Initial value of every element.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_slice<T: Copy>(&self, len: usize, value: T) -> &mut [T] {
        self.arena.alloc_slice_fill_copy(len, value)
    }

    /// Returns the number of bytes the buffer currently holds from the system
    /// allocator.
    pub fn allocated_bytes(&self) -> usize {
        self.arena.allocated_bytes()
    }

    /// Releases every allocation made since the last reset. Values allocated
    /// from the buffer are not dropped.
    pub fn reset(&mut self) {
        self.arena.reset();
    }
}

impl Default for ScratchBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
