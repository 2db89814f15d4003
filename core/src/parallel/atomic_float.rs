//! AtomicFloat

use crate::pbrt::Float;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// A floating point value that can be accumulated into from several threads
/// without locking. Stored as its bit pattern in an `AtomicU32`.
pub struct AtomicFloat {
    bits: AtomicU32,
}

impl AtomicFloat {
    /// Create a new `AtomicFloat`.
    ///
    /// * `v` - The value.
    pub fn new(v: Float) -> Self {
        Self {
            bits: AtomicU32::new(v.to_bits()),
        }
    }

    /// Adds to the value and returns the previous value.
    ///
    /// * `v` - The value to add.
    pub fn add(&self, v: Float) -> Float {
        let mut old_bits = self.bits.load(Ordering::Relaxed);
        loop {
            let new_bits = (Float::from_bits(old_bits) + v).to_bits();
            match self.bits.compare_exchange_weak(
                old_bits,
                new_bits,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Float::from_bits(old_bits),
                Err(x) => old_bits = x,
            }
        }
    }

    /// Returns the current value.
    pub fn get(&self) -> Float {
        Float::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Replaces the current value.
    ///
    /// * `v` - The value.
    pub fn set(&self, v: Float) {
        self.bits.store(v.to_bits(), Ordering::Release);
    }
}

impl Default for AtomicFloat {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Debug for AtomicFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
