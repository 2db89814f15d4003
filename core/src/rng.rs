//! Random Number Generator.

use crate::pbrt::*;

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// Implements the PCG32 pseudo-random number generator.
#[derive(Clone, Debug, PartialEq)]
pub struct RNG {
    state: u64,
    inc: u64,
}

impl Default for RNG {
    /// Return a new instance of `RNG` with default state and stream.
    fn default() -> Self {
        Self {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }
}

impl RNG {
    /// Create a new `RNG` by seeding it with the given starting sequence.
    ///
    /// * `sequence_index` - The starting sequence to seed with.
    pub fn new(sequence_index: u64) -> Self {
        let mut ret = Self { state: 0, inc: 0 };
        ret.set_sequence(sequence_index, mix_bits(sequence_index));
        ret
    }

    /// Initialize the random number generator sequence.
    ///
    /// * `sequence_index` - Selects one of 2^63 independent streams.
    /// * `seed`           - Offset of the starting state within the stream.
    #[inline(always)]
    pub fn set_sequence(&mut self, sequence_index: u64, seed: u64) {
        self.state = 0;
        self.inc = (sequence_index << 1) | 1;
        let _ = self.uniform_u32();
        self.state = self.state.wrapping_add(seed);
        let _ = self.uniform_u32();
    }

    /// Returns a uniformly distributed u32 value.
    #[inline(always)]
    pub fn uniform_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);

        let xor_shifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xor_shifted.rotate_right(rot)
    }

    /// Returns a uniformly distributed value over the half open interval [0.0, 1.0).
    #[inline(always)]
    pub fn uniform_float(&mut self) -> Float {
        (self.uniform_u32() as Float * hexf32!("0x1.0p-32")).min(ONE_MINUS_EPSILON)
    }

    /// Skips ahead `delta` values in the sequence in O(log delta) time.
    ///
    /// * `delta` - Number of values to skip.
    pub fn advance(&mut self, delta: u64) {
        let mut cur_mult = PCG32_MULT;
        let mut cur_plus = self.inc;
        let mut acc_mult = 1_u64;
        let mut acc_plus = 0_u64;
        let mut delta = delta;

        while delta > 0 {
            if delta & 1 == 1 {
                acc_mult = acc_mult.wrapping_mul(cur_mult);
                acc_plus = acc_plus.wrapping_mul(cur_mult).wrapping_add(cur_plus);
            }
            cur_plus = cur_mult.wrapping_add(1).wrapping_mul(cur_plus);
            cur_mult = cur_mult.wrapping_mul(cur_mult);
            delta /= 2;
        }

        self.state = acc_mult.wrapping_mul(self.state).wrapping_add(acc_plus);
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
