//! Common

use crate::geometry::*;

/// Stores the state shared by all samplers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SamplerData {
    /// Number of samples taken in each pixel.
    pub samples_per_pixel: usize,

    /// Seed mixed into every pixel's sequence.
    pub seed: u64,

    /// The pixel being sampled.
    pub current_pixel: Point2i,

    /// Index of the sample within the current pixel.
    pub current_pixel_sample_index: usize,

    /// Next dimension of the sample vector to return.
    pub dimension: usize,
}

impl SamplerData {
    /// Create a new `SamplerData`.
    ///
    /// * `samples_per_pixel` - Number of samples taken in each pixel.
    /// * `seed`              - Seed mixed into every pixel's sequence.
    pub fn new(samples_per_pixel: usize, seed: u64) -> Self {
        Self {
            samples_per_pixel,
            seed,
            ..Default::default()
        }
    }

    /// Records the pixel sample the sampler is positioned at.
    ///
    /// * `p`            - The pixel.
    /// * `sample_index` - Index of the sample within the pixel.
    /// * `dimension`    - First dimension to return.
    pub fn start_pixel_sample(&mut self, p: &Point2i, sample_index: usize, dimension: usize) {
        self.current_pixel = *p;
        self.current_pixel_sample_index = sample_index;
        self.dimension = dimension;
    }

    /// Returns the current dimension and advances to the next one.
    ///
    /// * `n` - Number of dimensions consumed.
    pub fn next_dimension(&mut self, n: usize) -> usize {
        let d = self.dimension;
        self.dimension += n;
        d
    }
}
