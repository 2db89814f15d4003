//! Sampler

mod common;

use crate::geometry::*;
use crate::pbrt::*;

// Re-export
pub use common::*;

/// Sampler interface.
///
/// A sampler produces the sample vector for a given pixel and sample index.
/// After `start_pixel_sample()` the sequence of values returned by `get_1d()`,
/// `get_2d()` and `get_pixel_2d()` depends only on the pixel, the sample index
/// and the sampler's parameters, never on which instance or thread generated
/// earlier samples.
pub trait Sampler: Send + Sync {
    /// Returns a shared reference underlying `SamplerData`.
    fn get_data(&self) -> &SamplerData;

    /// Returns a mutable reference to underlying `SamplerData`.
    fn get_data_mut(&mut self) -> &mut SamplerData;

    /// Generates an independent copy of the sampler for use by a rendering
    /// thread.
    fn clone_sampler(&self) -> Box<dyn Sampler>;

    /// Returns the number of samples taken in each pixel.
    fn samples_per_pixel(&self) -> usize {
        self.get_data().samples_per_pixel
    }

    /// This should be called when the rendering algorithm is ready to start
    /// working on a given sample of a pixel.
    ///
    /// * `p`            - The pixel.
    /// * `sample_index` - Index of the sample within the pixel.
    fn start_pixel_sample(&mut self, p: &Point2i, sample_index: usize) {
        self.start_pixel_sample_at_dimension(p, sample_index, 0);
    }

    /// Same as `start_pixel_sample()` but begins at a given dimension of the
    /// sample vector.
    ///
    /// * `p`            - The pixel.
    /// * `sample_index` - Index of the sample within the pixel.
    /// * `dimension`    - First dimension to return.
    fn start_pixel_sample_at_dimension(&mut self, p: &Point2i, sample_index: usize, dimension: usize) {
        self.get_data_mut().start_pixel_sample(p, sample_index, dimension);
    }

    /// Returns the sample value for the next dimension of the current sample
    /// vector.
    fn get_1d(&mut self) -> Float;

    /// Returns the sample value for the next two dimensions of the current
    /// sample vector.
    fn get_2d(&mut self) -> Point2f;

    /// Returns the 2D sample used to choose a point on the film within the
    /// pixel.
    fn get_pixel_2d(&mut self) -> Point2f {
        self.get_2d()
    }
}
