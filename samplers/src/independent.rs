//! Independent Sampler

use pbrt_core::geometry::*;
use pbrt_core::pbrt::*;
use pbrt_core::rng::*;
use pbrt_core::sampler::*;

/// Number of random values reserved for each pixel sample.
pub(crate) const SAMPLE_STRIDE: u64 = 65536;

/// Implements a sampler that returns independent uniform random values for
/// every dimension of every sample.
#[derive(Clone)]
pub struct IndependentSampler {
    /// The common sampler data.
    pub data: SamplerData,

    /// The random number generator.
    rng: RNG,
}

impl IndependentSampler {
    /// Create a new `IndependentSampler`.
    ///
    /// * `samples_per_pixel` - Number of samples to generate for each pixel.
    /// * `seed`              - Seed mixed into every pixel's sequence.
    pub fn new(samples_per_pixel: usize, seed: u64) -> Self {
        Self {
            data: SamplerData::new(samples_per_pixel, seed),
            rng: RNG::default(),
        }
    }
}

impl Sampler for IndependentSampler {
    /// Returns a shared reference underlying `SamplerData`.
    fn get_data(&self) -> &SamplerData {
        &self.data
    }

    /// Returns a mutable reference to underlying `SamplerData`.
    fn get_data_mut(&mut self) -> &mut SamplerData {
        &mut self.data
    }

    fn clone_sampler(&self) -> Box<dyn Sampler> {
        Box::new(self.clone())
    }

    /// Positions the random number generator at the values reserved for the
    /// pixel sample.
    ///
    /// * `p`            - The pixel.
    /// * `sample_index` - Index of the sample within the pixel.
    /// * `dimension`    - First dimension to return.
    fn start_pixel_sample_at_dimension(&mut self, p: &Point2i, sample_index: usize, dimension: usize) {
        self.data.start_pixel_sample(p, sample_index, dimension);
        self.rng.set_sequence(pixel_hash(p, self.data.seed), 0);
        self.rng.advance(sample_index as u64 * SAMPLE_STRIDE + dimension as u64);
    }

    fn get_1d(&mut self) -> Float {
        self.data.next_dimension(1);
        self.rng.uniform_float()
    }

    fn get_2d(&mut self) -> Point2f {
        self.data.next_dimension(2);
        let x = self.rng.uniform_float();
        let y = self.rng.uniform_float();
        Point2f::new(x, y)
    }
}

/// Returns the random number sequence used for a pixel.
///
/// * `p`    - The pixel.
/// * `seed` - The sampler seed.
pub(crate) fn pixel_hash(p: &Point2i, seed: u64) -> u64 {
    hash_values(&[p.x as u64, p.y as u64, seed])
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_vector(sampler: &mut dyn Sampler, p: &Point2i, index: usize) -> Vec<Float> {
        sampler.start_pixel_sample(p, index);
        let mut v = vec![sampler.get_1d()];
        let u = sampler.get_2d();
        v.push(u.x);
        v.push(u.y);
        v.push(sampler.get_1d());
        v
    }

    proptest! {
        #[test]
        fn reseeding_reproduces_samples(
            x in -64_i32..64,
            y in -64_i32..64,
            index in 0_usize..1024,
            seed in 0_u64..16,
        ) {
            let p = Point2i::new(x, y);
            let mut a = IndependentSampler::new(1024, seed);
            let first = sample_vector(&mut a, &p, index);

            // Visit another pixel sample first on a clone.
            let mut b = a.clone_sampler();
            sample_vector(b.as_mut(), &Point2i::new(x + 1, y), index + 1);
            prop_assert_eq!(sample_vector(b.as_mut(), &p, index), first.clone());

            // And on a fresh instance.
            let mut c = IndependentSampler::new(1024, seed);
            prop_assert_eq!(sample_vector(&mut c, &p, index), first);
        }

        #[test]
        fn samples_are_in_unit_interval(x in 0_i32..32, y in 0_i32..32, index in 0_usize..64) {
            let mut sampler = IndependentSampler::new(64, 0);
            for v in sample_vector(&mut sampler, &Point2i::new(x, y), index) {
                prop_assert!((0.0..1.0).contains(&v));
            }
        }
    }

    #[test]
    fn starting_at_dimension_skips_values() {
        let p = Point2i::new(3, 4);
        let mut a = IndependentSampler::new(8, 7);
        a.start_pixel_sample(&p, 5);
        a.get_1d();
        a.get_1d();
        let third = a.get_1d();

        let mut b = IndependentSampler::new(8, 7);
        b.start_pixel_sample_at_dimension(&p, 5, 2);
        assert_eq!(b.get_1d(), third);
        assert_eq!(b.get_data().dimension, 3);
    }

    #[test]
    fn seed_and_index_change_samples() {
        let p = Point2i::new(1, 1);
        let base = sample_vector(&mut IndependentSampler::new(4, 0), &p, 0);
        assert_ne!(sample_vector(&mut IndependentSampler::new(4, 1), &p, 0), base);
        assert_ne!(sample_vector(&mut IndependentSampler::new(4, 0), &p, 1), base);
    }
}
