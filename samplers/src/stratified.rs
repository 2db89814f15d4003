//! Stratified Sampler

use crate::independent::{pixel_hash, SAMPLE_STRIDE};
use pbrt_core::geometry::*;
use pbrt_core::pbrt::*;
use pbrt_core::rng::*;
use pbrt_core::sampler::*;

/// Implements a sampler that subdivides pixel areas and sample dimensions
/// into strata and generates a single sample inside each one. The strata of
/// each dimension are visited in a different pseudo-random order.
#[derive(Clone)]
pub struct StratifiedSampler {
    /// The common sampler data.
    pub data: SamplerData,

    /// Number of strata in x direction.
    x_pixel_samples: usize,

    /// Number of strata in y direction.
    y_pixel_samples: usize,

    /// Jitter samples within strata; otherwise use the stratum centers.
    jitter: bool,

    /// Random number generator for jitter.
    rng: RNG,
}

impl StratifiedSampler {
    /// Create a new `StratifiedSampler`.
    ///
    /// * `x_pixel_samples` - Number of strata in x direction.
    /// * `y_pixel_samples` - Number of strata in y direction.
    /// * `jitter`          - Jitter samples within strata.
    /// * `seed`            - Seed mixed into every pixel's sequence.
    pub fn new(x_pixel_samples: usize, y_pixel_samples: usize, jitter: bool, seed: u64) -> Self {
        let mut xs = x_pixel_samples;
        let mut ys = y_pixel_samples;
        if xs == 0 || ys == 0 {
            warn!("Stratified sampler needs at least one stratum per axis, got {xs}x{ys}");
            xs = xs.max(1);
            ys = ys.max(1);
        }
        Self {
            data: SamplerData::new(xs * ys, seed),
            x_pixel_samples: xs,
            y_pixel_samples: ys,
            jitter,
            rng: RNG::default(),
        }
    }

    /// Returns the stratum the current sample falls in for the current
    /// dimension.
    fn stratum(&self) -> u32 {
        let p = self.data.current_pixel;
        let hash = hash_values(&[
            p.x as u64,
            p.y as u64,
            self.data.dimension as u64,
            self.data.seed,
        ]);
        permutation_element(
            self.data.current_pixel_sample_index as u32,
            self.data.samples_per_pixel as u32,
            hash as u32,
        )
    }

    /// Returns the offset within a stratum.
    fn delta(&mut self) -> Float {
        if self.jitter {
            self.rng.uniform_float()
        } else {
            0.5
        }
    }
}

impl Sampler for StratifiedSampler {
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

    fn start_pixel_sample_at_dimension(&mut self, p: &Point2i, sample_index: usize, dimension: usize) {
        self.data.start_pixel_sample(p, sample_index, dimension);
        self.rng.set_sequence(pixel_hash(p, self.data.seed), 0);
        self.rng.advance(sample_index as u64 * SAMPLE_STRIDE + dimension as u64);
    }

    fn get_1d(&mut self) -> Float {
        let stratum = self.stratum();
        self.data.next_dimension(1);
        let delta = self.delta();
        (stratum as Float + delta) / self.data.samples_per_pixel as Float
    }

    fn get_2d(&mut self) -> Point2f {
        let stratum = self.stratum() as usize;
        self.data.next_dimension(2);
        let x = stratum % self.x_pixel_samples;
        let y = stratum / self.x_pixel_samples;
        let dx = self.delta();
        let dy = self.delta();
        Point2f::new(
            (x as Float + dx) / self.x_pixel_samples as Float,
            (y as Float + dy) / self.y_pixel_samples as Float,
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
