//! Sampled Wavelengths.

use super::*;
use crate::pbrt::*;
use crate::sampling::*;
use std::fmt;
use std::ops::Index;

/// The wavelengths a single camera sample carries through light transport,
/// with the probability density each was sampled with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SampledWavelengths {
    /// Wavelengths in nm.
    lambda: [Float; N_SPECTRUM_SAMPLES],

    /// Probability density of each wavelength.
    pdf: [Float; N_SPECTRUM_SAMPLES],
}

impl SampledWavelengths {
    /// Samples wavelengths uniformly over a range. The first wavelength is
    /// placed by `u` and the rest are spaced evenly, wrapping around.
    ///
    /// * `u`          - Sample value in [0, 1).
    /// * `lambda_min` - Shortest wavelength.
    /// * `lambda_max` - Longest wavelength.
    pub fn sample_uniform(u: Float, lambda_min: Float, lambda_max: Float) -> Self {
        let mut lambda = [0.0; N_SPECTRUM_SAMPLES];
        lambda[0] = lerp(u, lambda_min, lambda_max);

        let delta = (lambda_max - lambda_min) / N_SPECTRUM_SAMPLES as Float;
        for i in 1..N_SPECTRUM_SAMPLES {
            lambda[i] = lambda[i - 1] + delta;
            if lambda[i] > lambda_max {
                lambda[i] = lambda_min + (lambda[i] - lambda_max);
            }
        }

        Self {
            lambda,
            pdf: [1.0 / (lambda_max - lambda_min); N_SPECTRUM_SAMPLES],
        }
    }

    /// Importance samples wavelengths according to the human visual response.
    ///
    /// * `u` - Sample value in [0, 1).
    pub fn sample_visible(u: Float) -> Self {
        let mut lambda = [0.0; N_SPECTRUM_SAMPLES];
        let mut pdf = [0.0; N_SPECTRUM_SAMPLES];
        for i in 0..N_SPECTRUM_SAMPLES {
            let mut up = u + i as Float / N_SPECTRUM_SAMPLES as Float;
            if up > 1.0 {
                up -= 1.0;
            }
            lambda[i] = sample_visible_wavelengths(up);
            pdf[i] = visible_wavelengths_pdf(lambda[i]);
        }
        Self { lambda, pdf }
    }

    /// Returns the probability densities as a spectrum.
    pub fn pdf(&self) -> SampledSpectrum {
        SampledSpectrum::from(self.pdf)
    }

    /// Keeps only the first wavelength, e.g. after wavelength dependent
    /// refraction.
    pub fn terminate_secondary(&mut self) {
        if self.secondary_terminated() {
            return;
        }
        for i in 1..N_SPECTRUM_SAMPLES {
            self.pdf[i] = 0.0;
        }
        self.pdf[0] /= N_SPECTRUM_SAMPLES as Float;
    }

    /// Returns true if only the first wavelength is still carried.
    pub fn secondary_terminated(&self) -> bool {
        self.pdf[1..].iter().all(|p| *p == 0.0)
    }
}

impl Index<usize> for SampledWavelengths {
    type Output = Float;

    fn index(&self, i: usize) -> &Self::Output {
        &self.lambda[i]
    }
}

impl fmt::Display for SampledWavelengths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[lambda={:?}, pdf={:?}]",
            self.lambda, self.pdf
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
