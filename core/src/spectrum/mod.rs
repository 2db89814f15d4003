//! Spectrum

mod cie;
mod sampled_spectrum;
mod sampled_wavelengths;

// Re-export
pub use cie::*;
pub use sampled_spectrum::*;
pub use sampled_wavelengths::*;

use crate::pbrt::*;
use std::sync::Arc;

/// Spectral distributions defined over the visible range.
pub trait Spectrum: Send + Sync {
    /// Returns the value of the distribution at a wavelength.
    ///
    /// * `lambda` - Wavelength in nm.
    fn evaluate(&self, lambda: Float) -> Float;

    /// Returns an upper bound on the distribution's value.
    fn max_value(&self) -> Float;

    /// Evaluates the distribution at a set of sampled wavelengths.
    ///
    /// * `lambda` - The wavelengths.
    fn sample(&self, lambda: &SampledWavelengths) -> SampledSpectrum {
        SampledSpectrum::from_fn(|i| self.evaluate(lambda[i]))
    }
}

/// Atomic reference counted `Spectrum`.
pub type ArcSpectrum = Arc<dyn Spectrum>;

/// A spectrum with the same value at every wavelength.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstantSpectrum {
    /// The value.
    pub c: Float,
}

impl ConstantSpectrum {
    /// Create a new `ConstantSpectrum`.
    ///
    /// * `c` - The value.
    pub fn new(c: Float) -> Self {
        Self { c }
    }
}

impl Spectrum for ConstantSpectrum {
    fn evaluate(&self, _lambda: Float) -> Float {
        self.c
    }

    fn max_value(&self) -> Float {
        self.c
    }
}

/// Emission of a blackbody at a given temperature, normalized so its peak is 1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlackbodySpectrum {
    /// Temperature in Kelvin.
    pub t: Float,

    /// Reciprocal of the unnormalized value at the peak wavelength.
    normalization_factor: Float,
}

impl BlackbodySpectrum {
    /// Create a new `BlackbodySpectrum`.
    ///
    /// * `t` - Temperature in Kelvin.
    pub fn new(t: Float) -> Self {
        // Wien's displacement law.
        let lambda_max = 2.8977721e-3 / t;
        let normalization_factor = 1.0 / blackbody(lambda_max * 1e9, t);
        Self {
            t,
            normalization_factor,
        }
    }
}

impl Spectrum for BlackbodySpectrum {
    fn evaluate(&self, lambda: Float) -> Float {
        blackbody(lambda, self.t) * self.normalization_factor
    }

    fn max_value(&self) -> Float {
        1.0
    }
}

/// Returns the emitted radiance of a blackbody (Planck's law).
///
/// * `lambda` - Wavelength in nm.
/// * `t`      - Temperature in Kelvin.
pub fn blackbody(lambda: Float, t: Float) -> Float {
    if t <= 0.0 {
        return 0.0;
    }
    let c: f64 = 299792458.0;
    let h: f64 = 6.62606957e-34;
    let kb: f64 = 1.3806488e-23;

    let l = lambda as f64 * 1e-9;
    let le = (2.0 * h * c * c) / (l.powi(5) * (((h * c) / (l * kb * t as f64)).exp() - 1.0));
    le as Float
}

/// Returns the luminous content of a spectrum, integrated against the CIE Y
/// matching function at 1nm steps.
///
/// * `s` - The spectrum.
pub fn spectrum_to_photometric(s: &dyn Spectrum) -> Float {
    (LAMBDA_MIN as i32..=LAMBDA_MAX as i32)
        .map(|l| {
            let lambda = l as Float;
            s.evaluate(lambda) * cie_y(lambda)
        })
        .sum()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
