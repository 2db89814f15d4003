//! Sampled Spectrum.

use super::*;
use crate::pbrt::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign};

/// Number of wavelengths carried by each camera sample.
pub const N_SPECTRUM_SAMPLES: usize = 4;

/// Spectral radiance (or any other spectral quantity) at the wavelengths held
/// by a `SampledWavelengths`.
///
/// Values are not validated on construction; a light transport estimate may
/// legitimately produce NaN or infinite components which callers are expected
/// to screen with `has_nans()` / `y()`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SampledSpectrum {
    /// The sampled spectral values.
    values: [Float; N_SPECTRUM_SAMPLES],
}

impl SampledSpectrum {
    /// Spectrum with all values set to 0.
    pub const ZERO: Self = Self {
        values: [0.0; N_SPECTRUM_SAMPLES],
    };

    /// Spectrum with all values set to 1.
    pub const ONE: Self = Self {
        values: [1.0; N_SPECTRUM_SAMPLES],
    };

    /// Create a new `SampledSpectrum` with a constant value at every wavelength.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        Self {
            values: [v; N_SPECTRUM_SAMPLES],
        }
    }

    /// Returns true if any value is NaN.
    pub fn has_nans(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    /// Returns true if every value is zero.
    pub fn is_black(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    /// Returns the largest value.
    pub fn max_component_value(&self) -> Float {
        self.values.iter().copied().fold(Float::MIN, Float::max)
    }

    /// Returns the mean of the values.
    pub fn average(&self) -> Float {
        self.values.iter().sum::<Float>() / N_SPECTRUM_SAMPLES as Float
    }

    /// Divides component-wise, returning 0 where the divisor is 0.
    ///
    /// * `d` - The divisor.
    pub fn safe_div(&self, d: &SampledSpectrum) -> Self {
        let mut ret = Self::ZERO;
        for i in 0..N_SPECTRUM_SAMPLES {
            ret.values[i] = if d.values[i] != 0.0 {
                self.values[i] / d.values[i]
            } else {
                0.0
            };
        }
        ret
    }

    /// Returns the luminance (CIE Y) of the Monte Carlo estimate this spectrum
    /// represents at the given wavelengths.
    ///
    /// * `lambda` - Wavelengths the spectrum was sampled at.
    pub fn y(&self, lambda: &SampledWavelengths) -> Float {
        let ys = SampledSpectrum::from_fn(|i| cie_y(lambda[i]));
        let pdf = lambda.pdf();
        (ys * *self).safe_div(&pdf).average() / CIE_Y_INTEGRAL
    }

    /// Converts the Monte Carlo estimate to XYZ tristimulus values.
    ///
    /// * `lambda` - Wavelengths the spectrum was sampled at.
    pub fn to_xyz(&self, lambda: &SampledWavelengths) -> [Float; 3] {
        let pdf = lambda.pdf();
        let xs = SampledSpectrum::from_fn(|i| cie_x(lambda[i]));
        let ys = SampledSpectrum::from_fn(|i| cie_y(lambda[i]));
        let zs = SampledSpectrum::from_fn(|i| cie_z(lambda[i]));
        [
            (xs * *self).safe_div(&pdf).average() / CIE_Y_INTEGRAL,
            (ys * *self).safe_div(&pdf).average() / CIE_Y_INTEGRAL,
            (zs * *self).safe_div(&pdf).average() / CIE_Y_INTEGRAL,
        ]
    }

    /// Builds a spectrum by evaluating a function for each sample index.
    ///
    /// * `f` - Returns the value for sample `i`.
    pub fn from_fn<F: FnMut(usize) -> Float>(mut f: F) -> Self {
        let mut values = [0.0; N_SPECTRUM_SAMPLES];
        for (i, v) in values.iter_mut().enumerate() {
            *v = f(i);
        }
        Self { values }
    }
}

impl Default for SampledSpectrum {
    /// Return a black `SampledSpectrum`.
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[Float; N_SPECTRUM_SAMPLES]> for SampledSpectrum {
    /// Create a `SampledSpectrum` from explicit values.
    ///
    /// * `values` - The values.
    fn from(values: [Float; N_SPECTRUM_SAMPLES]) -> Self {
        Self { values }
    }
}

impl Index<usize> for SampledSpectrum {
    type Output = Float;

    fn index(&self, i: usize) -> &Self::Output {
        &self.values[i]
    }
}

impl IndexMut<usize> for SampledSpectrum {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.values[i]
    }
}

impl Add for SampledSpectrum {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::from_fn(|i| self.values[i] + other.values[i])
    }
}

impl AddAssign for SampledSpectrum {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Mul for SampledSpectrum {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        Self::from_fn(|i| self.values[i] * other.values[i])
    }
}

impl MulAssign for SampledSpectrum {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Mul<Float> for SampledSpectrum {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        Self::from_fn(|i| self.values[i] * f)
    }
}

impl Mul<SampledSpectrum> for Float {
    type Output = SampledSpectrum;

    fn mul(self, s: SampledSpectrum) -> Self::Output {
        s * self
    }
}

impl Div<Float> for SampledSpectrum {
    type Output = Self;

    fn div(self, f: Float) -> Self::Output {
        Self::from_fn(|i| self.values[i] / f)
    }
}

impl fmt::Display for SampledSpectrum {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.values[0], self.values[1], self.values[2], self.values[3]
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
