//! CIE 1931 colour matching functions.
//!
//! Evaluated with the piecewise Gaussian fits of Wyman, Sloan and Shirley,
//! "Simple Analytic Approximations to the CIE XYZ Color Matching Functions"
//! (JCGT 2013), so no tabulated data needs to be carried around.

use crate::pbrt::*;

/// Shortest visible wavelength in nm.
pub const LAMBDA_MIN: Float = 360.0;

/// Longest visible wavelength in nm.
pub const LAMBDA_MAX: Float = 830.0;

/// Integral of the CIE Y matching function over the visible range.
pub const CIE_Y_INTEGRAL: Float = 106.856895;

/// Piecewise Gaussian with separate widths below and above the mean.
#[inline]
fn g(x: Float, mu: Float, sigma_lo: Float, sigma_hi: Float) -> Float {
    let t = (x - mu) / if x < mu { sigma_lo } else { sigma_hi };
    (-0.5 * t * t).exp()
}

/// CIE X matching function.
///
/// * `lambda` - Wavelength in nm.
#[inline]
pub fn cie_x(lambda: Float) -> Float {
    1.056 * g(lambda, 599.8, 37.9, 31.0) + 0.362 * g(lambda, 442.0, 16.0, 26.7)
        - 0.065 * g(lambda, 501.1, 20.4, 26.2)
}

/// CIE Y matching function.
///
/// * `lambda` - Wavelength in nm.
#[inline]
pub fn cie_y(lambda: Float) -> Float {
    0.821 * g(lambda, 568.8, 46.9, 40.5) + 0.286 * g(lambda, 530.9, 16.3, 31.1)
}

/// CIE Z matching function.
///
/// * `lambda` - Wavelength in nm.
#[inline]
pub fn cie_z(lambda: Float) -> Float {
    1.217 * g(lambda, 437.0, 11.8, 36.0) + 0.681 * g(lambda, 459.0, 26.0, 13.8)
}

/// Converts XYZ tristimulus values to linear sRGB.
///
/// * `xyz` - The XYZ values.
#[rustfmt::skip]
pub fn xyz_to_rgb(xyz: &[Float; 3]) -> [Float; 3] {
    [
         3.240479 * xyz[0] - 1.537150 * xyz[1] - 0.498535 * xyz[2],
        -0.969256 * xyz[0] + 1.875991 * xyz[1] + 0.041556 * xyz[2],
         0.055648 * xyz[0] - 0.204043 * xyz[1] + 1.057311 * xyz[2],
    ]
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn y_peaks_near_555nm() {
        assert!(cie_y(555.0) > 0.99);
        assert!(cie_y(555.0) > cie_y(450.0));
        assert!(cie_y(555.0) > cie_y(650.0));
    }

    #[test]
    fn y_integral_matches_tabulated_constant() {
        let sum: Float = (360..=830).map(|l| cie_y(l as Float)).sum();
        assert!(approx_eq!(Float, sum, CIE_Y_INTEGRAL, epsilon = 1.0));
    }

    #[test]
    fn equal_energy_white_maps_to_neutral_rgb() {
        let rgb = xyz_to_rgb(&[0.9505, 1.0, 1.089]);
        assert!(approx_eq!(Float, rgb[0], 1.0, epsilon = 1e-2));
        assert!(approx_eq!(Float, rgb[1], 1.0, epsilon = 1e-2));
        assert!(approx_eq!(Float, rgb[2], 1.0, epsilon = 1e-2));
    }
}
