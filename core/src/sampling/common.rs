//! Common sampling functions.

use crate::geometry::*;
use crate::pbrt::*;

/// Samples one of two equally likely outcomes and remaps `u` so it can be
/// reused. Returns `(index, remapped u)`.
///
/// * `u` - The random sample.
#[inline]
fn sample_two_halves(u: Float) -> (usize, Float) {
    if u < 0.5 {
        (0, (2.0 * u).min(ONE_MINUS_EPSILON))
    } else {
        (1, (2.0 * (u - 0.5)).min(ONE_MINUS_EPSILON))
    }
}

/// Samples the linear function over [0, 1] with values `a` at 0 and `b` at 1.
///
/// * `u` - The random sample.
/// * `a` - Value at 0.
/// * `b` - Value at 1.
pub fn sample_linear(u: Float, a: Float, b: Float) -> Float {
    debug_assert!(a >= 0.0 && b >= 0.0);
    if u == 0.0 && a == 0.0 {
        return 0.0;
    }
    let x = u * (a + b) / (a + lerp(u, a * a, b * b).sqrt());
    x.min(ONE_MINUS_EPSILON)
}

/// Returns the PDF for `sample_linear()`.
///
/// * `x` - The sampled value.
/// * `a` - Value at 0.
/// * `b` - Value at 1.
pub fn linear_pdf(x: Float, a: Float, b: Float) -> Float {
    if !(0.0..=1.0).contains(&x) {
        return 0.0;
    }
    2.0 * lerp(x, a, b) / (a + b)
}

/// Samples the tent function of radius `r` centred at 0.
///
/// * `u` - The random sample.
/// * `r` - Radius of the tent.
pub fn sample_tent(u: Float, r: Float) -> Float {
    let (index, u) = sample_two_halves(u);
    if index == 0 {
        -r + r * sample_linear(u, 0.0, 1.0)
    } else {
        r * sample_linear(u, 1.0, 0.0)
    }
}

/// Returns the PDF for `sample_tent()`.
///
/// * `x` - The sampled value.
/// * `r` - Radius of the tent.
pub fn tent_pdf(x: Float, r: Float) -> Float {
    if x.abs() >= r {
        0.0
    } else {
        1.0 / r - x.abs() / (r * r)
    }
}

/// Sample a point on a unit disk by mapping concentric squares in [-1, 1]^2
/// to concentric circles.
///
/// * `u` - The random sample point.
pub fn sample_uniform_disk_concentric(u: &Point2f) -> Point2f {
    // Map uniform random numbers to [-1,1]^2.
    let ox = 2.0 * u.x - 1.0;
    let oy = 2.0 * u.y - 1.0;

    // Handle degeneracy at the origin.
    if ox == 0.0 && oy == 0.0 {
        return Point2f::zero();
    }

    let (r, theta) = if ox.abs() > oy.abs() {
        (ox, PI_OVER_4 * (oy / ox))
    } else {
        (oy, PI_OVER_2 - PI_OVER_4 * (ox / oy))
    };

    Point2f::new(r * theta.cos(), r * theta.sin())
}

/// Cosine-weighted direction on the hemisphere about `(0, 0, 1)` (Malley's
/// method).
///
/// * `u` - The random sample point.
pub fn sample_cosine_hemisphere(u: &Point2f) -> Vector3f {
    let d = sample_uniform_disk_concentric(u);
    let z = safe_sqrt(1.0 - d.x * d.x - d.y * d.y);
    Vector3f::new(d.x, d.y, z)
}

/// Returns the PDF for `sample_cosine_hemisphere()`.
///
/// * `cos_theta` - Cosine of the angle with the z-axis.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

/// Uniformly sample a direction on the hemisphere about `(0, 0, 1)`.
///
/// * `u` - The random sample point.
pub fn sample_uniform_hemisphere(u: &Point2f) -> Vector3f {
    let z = u.x;
    let r = safe_sqrt(1.0 - z * z);
    let phi = 2.0 * PI * u.y;
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the PDF for uniformly sampling a direction from a hemisphere.
#[inline]
pub fn uniform_hemisphere_pdf() -> Float {
    INV_2_PI
}

/// Uniformly sample a direction from a sphere.
///
/// * `u` - The random sample point.
pub fn sample_uniform_sphere(u: &Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u.x;
    let r = safe_sqrt(1.0 - z * z);
    let phi = 2.0 * PI * u.y;
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the PDF for uniformly sampling a direction from a sphere.
#[inline]
pub fn uniform_sphere_pdf() -> Float {
    INV_PI * 0.25
}

/// Samples a wavelength in nm proportionally to an approximation of the
/// human visual response.
///
/// * `u` - The random sample.
pub fn sample_visible_wavelengths(u: Float) -> Float {
    538.0 - 138.888889 * (0.85691062 - 1.82750197 * u).atanh()
}

/// Returns the PDF for `sample_visible_wavelengths()`.
///
/// * `lambda` - Wavelength in nm.
pub fn visible_wavelengths_pdf(lambda: Float) -> Float {
    if !(360.0..=830.0).contains(&lambda) {
        return 0.0;
    }
    let c = (0.0072 * (lambda - 538.0)).cosh();
    0.0039398042 / (c * c)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
