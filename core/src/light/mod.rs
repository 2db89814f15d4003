//! Light

use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::Arc;

mod light_type;

// Re-export
pub use light_type::*;

/// Return value for `Light::sample_li()`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightLiSample {
    /// Radiance arriving at the reference point.
    pub l: SampledSpectrum,

    /// Incident direction.
    pub wi: Vector3f,

    /// PDF with respect to solid angle.
    pub pdf: Float,

    /// Point on the light the radiance leaves from.
    pub p_light: Point3f,
}

impl LightLiSample {
    /// Return a new `LightLiSample`.
    ///
    /// * `l`       - Radiance arriving at the reference point.
    /// * `wi`      - Incident direction.
    /// * `pdf`     - PDF with respect to solid angle.
    /// * `p_light` - Point on the light the radiance leaves from.
    pub fn new(l: SampledSpectrum, wi: Vector3f, pdf: Float, p_light: Point3f) -> Self {
        Self {
            l,
            wi,
            pdf,
            p_light,
        }
    }
}

/// Light trait provides common behavior.
pub trait Light: Send + Sync {
    /// Initialize the light source before rendering begins. Called once with
    /// the bounds of the scene geometry.
    ///
    /// * `scene_bounds` - World space bounds of the scene.
    fn preprocess(&self, _scene_bounds: &Bounds3f) {}

    /// Returns the type of light.
    fn get_type(&self) -> LightType;

    /// Samples the incident radiance at a reference point. Returns `None` if
    /// no light arrives.
    ///
    /// * `hit`    - The reference point.
    /// * `u`      - Sample value for Monte Carlo integration.
    /// * `lambda` - Wavelengths to evaluate.
    fn sample_li(
        &self,
        hit: &Hit,
        u: &Point2f,
        lambda: &SampledWavelengths,
    ) -> Option<LightLiSample>;

    /// Returns the total emitted power.
    ///
    /// * `lambda` - Wavelengths to evaluate.
    fn phi(&self, lambda: &SampledWavelengths) -> SampledSpectrum;

    /// Returns emitted radiance along a ray that escapes the scene. Only
    /// infinite lights emit along such rays.
    ///
    /// * `ray`    - The ray.
    /// * `lambda` - Wavelengths to evaluate.
    fn le(&self, _ray: &Ray, _lambda: &SampledWavelengths) -> SampledSpectrum {
        SampledSpectrum::ZERO
    }
}

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light>;
