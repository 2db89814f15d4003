//! Distant Source

use crate::scene_sphere::SceneSphere;
use pbrt_core::geometry::*;
use pbrt_core::interaction::*;
use pbrt_core::light::*;
use pbrt_core::pbrt::*;
use pbrt_core::spectrum::*;

/// Implements a directional light source that deposits illumination from the
/// same direction at every point in space.
pub struct DistantLight {
    /// The emitted radiance `L`.
    pub l_emit: ArcSpectrum,

    /// Scale applied to the emitted radiance.
    pub scale: Float,

    /// Direction towards the light.
    pub w_light: Vector3f,

    /// Bounding sphere of the scene.
    scene_sphere: SceneSphere,
}

impl DistantLight {
    /// Returns a new `DistantLight`.
    ///
    /// * `l_emit`  - The emitted radiance.
    /// * `scale`   - Scale applied to the emitted radiance.
    /// * `w_light` - Direction towards the light.
    pub fn new(l_emit: ArcSpectrum, scale: Float, w_light: Vector3f) -> Self {
        Self {
            l_emit,
            scale,
            w_light: w_light.normalize(),
            scene_sphere: SceneSphere::new(),
        }
    }
}

impl Light for DistantLight {
    /// Records the extent of the scene.
    ///
    /// * `scene_bounds` - World space bounds of the scene.
    fn preprocess(&self, scene_bounds: &Bounds3f) {
        self.scene_sphere.set(scene_bounds);
    }

    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        LightType::DELTA_DIRECTION_LIGHT
    }

    /// Return the radiance arriving at an interaction point. The light is
    /// placed just outside the scene.
    ///
    /// * `hit`    - The interaction hit point.
    /// * `_u`     - Sample value for Monte Carlo integration.
    /// * `lambda` - Wavelengths to evaluate.
    fn sample_li(&self, hit: &Hit, _u: &Point2f, lambda: &SampledWavelengths) -> Option<LightLiSample> {
        let (_, scene_radius) = self.scene_sphere.get();
        let p_outside = hit.p + self.w_light * (2.0 * scene_radius);
        Some(LightLiSample::new(
            self.l_emit.sample(lambda) * self.scale,
            self.w_light,
            1.0,
            p_outside,
        ))
    }

    /// Return the total emitted power.
    ///
    /// * `lambda` - Wavelengths to evaluate.
    fn phi(&self, lambda: &SampledWavelengths) -> SampledSpectrum {
        let (_, scene_radius) = self.scene_sphere.get();
        self.l_emit.sample(lambda) * (self.scale * PI * scene_radius * scene_radius)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
