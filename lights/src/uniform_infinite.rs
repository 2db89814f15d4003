//! Uniform Infinite Light

use crate::scene_sphere::SceneSphere;
use pbrt_core::geometry::*;
use pbrt_core::interaction::*;
use pbrt_core::light::*;
use pbrt_core::pbrt::*;
use pbrt_core::sampling::*;
use pbrt_core::spectrum::*;

/// Implements an infinitely far away light source that surrounds the scene
/// and emits the same radiance from every direction.
pub struct UniformInfiniteLight {
    /// The emitted radiance.
    pub l_emit: ArcSpectrum,

    /// Scale applied to the emitted radiance.
    pub scale: Float,

    /// Bounding sphere of the scene.
    scene_sphere: SceneSphere,
}

impl UniformInfiniteLight {
    /// Returns a new `UniformInfiniteLight`.
    ///
    /// * `l_emit` - The emitted radiance.
    /// * `scale`  - Scale applied to the emitted radiance.
    pub fn new(l_emit: ArcSpectrum, scale: Float) -> Self {
        Self {
            l_emit,
            scale,
            scene_sphere: SceneSphere::new(),
        }
    }
}

impl Light for UniformInfiniteLight {
    /// Records the extent of the scene.
    ///
    /// * `scene_bounds` - World space bounds of the scene.
    fn preprocess(&self, scene_bounds: &Bounds3f) {
        self.scene_sphere.set(scene_bounds);
    }

    fn get_type(&self) -> LightType {
        LightType::INFINITE_LIGHT
    }

    /// Samples a direction uniformly over the sphere of directions.
    ///
    /// * `hit`    - The reference point.
    /// * `u`      - Sample value for Monte Carlo integration.
    /// * `lambda` - Wavelengths to evaluate.
    fn sample_li(&self, hit: &Hit, u: &Point2f, lambda: &SampledWavelengths) -> Option<LightLiSample> {
        let (_, scene_radius) = self.scene_sphere.get();
        let wi = sample_uniform_sphere(u);
        let pdf = uniform_sphere_pdf();
        Some(LightLiSample::new(
            self.l_emit.sample(lambda) * self.scale,
            wi,
            pdf,
            hit.p + wi * (2.0 * scene_radius),
        ))
    }

    /// Returns the total emitted power.
    ///
    /// * `lambda` - Wavelengths to evaluate.
    fn phi(&self, lambda: &SampledWavelengths) -> SampledSpectrum {
        let (_, scene_radius) = self.scene_sphere.get();
        self.l_emit.sample(lambda) * (4.0 * PI * PI * scene_radius * scene_radius * self.scale)
    }

    /// Returns the emitted radiance, which is the same for every ray.
    ///
    /// * `ray`    - The ray.
    /// * `lambda` - Wavelengths to evaluate.
    fn le(&self, _ray: &Ray, lambda: &SampledWavelengths) -> SampledSpectrum {
        self.l_emit.sample(lambda) * self.scale
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
