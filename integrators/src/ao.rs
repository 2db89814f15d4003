//! Ambient Occlusion Integrator

use pbrt_core::app::Options;
use pbrt_core::camera::*;
use pbrt_core::film::*;
use pbrt_core::geometry::*;
use pbrt_core::integrator::*;
use pbrt_core::light::*;
use pbrt_core::memory::ScratchBuffer;
use pbrt_core::pbrt::*;
use pbrt_core::primitive::*;
use pbrt_core::sampler::*;
use pbrt_core::sampling::*;
use pbrt_core::spectrum::*;

/// Implements ambient occlusion: the fraction of the hemisphere above the
/// first surface a camera ray hits that is not blocked within a maximum
/// distance, scaled by an illuminant. Rays that miss the scene return the
/// emission of the infinite lights.
pub struct AmbientOcclusionIntegrator {
    /// Common image tile integrator data.
    data: ImageTileIntegratorData,

    /// Sample directions proportional to the cosine of the angle with the
    /// normal instead of uniformly.
    cos_sample: bool,

    /// Surfaces further away than this do not occlude.
    max_distance: Float,

    /// Radiance arriving from unoccluded directions.
    illuminant: ArcSpectrum,
}

impl AmbientOcclusionIntegrator {
    /// Create a new `AmbientOcclusionIntegrator`.
    ///
    /// * `cos_sample`   - Use cosine weighted hemisphere sampling.
    /// * `max_distance` - Surfaces further away than this do not occlude.
    /// * `illuminant`   - Radiance arriving from unoccluded directions.
    /// * `camera`       - The camera.
    /// * `sampler`      - Sampler cloned by every worker thread.
    /// * `aggregate`    - The scene geometry.
    /// * `lights`       - All lights in the scene.
    /// * `options`      - Rendering options.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cos_sample: bool,
        max_distance: Float,
        illuminant: ArcSpectrum,
        camera: ArcCamera,
        sampler: Box<dyn Sampler>,
        aggregate: Option<ArcPrimitive>,
        lights: Vec<ArcLight>,
        options: Options,
    ) -> Self {
        let max_distance = if max_distance > 0.0 {
            max_distance
        } else {
            warn!("Ambient occlusion max distance {max_distance} is not positive, using infinity");
            INFINITY
        };
        Self {
            data: ImageTileIntegratorData::new(
                IntegratorBase::new(aggregate, lights),
                camera,
                sampler,
                options,
            ),
            cos_sample,
            max_distance,
            illuminant,
        }
    }

    /// Returns the radiance carried by rays that escape the scene.
    ///
    /// * `ray`    - The ray.
    /// * `lambda` - Wavelengths to evaluate.
    fn escaped_radiance(&self, ray: &Ray, lambda: &SampledWavelengths) -> SampledSpectrum {
        let mut l = SampledSpectrum::ZERO;
        for light in self.data.base.infinite_lights() {
            l += light.le(ray, lambda);
        }
        l
    }
}

pbrt_core::impl_ray_integrator!(AmbientOcclusionIntegrator, data);

impl RayIntegrator for AmbientOcclusionIntegrator {
    fn li(
        &self,
        ray: &Ray,
        lambda: &mut SampledWavelengths,
        sampler: &mut dyn Sampler,
        _scratch_buffer: &mut ScratchBuffer,
        visible_surface: Option<&mut VisibleSurface>,
    ) -> SampledSpectrum {
        let Some(si) = self.data.base.intersect(ray, INFINITY) else {
            return self.escaped_radiance(ray, lambda);
        };
        let isect = &si.intr;

        if let Some(vs) = visible_surface {
            *vs = VisibleSurface::new(isect, SampledSpectrum::ZERO);
        }

        // Sample a direction in the hemisphere facing the ray origin.
        let n = isect.hit.n.face_forward(&-ray.d);
        let u = sampler.get_2d();
        let (wi, pdf) = if self.cos_sample {
            let wi = sample_cosine_hemisphere(&u);
            (wi, cosine_hemisphere_pdf(wi.z.abs()))
        } else {
            (sample_uniform_hemisphere(&u), uniform_hemisphere_pdf())
        };
        if pdf == 0.0 {
            return SampledSpectrum::ZERO;
        }

        let n = Vector3f::from(n);
        let wi = Frame::from_z(n).from_local(&wi);

        // Scale by 1/pi so a fully unoccluded point returns the illuminant.
        let r = isect.hit.spawn_ray(&wi);
        if self.data.base.intersects(&r, self.max_distance) {
            SampledSpectrum::ZERO
        } else {
            self.illuminant.sample(lambda) * (wi.dot(&n) / (PI * pdf))
        }
    }
}
