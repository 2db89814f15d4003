//! Ray Integrator

use super::*;
use crate::camera::*;
use crate::film::*;
use crate::memory::ScratchBuffer;
use crate::sampler::*;
use crate::spectrum::*;

/// Smallest scale applied to camera ray differentials.
const MIN_RAY_DIFFERENTIAL_SCALE: Float = 0.125;

/// An image tile integrator that computes each pixel sample by tracing a
/// single camera ray and estimating the radiance arriving along it.
pub trait RayIntegrator: ImageTileIntegrator {
    /// Returns the radiance arriving at the origin of a camera ray.
    ///
    /// * `ray`             - The camera ray.
    /// * `lambda`          - Wavelengths to estimate radiance at.
    /// * `sampler`         - The sampler.
    /// * `scratch_buffer`  - Memory for allocations that live for one sample.
    /// * `visible_surface` - Receives the first surface hit, if requested.
    fn li(
        &self,
        ray: &Ray,
        lambda: &mut SampledWavelengths,
        sampler: &mut dyn Sampler,
        scratch_buffer: &mut ScratchBuffer,
        visible_surface: Option<&mut VisibleSurface>,
    ) -> SampledSpectrum;

    /// Computes one sample of a pixel by tracing a camera ray and adds it to
    /// the film. Samples whose radiance is NaN or infinite are logged and
    /// added as black. A sample for which the camera produces no ray is
    /// added as black too.
    ///
    /// * `p_pixel`        - The pixel.
    /// * `sample_index`   - Index of the sample within the pixel.
    /// * `sampler`        - Sampler positioned at the pixel sample.
    /// * `scratch_buffer` - Memory for allocations that live for one sample.
    fn evaluate_pixel_sample(
        &self,
        p_pixel: &Point2i,
        sample_index: usize,
        sampler: &mut dyn Sampler,
        scratch_buffer: &mut ScratchBuffer,
    ) {
        let data = self.get_data();
        let camera = &data.camera;
        let film = camera.get_film();

        // Sample wavelengths. The dimension is consumed even when jitter is
        // disabled so the rest of the sample vector stays the same.
        let mut lu = sampler.get_1d();
        if data.options.disable_wavelength_jitter {
            lu = 0.5;
        }
        let mut lambda = film.sample_wavelengths(lu);

        let camera_sample = get_camera_sample(sampler, p_pixel, film.get_filter().as_ref(), &data.options);

        let uses_visible_surface = film.uses_visible_surface();
        let mut visible_surface = VisibleSurface::default();

        let mut l = SampledSpectrum::ZERO;
        if let Some(mut camera_ray) = camera.generate_ray_differential(&camera_sample, &lambda) {
            // Shrink differentials as the sample count grows.
            let scale = MIN_RAY_DIFFERENTIAL_SCALE
                .max(1.0 / (sampler.samples_per_pixel() as Float).sqrt());
            if !data.options.disable_pixel_jitter {
                camera_ray.ray.scale_differentials(scale);
            }

            let vs = if uses_visible_surface {
                Some(&mut visible_surface)
            } else {
                None
            };
            l = camera_ray.weight
                * self.li(&camera_ray.ray, &mut lambda, sampler, scratch_buffer, vs);

            // Issue warning if unexpected radiance value is returned.
            if l.has_nans() {
                error!(
                    "Not-a-number radiance value returned for pixel ({}, {}), sample {}. Setting to black.",
                    p_pixel.x, p_pixel.y, sample_index
                );
                l = SampledSpectrum::ZERO;
            } else if l.y(&lambda).is_infinite() {
                error!(
                    "Infinite radiance value returned for pixel ({}, {}), sample {}. Setting to black.",
                    p_pixel.x, p_pixel.y, sample_index
                );
                l = SampledSpectrum::ZERO;
            }

            trace!(
                "Pixel ({}, {}) sample {}: L = {}, lambda = {}",
                p_pixel.x,
                p_pixel.y,
                sample_index,
                l,
                lambda
            );
        }

        film.add_sample(
            p_pixel,
            &l,
            &lambda,
            uses_visible_surface.then_some(&visible_surface),
            camera_sample.filter_weight,
        );
    }
}

/// Implements `Integrator` and `ImageTileIntegrator` for a type implementing
/// `RayIntegrator`, so that rendering runs the camera ray pipeline for every
/// pixel sample.
///
/// * `$t`    - The integrator type.
/// * `$data` - Field holding its `ImageTileIntegratorData`.
#[macro_export]
macro_rules! impl_ray_integrator {
    ($t:ty, $data:ident) => {
        impl $crate::integrator::Integrator for $t {
            fn render(&self) {
                $crate::integrator::ImageTileIntegrator::render(self);
            }
        }

        impl $crate::integrator::ImageTileIntegrator for $t {
            fn get_data(&self) -> &$crate::integrator::ImageTileIntegratorData {
                &self.$data
            }

            fn evaluate_pixel_sample(
                &self,
                p_pixel: &$crate::geometry::Point2i,
                sample_index: usize,
                sampler: &mut dyn $crate::sampler::Sampler,
                scratch_buffer: &mut $crate::memory::ScratchBuffer,
            ) {
                $crate::integrator::RayIntegrator::evaluate_pixel_sample(
                    self,
                    p_pixel,
                    sample_index,
                    sampler,
                    scratch_buffer,
                );
            }
        }
    };
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Options;
    use crate::integrator::stubs::*;
    use float_cmp::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    /// Returns a fixed radiance, except for selected pixels.
    struct FixedIntegrator {
        data: ImageTileIntegratorData,
        radiance: SampledSpectrum,
        nan_pixels: HashSet<Point2i>,
        infinite_pixels: HashSet<Point2i>,
        visible_surface_requests: Mutex<usize>,
        last_ray: Mutex<Option<Ray>>,
    }

    impl FixedIntegrator {
        fn new(film: Arc<RecordingFilm>, camera_declines: bool, spp: usize) -> Self {
            Self {
                data: ImageTileIntegratorData::new(
                    IntegratorBase::new(None, vec![]),
                    Arc::new(StubCamera::new(film, camera_declines)),
                    Box::new(StubSampler::new(spp)),
                    Options {
                        n_threads: 2,
                        quiet: true,
                        ..Default::default()
                    },
                ),
                radiance: SampledSpectrum::new(1.0),
                nan_pixels: HashSet::new(),
                infinite_pixels: HashSet::new(),
                visible_surface_requests: Mutex::new(0),
                last_ray: Mutex::new(None),
            }
        }
    }

    crate::impl_ray_integrator!(FixedIntegrator, data);

    impl RayIntegrator for FixedIntegrator {
        fn li(
            &self,
            ray: &Ray,
            _lambda: &mut SampledWavelengths,
            _sampler: &mut dyn Sampler,
            _scratch_buffer: &mut ScratchBuffer,
            visible_surface: Option<&mut VisibleSurface>,
        ) -> SampledSpectrum {
            *self.last_ray.lock().unwrap() = Some(*ray);
            if let Some(vs) = visible_surface {
                *self.visible_surface_requests.lock().unwrap() += 1;
                vs.set = true;
            }

            // The stub camera encodes the pixel in the ray origin.
            let p = Point2i::new(ray.o.x.floor() as Int, ray.o.y.floor() as Int);
            if self.nan_pixels.contains(&p) {
                SampledSpectrum::from([Float::NAN, 1.0, 1.0, 1.0])
            } else if self.infinite_pixels.contains(&p) {
                SampledSpectrum::new(INFINITY)
            } else {
                self.radiance
            }
        }
    }

    fn bounds_2x2() -> Bounds2i {
        Bounds2i::new(Point2i::new(0, 0), Point2i::new(2, 2))
    }

    #[test]
    fn radiance_reaches_the_film() {
        let film = RecordingFilm::new(bounds_2x2());
        let integrator = FixedIntegrator::new(film.clone(), false, 4);
        Integrator::render(&integrator);

        let samples = film.samples.lock().unwrap();
        assert_eq!(samples.len(), 4);
        for pixel_samples in samples.values() {
            assert_eq!(pixel_samples.len(), 4);
            for s in pixel_samples {
                assert_eq!(s.l, SampledSpectrum::new(1.0));
                assert_eq!(s.weight, 1.0);
                assert!(!s.has_visible_surface);
            }
        }
    }

    #[test]
    fn image_tile_evaluation_runs_camera_ray_pipeline() {
        let film = RecordingFilm::new(bounds_2x2());
        let mut integrator = FixedIntegrator::new(film.clone(), false, 1);
        integrator.nan_pixels.insert(Point2i::new(1, 0));
        let mut sampler = StubSampler::new(1);
        let mut scratch_buffer = ScratchBuffer::new();
        for p in [Point2i::new(0, 0), Point2i::new(1, 0)] {
            sampler.start_pixel_sample(&p, 0);
            ImageTileIntegrator::evaluate_pixel_sample(&integrator, &p, 0, &mut sampler, &mut scratch_buffer);
        }

        assert!(integrator.last_ray.lock().unwrap().is_some());
        let samples = film.samples.lock().unwrap();
        assert_eq!(samples[&Point2i::new(0, 0)][0].l, SampledSpectrum::new(1.0));
        assert!(samples[&Point2i::new(1, 0)][0].l.is_black());
    }

    #[test]
    fn nan_and_infinite_radiance_is_zeroed() {
        let film = RecordingFilm::new(bounds_2x2());
        let mut integrator = FixedIntegrator::new(film.clone(), false, 3);
        integrator.nan_pixels.insert(Point2i::new(0, 1));
        integrator.infinite_pixels.insert(Point2i::new(1, 0));
        Integrator::render(&integrator);

        let samples = film.samples.lock().unwrap();
        for (p, pixel_samples) in samples.iter() {
            assert_eq!(pixel_samples.len(), 3);
            let expected = if integrator.nan_pixels.contains(p) || integrator.infinite_pixels.contains(p) {
                SampledSpectrum::ZERO
            } else {
                SampledSpectrum::new(1.0)
            };
            assert!(pixel_samples.iter().all(|s| s.l == expected), "pixel {p}");
        }
    }

    #[test]
    fn declined_camera_rays_add_black_samples() {
        let film = RecordingFilm::new(bounds_2x2());
        let integrator = FixedIntegrator::new(film.clone(), true, 3);
        Integrator::render(&integrator);

        let samples = film.samples.lock().unwrap();
        assert_eq!(samples.len(), 4);
        for pixel_samples in samples.values() {
            assert_eq!(pixel_samples.len(), 3);
            assert!(pixel_samples.iter().all(|s| s.l.is_black()));
        }

        let writes = film.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0.samples_per_pixel, Some(3));
    }

    #[test]
    fn visible_surface_only_when_film_uses_it() {
        let film = RecordingFilm::with_visible_surface(bounds_2x2());
        let integrator = FixedIntegrator::new(film.clone(), false, 2);
        Integrator::render(&integrator);

        assert_eq!(*integrator.visible_surface_requests.lock().unwrap(), 8);
        let samples = film.samples.lock().unwrap();
        assert!(samples.values().flatten().all(|s| s.has_visible_surface));
    }

    #[test]
    fn camera_ray_differentials_are_scaled() {
        let film = RecordingFilm::new(bounds_2x2());
        let integrator = FixedIntegrator::new(film.clone(), false, 16);
        let mut sampler = StubSampler::new(16);
        let mut scratch_buffer = ScratchBuffer::new();
        let p = Point2i::new(1, 1);
        sampler.start_pixel_sample(&p, 0);
        RayIntegrator::evaluate_pixel_sample(&integrator, &p, 0, &mut sampler, &mut scratch_buffer);

        let ray = integrator.last_ray.lock().unwrap().unwrap();
        let d = ray.differentials.unwrap();
        // Differentials of the stub camera are one pixel apart before
        // scaling by 1 / sqrt(16).
        assert!(approx_eq!(Float, d.rx_origin.x - ray.o.x, 0.25, epsilon = 1e-3));
        assert!(approx_eq!(Float, d.ry_origin.y - ray.o.y, 0.25, epsilon = 1e-3));
        assert_eq!(d.rx_direction, ray.d);
        assert_eq!(film.samples.lock().unwrap()[&p].len(), 1);
    }

    #[test]
    fn differentials_are_kept_without_pixel_jitter() {
        let film = RecordingFilm::new(bounds_2x2());
        let mut integrator = FixedIntegrator::new(film, false, 16);
        integrator.data.options.disable_pixel_jitter = true;
        let mut sampler = StubSampler::new(16);
        let mut scratch_buffer = ScratchBuffer::new();
        let p = Point2i::new(0, 0);
        sampler.start_pixel_sample(&p, 3);
        RayIntegrator::evaluate_pixel_sample(&integrator, &p, 3, &mut sampler, &mut scratch_buffer);

        let ray = integrator.last_ray.lock().unwrap().unwrap();
        assert_eq!(ray.o, Point3f::new(0.5, 0.5, 0.0));
        let d = ray.differentials.unwrap();
        assert!(approx_eq!(Float, d.rx_origin.x - ray.o.x, 1.0, epsilon = 1e-3));
    }
}
