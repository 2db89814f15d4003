//! Camera

use crate::app::Options;
use crate::film::*;
use crate::filter::*;
use crate::geometry::*;
use crate::pbrt::*;
use crate::sampler::*;
use crate::spectrum::*;
use std::fmt;
use std::sync::Arc;

/// Camera trait provides common behavior.
pub trait Camera: Send + Sync {
    /// Returns the common camera data.
    fn get_data(&self) -> &CameraData;

    /// Returns a ray corresponding to a given sample together with a weight
    /// for the radiance it carries, or `None` if the sample does not map to a
    /// ray (e.g. it falls outside the lens aperture).
    ///
    /// * `sample` - The sample.
    /// * `lambda` - Wavelengths the ray carries.
    fn generate_ray(&self, sample: &CameraSample, lambda: &SampledWavelengths) -> Option<CameraRay>;

    /// Returns a main ray and rays shifted one pixel in x and y directions on
    /// the film plane for a given sample. The differentials are left out if
    /// the shifted rays can't be generated.
    ///
    /// * `sample` - The sample.
    /// * `lambda` - Wavelengths the ray carries.
    fn generate_ray_differential(
        &self,
        sample: &CameraSample,
        lambda: &SampledWavelengths,
    ) -> Option<CameraRay> {
        let mut cr = self.generate_ray(sample, lambda)?;
        let ray = cr.ray;

        // Find camera ray after shifting a fraction of a pixel in the x-direction.
        let mut rx = None;
        for eps in [0.05, -0.05] {
            let mut sshift = *sample;
            sshift.p_film.x += eps;
            if let Some(shifted) = self.generate_ray(&sshift, lambda) {
                rx = Some((
                    ray.o + (shifted.ray.o - ray.o) / eps,
                    ray.d + (shifted.ray.d - ray.d) / eps,
                ));
                break;
            }
        }

        // Find camera ray after shifting a fraction of a pixel in the y-direction.
        let mut ry = None;
        for eps in [0.05, -0.05] {
            let mut sshift = *sample;
            sshift.p_film.y += eps;
            if let Some(shifted) = self.generate_ray(&sshift, lambda) {
                ry = Some((
                    ray.o + (shifted.ray.o - ray.o) / eps,
                    ray.d + (shifted.ray.d - ray.d) / eps,
                ));
                break;
            }
        }

        if let (Some((rx_origin, rx_direction)), Some((ry_origin, ry_direction))) = (rx, ry) {
            cr.ray.differentials = Some(RayDifferential {
                rx_origin,
                ry_origin,
                rx_direction,
                ry_direction,
            });
        }
        Some(cr)
    }

    /// Returns the film capturing the image.
    fn get_film(&self) -> &ArcFilm {
        &self.get_data().film
    }

    /// Maps a sample value in [0, 1) to a time between shutter open and close.
    ///
    /// * `u` - Sample value.
    fn sample_time(&self, u: Float) -> Float {
        let data = self.get_data();
        lerp(u, data.shutter_open, data.shutter_close)
    }

    /// Adds camera specific information to the metadata of a written image.
    ///
    /// * `metadata` - The metadata.
    fn init_metadata(&self, _metadata: &mut ImageMetadata) {}
}

/// Atomic reference counted `Camera`.
pub type ArcCamera = Arc<dyn Camera>;

/// Stores common camera parameters.
#[derive(Clone)]
pub struct CameraData {
    /// Time when shutter is open.
    pub shutter_open: Float,

    /// Time when shutter is closed.
    pub shutter_close: Float,

    /// The film to capture the rendered image.
    pub film: ArcFilm,
}

impl CameraData {
    /// Creates a new instance of `CameraData`.
    ///
    /// * `shutter_open`  - Time when shutter is open.
    /// * `shutter_close` - Time when shutter is closed.
    /// * `film`          - The film to capture the rendered image.
    pub fn new(shutter_open: Float, shutter_close: Float, film: ArcFilm) -> Self {
        Self {
            shutter_open,
            shutter_close,
            film,
        }
    }
}

/// A ray leaving the camera and the weight of the radiance it carries.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraRay {
    /// The ray.
    pub ray: Ray,

    /// Weight applied to the radiance arriving along the ray.
    pub weight: SampledSpectrum,
}

impl CameraRay {
    /// Create a new `CameraRay` with unit weight.
    ///
    /// * `ray` - The ray.
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            weight: SampledSpectrum::ONE,
        }
    }
}

/// Stores all of the sample values needed to specify a camera ray.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CameraSample {
    /// Point on the film to which the generated ray carries radiance.
    pub p_film: Point2f,

    /// The point on the lens the ray passes through (for cameras that
    /// support lenses).
    pub p_lens: Point2f,

    /// Time at which the ray should sample the scene.
    pub time: Float,

    /// Reconstruction filter weight of the sample.
    pub filter_weight: Float,
}

impl fmt::Display for CameraSample {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CameraSample<p_film: {}, p_lens: {}, time: {}, filter_weight: {}>",
            self.p_film, self.p_lens, self.time, self.filter_weight
        )
    }
}

/// Returns the camera sample for a pixel. The film position is drawn from the
/// reconstruction filter around the pixel center unless pixel jitter is
/// disabled, in which case the pixel center is used with unit weight.
///
/// * `sampler` - The sampler, positioned at the pixel sample.
/// * `p_pixel` - The pixel.
/// * `filter`  - The reconstruction filter.
/// * `options` - Rendering options.
pub fn get_camera_sample(
    sampler: &mut dyn Sampler,
    p_pixel: &Point2i,
    filter: &dyn Filter,
    options: &Options,
) -> CameraSample {
    let u = sampler.get_pixel_2d();
    let fs = if options.disable_pixel_jitter {
        FilterSample::new(Point2f::zero(), 1.0)
    } else {
        filter.sample(&u)
    };

    let p_film = Point2f::new(
        p_pixel.x as Float + 0.5 + fs.p.x,
        p_pixel.y as Float + 0.5 + fs.p.y,
    );
    let time = sampler.get_1d();
    let p_lens = sampler.get_2d();

    CameraSample {
        p_film,
        p_lens,
        time,
        filter_weight: fs.weight,
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
