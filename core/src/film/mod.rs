//! Film

use crate::filter::*;
use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::Arc;
use thiserror::Error;

mod image_metadata;
mod rgb_film;

// Re-export.
pub use image_metadata::*;
pub use rgb_film::*;

/// Errors raised while writing a film's image.
#[derive(Error, Debug)]
pub enum FilmError {
    /// The film has no pixels to write.
    #[error("image {0} has no pixels")]
    EmptyImage(String),

    /// The output format could not be determined or is not supported.
    #[error("can't determine image format of {0}")]
    UnsupportedFormat(String),

    /// The image could not be encoded.
    #[error("error encoding image {path}: {source}")]
    Encoding {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// The OpenEXR image could not be written.
    #[error("error writing OpenEXR image {path}: {source}")]
    Exr {
        path: String,
        #[source]
        source: exr::error::Error,
    },

    /// The image could not be written.
    #[error("error writing image {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Models the sensing device in a simulated camera.
///
/// Samples for a pixel are only ever added by the worker rendering the tile
/// that contains the pixel, so implementations must tolerate concurrent
/// `add_sample()` calls for distinct pixels. `add_splat()` may touch any pixel
/// from any thread.
pub trait Film: Send + Sync {
    /// Returns the bounds of the pixels to render.
    fn pixel_bounds(&self) -> Bounds2i;

    /// Returns the overall image resolution in pixels.
    fn full_resolution(&self) -> Point2i;

    /// Returns the filter used to reconstruct the image from samples.
    fn get_filter(&self) -> &ArcFilter;

    /// Maps a sample value to the wavelengths to trace for a camera sample.
    ///
    /// * `u` - Sample value in [0, 1).
    fn sample_wavelengths(&self, u: Float) -> SampledWavelengths {
        SampledWavelengths::sample_visible(u)
    }

    /// Returns true if `add_sample()` makes use of a `VisibleSurface`.
    fn uses_visible_surface(&self) -> bool {
        false
    }

    /// Adds the contribution of one camera sample to a pixel.
    ///
    /// * `p_film`          - The pixel.
    /// * `l`               - Radiance carried by the camera ray.
    /// * `lambda`          - Wavelengths `l` was sampled at.
    /// * `visible_surface` - First surface seen by the ray, if requested.
    /// * `weight`          - Filter weight of the sample.
    fn add_sample(
        &self,
        p_film: &Point2i,
        l: &SampledSpectrum,
        lambda: &SampledWavelengths,
        visible_surface: Option<&VisibleSurface>,
        weight: Float,
    );

    /// Adds radiance that arrives at an arbitrary film position, e.g. from
    /// light paths that connect to the camera.
    ///
    /// * `p`      - Position on the film in raster space.
    /// * `l`      - Radiance carried by the sample.
    /// * `lambda` - Wavelengths `l` was sampled at.
    fn add_splat(&self, p: &Point2f, l: &SampledSpectrum, lambda: &SampledWavelengths);

    /// Writes the current image.
    ///
    /// * `metadata`    - Metadata stored alongside the image.
    /// * `splat_scale` - Scale factor applied to splatted contributions.
    fn write_image(&self, metadata: &ImageMetadata, splat_scale: Float) -> Result<(), FilmError>;
}

/// Atomic reference counted `Film`.
pub type ArcFilm = Arc<dyn Film>;

/// Geometric information about the first surface a camera ray hits, used by
/// films that store auxiliary buffers (e.g. for denoising).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VisibleSurface {
    /// Point on the surface.
    pub p: Point3f,

    /// Geometric normal.
    pub n: Normal3f,

    /// Shading normal.
    pub ns: Normal3f,

    /// The uv coordinates from surface parametrization.
    pub uv: Point2f,

    /// Time of the hit.
    pub time: Float,

    /// Surface albedo at the sampled wavelengths.
    pub albedo: SampledSpectrum,

    /// False when the ray did not hit anything.
    pub set: bool,
}

impl VisibleSurface {
    /// Create a new `VisibleSurface` from a surface interaction.
    ///
    /// * `si`     - The surface interaction.
    /// * `albedo` - Surface albedo at the sampled wavelengths.
    pub fn new(si: &SurfaceInteraction, albedo: SampledSpectrum) -> Self {
        Self {
            p: si.hit.p,
            n: si.hit.n,
            ns: si.shading_n,
            uv: si.uv,
            time: si.hit.time,
            albedo,
            set: true,
        }
    }
}
