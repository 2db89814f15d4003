//! RGB Film

use super::*;
use crate::image_io;
use crate::parallel::AtomicFloat;

/// Accumulated contributions to a single pixel.
#[derive(Default)]
struct RGBPixel {
    /// Running filter-weighted sum of linear RGB contributions.
    rgb_sum: [AtomicFloat; 3],

    /// Sum of filter weights of the contributions.
    weight_sum: AtomicFloat,

    /// Unweighted sum of splatted contributions.
    rgb_splat: [AtomicFloat; 3],
}

/// Film that stores linear sRGB values for each pixel.
pub struct RGBFilm {
    /// The overall image resolution in pixels.
    full_resolution: Point2i,

    /// Subset of the image to render.
    pixel_bounds: Bounds2i,

    /// Filter function to use for image reconstruction from samples.
    filter: ArcFilter,

    /// Filename of output image.
    filename: String,

    /// RGB components of a sample are scaled so none exceeds this value.
    max_component_value: Float,

    /// Stores the image pixels.
    pixels: Vec<RGBPixel>,
}

impl RGBFilm {
    /// Create a new `RGBFilm`.
    ///
    /// * `full_resolution`     - The overall image resolution in pixels.
    /// * `pixel_bounds`        - Subset of the image to render.
    /// * `filter`              - Filter function to use for image reconstruction.
    /// * `filename`            - Filename of output image.
    /// * `max_component_value` - Optional upper limit on sample RGB components.
    ///                           Defaults to `INFINITY`.
    pub fn new(
        full_resolution: Point2i,
        pixel_bounds: Bounds2i,
        filter: ArcFilter,
        filename: &str,
        max_component_value: Option<Float>,
    ) -> Self {
        let n = pixel_bounds.area().max(0) as usize;
        let pixels = (0..n).map(|_| RGBPixel::default()).collect();
        Self {
            full_resolution,
            pixel_bounds,
            filter,
            filename: filename.to_string(),
            max_component_value: max_component_value.unwrap_or(INFINITY),
            pixels,
        }
    }

    /// Returns the output file name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the offset of a pixel in `pixels` or `None` if it lies outside
    /// the pixel bounds.
    ///
    /// * `p` - The pixel coordinates with respect to the overall image.
    fn pixel_offset(&self, p: &Point2i) -> Option<usize> {
        if !self.pixel_bounds.contains_exclusive(p) {
            return None;
        }
        let width = self.pixel_bounds.p_max.x - self.pixel_bounds.p_min.x;
        let offset = (p.x - self.pixel_bounds.p_min.x) + (p.y - self.pixel_bounds.p_min.y) * width;
        Some(offset as usize)
    }

    /// Converts a spectral sample to linear sRGB, limiting its largest
    /// component to `max_component_value`.
    ///
    /// * `l`      - Radiance.
    /// * `lambda` - Wavelengths `l` was sampled at.
    fn to_rgb(&self, l: &SampledSpectrum, lambda: &SampledWavelengths) -> [Float; 3] {
        let mut rgb = xyz_to_rgb(&l.to_xyz(lambda));
        let m = rgb[0].max(rgb[1]).max(rgb[2]);
        if m > self.max_component_value {
            let s = self.max_component_value / m;
            rgb = rgb.map(|c| c * s);
        }
        rgb
    }

    /// Returns the final RGB value of a pixel: the filter weighted average of
    /// its samples plus its scaled splats.
    ///
    /// * `p`           - The pixel.
    /// * `splat_scale` - Scale factor for splatted contributions.
    pub fn get_pixel_rgb(&self, p: &Point2i, splat_scale: Float) -> [Float; 3] {
        let Some(offset) = self.pixel_offset(p) else {
            return [0.0; 3];
        };
        let pixel = &self.pixels[offset];

        let weight_sum = pixel.weight_sum.get();
        let mut rgb = [0.0; 3];
        for (i, c) in rgb.iter_mut().enumerate() {
            let mut v = pixel.rgb_sum[i].get();
            if weight_sum != 0.0 {
                v /= weight_sum;
            }
            *c = v + splat_scale * pixel.rgb_splat[i].get();
        }
        rgb
    }
}

impl Film for RGBFilm {
    fn pixel_bounds(&self) -> Bounds2i {
        self.pixel_bounds
    }

    fn full_resolution(&self) -> Point2i {
        self.full_resolution
    }

    fn get_filter(&self) -> &ArcFilter {
        &self.filter
    }

    fn add_sample(
        &self,
        p_film: &Point2i,
        l: &SampledSpectrum,
        lambda: &SampledWavelengths,
        _visible_surface: Option<&VisibleSurface>,
        weight: Float,
    ) {
        let Some(offset) = self.pixel_offset(p_film) else {
            debug!("Ignoring sample for pixel {p_film} outside {}", self.pixel_bounds);
            return;
        };

        let rgb = self.to_rgb(l, lambda);
        let pixel = &self.pixels[offset];
        for (sum, c) in pixel.rgb_sum.iter().zip(rgb.iter()) {
            sum.add(weight * c);
        }
        pixel.weight_sum.add(weight);
    }

    fn add_splat(&self, p: &Point2f, l: &SampledSpectrum, lambda: &SampledWavelengths) {
        if l.has_nans() {
            warn!("Ignoring splatted spectrum with NaN values at ({}, {})", p.x, p.y);
            return;
        }
        let rgb = self.to_rgb(l, lambda);
        if rgb.iter().any(|c| c.is_infinite()) {
            warn!(
                "Ignoring splatted spectrum with infinite value at ({}, {})",
                p.x, p.y
            );
            return;
        }

        // Find pixels whose filter footprint contains the splat.
        let radius = self.filter.radius();
        let px = p.x - 0.5;
        let py = p.y - 0.5;
        let splat_bounds = Bounds2i::new(
            Point2i::new((px - radius.x).floor() as Int, (py - radius.y).floor() as Int),
            Point2i::new(
                (px + radius.x).floor() as Int + 1,
                (py + radius.y).floor() as Int + 1,
            ),
        )
        .intersect(&self.pixel_bounds);

        for pi in splat_bounds {
            let offset = Point2f::new(px - pi.x as Float, py - pi.y as Float);
            let wt = self.filter.evaluate(&offset);
            if wt == 0.0 {
                continue;
            }
            if let Some(o) = self.pixel_offset(&pi) {
                for (splat, c) in self.pixels[o].rgb_splat.iter().zip(rgb.iter()) {
                    splat.add(wt * c);
                }
            }
        }
    }

    fn write_image(&self, metadata: &ImageMetadata, splat_scale: Float) -> Result<(), FilmError> {
        info!("Converting image to RGB and computing final weighted pixel values");
        debug!("Image metadata {metadata}");

        let mut rgb = Vec::with_capacity(3 * self.pixels.len());
        for p in self.pixel_bounds {
            rgb.extend_from_slice(&self.get_pixel_rgb(&p, splat_scale));
        }

        let extent = self.pixel_bounds.diagonal();
        image_io::write_image(
            &self.filename,
            &rgb,
            extent.x.max(0) as u32,
            extent.y.max(0) as u32,
            metadata,
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
