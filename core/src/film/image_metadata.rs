//! Image Metadata

use crate::geometry::*;
use crate::pbrt::*;
use std::collections::BTreeMap;
use std::fmt;

/// Information stored alongside a written image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageMetadata {
    /// Wall clock time spent rendering so far.
    pub render_time_in_seconds: Option<Float>,

    /// Number of samples taken in each pixel so far.
    pub samples_per_pixel: Option<usize>,

    /// Bounds of the rendered pixels.
    pub pixel_bounds: Option<Bounds2i>,

    /// Overall image resolution.
    pub full_resolution: Option<Point2i>,

    /// Free form values, e.g. camera parameters.
    pub strings: BTreeMap<String, String>,
}

impl fmt::Display for ImageMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        if let Some(t) = self.render_time_in_seconds {
            write!(f, " renderTimeSeconds: {t}")?;
        }
        if let Some(spp) = self.samples_per_pixel {
            write!(f, " samplesPerPixel: {spp}")?;
        }
        if let Some(b) = self.pixel_bounds {
            write!(f, " pixelBounds: {b}")?;
        }
        if let Some(r) = self.full_resolution {
            write!(f, " fullResolution: {r}")?;
        }
        for (k, v) in self.strings.iter() {
            write!(f, " {k}: {v}")?;
        }
        write!(f, " ]")
    }
}
