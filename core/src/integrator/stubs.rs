//! Minimal camera, film, filter and sampler used by the integrator tests.

use crate::camera::*;
use crate::film::*;
use crate::filter::*;
use crate::geometry::*;
use crate::pbrt::*;
use crate::sampler::*;
use crate::spectrum::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One `add_sample()` call.
#[derive(Copy, Clone, Debug)]
pub struct RecordedSample {
    pub l: SampledSpectrum,
    pub weight: Float,
    pub has_visible_surface: bool,
}

/// Film that records every sample and write.
pub struct RecordingFilm {
    pixel_bounds: Bounds2i,
    filter: ArcFilter,
    visible_surface: bool,
    pub samples: Mutex<HashMap<Point2i, Vec<RecordedSample>>>,
    pub writes: Mutex<Vec<(ImageMetadata, Float)>>,
}

impl RecordingFilm {
    pub fn new(pixel_bounds: Bounds2i) -> Arc<Self> {
        Self::build(pixel_bounds, false)
    }

    pub fn with_visible_surface(pixel_bounds: Bounds2i) -> Arc<Self> {
        Self::build(pixel_bounds, true)
    }

    fn build(pixel_bounds: Bounds2i, visible_surface: bool) -> Arc<Self> {
        Arc::new(Self {
            pixel_bounds,
            filter: Arc::new(UnitFilter(FilterData::new(Vector2f::new(0.5, 0.5)))),
            visible_surface,
            samples: Mutex::new(HashMap::new()),
            writes: Mutex::new(vec![]),
        })
    }
}

impl Film for RecordingFilm {
    fn pixel_bounds(&self) -> Bounds2i {
        self.pixel_bounds
    }

    fn full_resolution(&self) -> Point2i {
        self.pixel_bounds.p_max
    }

    fn get_filter(&self) -> &ArcFilter {
        &self.filter
    }

    fn uses_visible_surface(&self) -> bool {
        self.visible_surface
    }

    fn add_sample(
        &self,
        p_film: &Point2i,
        l: &SampledSpectrum,
        _lambda: &SampledWavelengths,
        visible_surface: Option<&VisibleSurface>,
        weight: Float,
    ) {
        self.samples
            .lock()
            .unwrap()
            .entry(*p_film)
            .or_default()
            .push(RecordedSample {
                l: *l,
                weight,
                has_visible_surface: visible_surface.map_or(false, |vs| vs.set),
            });
    }

    fn add_splat(&self, _p: &Point2f, _l: &SampledSpectrum, _lambda: &SampledWavelengths) {}

    fn write_image(&self, metadata: &ImageMetadata, splat_scale: Float) -> Result<(), FilmError> {
        self.writes.lock().unwrap().push((metadata.clone(), splat_scale));
        Ok(())
    }
}

/// Box filter of radius 0.5 with unit weight.
pub struct UnitFilter(pub FilterData);

impl Filter for UnitFilter {
    fn get_data(&self) -> &FilterData {
        &self.0
    }

    fn evaluate(&self, _p: &Point2f) -> Float {
        1.0
    }

    fn sample(&self, u: &Point2f) -> FilterSample {
        FilterSample::new(Point2f::new(u.x - 0.5, u.y - 0.5), 1.0)
    }

    fn integral(&self) -> Float {
        1.0
    }
}

/// Orthographic camera looking down +z. A ray starts at the film position,
/// so its origin identifies the pixel.
pub struct StubCamera {
    data: CameraData,
    declines: bool,
}

impl StubCamera {
    /// * `film`     - The film.
    /// * `declines` - Never generate rays.
    pub fn new(film: Arc<RecordingFilm>, declines: bool) -> Self {
        Self {
            data: CameraData::new(0.0, 1.0, film),
            declines,
        }
    }
}

impl Camera for StubCamera {
    fn get_data(&self) -> &CameraData {
        &self.data
    }

    fn generate_ray(&self, sample: &CameraSample, _lambda: &SampledWavelengths) -> Option<CameraRay> {
        if self.declines {
            return None;
        }
        let o = Point3f::new(sample.p_film.x, sample.p_film.y, 0.0);
        let time = self.sample_time(sample.time);
        Some(CameraRay::new(Ray::new(o, Vector3f::new(0.0, 0.0, 1.0), time)))
    }

    fn init_metadata(&self, metadata: &mut ImageMetadata) {
        metadata.strings.insert("camera".to_string(), "stub".to_string());
    }
}

/// Hashes (pixel, sample index, dimension) into [0, 1).
#[derive(Clone)]
pub struct StubSampler {
    data: SamplerData,
}

impl StubSampler {
    pub fn new(samples_per_pixel: usize) -> Self {
        Self {
            data: SamplerData::new(samples_per_pixel, 0),
        }
    }
}

impl Sampler for StubSampler {
    fn get_data(&self) -> &SamplerData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut SamplerData {
        &mut self.data
    }

    fn clone_sampler(&self) -> Box<dyn Sampler> {
        Box::new(self.clone())
    }

    fn get_1d(&mut self) -> Float {
        let p = self.data.current_pixel;
        let index = self.data.current_pixel_sample_index as u64;
        let dim = self.data.next_dimension(1) as u64;
        let h = hash_values(&[p.x as u64, p.y as u64, index, dim]);
        ((h >> 40) as Float / (1_u64 << 24) as Float).min(ONE_MINUS_EPSILON)
    }

    fn get_2d(&mut self) -> Point2f {
        Point2f::new(self.get_1d(), self.get_1d())
    }
}
