//! Image Tile Integrator

use super::*;
use crate::app::Options;
use crate::camera::*;
use crate::film::*;
use crate::memory::ScratchBuffer;
use crate::parallel::*;
use crate::progress::ProgressReporter;
use crate::sampler::*;

/// Largest number of samples per pixel taken in a single wave.
pub const MAX_WAVE_SIZE: usize = 64;

/// Common data for image tile integrators.
pub struct ImageTileIntegratorData {
    /// The scene.
    pub base: IntegratorBase,

    /// The camera. Owns the film.
    pub camera: ArcCamera,

    /// Sampler cloned by every worker thread.
    pub sampler_prototype: Box<dyn Sampler>,

    /// Rendering options.
    pub options: Options,
}

impl ImageTileIntegratorData {
    /// Create a new `ImageTileIntegratorData`.
    ///
    /// * `base`              - The scene.
    /// * `camera`            - The camera.
    /// * `sampler_prototype` - Sampler cloned by every worker thread.
    /// * `options`           - Rendering options.
    pub fn new(
        base: IntegratorBase,
        camera: ArcCamera,
        sampler_prototype: Box<dyn Sampler>,
        options: Options,
    ) -> Self {
        Self {
            base,
            camera,
            sampler_prototype,
            options,
        }
    }
}

/// Iterator over the `[start, end)` sample index ranges rendered by
/// successive waves. Waves start with one sample and double in size up to
/// `MAX_WAVE_SIZE`.
#[derive(Copy, Clone, Debug)]
pub struct Waves {
    samples_per_pixel: usize,
    wave_start: usize,
    wave_end: usize,
    next_wave_size: usize,
}

impl Waves {
    /// Create a new `Waves` iterator.
    ///
    /// * `samples_per_pixel` - Total number of samples per pixel.
    pub fn new(samples_per_pixel: usize) -> Self {
        Self {
            samples_per_pixel,
            wave_start: 0,
            wave_end: 1,
            next_wave_size: 1,
        }
    }
}

impl Iterator for Waves {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.wave_start >= self.samples_per_pixel {
            return None;
        }
        let wave = (self.wave_start, self.wave_end);

        self.wave_start = self.wave_end;
        self.wave_end = (self.wave_end + self.next_wave_size).min(self.samples_per_pixel);
        self.next_wave_size = (2 * self.next_wave_size).min(MAX_WAVE_SIZE);

        Some(wave)
    }
}

/// Renders the image in waves of samples. Every wave splits the pixel bounds
/// of the film into tiles that are rendered in parallel, each worker thread
/// using its own sampler and scratch buffer.
pub trait ImageTileIntegrator: Integrator {
    /// Returns the common data.
    fn get_data(&self) -> &ImageTileIntegratorData;

    /// Computes one sample of a pixel and adds it to the film.
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
    );

    /// Render the scene.
    fn render(&self) {
        let data = self.get_data();
        let pixel_area = data.camera.get_film().pixel_bounds().area().max(0) as u64;
        let spp = data.sampler_prototype.samples_per_pixel() as u64;
        let progress = ProgressReporter::new(spp * pixel_area, "Rendering", data.options.quiet);

        self.render_with_progress(&progress);

        progress.done();
        info!("Rendering finished in {:.3}s", progress.elapsed_seconds());
    }

    /// Render the scene, counting every pixel sample taken in `progress`.
    ///
    /// * `progress` - Receives one unit of work per pixel sample.
    fn render_with_progress(&self, progress: &ProgressReporter) {
        let data = self.get_data();
        let film = data.camera.get_film();
        let pixel_bounds = film.pixel_bounds();
        let spp = data.sampler_prototype.samples_per_pixel();

        let n_threads = data.options.threads();
        let tile_size = data.options.tile_size.map_or_else(
            || default_tile_size(&pixel_bounds, n_threads),
            |t| t.max(1) as Int,
        );

        info!(
            "Rendering {} at {} samples per pixel with {} threads",
            pixel_bounds, spp, n_threads
        );
        debug!("Tile size {tile_size}");

        // Sampler and scratch buffer of each worker thread. These are kept
        // across waves.
        let mut worker_state: WorkerLocal<(Box<dyn Sampler>, ScratchBuffer)> =
            WorkerLocal::new(n_threads);

        for (wave_start, wave_end) in Waves::new(spp) {
            debug!("Starting wave [{wave_start}, {wave_end})");

            parallel_for_2d(
                &pixel_bounds,
                tile_size,
                &mut worker_state,
                || (data.sampler_prototype.clone_sampler(), ScratchBuffer::new()),
                |tile, (sampler, scratch_buffer)| {
                    for p_pixel in *tile {
                        for sample_index in wave_start..wave_end {
                            sampler.start_pixel_sample(&p_pixel, sample_index);
                            self.evaluate_pixel_sample(
                                &p_pixel,
                                sample_index,
                                sampler.as_mut(),
                                scratch_buffer,
                            );
                            scratch_buffer.reset();
                        }
                    }
                    progress.update((wave_end - wave_start) as u64 * tile.area().max(0) as u64);
                },
            );

            if wave_end == spp || data.options.write_partial_images {
                write_image(data, progress, wave_end);
            }
        }
    }
}

/// Writes the film with metadata for the samples rendered so far. Failures
/// are logged.
///
/// * `data`              - The integrator data.
/// * `progress`          - Progress of the render.
/// * `samples_per_pixel` - Number of samples taken in every pixel so far.
fn write_image(data: &ImageTileIntegratorData, progress: &ProgressReporter, samples_per_pixel: usize) {
    let film = data.camera.get_film();

    let mut metadata = ImageMetadata {
        render_time_in_seconds: Some(progress.elapsed_seconds() as Float),
        samples_per_pixel: Some(samples_per_pixel),
        pixel_bounds: Some(film.pixel_bounds()),
        full_resolution: Some(film.full_resolution()),
        ..Default::default()
    };
    data.camera.init_metadata(&mut metadata);

    info!("Writing image with {samples_per_pixel} samples per pixel");
    if let Err(err) = film.write_image(&metadata, 1.0 / samples_per_pixel as Float) {
        error!("Unable to write image. {err}");
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::stubs::*;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    proptest! {
        #[test]
        fn waves_cover_all_samples(spp in 1_usize..2000) {
            let waves: Vec<_> = Waves::new(spp).collect();
            prop_assert_eq!(waves[0].0, 0);
            prop_assert_eq!(waves[waves.len() - 1].1, spp);
            for w in waves.windows(2) {
                prop_assert_eq!(w[0].1, w[1].0);
            }
            for (start, end) in waves.iter() {
                prop_assert!(start < end);
                prop_assert!(end - start <= MAX_WAVE_SIZE);
            }
        }
    }

    #[test]
    fn wave_schedule() {
        let waves: Vec<_> = Waves::new(10).collect();
        assert_eq!(waves, vec![(0, 1), (1, 2), (2, 4), (4, 8), (8, 10)]);

        let sizes: Vec<_> = Waves::new(200).map(|(s, e)| e - s).collect();
        assert_eq!(sizes, vec![1, 1, 2, 4, 8, 16, 32, 64, 64, 8]);
        assert_eq!(sizes.iter().sum::<usize>(), 200);

        assert_eq!(Waves::new(0).count(), 0);
        assert_eq!(Waves::new(1).collect::<Vec<_>>(), vec![(0, 1)]);
    }

    /// Records which sample indices it was asked for, per pixel.
    struct CountingIntegrator {
        data: ImageTileIntegratorData,
        samples: Mutex<HashMap<Point2i, Vec<usize>>>,
    }

    impl Integrator for CountingIntegrator {
        fn render(&self) {
            ImageTileIntegrator::render(self);
        }
    }

    impl ImageTileIntegrator for CountingIntegrator {
        fn get_data(&self) -> &ImageTileIntegratorData {
            &self.data
        }

        fn evaluate_pixel_sample(
            &self,
            p_pixel: &Point2i,
            sample_index: usize,
            sampler: &mut dyn Sampler,
            scratch_buffer: &mut ScratchBuffer,
        ) {
            assert_eq!(sampler.get_data().current_pixel, *p_pixel);
            assert_eq!(sampler.get_data().current_pixel_sample_index, sample_index);
            // Memory stays bounded only if the buffer is reset after every
            // sample.
            scratch_buffer.alloc_slice(16, 0.0 as Float);
            assert!(scratch_buffer.allocated_bytes() < 4096);

            self.samples
                .lock()
                .unwrap()
                .entry(*p_pixel)
                .or_default()
                .push(sample_index);
        }
    }

    fn counting_integrator(
        film: Arc<RecordingFilm>,
        spp: usize,
        options: Options,
    ) -> CountingIntegrator {
        CountingIntegrator {
            data: ImageTileIntegratorData::new(
                IntegratorBase::new(None, vec![]),
                Arc::new(StubCamera::new(film, false)),
                Box::new(StubSampler::new(spp)),
                options,
            ),
            samples: Mutex::new(HashMap::new()),
        }
    }

    #[test]
    fn every_pixel_gets_every_sample_in_order() {
        for n_threads in [1, 3] {
            let film = RecordingFilm::new(Bounds2i::new(Point2i::new(-2, 1), Point2i::new(7, 6)));
            let options = Options {
                n_threads,
                tile_size: Some(2),
                quiet: true,
                ..Default::default()
            };
            let integrator = counting_integrator(film.clone(), 10, options);
            Integrator::render(&integrator);

            let samples = integrator.samples.into_inner().unwrap();
            assert_eq!(samples.len(), 9 * 5);
            for indices in samples.values() {
                assert_eq!(*indices, (0..10).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn progress_counts_every_pixel_sample() {
        let bounds = Bounds2i::new(Point2i::new(-2, 1), Point2i::new(7, 6));
        for (n_threads, tile_size) in [(1, 1), (3, 2), (4, 4), (2, 7), (3, 32)] {
            let film = RecordingFilm::new(bounds);
            let options = Options {
                n_threads,
                tile_size: Some(tile_size),
                quiet: true,
                ..Default::default()
            };
            let integrator = counting_integrator(film, 10, options);
            let progress = ProgressReporter::new(10 * 9 * 5, "test", true);

            integrator.render_with_progress(&progress);

            assert_eq!(
                progress.completed(),
                progress.total(),
                "{n_threads} threads, tile size {tile_size}"
            );
        }
    }

    #[test]
    fn writes_only_final_image_by_default() {
        let film = RecordingFilm::new(Bounds2i::new(Point2i::new(0, 0), Point2i::new(3, 3)));
        let options = Options {
            n_threads: 1,
            quiet: true,
            ..Default::default()
        };
        Integrator::render(&counting_integrator(film.clone(), 10, options));

        let writes = film.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        let (metadata, splat_scale) = &writes[0];
        assert_eq!(metadata.samples_per_pixel, Some(10));
        assert_eq!(*splat_scale, 0.1);
        assert!(metadata.render_time_in_seconds.unwrap() >= 0.0);
        assert_eq!(metadata.pixel_bounds, Some(film.pixel_bounds()));
        assert_eq!(metadata.strings.get("camera").map(String::as_str), Some("stub"));
    }

    #[test]
    fn writes_after_every_wave_with_partial_images() {
        let film = RecordingFilm::new(Bounds2i::new(Point2i::new(0, 0), Point2i::new(3, 3)));
        let options = Options {
            n_threads: 2,
            quiet: true,
            write_partial_images: true,
            ..Default::default()
        };
        Integrator::render(&counting_integrator(film.clone(), 10, options));

        let spp: Vec<_> = film
            .writes
            .lock()
            .unwrap()
            .iter()
            .map(|(m, _)| m.samples_per_pixel.unwrap())
            .collect();
        assert_eq!(spp, vec![1, 2, 4, 8, 10]);
    }

    #[test]
    fn zero_samples_per_pixel_renders_nothing() {
        let film = RecordingFilm::new(Bounds2i::new(Point2i::new(0, 0), Point2i::new(3, 3)));
        let options = Options {
            n_threads: 1,
            quiet: true,
            write_partial_images: true,
            ..Default::default()
        };
        let integrator = counting_integrator(film.clone(), 0, options);
        Integrator::render(&integrator);

        assert!(integrator.samples.into_inner().unwrap().is_empty());
        assert!(film.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_pixel_bounds_still_writes() {
        let film = RecordingFilm::new(Bounds2i::new(Point2i::new(0, 0), Point2i::new(0, 4)));
        let options = Options {
            n_threads: 2,
            quiet: true,
            ..Default::default()
        };
        let integrator = counting_integrator(film.clone(), 3, options);
        Integrator::render(&integrator);

        assert!(integrator.samples.into_inner().unwrap().is_empty());
        assert_eq!(film.writes.lock().unwrap().len(), 1);
    }
}
