//! Integrator

mod image_tile_integrator;
mod ray_integrator;

#[cfg(test)]
mod stubs;

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::pbrt::*;
use crate::primitive::*;

// Re-export.
pub use image_tile_integrator::*;
pub use ray_integrator::*;

/// Integrator interface.
pub trait Integrator: Send + Sync {
    /// Render the scene.
    fn render(&self);
}

/// Scene state shared by all integrators: the aggregate and the lights.
pub struct IntegratorBase {
    /// The scene geometry. `None` for an empty scene.
    pub aggregate: Option<ArcPrimitive>,

    /// All lights in the scene.
    pub lights: Vec<ArcLight>,

    /// Indices into `lights` of the lights with no finite bound.
    pub infinite_lights: Vec<usize>,
}

impl IntegratorBase {
    /// Create a new `IntegratorBase`. Every light is preprocessed once
    /// against the bounds of the aggregate.
    ///
    /// * `aggregate` - The scene geometry.
    /// * `lights`    - All lights in the scene.
    pub fn new(aggregate: Option<ArcPrimitive>, lights: Vec<ArcLight>) -> Self {
        let scene_bounds = aggregate.as_ref().map_or(Bounds3f::EMPTY, |a| a.bounds());

        let mut infinite_lights = vec![];
        for (i, light) in lights.iter().enumerate() {
            light.preprocess(&scene_bounds);
            if light.get_type().is_infinite() {
                infinite_lights.push(i);
            }
        }

        info!(
            "Scene has {} lights ({} infinite)",
            lights.len(),
            infinite_lights.len()
        );

        Self {
            aggregate,
            lights,
            infinite_lights,
        }
    }

    /// Returns an iterator over the infinite lights.
    pub fn infinite_lights(&self) -> impl Iterator<Item = &ArcLight> {
        self.infinite_lights.iter().map(|&i| &self.lights[i])
    }

    /// Returns the closest intersection of a ray with the scene.
    ///
    /// * `ray`   - The ray.
    /// * `t_max` - Maximum parametric distance along the ray.
    pub fn intersect(&self, ray: &Ray, t_max: Float) -> Option<ShapeIntersection> {
        self.aggregate.as_ref().and_then(|a| a.intersect(ray, t_max))
    }

    /// Returns true if a ray hits anything in the scene.
    ///
    /// * `ray`   - The ray.
    /// * `t_max` - Maximum parametric distance along the ray.
    pub fn intersects(&self, ray: &Ray, t_max: Float) -> bool {
        self.aggregate.as_ref().map_or(false, |a| a.intersects(ray, t_max))
    }

    /// Returns true if nothing blocks the segment between a surface point and
    /// another point.
    ///
    /// * `p0` - The surface point.
    /// * `p1` - The other point.
    pub fn unoccluded(&self, p0: &Hit, p1: &Point3f) -> bool {
        !self.intersects(&p0.spawn_ray_to_point(p1), 1.0 - SHADOW_EPSILON)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Records the bounds it was preprocessed with.
    struct RecordingLight {
        light_type: LightType,
        calls: AtomicUsize,
        bounds: Mutex<Option<Bounds3f>>,
    }

    impl RecordingLight {
        fn new(light_type: LightType) -> Arc<Self> {
            Arc::new(Self {
                light_type,
                calls: AtomicUsize::new(0),
                bounds: Mutex::new(None),
            })
        }
    }

    impl Light for RecordingLight {
        fn preprocess(&self, scene_bounds: &Bounds3f) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.bounds.lock().unwrap() = Some(*scene_bounds);
        }

        fn get_type(&self) -> LightType {
            self.light_type
        }

        fn sample_li(
            &self,
            _hit: &Hit,
            _u: &Point2f,
            _lambda: &SampledWavelengths,
        ) -> Option<LightLiSample> {
            None
        }

        fn phi(&self, _lambda: &SampledWavelengths) -> SampledSpectrum {
            SampledSpectrum::ZERO
        }
    }

    /// Unit cube that blocks everything.
    struct Wall;

    impl Primitive for Wall {
        fn bounds(&self) -> Bounds3f {
            Bounds3f::new(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0))
        }

        fn intersect(&self, r: &Ray, t_max: Float) -> Option<ShapeIntersection> {
            if t_max < 0.5 {
                return None;
            }
            let p = r.at(0.5);
            let si = SurfaceInteraction::new(
                p,
                Vector3f::default(),
                Point2f::default(),
                -r.d,
                Normal3f::new(0.0, 0.0, 1.0),
                r.time,
            );
            Some(ShapeIntersection::new(si, 0.5))
        }
    }

    fn ray() -> Ray {
        Ray::new(Point3f::default(), Vector3f::new(0.0, 0.0, 1.0), 0.0)
    }

    #[test]
    fn empty_scene_reports_no_hits() {
        let base = IntegratorBase::new(None, vec![]);
        assert!(base.intersect(&ray(), INFINITY).is_none());
        assert!(!base.intersects(&ray(), INFINITY));
        assert_eq!(base.infinite_lights().count(), 0);
    }

    #[test]
    fn queries_delegate_to_aggregate() {
        let base = IntegratorBase::new(Some(Arc::new(Wall)), vec![]);
        let si = base.intersect(&ray(), INFINITY).unwrap();
        assert_eq!(si.t_hit, 0.5);
        assert!(base.intersects(&ray(), INFINITY));
        assert!(!base.intersects(&ray(), 0.25));
    }

    #[test]
    fn lights_are_preprocessed_once_and_classified() {
        let distant = RecordingLight::new(LightType::DELTA_DIRECTION_LIGHT);
        let infinite = RecordingLight::new(LightType::INFINITE_LIGHT);
        let lights: Vec<ArcLight> = vec![distant.clone(), infinite.clone()];

        let base = IntegratorBase::new(Some(Arc::new(Wall)), lights);

        assert_eq!(base.lights.len(), 2);
        assert_eq!(base.infinite_lights, vec![1]);
        for light in [&distant, &infinite] {
            assert_eq!(light.calls.load(Ordering::SeqCst), 1);
            assert_eq!(*light.bounds.lock().unwrap(), Some(Wall.bounds()));
        }
    }

    #[test]
    fn empty_scene_preprocesses_with_empty_bounds() {
        let light = RecordingLight::new(LightType::INFINITE_LIGHT);
        let _base = IntegratorBase::new(None, vec![light.clone()]);
        assert_eq!(*light.bounds.lock().unwrap(), Some(Bounds3f::EMPTY));
    }

    #[test]
    fn unoccluded_respects_blockers() {
        let hit = Hit::new(
            Point3f::default(),
            0.0,
            Vector3f::default(),
            Vector3f::new(0.0, 0.0, 1.0),
            Normal3f::new(0.0, 0.0, 1.0),
        );
        let p = Point3f::new(0.0, 0.0, 2.0);
        assert!(IntegratorBase::new(None, vec![]).unoccluded(&hit, &p));
        assert!(!IntegratorBase::new(Some(Arc::new(Wall)), vec![]).unoccluded(&hit, &p));
    }
}
