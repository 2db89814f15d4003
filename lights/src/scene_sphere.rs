//! Scene Bounding Sphere

use arc_swap::ArcSwapOption;
use pbrt_core::geometry::*;
use pbrt_core::pbrt::*;

/// Bounding sphere of the scene recorded by a light during preprocessing.
pub(crate) struct SceneSphere {
    sphere: ArcSwapOption<(Point3f, Float)>,
}

impl SceneSphere {
    /// Create a new `SceneSphere` that is not yet set.
    pub(crate) const fn new() -> Self {
        Self {
            sphere: ArcSwapOption::const_empty(),
        }
    }

    /// Records the bounding sphere of the scene bounds.
    ///
    /// * `scene_bounds` - World space bounds of the scene.
    pub(crate) fn set(&self, scene_bounds: &Bounds3f) {
        let (center, radius) = scene_bounds.bounding_sphere();
        debug!("Scene bounding sphere center {center}, radius {radius}");
        self.sphere.store(Some((center, radius).into()));
    }

    /// Returns the center and radius of the sphere. A unit sphere at the
    /// origin is returned before `set()` is called.
    pub(crate) fn get(&self) -> (Point3f, Float) {
        self.sphere.load_full().map_or((Point3f::ZERO, 1.0), |s| *s)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
