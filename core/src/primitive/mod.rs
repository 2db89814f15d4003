//! Primitive

use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use std::sync::Arc;

/// Intersectable scene geometry.
pub trait Primitive: Send + Sync {
    /// Returns a bounding box in the world space.
    fn bounds(&self) -> Bounds3f;

    /// Returns geometric details of the closest intersection of a ray with the
    /// primitive in `(0, t_max)`. If there is no intersection, `None` is
    /// returned.
    ///
    /// * `r`     - The ray.
    /// * `t_max` - Maximum parametric distance along the ray.
    fn intersect(&self, r: &Ray, t_max: Float) -> Option<ShapeIntersection>;

    /// Returns `true` if the ray intersects the primitive in `(0, t_max)`;
    /// otherwise `false`.
    ///
    /// * `r`     - The ray.
    /// * `t_max` - Maximum parametric distance along the ray.
    fn intersects(&self, r: &Ray, t_max: Float) -> bool {
        self.intersect(r, t_max).is_some()
    }
}

/// Atomic reference counted `Primitive`.
pub type ArcPrimitive = Arc<dyn Primitive>;

/// Closest intersection found along a ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeIntersection {
    /// The surface interaction.
    pub intr: SurfaceInteraction,

    /// Parametric distance to the hit.
    pub t_hit: Float,
}

impl ShapeIntersection {
    /// Create a new `ShapeIntersection`.
    ///
    /// * `intr`  - The surface interaction.
    /// * `t_hit` - Parametric distance to the hit.
    pub fn new(intr: SurfaceInteraction, t_hit: Float) -> Self {
        Self { intr, t_hit }
    }
}

/// Aggregate that tests every primitive it holds in turn.
pub struct PrimitiveList {
    /// The primitives.
    primitives: Vec<ArcPrimitive>,

    /// Union of the primitives' bounds.
    bounds: Bounds3f,
}

impl PrimitiveList {
    /// Create a new `PrimitiveList`.
    ///
    /// * `primitives` - The primitives.
    pub fn new(primitives: Vec<ArcPrimitive>) -> Self {
        let bounds = primitives
            .iter()
            .fold(Bounds3f::EMPTY, |b, p| b.union(&p.bounds()));
        Self { primitives, bounds }
    }

    /// Returns the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Returns true if the list holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl Primitive for PrimitiveList {
    fn bounds(&self) -> Bounds3f {
        self.bounds
    }

    fn intersect(&self, r: &Ray, t_max: Float) -> Option<ShapeIntersection> {
        let mut closest: Option<ShapeIntersection> = None;
        let mut t_max = t_max;
        for p in self.primitives.iter() {
            if let Some(si) = p.intersect(r, t_max) {
                t_max = si.t_hit;
                closest = Some(si);
            }
        }
        closest
    }

    fn intersects(&self, r: &Ray, t_max: Float) -> bool {
        self.primitives.iter().any(|p| p.intersects(r, t_max))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
