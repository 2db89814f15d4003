//! Interactions

use crate::geometry::*;
use crate::pbrt::*;

mod surface_interaction;

pub use surface_interaction::*;

/// Hit provides common data shared by interactions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Hit {
    /// Point of interaction.
    pub p: Point3f,

    /// Time when interaction occurred.
    pub time: Float,

    /// Floating point error for ray intersection points.
    pub p_error: Vector3f,

    /// The negative ray direction (outgoing direction used when computing
    /// lighting at points).
    pub wo: Vector3f,

    /// Surface normal at the point `p`.
    pub n: Normal3f,
}

impl Hit {
    /// Create a new `Hit`.
    ///
    /// * `p`       - Point of interaction.
    /// * `time`    - Time when interaction occurred.
    /// * `p_error` - Floating point error for ray intersection points.
    /// * `wo`      - The negative ray direction.
    /// * `n`       - Surface normal at the point `p`.
    pub fn new(p: Point3f, time: Float, p_error: Vector3f, wo: Vector3f, n: Normal3f) -> Self {
        Self {
            p,
            time,
            p_error,
            wo,
            n,
        }
    }

    /// Spawns a ray leaving the hit point in a given direction.
    ///
    /// * `d` - Outgoing direction.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        let origin = offset_ray_origin(&self.p, &self.p_error, &self.n, d);
        Ray::new(origin, *d, self.time)
    }

    /// Spawns a ray towards another point. The ray reaches the point at
    /// parameter `t = 1`; shadow tests should stop at `1 - SHADOW_EPSILON`.
    ///
    /// * `p` - The target point.
    pub fn spawn_ray_to_point(&self, p: &Point3f) -> Ray {
        let d = *p - self.p;
        let origin = offset_ray_origin(&self.p, &self.p_error, &self.n, &d);
        Ray::new(origin, *p - origin, self.time)
    }
}

/// Offsets a ray origin along the surface normal just far enough to lie on the
/// side of the surface the ray is leaving through, given the floating point
/// error bounds of the hit point.
///
/// * `p`       - The hit point.
/// * `p_error` - Floating point error bounds of `p`.
/// * `n`       - Surface normal.
/// * `w`       - Ray direction.
pub fn offset_ray_origin(p: &Point3f, p_error: &Vector3f, n: &Normal3f, w: &Vector3f) -> Point3f {
    let nv = Vector3f::from(*n);
    let d = nv.abs().dot(p_error);
    let mut offset = nv * d;
    if w.dot(&nv) < 0.0 {
        offset = -offset;
    }
    let po = *p + offset;

    // Round offset point away from `p`.
    let round = |v: Float, o: Float| {
        if o > 0.0 {
            next_float_up(v)
        } else if o < 0.0 {
            next_float_down(v)
        } else {
            v
        }
    };
    Point3f::new(
        round(po.x, offset.x),
        round(po.y, offset.y),
        round(po.z, offset.z),
    )
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
