//! Surface Interactions

use super::Hit;
use crate::geometry::*;
use crate::pbrt::*;
use std::fmt;

/// SurfaceInteraction represents geometry of a particular point on a surface.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SurfaceInteraction {
    /// The common interaction data.
    pub hit: Hit,

    /// The uv coordinates from surface parametrization.
    pub uv: Point2f,

    /// Shading normal. Equals the geometric normal unless perturbed.
    pub shading_n: Normal3f,
}

impl SurfaceInteraction {
    /// Create a new surface interaction.
    ///
    /// * `p`       - Point of interaction.
    /// * `p_error` - Floating point error for ray intersection points.
    /// * `uv`      - The uv coordinates from surface parametrization.
    /// * `wo`      - The negative ray direction.
    /// * `n`       - Surface normal.
    /// * `time`    - Time when interaction occurred.
    pub fn new(
        p: Point3f,
        p_error: Vector3f,
        uv: Point2f,
        wo: Vector3f,
        n: Normal3f,
        time: Float,
    ) -> Self {
        Self {
            hit: Hit::new(p, time, p_error, wo, n),
            uv,
            shading_n: n,
        }
    }

    /// Replaces the shading normal, flipping it into the hemisphere of the
    /// geometric normal.
    ///
    /// * `ns` - The shading normal.
    pub fn set_shading_normal(&mut self, ns: Normal3f) {
        self.shading_n = ns.face_forward(&Vector3f::from(self.hit.n));
    }
}

impl fmt::Display for SurfaceInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SurfaceInteraction<p: {}, n: {}, uv: {}, time: {}>",
            self.hit.p, self.hit.n, self.uv, self.hit.time
        )
    }
}
