//! 3D Axis Aligned Bounding Boxes.

use crate::geometry::*;
use crate::pbrt::*;
use std::fmt;

/// 3D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3f {
    /// Minimum bounds.
    pub p_min: Point3f,

    /// Maximum bounds.
    pub p_max: Point3f,
}

impl Bounds3f {
    /// 3-D bounding box where minimum and maximum bounds are maximum and minimum
    /// floating point values. This is so we can easily grow the bounding box
    /// from nothing iteratively.
    pub const EMPTY: Self = Self {
        p_min: Point3f::new(Float::MAX, Float::MAX, Float::MAX),
        p_max: Point3f::new(Float::MIN, Float::MIN, Float::MIN),
    };

    /// Creates a new 3D bounding box from 2 points.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point3f, p2: Point3f) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns true if the box is empty along any axis.
    pub fn is_empty(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    /// Returns true if a point is inside the bounding box.
    ///
    /// * `p` - The point.
    pub fn inside(&self, p: &Point3f) -> bool {
        p.x >= self.p_min.x
            && p.x <= self.p_max.x
            && p.y >= self.p_min.y
            && p.y <= self.p_max.y
            && p.z >= self.p_min.z
            && p.z <= self.p_max.z
    }

    /// Return a bounding box containing itself and a point.
    ///
    /// * `p` - The point.
    pub fn union_point(&self, p: &Point3f) -> Self {
        Self {
            p_min: self.p_min.min(p),
            p_max: self.p_max.max(p),
        }
    }

    /// Return a bounding box containing both bounding boxes.
    ///
    /// * `other` - The other bounding box.
    pub fn union(&self, other: &Bounds3f) -> Self {
        Self {
            p_min: self.p_min.min(&other.p_min),
            p_max: self.p_max.max(&other.p_max),
        }
    }

    /// Returns the center and radius of a sphere that bounds the box. An empty
    /// box returns a zero radius.
    pub fn bounding_sphere(&self) -> (Point3f, Float) {
        if self.is_empty() {
            return (Point3f::ZERO, 0.0);
        }

        let center = self.p_min + (self.p_max - self.p_min) * 0.5;
        let radius = if self.inside(&center) {
            center.distance(&self.p_max)
        } else {
            0.0
        };
        (center, radius)
    }
}

impl Default for Bounds3f {
    /// Returns an empty bounding box.
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for Bounds3f {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.p_min, self.p_max)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn default_bounds_is_empty() {
        assert!(Bounds3f::default().is_empty());
        assert_eq!(Bounds3f::default().bounding_sphere(), (Point3f::ZERO, 0.0));
    }

    #[test]
    fn union_grows_empty_bounds_to_point() {
        let p = Point3f::new(1.0, 2.0, 3.0);
        let b = Bounds3f::EMPTY.union_point(&p);
        assert_eq!(b.p_min, p);
        assert_eq!(b.p_max, p);
        assert!(!b.is_empty());
    }

    #[test]
    fn bounding_sphere_of_cube_reaches_corners() {
        let b = Bounds3f::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 1.0, 1.0));
        let (center, radius) = b.bounding_sphere();
        assert_eq!(center, Point3f::ZERO);
        assert!(approx_eq!(Float, radius, 3.0_f32.sqrt(), epsilon = 1e-6));
    }
}
