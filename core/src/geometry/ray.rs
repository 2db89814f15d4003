//! Rays

use crate::geometry::*;
use crate::pbrt::*;
use std::fmt;

/// A semi-infinite line with an optional pair of auxiliary rays.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Time value.
    pub time: Float,

    /// Auxilliary rays offset by one sample in x and y direction.
    pub differentials: Option<RayDifferential>,
}

/// Origins and directions of the rays offset by one pixel in x and y on the
/// film plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RayDifferential {
    /// Origin of ray offset in x-direction.
    pub rx_origin: Point3f,

    /// Origin of ray offset in y-direction.
    pub ry_origin: Point3f,

    /// Direction of ray offset in x-direction.
    pub rx_direction: Vector3f,

    /// Direction of ray offset in y-direction.
    pub ry_direction: Vector3f,
}

impl Ray {
    /// Returns a ray with no differentials.
    ///
    /// * `o`    - Origin.
    /// * `d`    - Direction.
    /// * `time` - Time value.
    pub fn new(o: Point3f, d: Vector3f, time: Float) -> Self {
        Self {
            o,
            d,
            time,
            differentials: None,
        }
    }

    /// Returns a ray with differentials.
    ///
    /// * `o`             - Origin.
    /// * `d`             - Direction.
    /// * `time`          - Time value.
    /// * `differentials` - Auxilliary rays offset by one pixel in x and y direction.
    pub fn new_with_differentials(
        o: Point3f,
        d: Vector3f,
        time: Float,
        differentials: RayDifferential,
    ) -> Self {
        Self {
            o,
            d,
            time,
            differentials: Some(differentials),
        }
    }

    /// Returns true if either the origin or direction has a NaN component.
    pub fn has_nans(&self) -> bool {
        self.o.has_nans() || self.d.has_nans()
    }

    /// Get position along the ray at given parameter.
    ///
    /// * `t` - Parameter to evaluate.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }

    /// Scale the differential rays to account for spacing between samples on
    /// the film plane. Does nothing when the ray carries no differentials.
    ///
    /// * `s` - The weight used to scale the differential rays.
    pub fn scale_differentials(&mut self, s: Float) {
        if let Some(d) = self.differentials {
            self.differentials = Some(RayDifferential {
                rx_origin: self.o + (d.rx_origin - self.o) * s,
                ry_origin: self.o + (d.ry_origin - self.o) * s,
                rx_direction: self.d + (d.rx_direction - self.d) * s,
                ry_direction: self.d + (d.ry_direction - self.d) * s,
            });
        }
    }
}

impl fmt::Display for Ray {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[o={}, d={}, time={}]", self.o, self.d, self.time)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_differentials_moves_offsets_toward_main_ray() {
        let mut ray = Ray::new_with_differentials(
            Point3f::ZERO,
            Vector3f::new(0.0, 0.0, 1.0),
            0.0,
            RayDifferential {
                rx_origin: Point3f::new(1.0, 0.0, 0.0),
                ry_origin: Point3f::new(0.0, 1.0, 0.0),
                rx_direction: Vector3f::new(1.0, 0.0, 1.0),
                ry_direction: Vector3f::new(0.0, 1.0, 1.0),
            },
        );

        ray.scale_differentials(0.5);

        let d = ray.differentials.unwrap();
        assert_eq!(d.rx_origin, Point3f::new(0.5, 0.0, 0.0));
        assert_eq!(d.ry_origin, Point3f::new(0.0, 0.5, 0.0));
        assert_eq!(d.rx_direction, Vector3f::new(0.5, 0.0, 1.0));
        assert_eq!(d.ry_direction, Vector3f::new(0.0, 0.5, 1.0));
    }

    #[test]
    fn scale_differentials_without_differentials_is_noop() {
        let mut ray = Ray::new(Point3f::ZERO, Vector3f::new(1.0, 0.0, 0.0), 0.0);
        let before = ray;
        ray.scale_differentials(0.125);
        assert_eq!(ray, before);
    }

    #[test]
    fn at_evaluates_along_direction() {
        let ray = Ray::new(Point3f::new(1.0, 1.0, 1.0), Vector3f::new(0.0, 2.0, 0.0), 0.0);
        assert_eq!(ray.at(1.5), Point3f::new(1.0, 4.0, 1.0));
    }
}
