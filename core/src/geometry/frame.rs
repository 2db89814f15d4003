//! Orthonormal Frames

use crate::geometry::*;

/// An orthonormal basis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// First tangent axis.
    pub x: Vector3f,

    /// Second tangent axis.
    pub y: Vector3f,

    /// Axis the frame is built around.
    pub z: Vector3f,
}

impl Frame {
    /// Builds a frame whose z-axis is the given unit vector.
    ///
    /// * `z` - The unit z-axis.
    pub fn from_z(z: Vector3f) -> Self {
        let (x, y) = coordinate_system(&z);
        Self { x, y, z }
    }

    /// Transforms a vector from this frame's local coordinates to world space.
    ///
    /// * `v` - The local vector.
    pub fn from_local(&self, v: &Vector3f) -> Vector3f {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    /// Transforms a world space vector into this frame's local coordinates.
    ///
    /// * `v` - The world space vector.
    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.x), v.dot(&self.y), v.dot(&self.z))
    }
}

/// Returns two unit vectors that together with the given unit vector form an
/// orthonormal basis (Duff et al., "Building an Orthonormal Basis, Revisited").
///
/// * `v1` - A unit vector.
pub fn coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let sign = 1.0_f32.copysign(v1.z);
    let a = -1.0 / (sign + v1.z);
    let b = v1.x * v1.y * a;
    let v2 = Vector3f::new(1.0 + sign * v1.x * v1.x * a, sign * b, -sign * v1.x);
    let v3 = Vector3f::new(b, sign + v1.y * v1.y * a, -v1.y);
    (v2, v3)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbrt::*;
    use float_cmp::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn frame_is_orthonormal(x in -1.0_f32..1.0, y in -1.0_f32..1.0, z in -1.0_f32..1.0) {
            let v = Vector3f::new(x, y, z);
            prop_assume!(v.length() > 1e-3);
            let f = Frame::from_z(v.normalize());
            prop_assert!(approx_eq!(Float, f.x.length(), 1.0, epsilon = 1e-4));
            prop_assert!(approx_eq!(Float, f.y.length(), 1.0, epsilon = 1e-4));
            prop_assert!(f.x.dot(&f.y).abs() < 1e-4);
            prop_assert!(f.x.dot(&f.z).abs() < 1e-4);
            prop_assert!(f.y.dot(&f.z).abs() < 1e-4);
        }

        #[test]
        fn local_round_trip_preserves_vector(x in -1.0_f32..1.0, y in -1.0_f32..1.0) {
            let f = Frame::from_z(Vector3f::new(0.0, 0.6, 0.8));
            let v = Vector3f::new(x, y, 0.5);
            let w = f.to_local(&f.from_local(&v));
            prop_assert!((w - v).length() < 1e-4);
        }
    }
}
