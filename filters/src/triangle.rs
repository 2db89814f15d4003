//! Triangle Filter

use pbrt_core::filter::*;
use pbrt_core::geometry::*;
use pbrt_core::pbrt::*;
use pbrt_core::sampling::*;

/// Implements the triangle filter in which the weight falls off linearly from
/// the filter center over the square extent of the filter.
pub struct TriangleFilter {
    /// Filter data.
    pub data: FilterData,
}

impl TriangleFilter {
    /// Returns a new instance of `TriangleFilter`.
    ///
    /// * `radius` - Radius of the filter in x and y directions; beyond this
    ///              filter is 0.
    pub fn new(radius: Vector2f) -> Self {
        Self {
            data: FilterData::new(radius),
        }
    }
}

impl Default for TriangleFilter {
    fn default() -> Self {
        Self::new(Vector2f::new(2.0, 2.0))
    }
}

impl Filter for TriangleFilter {
    /// Return the filter parameters.
    fn get_data(&self) -> &FilterData {
        &self.data
    }

    /// Returns value of the filter at a given point.
    ///
    /// * `p` - The position of the sample point relative to the center of the
    ///         filter. The point should be within the filter's extent.
    fn evaluate(&self, p: &Point2f) -> Float {
        (self.data.radius.x - p.x.abs()).max(0.0) * (self.data.radius.y - p.y.abs()).max(0.0)
    }

    /// Samples the tent in each dimension. Samples are distributed exactly
    /// like the filter so every sample has unit weight.
    ///
    /// * `u` - The random sample point.
    fn sample(&self, u: &Point2f) -> FilterSample {
        let p = Point2f::new(
            sample_tent(u.x, self.data.radius.x),
            sample_tent(u.y, self.data.radius.y),
        );
        FilterSample::new(p, 1.0)
    }

    fn integral(&self) -> Float {
        let r = self.data.radius;
        r.x * r.x * r.y * r.y
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn samples_lie_within_radius(ux in 0.0..1.0 as Float, uy in 0.0..1.0 as Float) {
            let filter = TriangleFilter::default();
            let fs = filter.sample(&Point2f::new(ux, uy));
            prop_assert!(fs.p.x.abs() <= 2.0);
            prop_assert!(fs.p.y.abs() <= 2.0);
            prop_assert_eq!(fs.weight, 1.0);
        }
    }

    #[test]
    fn evaluate_peaks_at_center() {
        let filter = TriangleFilter::default();
        assert_eq!(filter.evaluate(&Point2f::new(0.0, 0.0)), 4.0);
        assert_eq!(filter.evaluate(&Point2f::new(1.0, 0.0)), 2.0);
        assert_eq!(filter.evaluate(&Point2f::new(2.5, 0.0)), 0.0);
    }

    #[test]
    fn center_sample_maps_to_center() {
        let filter = TriangleFilter::new(Vector2f::new(1.5, 1.0));
        let fs = filter.sample(&Point2f::new(0.5, 0.5));
        assert!(approx_eq!(Float, fs.p.x, 0.0, epsilon = 1e-6));
        assert!(approx_eq!(Float, fs.p.y, 0.0, epsilon = 1e-6));
    }

    #[test]
    fn integral_matches_riemann_sum() {
        let filter = TriangleFilter::new(Vector2f::new(1.5, 1.0));
        let n = 300;
        let (dx, dy) = (3.0 / n as Float, 2.0 / n as Float);
        let mut sum = 0.0;
        for j in 0..n {
            for i in 0..n {
                let p = Point2f::new(-1.5 + (i as Float + 0.5) * dx, -1.0 + (j as Float + 0.5) * dy);
                sum += filter.evaluate(&p) * dx * dy;
            }
        }
        assert!(approx_eq!(Float, sum, filter.integral(), epsilon = 1e-2));
    }
}
