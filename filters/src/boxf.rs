//! Box Filter

use pbrt_core::filter::*;
use pbrt_core::geometry::*;
use pbrt_core::pbrt::*;

/// Implements the box filter which weights all samples within its square
/// extent equally.
pub struct BoxFilter {
    /// Filter data.
    pub data: FilterData,
}

impl BoxFilter {
    /// Returns a new instance of `BoxFilter`.
    ///
    /// * `radius` - Radius of the filter in x and y directions; beyond this
    ///              filter is 0.
    pub fn new(radius: Vector2f) -> Self {
        Self {
            data: FilterData::new(radius),
        }
    }
}

impl Default for BoxFilter {
    /// A box covering exactly one pixel.
    fn default() -> Self {
        Self::new(Vector2f::new(0.5, 0.5))
    }
}

impl Filter for BoxFilter {
    /// Return the filter parameters.
    fn get_data(&self) -> &FilterData {
        &self.data
    }

    /// Returns value of the filter at a given point.
    ///
    /// * `p` - The position of the sample point relative to the center of the
    ///         filter.
    fn evaluate(&self, p: &Point2f) -> Float {
        let r = self.data.radius;
        if p.x.abs() <= r.x && p.y.abs() <= r.y {
            1.0
        } else {
            0.0
        }
    }

    /// Samples the filter uniformly. Every sample has unit weight.
    ///
    /// * `u` - The random sample point.
    fn sample(&self, u: &Point2f) -> FilterSample {
        let r = self.data.radius;
        let p = Point2f::new(lerp(u.x, -r.x, r.x), lerp(u.y, -r.y, r.y));
        FilterSample::new(p, 1.0)
    }

    /// Returns the area of the box.
    fn integral(&self) -> Float {
        4.0 * self.data.radius.x * self.data.radius.y
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
            let filter = BoxFilter::new(Vector2f::new(1.5, 0.5));
            let fs = filter.sample(&Point2f::new(ux, uy));
            prop_assert!(fs.p.x.abs() <= 1.5);
            prop_assert!(fs.p.y.abs() <= 0.5);
            prop_assert_eq!(fs.weight, 1.0);
            prop_assert_eq!(filter.evaluate(&fs.p), 1.0);
        }
    }

    #[test]
    fn evaluate_is_zero_outside_radius() {
        let filter = BoxFilter::default();
        assert_eq!(filter.evaluate(&Point2f::new(0.25, -0.5)), 1.0);
        assert_eq!(filter.evaluate(&Point2f::new(0.75, 0.0)), 0.0);
        assert_eq!(filter.radius(), Vector2f::new(0.5, 0.5));
    }

    #[test]
    fn sample_maps_unit_square_to_extent() {
        let filter = BoxFilter::new(Vector2f::new(2.0, 1.0));
        assert_eq!(filter.sample(&Point2f::new(0.0, 0.0)).p, Point2f::new(-2.0, -1.0));
        assert_eq!(filter.sample(&Point2f::new(0.5, 0.5)).p, Point2f::new(0.0, 0.0));
    }

    #[test]
    fn integral_is_area() {
        assert!(approx_eq!(Float, BoxFilter::default().integral(), 1.0));
        assert!(approx_eq!(Float, BoxFilter::new(Vector2f::new(2.0, 1.0)).integral(), 8.0));
    }
}
