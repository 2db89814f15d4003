//! Filter

use crate::geometry::*;
use crate::pbrt::*;
use std::fmt;
use std::sync::Arc;

/// Filter interface.
pub trait Filter: Send + Sync {
    /// Return the filter parameters.
    fn get_data(&self) -> &FilterData;

    /// Returns value of the filter at a given point.
    ///
    /// * `p` - The position of the sample point relative to the center of the
    ///         filter. The point should be within the filter's extent.
    fn evaluate(&self, p: &Point2f) -> Float;

    /// Samples an offset from the filter center distributed according to the
    /// filter, along with the weight to apply to a sample taken there.
    ///
    /// * `u` - The random sample point.
    fn sample(&self, u: &Point2f) -> FilterSample;

    /// Returns the integral of the filter over its extent.
    fn integral(&self) -> Float;

    /// Returns the radius of the filter in x and y directions.
    fn radius(&self) -> Vector2f {
        self.get_data().radius
    }
}

/// Atomic reference counted `Filter`.
pub type ArcFilter = Arc<dyn Filter>;

/// Data for filters centered at origin (0, 0).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FilterData {
    /// Radius of the filter in x and y directions; beyond this filter is 0.
    pub radius: Vector2f,

    /// Reciprocal of filter radii.
    pub inv_radius: Vector2f,
}

impl FilterData {
    /// Returns a new instance of `FilterData`.
    ///
    /// * `radius` - Radius of the filter in x and y directions; beyond this
    ///              filter is 0.
    pub fn new(radius: Vector2f) -> Self {
        Self {
            radius,
            inv_radius: Vector2f::new(1.0 / radius.x, 1.0 / radius.y),
        }
    }
}

/// Offset sampled from a filter and the weight of a sample taken there.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FilterSample {
    /// Offset from the filter center.
    pub p: Point2f,

    /// Sample weight.
    pub weight: Float,
}

impl FilterSample {
    /// Create a new `FilterSample`.
    ///
    /// * `p`      - Offset from the filter center.
    /// * `weight` - Sample weight.
    pub fn new(p: Point2f, weight: Float) -> Self {
        Self { p, weight }
    }
}

impl fmt::Display for FilterSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FilterSample<p: {}, weight: {}>", self.p, self.weight)
    }
}
