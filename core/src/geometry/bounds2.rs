//! 2D Axis Aligned Bounding Boxes.

use crate::geometry::*;
use crate::pbrt::*;
use itertools::{iproduct, Product};
use num_traits::Num;
use std::fmt;
use std::ops::Range;

/// 2D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds2<T> {
    /// Minimum bounds.
    pub p_min: Point2<T>,

    /// Maximum bounds.
    pub p_max: Point2<T>,
}

/// 2-D bounding box containing `Float` points.
pub type Bounds2f = Bounds2<Float>;

/// 2-D bounding box containing `Int` points.
pub type Bounds2i = Bounds2<Int>;

impl<T: Num + PartialOrd + Copy> Bounds2<T> {
    /// Creates a new 2D bounding box from 2 points. The minimum and maximum bounds
    /// are used for each coordinate axis.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point2<T>, p2: Point2<T>) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns true if the box encloses no area, i.e. the maximum bound does not
    /// exceed the minimum bound along some axis.
    pub fn is_empty(&self) -> bool {
        self.p_min.x >= self.p_max.x || self.p_min.y >= self.p_max.y
    }

    /// Returns the vector along the box diagonal from the minimum point to
    /// the maximum point.
    pub fn diagonal(&self) -> Vector2<T> {
        self.p_max - self.p_min
    }

    /// Returns the area of the bounding box.
    pub fn area(&self) -> T {
        if self.is_empty() {
            T::zero()
        } else {
            let d = self.diagonal();
            d.x * d.y
        }
    }

    /// Returns true if a point is inside the bounding box. The upper boundary
    /// is considered out of bounds. This is useful for integer-typed bounds.
    ///
    /// * `p` - The point.
    pub fn contains_exclusive(&self, p: &Point2<T>) -> bool {
        p.x >= self.p_min.x && p.x < self.p_max.x && p.y >= self.p_min.y && p.y < self.p_max.y
    }

    /// Return a bounding box containing the intersection of both bounding boxes.
    ///
    /// * `other` - The other bounding box.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            p_min: self.p_min.max(&other.p_min),
            p_max: self.p_max.min(&other.p_max),
        }
    }
}

impl Bounds2i {
    /// Splits the box into square tiles of `tile_size` pixels in row-major order.
    /// Tiles on the right and bottom edges are clipped to the box. An empty
    /// box produces no tiles.
    ///
    /// * `tile_size` - Side length of a tile in pixels (clamped to at least 1).
    pub fn tiles(&self, tile_size: Int) -> Vec<Bounds2i> {
        if self.is_empty() {
            return vec![];
        }

        let tile_size = tile_size.max(1);
        let extent = self.diagonal();
        let n_x = (extent.x + tile_size - 1) / tile_size;
        let n_y = (extent.y + tile_size - 1) / tile_size;

        iproduct!(0..n_y, 0..n_x)
            .map(|(ty, tx)| {
                let p0 = Point2i::new(
                    self.p_min.x + tx * tile_size,
                    self.p_min.y + ty * tile_size,
                );
                let p1 = Point2i::new(
                    (p0.x + tile_size).min(self.p_max.x),
                    (p0.y + tile_size).min(self.p_max.y),
                );
                Bounds2i::new(p0, p1)
            })
            .collect()
    }
}

impl From<Bounds2i> for Bounds2f {
    /// Convert a `Bounds2i` to `Bounds2f`.
    ///
    /// * `b` - The `Bounds2i` to convert.
    fn from(b: Bounds2i) -> Self {
        Self {
            p_min: b.p_min.into(),
            p_max: b.p_max.into(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Bounds2<T> {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.p_min, self.p_max)
    }
}

/// An iterator that can step through integer coordinates in a bounding box
/// in a left-to-right (x-axis) and top-to-bottom (y-axis) scan order.
pub struct Bounds2iIterator {
    /// The iterator that will supply points.
    p: Product<Range<Int>, Range<Int>>,
}

impl IntoIterator for Bounds2i {
    type Item = Point2i;
    type IntoIter = Bounds2iIterator;

    /// Create an iterator for `Bounds2i`. Empty bounds yield no points.
    fn into_iter(self) -> Self::IntoIter {
        let (y_range, x_range) = if self.is_empty() {
            (0..0, 0..0)
        } else {
            (self.p_min.y..self.p_max.y, self.p_min.x..self.p_max.x)
        };
        Bounds2iIterator {
            p: iproduct!(y_range, x_range),
        }
    }
}

impl Iterator for Bounds2iIterator {
    type Item = Point2i;

    /// Get the next point.
    fn next(&mut self) -> Option<Self::Item> {
        self.p.next().map(|(y, x)| Point2i::new(x, y))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_orders_corners() {
        let b = Bounds2i::new(Point2i::new(3, -1), Point2i::new(-2, 4));
        assert_eq!(b.p_min, Point2i::new(-2, -1));
        assert_eq!(b.p_max, Point2i::new(3, 4));
    }

    #[test]
    fn area_of_degenerate_bounds2i_returns_zero() {
        let b = Bounds2i::new(Point2i::new(0, 0), Point2i::new(5, 0));
        assert!(b.is_empty());
        assert_eq!(b.area(), 0);
    }

    #[test]
    fn iterator_visits_pixels_in_scanline_order() {
        let b = Bounds2i::new(Point2i::new(1, 1), Point2i::new(3, 3));
        let pixels: Vec<Point2i> = b.into_iter().collect();
        assert_eq!(
            pixels,
            vec![
                Point2i::new(1, 1),
                Point2i::new(2, 1),
                Point2i::new(1, 2),
                Point2i::new(2, 2),
            ]
        );
    }

    #[test]
    fn iterator_over_zero_area_bounds_is_empty() {
        let b = Bounds2i::new(Point2i::new(2, 2), Point2i::new(2, 7));
        assert_eq!(b.into_iter().count(), 0);
    }

    #[test]
    fn tiles_of_empty_bounds_is_empty() {
        let b = Bounds2i::new(Point2i::new(0, 0), Point2i::new(0, 0));
        assert!(b.tiles(8).is_empty());
    }

    #[test]
    fn tiles_clip_to_bounds() {
        let b = Bounds2i::new(Point2i::new(0, 0), Point2i::new(5, 3));
        let tiles = b.tiles(4);
        assert_eq!(
            tiles,
            vec![
                Bounds2i::new(Point2i::new(0, 0), Point2i::new(4, 3)),
                Bounds2i::new(Point2i::new(4, 0), Point2i::new(5, 3)),
            ]
        );
    }

    #[test]
    fn intersect_of_disjoint_bounds_is_empty() {
        let a = Bounds2i::new(Point2i::new(0, 0), Point2i::new(2, 2));
        let b = Bounds2i::new(Point2i::new(3, 3), Point2i::new(5, 5));
        assert!(a.intersect(&b).is_empty());
    }

    proptest! {
        #[test]
        fn tiles_cover_every_pixel_exactly_once(
            x0 in -20..20, y0 in -20..20, w in 0..40, h in 0..40, tile_size in 1..16
        ) {
            let b = Bounds2i::new(Point2i::new(x0, y0), Point2i::new(x0 + w, y0 + h));
            let mut counts = vec![0_u32; (w * h) as usize];
            for tile in b.tiles(tile_size) {
                prop_assert!(!tile.is_empty());
                for p in tile {
                    prop_assert!(b.contains_exclusive(&p));
                    counts[((p.y - y0) * w + (p.x - x0)) as usize] += 1;
                }
            }
            prop_assert!(counts.iter().all(|&c| c == 1));
        }
    }
}
