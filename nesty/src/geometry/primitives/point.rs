use std::fmt::{Display, Formatter};

use crate::geometry::DTransformation;
use crate::geometry::geo_traits::Transformable;

/// Largest absolute coordinate accepted by the kernel.
/// Keeps every cross product exact in `i128` and every conversion to `f64` lossless.
pub const COORD_LIMIT: i64 = 1 << 40;

/// Geometric primitive representing a point in fixed-point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point(pub i64, pub i64);

impl Point {
    pub fn x(&self) -> i64 {
        self.0
    }

    pub fn y(&self) -> i64 {
        self.1
    }

    /// True if both coordinates are within [`COORD_LIMIT`].
    pub fn in_range(&self) -> bool {
        self.0.abs() <= COORD_LIMIT && self.1.abs() <= COORD_LIMIT
    }

    /// Cross product of `a - self` and `b - self`.
    /// Positive if `self -> a -> b` turns left (counterclockwise), negative if it turns right, zero if collinear.
    #[inline(always)]
    pub fn cross(&self, a: Point, b: Point) -> i128 {
        let (ax, ay) = ((a.0 - self.0) as i128, (a.1 - self.1) as i128);
        let (bx, by) = ((b.0 - self.0) as i128, (b.1 - self.1) as i128);
        ax * by - ay * bx
    }

    /// Dot product of `a - self` and `b - self`.
    #[inline(always)]
    pub fn dot(&self, a: Point, b: Point) -> i128 {
        let (ax, ay) = ((a.0 - self.0) as i128, (a.1 - self.1) as i128);
        let (bx, by) = ((b.0 - self.0) as i128, (b.1 - self.1) as i128);
        ax * bx + ay * by
    }

    pub fn translate(self, (dx, dy): (i64, i64)) -> Point {
        Point(self.0 + dx, self.1 + dy)
    }
}

impl Transformable for Point {
    fn transform(&mut self, t: &DTransformation) -> &mut Self {
        *self = t.apply(*self);
        self
    }
}

impl From<Point> for (i64, i64) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<(i64, i64)> for Point {
    fn from(p: (i64, i64)) -> Self {
        Point(p.0, p.1)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
