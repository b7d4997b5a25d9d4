use crate::NestyError;
use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Point;

///Axis-aligned rectangle
#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy)]
pub struct Rect {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl Rect {
    pub fn try_new(x_min: i64, y_min: i64, x_max: i64, y_max: i64) -> crate::Result<Self> {
        if x_min < x_max && y_min < y_max {
            Ok(Rect {
                x_min,
                y_min,
                x_max,
                y_max,
            })
        } else {
            Err(NestyError::InvalidGeometry(format!(
                "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
            )))
        }
    }

    /// Returns a new rectangle with the same centroid as `self` but expanded by `dx` in both x-directions and by `dy` in both y-directions.
    /// If the new rectangle is invalid (x_min >= x_max or y_min >= y_max), returns None.
    pub fn resize_by(mut self, dx: i64, dy: i64) -> Option<Self> {
        self.x_min -= dx;
        self.y_min -= dy;
        self.x_max += dx;
        self.y_max += dy;

        if self.x_min < self.x_max && self.y_min < self.y_max {
            Some(self)
        } else {
            //resizing would lead to invalid rectangle
            None
        }
    }

    pub fn translate(self, (dx, dy): (i64, i64)) -> Self {
        Rect {
            x_min: self.x_min + dx,
            y_min: self.y_min + dy,
            x_max: self.x_max + dx,
            y_max: self.y_max + dy,
        }
    }

    /// Returns the four corners of `self`, counterclockwise starting from the bottom-left corner.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point(self.x_min, self.y_min),
            Point(self.x_max, self.y_min),
            Point(self.x_max, self.y_max),
            Point(self.x_min, self.y_max),
        ]
    }

    pub fn width(&self) -> i64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> i128 {
        self.width() as i128 * self.height() as i128
    }

    pub fn min_corner(&self) -> Point {
        Point(self.x_min, self.y_min)
    }

    /// True if `other` lies within `self` (boundaries may coincide).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && self.x_max >= other.x_max
            && self.y_max >= other.y_max
    }

    /// True if the interiors of `self` and `other` overlap, sharing an edge or corner is not enough.
    pub fn overlaps(&self, other: &Rect) -> bool {
        i64::max(self.x_min, other.x_min) < i64::min(self.x_max, other.x_max)
            && i64::max(self.y_min, other.y_min) < i64::min(self.y_max, other.y_max)
    }

    /// Returns the smallest rectangle that contains both `a` and `b`.
    pub fn bounding_rect(a: Rect, b: Rect) -> Rect {
        Rect {
            x_min: i64::min(a.x_min, b.x_min),
            y_min: i64::min(a.y_min, b.y_min),
            x_max: i64::max(a.x_max, b.x_max),
            y_max: i64::max(a.y_max, b.y_max),
        }
    }
}

impl CollidesWith<Rect> for Rect {
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        i64::max(self.x_min, other.x_min) <= i64::min(self.x_max, other.x_max)
            && i64::max(self.y_min, other.y_min) <= i64::min(self.y_max, other.y_max)
    }
}

impl CollidesWith<Point> for Rect {
    #[inline(always)]
    fn collides_with(&self, point: &Point) -> bool {
        let Point(x, y) = *point;
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}
