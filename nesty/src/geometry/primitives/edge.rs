use crate::NestyError;
use crate::geometry::geo_enums::SegmentRelation;
use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::{Point, Rect};

/// Line segment between two [`Point`]s
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn try_new(start: Point, end: Point) -> crate::Result<Self> {
        if start == end {
            return Err(NestyError::InvalidGeometry(format!(
                "degenerate edge, {start} == {end}"
            )));
        }
        Ok(Edge { start, end })
    }

    pub fn x_min(&self) -> i64 {
        i64::min(self.start.0, self.end.0)
    }

    pub fn y_min(&self) -> i64 {
        i64::min(self.start.1, self.end.1)
    }

    pub fn x_max(&self) -> i64 {
        i64::max(self.start.0, self.end.0)
    }

    pub fn y_max(&self) -> i64 {
        i64::max(self.start.1, self.end.1)
    }

    pub fn bbox(&self) -> Rect {
        Rect {
            x_min: self.x_min(),
            y_min: self.y_min(),
            x_max: self.x_max(),
            y_max: self.y_max(),
        }
    }

    /// True if `p` lies on the closed segment.
    pub fn contains_point(&self, p: Point) -> bool {
        self.start.cross(self.end, p) == 0 && self.bbox().collides_with(&p)
    }

    /// Position of `p` projected onto the (unnormalized) direction of the edge. Used to order points along the edge.
    pub fn projection(&self, p: Point) -> i128 {
        self.start.dot(self.end, p)
    }

    /// Classifies how `self` and `other` meet, exactly.
    pub fn relation_to(&self, other: &Edge) -> SegmentRelation {
        if !self.bbox().collides_with(&other.bbox()) {
            return SegmentRelation::Disjoint;
        }
        let (a, b, c, d) = (self.start, self.end, other.start, other.end);
        let o1 = a.cross(b, c).signum();
        let o2 = a.cross(b, d).signum();
        let o3 = c.cross(d, a).signum();
        let o4 = c.cross(d, b).signum();

        if o1 * o2 < 0 && o3 * o4 < 0 {
            return SegmentRelation::Crossing;
        }

        let touching = (o1 == 0 && self.contains_point(c))
            || (o2 == 0 && self.contains_point(d))
            || (o3 == 0 && other.contains_point(a))
            || (o4 == 0 && other.contains_point(b));

        match touching {
            true => SegmentRelation::Touching,
            false => SegmentRelation::Disjoint,
        }
    }
}

impl CollidesWith<Edge> for Edge {
    fn collides_with(&self, other: &Edge) -> bool {
        self.relation_to(other) != SegmentRelation::Disjoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(x0: i64, y0: i64, x1: i64, y1: i64) -> Edge {
        Edge::try_new(Point(x0, y0), Point(x1, y1)).unwrap()
    }

    #[test]
    fn crossing_edges() {
        assert_eq!(
            edge(0, 0, 10, 10).relation_to(&edge(0, 10, 10, 0)),
            SegmentRelation::Crossing
        );
    }

    #[test]
    fn t_junction_is_touching() {
        assert_eq!(
            edge(0, 0, 10, 0).relation_to(&edge(5, 0, 5, 10)),
            SegmentRelation::Touching
        );
    }

    #[test]
    fn collinear_overlap_is_touching() {
        assert_eq!(
            edge(0, 0, 10, 0).relation_to(&edge(5, 0, 15, 0)),
            SegmentRelation::Touching
        );
        assert_eq!(
            edge(0, 0, 10, 0).relation_to(&edge(11, 0, 15, 0)),
            SegmentRelation::Disjoint
        );
    }

    #[test]
    fn parallel_edges_are_disjoint() {
        assert!(!edge(0, 0, 10, 0).collides_with(&edge(0, 1, 10, 1)));
    }
}
