use itertools::Itertools;

use crate::NestyError;
use crate::geometry::DTransformation;
use crate::geometry::geo_traits::{Shape, Transformable};
use crate::geometry::primitives::{Point, Rect, SPolygon};
use crate::geometry::relations::{contains, intersects};

/// Generalization of a [`SPolygon`] to a polygon that can contain one or multiple holes.
/// Defined by an outer contour and a vector of inner contours (holes).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polygon {
    pub outer: SPolygon,
    pub holes: Vec<SPolygon>,
}

impl Polygon {
    /// Every hole must lie within `outer` and no two holes may overlap, touching is allowed.
    pub fn new(outer: SPolygon, holes: Vec<SPolygon>) -> crate::Result<Self> {
        for (i, hole) in holes.iter().enumerate() {
            if !contains(&outer, hole) {
                return Err(NestyError::InvalidGeometry(format!(
                    "hole {i} is not contained in the outer boundary"
                )));
            }
        }
        if let Some((i, j)) = (0..holes.len())
            .tuple_combinations()
            .find(|&(i, j)| intersects(&holes[i], &holes[j]))
        {
            return Err(NestyError::InvalidGeometry(format!(
                "holes {i} and {j} overlap"
            )));
        }
        Ok(Self { outer, holes })
    }

    /// Builds a polygon from raw loops: the first is the outer boundary, the rest are holes.
    pub fn from_loops(loops: Vec<Vec<Point>>) -> crate::Result<Self> {
        let mut loops = loops.into_iter();
        let outer = loops
            .next()
            .ok_or_else(|| NestyError::InvalidGeometry("polygon has no loops".to_string()))?;
        let outer = SPolygon::new(outer)?;
        let holes = loops.map(SPolygon::new).collect::<crate::Result<Vec<_>>>()?;
        Polygon::new(outer, holes)
    }

    /// All loops, outer boundary counterclockwise first, followed by the holes clockwise.
    pub fn loops(&self) -> Vec<Vec<Point>> {
        std::iter::once(self.outer.vertices.clone())
            .chain(self.holes.iter().map(|h| h.clockwise_vertices()))
            .collect()
    }

    pub fn n_holes(&self) -> usize {
        self.holes.len()
    }
}

impl From<SPolygon> for Polygon {
    fn from(outer: SPolygon) -> Self {
        Self {
            outer,
            holes: vec![],
        }
    }
}

impl Shape for Polygon {
    fn double_area(&self) -> i128 {
        self.outer.double_area - self.holes.iter().map(|h| h.double_area).sum::<i128>()
    }

    fn bbox(&self) -> Rect {
        self.outer.bbox
    }
}

impl Transformable for Polygon {
    fn transform(&mut self, t: &DTransformation) -> &mut Self {
        self.outer.transform(t);
        self.holes.iter_mut().for_each(|h| {
            h.transform(t);
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i64, y: i64, size: i64) -> Vec<Point> {
        vec![
            Point(x, y),
            Point(x + size, y),
            Point(x + size, y + size),
            Point(x, y + size),
        ]
    }

    #[test]
    fn frame_with_hole() {
        let mut hole = square(25, 25, 50);
        hole.reverse();
        let frame = Polygon::from_loops(vec![square(0, 0, 100), hole]).unwrap();
        assert_eq!(frame.area(), 100 * 100 - 50 * 50);
        let loops = frame.loops();
        assert!(SPolygon::calculate_double_area(&loops[0]) > 0);
        assert!(SPolygon::calculate_double_area(&loops[1]) < 0);
    }

    #[test]
    fn hole_outside_boundary_is_rejected() {
        assert!(Polygon::from_loops(vec![square(0, 0, 100), square(90, 90, 20)]).is_err());
    }

    #[test]
    fn overlapping_holes_are_rejected() {
        let loops = vec![square(0, 0, 100), square(10, 10, 30), square(30, 30, 30)];
        assert!(Polygon::from_loops(loops).is_err());
        let touching = vec![square(0, 0, 100), square(10, 10, 30), square(40, 10, 30)];
        assert!(Polygon::from_loops(touching).is_ok());
    }

    #[test]
    fn no_loops_is_rejected() {
        assert!(Polygon::from_loops(vec![]).is_err());
    }
}
