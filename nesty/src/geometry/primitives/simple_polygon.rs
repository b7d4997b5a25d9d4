use itertools::Itertools;

use crate::NestyError;
use crate::geometry::DTransformation;
use crate::geometry::geo_enums::{GeoPosition, SegmentRelation};
use crate::geometry::geo_traits::{CollidesWith, Shape, Transformable};
use crate::geometry::primitives::{Edge, Point, Rect};

/// Geometric primitive representing a simple polygon: <https://en.wikipedia.org/wiki/Simple_polygon>
///
/// Vertices are always stored counterclockwise (positive area), the closing edge is implied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SPolygon {
    /// Vertices describing the closed loop
    pub vertices: Vec<Point>,
    /// Bounding box
    pub bbox: Rect,
    /// Twice the enclosed area
    pub double_area: i128,
}

impl SPolygon {
    /// Validates and normalizes a closed loop of points into a simple polygon.
    ///
    /// A repeated closing vertex and consecutive duplicates are removed, clockwise loops are reversed.
    /// Loops with less than 3 vertices, no area, out of range coordinates or self-intersections are rejected.
    pub fn new(points: Vec<Point>) -> crate::Result<Self> {
        let mut points = normalize_loop(points);

        if points.len() < 3 {
            return Err(NestyError::InvalidGeometry(format!(
                "polygon must have at least 3 distinct vertices, got {}",
                points.len()
            )));
        }
        if let Some(p) = points.iter().find(|p| !p.in_range()) {
            return Err(NestyError::InvalidGeometry(format!(
                "vertex {p} exceeds the coordinate limit"
            )));
        }

        let double_area = match SPolygon::calculate_double_area(&points) {
            0 => {
                return Err(NestyError::InvalidGeometry(
                    "polygon has no area".to_string(),
                ));
            }
            a if a < 0 => {
                //edges should always be ordered counterclockwise (positive area)
                points.reverse();
                -a
            }
            a => a,
        };

        if let Some((i, j)) = find_self_intersection(&points) {
            return Err(NestyError::InvalidGeometry(format!(
                "polygon is self-intersecting at edges {i} and {j}"
            )));
        }

        let bbox = SPolygon::generate_bounding_box(&points);

        Ok(SPolygon {
            vertices: points,
            bbox,
            double_area,
        })
    }

    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }

    pub fn edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_vertices();
        Edge {
            start: self.vertices[i],
            end: self.vertices[j],
        }
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_vertices()).map(move |i| self.edge(i))
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The rectangle `self` describes, if it is an axis-aligned rectangle.
    pub fn as_rect(&self) -> Option<Rect> {
        let corners = self.bbox.corners();
        match self.n_vertices() == 4
            && self.double_area == 2 * self.bbox.area()
            && self.vertices.iter().all(|v| corners.contains(v))
        {
            true => Some(self.bbox),
            false => None,
        }
    }

    /// Exact position of `p` with respect to the polygon.
    pub fn locate(&self, p: Point) -> GeoPosition {
        self.locate_doubled(Point(2 * p.0, 2 * p.1))
    }

    /// Exact position of a point given in doubled coordinates (i.e. `p2 = 2·p`).
    /// Allows exact queries on midpoints of integer segments.
    pub fn locate_doubled(&self, p2: Point) -> GeoPosition {
        let Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        } = self.bbox;
        if p2.0 < 2 * x_min || p2.0 > 2 * x_max || p2.1 < 2 * y_min || p2.1 > 2 * y_max {
            return GeoPosition::Exterior;
        }
        //ray casting with a horizontal ray shot to the right: https://en.wikipedia.org/wiki/Point_in_polygon#Ray_casting_algorithm
        let mut inside = false;
        for edge in self.edge_iter() {
            let a = Point(2 * edge.start.0, 2 * edge.start.1);
            let b = Point(2 * edge.end.0, 2 * edge.end.1);
            if (Edge { start: a, end: b }).contains_point(p2) {
                return GeoPosition::Boundary;
            }
            //half-open rule on y handles rays passing exactly through a vertex
            if (a.1 > p2.1) != (b.1 > p2.1) {
                let side = a.cross(b, p2);
                let crosses = match b.1 > a.1 {
                    true => side > 0,
                    false => side < 0,
                };
                if crosses {
                    inside = !inside;
                }
            }
        }
        match inside {
            true => GeoPosition::Interior,
            false => GeoPosition::Exterior,
        }
    }

    /// Copy of `self` translated by `(dx, dy)`, skips revalidation.
    pub fn translate(&self, (dx, dy): (i64, i64)) -> SPolygon {
        SPolygon {
            vertices: self
                .vertices
                .iter()
                .map(|p| p.translate((dx, dy)))
                .collect(),
            bbox: self.bbox.translate((dx, dy)),
            double_area: self.double_area,
        }
    }

    /// Vertices in clockwise order, the orientation used to store holes.
    pub fn clockwise_vertices(&self) -> Vec<Point> {
        self.vertices.iter().rev().copied().collect()
    }

    pub fn generate_bounding_box(points: &[Point]) -> Rect {
        let (mut x_min, mut y_min) = (i64::MAX, i64::MAX);
        let (mut x_max, mut y_max) = (i64::MIN, i64::MIN);

        for point in points.iter() {
            x_min = x_min.min(point.0);
            y_min = y_min.min(point.1);
            x_max = x_max.max(point.0);
            y_max = y_max.max(point.1);
        }
        Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive area, clockwise = negative area
    pub fn calculate_double_area(points: &[Point]) -> i128 {
        points
            .iter()
            .circular_tuple_windows()
            .map(|(p, q)| p.0 as i128 * q.1 as i128 - q.0 as i128 * p.1 as i128)
            .sum()
    }
}

impl Shape for SPolygon {
    fn double_area(&self) -> i128 {
        self.double_area
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Transformable for SPolygon {
    fn transform(&mut self, t: &DTransformation) -> &mut Self {
        //destructuring pattern to ensure that the code is updated when the struct changes
        let SPolygon {
            vertices,
            bbox,
            double_area,
        } = self;

        vertices.iter_mut().for_each(|p| {
            p.transform(t);
        });
        //rounding of non-orthogonal rotations can merge neighbouring vertices
        *vertices = normalize_loop(std::mem::take(vertices));

        let signed_area = SPolygon::calculate_double_area(vertices);
        if signed_area < 0 {
            //mirroring flips the orientation
            vertices.reverse();
        }
        *double_area = signed_area.abs();
        *bbox = SPolygon::generate_bounding_box(vertices);

        self
    }
}

impl From<Rect> for SPolygon {
    fn from(r: Rect) -> Self {
        SPolygon {
            vertices: r.corners().to_vec(),
            bbox: r,
            double_area: 2 * r.area(),
        }
    }
}

/// Drops consecutive duplicates and an explicit closing vertex.
fn normalize_loop(mut points: Vec<Point>) -> Vec<Point> {
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Returns the indices of the first pair of edges which makes the loop non-simple.
fn find_self_intersection(points: &[Point]) -> Option<(usize, usize)> {
    let n = points.len();
    let edge = |i: usize| Edge {
        start: points[i],
        end: points[(i + 1) % n],
    };

    for i in 0..n {
        let e_i = edge(i);
        for j in (i + 1)..n {
            let e_j = edge(j);
            let invalid = if j == i + 1 {
                //consecutive edges share e_i.end, they may not fold back onto each other
                e_i.contains_point(e_j.end) || e_j.contains_point(e_i.start)
            } else if i == 0 && j == n - 1 {
                //closing edge shares e_i.start
                e_i.contains_point(e_j.start) || e_j.contains_point(e_i.end)
            } else {
                e_i.relation_to(&e_j) != SegmentRelation::Disjoint
            };
            if invalid {
                return Some((i, j));
            }
        }
    }
    None
}
