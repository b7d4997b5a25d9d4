//! Exact spatial predicates between simple polygons.
//!
//! Both predicates reduce to the location of finitely many witness points: the vertices of each
//! polygon and the midpoints of its edges after splitting them at the other polygon's vertices.
//! After splitting, the relative interior of every sub-segment lies entirely inside, on the boundary
//! of, or outside the other polygon, so its midpoint (exact in doubled coordinates) is representative.

use itertools::Itertools;

use crate::geometry::geo_enums::{GeoPosition, SegmentRelation};
use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::{Edge, Point, SPolygon};

/// True iff the interiors of `a` and `b` overlap.
/// Touching along edges or at vertices is not an intersection, identical polygons are.
pub fn intersects(a: &SPolygon, b: &SPolygon) -> bool {
    if !a.bbox.overlaps(&b.bbox) {
        return false;
    }
    if has_proper_crossing(a, b) {
        return true;
    }
    if a.vertices.iter().any(|v| b.locate(*v) == GeoPosition::Interior)
        || b.vertices.iter().any(|v| a.locate(*v) == GeoPosition::Interior)
    {
        return true;
    }

    let mut a_on_b_boundary = true;
    for m in split_midpoints(a, b) {
        match b.locate_doubled(m) {
            GeoPosition::Interior => return true,
            GeoPosition::Exterior => a_on_b_boundary = false,
            GeoPosition::Boundary => {}
        }
    }
    if split_midpoints(b, a).any(|m| a.locate_doubled(m) == GeoPosition::Interior) {
        return true;
    }

    //the boundary of a lies entirely on the boundary of b: both describe the same region
    a_on_b_boundary
}

/// True iff `inner` lies within the closure of `outer` (boundaries may touch or coincide).
pub fn contains(outer: &SPolygon, inner: &SPolygon) -> bool {
    if !outer.bbox.contains_rect(&inner.bbox) {
        return false;
    }
    if outer.as_rect().is_some() {
        return true;
    }
    if has_proper_crossing(outer, inner) {
        return false;
    }
    //outer is simply connected, so it suffices that the boundary of inner stays out of its exterior
    inner
        .vertices
        .iter()
        .all(|v| outer.locate(*v) != GeoPosition::Exterior)
        && split_midpoints(inner, outer).all(|m| outer.locate_doubled(m) != GeoPosition::Exterior)
}

fn has_proper_crossing(a: &SPolygon, b: &SPolygon) -> bool {
    a.edge_iter()
        .filter(|e_a| e_a.bbox().collides_with(&b.bbox))
        .any(|e_a| {
            b.edge_iter()
                .any(|e_b| e_a.relation_to(&e_b) == SegmentRelation::Crossing)
        })
}

/// Midpoints, in doubled coordinates, of the edges of `p` split at every vertex of `other` they contain.
fn split_midpoints<'a>(p: &'a SPolygon, other: &'a SPolygon) -> impl Iterator<Item = Point> + 'a {
    p.edge_iter().flat_map(move |e| {
        let splits = split_points(&e, other);
        splits
            .into_iter()
            .tuple_windows()
            .map(|(s, t)| Point(s.0 + t.0, s.1 + t.1))
            .collect_vec()
    })
}

/// Start of `e`, the vertices of `other` on its relative interior ordered along `e`, end of `e`.
fn split_points(e: &Edge, other: &SPolygon) -> Vec<Point> {
    let e_bbox = e.bbox();
    let inner = other
        .vertices
        .iter()
        .filter(|v| e_bbox.collides_with(*v))
        .filter(|v| **v != e.start && **v != e.end && e.contains_point(**v))
        .sorted_by_key(|v| e.projection(**v))
        .dedup()
        .copied();

    std::iter::once(e.start)
        .chain(inner)
        .chain(std::iter::once(e.end))
        .collect()
}
