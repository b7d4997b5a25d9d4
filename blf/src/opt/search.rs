use std::cmp::Reverse;

use itertools::Itertools;
use log::trace;

use nesty::entities::{BinType, Catalogue};
use nesty::geometry::DTransformation;
use nesty::geometry::intersects;
use nesty::geometry::primitives::{Rect, SPolygon};

use crate::opt::layout::region_accepts;
use crate::opt::problem::PreparedShape;

/// Order in which shape instances are placed: decreasing bounding-box area, then ascending shape id and instance index.
pub fn placement_order(catalogue: &Catalogue) -> Vec<(i32, usize)> {
    catalogue
        .shapes()
        .flat_map(|s| (0..s.count).map(move |i| (s, i)))
        .sorted_by_key(|(s, i)| (Reverse(s.bbox().area()), s.id, *i))
        .map(|(s, i)| (s.id, i))
        .collect_vec()
}

/// Candidate anchor points of a bin: every combination of an x and a y coordinate of a vertex of the region
/// or of a placed silhouette, sorted bottom-left first (ascending y, then x).
/// In a bar only the bottom edges of the region are used as y coordinate.
pub fn anchors(region: &[SPolygon], placed: &[&SPolygon], bin_type: BinType) -> (Vec<i64>, Vec<i64>) {
    let vertices = || {
        region
            .iter()
            .chain(placed.iter().copied())
            .flat_map(|sp| sp.vertices.iter())
    };
    let xs = vertices().map(|p| p.0).sorted().dedup().collect_vec();
    let ys = match bin_type {
        BinType::Rectangle => vertices().map(|p| p.1).sorted().dedup().collect_vec(),
        BinType::Bar => region.iter().map(|r| r.bbox.y_min).sorted().dedup().collect_vec(),
    };
    (xs, ys)
}

/// Scans the bin bottom-left for the first position where `shape` fits, trying its allowed orientations in order.
/// Returns the transformation of the shape and its silhouette at that position.
pub fn search(
    region: &[SPolygon],
    placed: &[&SPolygon],
    bin_type: BinType,
    shape: &PreparedShape,
    sample_counter: &mut usize,
) -> Option<(DTransformation, SPolygon)> {
    let region_bbox = region.iter().map(|r| r.bbox).reduce(Rect::bounding_rect)?;
    let (xs, ys) = anchors(region, placed, bin_type);

    for orientation in shape.orientations_in(bin_type) {
        let s_bbox = orientation.silhouette.bbox;
        let (w, h) = (s_bbox.width(), s_bbox.height());

        //only anchors for which the bounding box stays within the region are worth evaluating
        let valid_xs = xs
            .iter()
            .filter(|&&x| x >= region_bbox.x_min && x + w <= region_bbox.x_max)
            .collect_vec();

        for &y in ys
            .iter()
            .filter(|&&y| y >= region_bbox.y_min && y + h <= region_bbox.y_max)
        {
            for &&x in valid_xs.iter() {
                let translation = (x - s_bbox.x_min, y - s_bbox.y_min);
                let silhouette = orientation.silhouette.translate(translation);
                *sample_counter += 1;

                if region_accepts(region, &silhouette)
                    && !placed.iter().any(|p| intersects(p, &silhouette))
                {
                    let d_transf = orientation.d_transf(translation);
                    trace!("[BLF] shape {} fits at [{}]", shape.id, d_transf);
                    return Some((d_transf, silhouette));
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BLFConfig;
    use nesty::entities::ShapeDef;
    use nesty::geometry::primitives::Point;

    fn rect(x_min: i64, y_min: i64, x_max: i64, y_max: i64) -> SPolygon {
        SPolygon::from(Rect::try_new(x_min, y_min, x_max, y_max).unwrap())
    }

    fn prepared(w: i64, h: i64) -> PreparedShape {
        let outer = vec![Point(0, 0), Point(w, 0), Point(w, h), Point(0, h)];
        let def = ShapeDef::from_loops(1, 1, vec![outer]).unwrap();
        PreparedShape::new(&def, &BLFConfig::default(), 0).unwrap()
    }

    #[test]
    fn larger_shapes_are_placed_first() {
        let mut cat = Catalogue::new();
        for (id, size, count) in [(1, 10, 2), (2, 30, 1), (3, 10, 1)] {
            let outer = vec![Point(0, 0), Point(size, 0), Point(size, size), Point(0, size)];
            cat.upsert_shape(ShapeDef::from_loops(id, count, vec![outer]).unwrap());
        }
        assert_eq!(
            placement_order(&cat),
            vec![(2, 0), (1, 0), (1, 1), (3, 0)]
        );
    }

    #[test]
    fn first_shape_goes_to_the_bottom_left_corner() {
        let region = vec![rect(10, 10, 990, 990)];
        let mut counter = 0;
        let (dt, sil) = search(&region, &[], BinType::Rectangle, &prepared(400, 400), &mut counter).unwrap();
        assert_eq!(dt.translation, (10, 10));
        assert_eq!(sil.bbox, Rect::try_new(10, 10, 410, 410).unwrap());
        assert_eq!(counter, 1);
    }

    #[test]
    fn next_shape_is_placed_to_the_right() {
        let region = vec![rect(0, 0, 1000, 1000)];
        let placed = rect(0, 0, 400, 400);
        let mut counter = 0;
        let (dt, _) = search(&region, &[&placed], BinType::Rectangle, &prepared(400, 400), &mut counter).unwrap();
        assert_eq!(dt.translation, (400, 0));
    }

    #[test]
    fn rotation_is_used_when_upright_does_not_fit() {
        let region = vec![rect(0, 0, 100, 30)];
        let mut counter = 0;
        let (dt, sil) = search(&region, &[], BinType::Rectangle, &prepared(20, 80), &mut counter).unwrap();
        assert_eq!(dt.rotation, 90);
        assert_eq!(sil.bbox, Rect::try_new(0, 0, 80, 20).unwrap());
    }

    #[test]
    fn shapes_are_not_rotated_in_a_bar() {
        let region = vec![rect(0, 0, 100, 30)];
        let mut counter = 0;
        assert!(search(&region, &[], BinType::Bar, &prepared(20, 80), &mut counter).is_none());
        let (dt, _) = search(&region, &[], BinType::Bar, &prepared(80, 20), &mut counter).unwrap();
        assert_eq!((dt.rotation, dt.mirrored, dt.translation), (0, false, (0, 0)));
    }

    #[test]
    fn bars_only_use_their_bottom_edge() {
        let region = vec![rect(0, 0, 100, 100)];
        let placed = rect(0, 0, 100, 10);
        let mut counter = 0;
        assert!(search(&region, &[&placed], BinType::Bar, &prepared(10, 10), &mut counter).is_none());
        let (dt, _) = search(&region, &[&placed], BinType::Rectangle, &prepared(10, 10), &mut counter).unwrap();
        assert_eq!(dt.translation, (0, 10));
    }
}
