#[cfg(feature = "separation-distance")]
use geo_offset::Offset;
#[cfg(feature = "separation-distance")]
use itertools::Itertools;
#[cfg(feature = "separation-distance")]
use log::debug;

#[cfg(feature = "separation-distance")]
use crate::NestyError;
#[cfg(feature = "separation-distance")]
use crate::geometry::primitives::Point;
use crate::geometry::primitives::SPolygon;

/// Offsets a [`SPolygon`] outwards (`distance > 0`) or inwards (`distance < 0`).
///
/// Shrinking can split a polygon into several parts or consume it entirely, hence the vector.
/// Axis-aligned rectangles are offset exactly and keep their square corners when grown,
/// everything else relies on the [`geo_offset`](https://crates.io/crates/geo_offset) crate
/// and is rounded back to integer coordinates.
pub fn offset_shape(sp: &SPolygon, distance: i64) -> crate::Result<Vec<SPolygon>> {
    if distance == 0 {
        return Ok(vec![sp.clone()]);
    }
    if let Some(rect) = sp.as_rect() {
        return Ok(rect
            .resize_by(distance, distance)
            .map(SPolygon::from)
            .into_iter()
            .collect());
    }
    offset_arbitrary(sp, distance)
}

#[cfg(feature = "separation-distance")]
fn offset_arbitrary(sp: &SPolygon, distance: i64) -> crate::Result<Vec<SPolygon>> {
    // Convert the SPolygon to a geo_types::Polygon
    let geo_poly = geo_types::Polygon::new(
        sp.vertices
            .iter()
            .map(|p| (p.0 as f64, p.1 as f64))
            .collect(),
        vec![],
    );

    let geo_poly_offset = geo_poly
        .offset(distance as f64)
        .map_err(|e| NestyError::Offset(format!("{e:?}")))?;

    let mut offset_polygons = vec![];
    for poly in geo_poly_offset.0 {
        let points_offset = poly
            .exterior()
            .points()
            .map(|p| Point(p.x().round() as i64, p.y().round() as i64))
            .collect_vec();

        match SPolygon::new(points_offset.clone()) {
            Ok(offset_sp) => offset_polygons.push(offset_sp),
            Err(e) if distance > 0 => {
                //rounding broke the loop, its bounding box is still a valid superset
                debug!("[OFFSET] replacing inflated loop by its bounding box: {e}");
                let bbox = SPolygon::generate_bounding_box(&points_offset);
                offset_polygons.push(SPolygon::from(bbox));
            }
            Err(e) => {
                debug!("[OFFSET] dropping deflated loop: {e}");
            }
        }
    }

    if distance > 0 && offset_polygons.is_empty() {
        return Err(NestyError::Offset(
            "inflation produced no polygon".to_string(),
        ));
    }

    Ok(offset_polygons)
}

#[cfg(not(feature = "separation-distance"))]
fn offset_arbitrary(_sp: &SPolygon, _distance: i64) -> crate::Result<Vec<SPolygon>> {
    Err(crate::NestyError::Offset(
        "cannot offset non-rectangular shape without geo_offset dependency, compile with --features separation-distance to enable this"
            .to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_traits::Shape;
    use crate::geometry::primitives::{Point, Rect};
    use crate::geometry::relations::contains;

    fn rect(x_min: i64, y_min: i64, x_max: i64, y_max: i64) -> SPolygon {
        SPolygon::from(Rect::try_new(x_min, y_min, x_max, y_max).unwrap())
    }

    #[test]
    fn zero_offset_is_identity() {
        let r = rect(0, 0, 10, 10);
        assert_eq!(offset_shape(&r, 0).unwrap(), vec![r]);
    }

    #[test]
    fn rectangle_shrinks_exactly() {
        let shrunk = offset_shape(&rect(0, 0, 1000, 500), -10).unwrap();
        assert_eq!(shrunk, vec![rect(10, 10, 990, 490)]);
    }

    #[test]
    fn rectangle_grows_with_square_corners() {
        let grown = offset_shape(&rect(0, 0, 400, 400), 5).unwrap();
        assert_eq!(grown, vec![rect(-5, -5, 405, 405)]);
    }

    #[test]
    fn rectangle_consumed_by_margin() {
        assert!(offset_shape(&rect(0, 0, 100, 20), -10).unwrap().is_empty());
        assert!(offset_shape(&rect(0, 0, 100, 20), -15).unwrap().is_empty());
    }

    #[cfg(feature = "separation-distance")]
    #[test]
    fn inflation_covers_the_original() {
        let triangle = SPolygon::new(vec![Point(0, 0), Point(100, 0), Point(0, 100)]).unwrap();
        let inflated = offset_shape(&triangle, 5).unwrap();
        assert_eq!(inflated.len(), 1);
        assert!(contains(&inflated[0], &triangle));
        assert!(inflated[0].area() > triangle.area());
    }
}
