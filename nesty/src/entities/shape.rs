use crate::NestyError;
use crate::geometry::geo_traits::{Shape, Transformable};
use crate::geometry::primitives::{COORD_LIMIT, Point, Polygon, Rect, SPolygon};
use crate::geometry::{DTransformation, offset_shape};

/// Outward offset applied to every shape so that two neighbouring silhouettes keep `spacing` apart: `⌈spacing/2⌉`.
///
/// A spacing beyond [`COORD_LIMIT`] already keeps every shape out of every bin, so it is capped there.
pub fn silhouette_inflation(spacing: i64) -> i64 {
    let spacing = spacing.min(COORD_LIMIT);
    spacing / 2 + spacing % 2
}

/// Definition of a part, of which `count` instances have to be nested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeDef {
    pub id: i32,
    /// Number of physical instances required
    pub count: usize,
    /// Boundary and holes, in the shape's own coordinate system
    pub polygon: Polygon,
}

impl ShapeDef {
    pub fn new(id: i32, count: i32, polygon: Polygon) -> crate::Result<Self> {
        if count < 1 {
            return Err(NestyError::InvalidParameter(format!(
                "shape {id}: count must be at least 1, got {count}"
            )));
        }
        Ok(ShapeDef {
            id,
            count: count as usize,
            polygon,
        })
    }

    /// First loop is the boundary, subsequent loops are holes.
    pub fn from_loops(id: i32, count: i32, loops: Vec<Vec<Point>>) -> crate::Result<Self> {
        let polygon = Polygon::from_loops(loops).map_err(|e| match e {
            NestyError::InvalidGeometry(msg) => {
                NestyError::InvalidGeometry(format!("shape {id}: {msg}"))
            }
            other => other,
        })?;
        ShapeDef::new(id, count, polygon)
    }

    pub fn bbox(&self) -> Rect {
        self.polygon.bbox()
    }

    /// Net area of a single instance (holes excluded), exact and doubled
    pub fn double_area(&self) -> i128 {
        self.polygon.double_area()
    }

    /// Boundary of the shape inflated by half of `spacing` and placed by `t`. Holes are not part of a silhouette.
    ///
    /// The offset is computed before translating, so silhouettes of the same orientation only differ by a translation.
    pub fn silhouette(&self, t: &DTransformation, spacing: i64) -> crate::Result<SPolygon> {
        let oriented = self
            .polygon
            .outer
            .transform_clone(&t.with_translation((0, 0)));
        let silhouette = offset_shape(&oriented, silhouette_inflation(spacing))?
            .into_iter()
            .max_by_key(|sp| sp.double_area)
            .ok_or_else(|| NestyError::Offset(format!("shape {}: empty silhouette", self.id)))?;
        Ok(silhouette.translate(t.translation))
    }
}
