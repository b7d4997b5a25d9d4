use serde::{Deserialize, Serialize};

use crate::NestyError;
use crate::entities::silhouette_inflation;
use crate::geometry::offset_shape;
use crate::geometry::primitives::{COORD_LIMIT, Rect, SPolygon};

/// How the engine interprets the dimensions of a bin.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum BinType {
    /// A sheet, shapes can be placed anywhere within `[0,length]×[0,width]`
    Rectangle = 0,
    /// A bar, shapes are only translated along its length and rest on its bottom edge
    Bar = 1,
}

impl TryFrom<i32> for BinType {
    type Error = NestyError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BinType::Rectangle),
            1 => Ok(BinType::Bar),
            _ => Err(NestyError::InvalidParameter(format!(
                "unknown bin type: {value}"
            ))),
        }
    }
}

/// Definition of a stock piece, which can be opened up to `count` times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinDef {
    pub id: i32,
    /// Maximum number of instances that can be opened
    pub count: usize,
    /// Extent along the x-axis
    pub length: i64,
    /// Extent along the y-axis
    pub width: i64,
    pub bin_type: BinType,
}

impl BinDef {
    pub fn new(
        id: i32,
        count: i32,
        length: i64,
        width: i64,
        bin_type: BinType,
    ) -> crate::Result<Self> {
        if count < 1 {
            return Err(NestyError::InvalidParameter(format!(
                "bin {id}: count must be at least 1, got {count}"
            )));
        }
        if length <= 0 || width <= 0 {
            return Err(NestyError::InvalidParameter(format!(
                "bin {id}: dimensions must be positive, got {length}×{width}"
            )));
        }
        if length > COORD_LIMIT || width > COORD_LIMIT {
            return Err(NestyError::InvalidParameter(format!(
                "bin {id}: dimensions exceed the coordinate limit"
            )));
        }
        Ok(BinDef {
            id,
            count: count as usize,
            length,
            width,
            bin_type,
        })
    }

    /// `[0,length]×[0,width]`
    pub fn rect(&self) -> Rect {
        Rect {
            x_min: 0,
            y_min: 0,
            x_max: self.length,
            y_max: self.width,
        }
    }

    pub fn outline(&self) -> SPolygon {
        SPolygon::from(self.rect())
    }

    pub fn area(&self) -> i128 {
        self.rect().area()
    }

    /// The region shapes may occupy after removing a margin of `trimming` along every edge.
    /// Empty if the margin consumes the whole bin.
    pub fn usable_region(&self, trimming: i64) -> crate::Result<Vec<SPolygon>> {
        offset_shape(&self.outline(), -trimming.min(COORD_LIMIT))
    }

    /// The region silhouettes have to stay within: the usable region shrunk by the silhouette inflation,
    /// so every shape keeps at least `spacing` from the trimmed boundary.
    pub fn placement_region(&self, trimming: i64, spacing: i64) -> crate::Result<Vec<SPolygon>> {
        let margin = trimming.min(COORD_LIMIT) + silhouette_inflation(spacing);
        offset_shape(&self.outline(), -margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 100, 100; "zero count")]
    #[test_case(1, 0, 100; "zero length")]
    #[test_case(1, 100, -5; "negative width")]
    #[test_case(1, COORD_LIMIT + 1, 100; "beyond coordinate limit")]
    fn invalid_bins_are_rejected(count: i32, length: i64, width: i64) {
        let err = BinDef::new(1, count, length, width, BinType::Rectangle).unwrap_err();
        assert_eq!(err.code(), "INVALID_PARAMETER");
    }

    #[test]
    fn trimming_shrinks_the_usable_region() {
        let bin = BinDef::new(1, 1, 1000, 60, BinType::Bar).unwrap();
        let region = bin.usable_region(10).unwrap();
        assert_eq!(region.len(), 1);
        assert_eq!(region[0].bbox, Rect::try_new(10, 10, 990, 50).unwrap());
        assert!(bin.usable_region(30).unwrap().is_empty());
        assert!(bin.usable_region(i64::MAX).unwrap().is_empty());
    }

    #[test]
    fn placement_region_keeps_spacing_to_the_trimmed_edge() {
        let bin = BinDef::new(1, 1, 1000, 1000, BinType::Rectangle).unwrap();
        let region = bin.placement_region(20, 10).unwrap();
        assert_eq!(region[0].bbox, Rect::try_new(25, 25, 975, 975).unwrap());
        assert_eq!(bin.placement_region(20, 0).unwrap(), bin.usable_region(20).unwrap());
        assert!(bin.placement_region(i64::MAX, i64::MAX).unwrap().is_empty());
    }

    #[test]
    fn bin_type_discriminants() {
        assert_eq!(BinType::try_from(0).unwrap(), BinType::Rectangle);
        assert_eq!(BinType::try_from(1).unwrap(), BinType::Bar);
        assert!(BinType::try_from(2).is_err());
        assert_eq!(BinType::Bar as i32, 1);
    }
}
