use log::info;

use crate::entities::{BinDef, Catalogue, ShapeDef};
use crate::geometry::primitives::Point;
use crate::io::ext_repr::{ExtBin, ExtCatalogue, ExtShape};

pub fn import_bin(ext_bin: &ExtBin) -> crate::Result<BinDef> {
    BinDef::new(
        ext_bin.id,
        ext_bin.count,
        ext_bin.length,
        ext_bin.width,
        ext_bin.bin_type,
    )
}

pub fn import_shape(ext_shape: &ExtShape) -> crate::Result<ShapeDef> {
    let loops = ext_shape
        .paths
        .iter()
        .map(|l| l.0.iter().map(|&p| Point::from(p)).collect())
        .collect();
    ShapeDef::from_loops(ext_shape.id, ext_shape.count, loops)
}

/// Imports all definitions of an external catalogue, in file order, so later duplicates replace earlier ones.
pub fn import_catalogue(ext_cat: &ExtCatalogue) -> crate::Result<Catalogue> {
    let mut catalogue = Catalogue::new();
    for ext_bin in &ext_cat.bins {
        catalogue.upsert_bin(import_bin(ext_bin)?);
    }
    for ext_shape in &ext_cat.shapes {
        catalogue.upsert_shape(import_shape(ext_shape)?);
    }
    info!(
        "[CAT] imported {}: {} bin definitions, {} shape definitions ({} instances)",
        ext_cat.name,
        catalogue.n_bin_defs(),
        catalogue.n_shape_defs(),
        catalogue.total_shape_qty()
    );
    Ok(catalogue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::BinType;

    const JOB: &str = r#"{
        "name": "frames",
        "spacing": 2,
        "bins": [
            {"id": 1, "count": 2, "length": 1000, "width": 500, "type": "RECTANGLE"},
            {"id": 2, "count": 5, "length": 3000, "width": 60, "type": "BAR"}
        ],
        "shapes": [
            {"id": 10, "count": 3, "paths": [
                [[0, 0], [100, 0], [100, 100], [0, 100], [0, 0]],
                [[25, 25], [25, 75], [75, 75], [75, 25]]
            ]}
        ]
    }"#;

    #[test]
    fn catalogue_from_json() {
        let ext: ExtCatalogue = serde_json::from_str(JOB).unwrap();
        assert_eq!(ext.trimming, 0);
        let cat = import_catalogue(&ext).unwrap();
        assert_eq!(cat.bin(2).unwrap().bin_type, BinType::Bar);
        let frame = cat.shape(10).unwrap();
        assert_eq!(frame.polygon.n_holes(), 1);
        assert_eq!(frame.double_area(), 2 * (10_000 - 2_500));
    }

    #[test]
    fn invalid_shape_fails_the_import() {
        let mut ext: ExtCatalogue = serde_json::from_str(JOB).unwrap();
        ext.shapes[0].count = 0;
        assert!(import_catalogue(&ext).is_err());
    }
}
