use std::collections::BTreeMap;

use log::info;

use crate::entities::{BinDef, ShapeDef};

/// All bin and shape definitions of a nesting session, keyed by id.
/// Iteration is always in ascending id order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalogue {
    bins: BTreeMap<i32, BinDef>,
    shapes: BTreeMap<i32, ShapeDef>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `bin` to the catalogue, replacing (and returning) any prior definition with the same id.
    pub fn upsert_bin(&mut self, bin: BinDef) -> Option<BinDef> {
        let id = bin.id;
        let prior = self.bins.insert(id, bin);
        if prior.is_some() {
            info!("[CAT] bin definition {id} replaced");
        }
        prior
    }

    /// Adds `shape` to the catalogue, replacing (and returning) any prior definition with the same id.
    pub fn upsert_shape(&mut self, shape: ShapeDef) -> Option<ShapeDef> {
        let id = shape.id;
        let prior = self.shapes.insert(id, shape);
        if prior.is_some() {
            info!("[CAT] shape definition {id} replaced");
        }
        prior
    }

    pub fn clear(&mut self) {
        self.bins.clear();
        self.shapes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty() && self.shapes.is_empty()
    }

    pub fn bins(&self) -> impl Iterator<Item = &BinDef> {
        self.bins.values()
    }

    pub fn shapes(&self) -> impl Iterator<Item = &ShapeDef> {
        self.shapes.values()
    }

    pub fn bin(&self, id: i32) -> Option<&BinDef> {
        self.bins.get(&id)
    }

    pub fn shape(&self, id: i32) -> Option<&ShapeDef> {
        self.shapes.get(&id)
    }

    pub fn n_bin_defs(&self) -> usize {
        self.bins.len()
    }

    pub fn n_shape_defs(&self) -> usize {
        self.shapes.len()
    }

    /// Number of shape instances to be nested
    pub fn total_shape_qty(&self) -> usize {
        self.shapes.values().map(|s| s.count).sum()
    }

    /// Net area of all shape instances to be nested, doubled
    pub fn total_shape_double_area(&self) -> i128 {
        self.shapes
            .values()
            .map(|s| s.double_area() * s.count as i128)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::BinType;
    use crate::geometry::primitives::Point;

    fn square(id: i32, count: i32, size: i64) -> ShapeDef {
        let outer = vec![Point(0, 0), Point(size, 0), Point(size, size), Point(0, size)];
        ShapeDef::from_loops(id, count, vec![outer]).unwrap()
    }

    #[test]
    fn upsert_replaces_prior_definition() {
        let mut cat = Catalogue::new();
        assert!(cat.upsert_shape(square(1, 2, 10)).is_none());
        assert!(cat.upsert_shape(square(1, 5, 20)).is_some());
        assert_eq!(cat.n_shape_defs(), 1);
        assert_eq!(cat.total_shape_qty(), 5);
        assert_eq!(cat.total_shape_double_area(), 5 * 2 * 400);
    }

    #[test]
    fn iteration_is_in_ascending_id_order() {
        let mut cat = Catalogue::new();
        for id in [7, -3, 2] {
            cat.upsert_bin(BinDef::new(id, 1, 100, 100, BinType::Rectangle).unwrap());
        }
        let ids: Vec<i32> = cat.bins().map(|b| b.id).collect();
        assert_eq!(ids, vec![-3, 2, 7]);
        cat.clear();
        assert!(cat.is_empty());
    }
}
