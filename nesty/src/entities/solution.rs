use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::entities::Catalogue;
use crate::geometry::DTransformation;
use crate::geometry::primitives::Polygon;
use crate::geometry::geo_traits::Transformable;

/// A single shape instance placed on a single bin instance.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub shape_id: i32,
    /// Which of the `count` instances of the shape definition this is
    pub instance_index: usize,
    pub bin_def_id: i32,
    /// Which opened instance of the bin definition hosts the shape
    pub bin_instance: usize,
    pub x: i64,
    pub y: i64,
    /// Counterclockwise rotation in degrees, `[0, 360)`
    pub rotation: i32,
    pub mirrored: bool,
}

impl Placement {
    /// Maps the shape's own coordinates onto the bin: mirror, rotate around the origin, translate.
    pub fn transformation(&self) -> DTransformation {
        DTransformation::new(self.rotation, self.mirrored, (self.x, self.y))
    }

    /// Bin definition id and instance index of the layout this placement belongs to
    pub fn layout_key(&self) -> (i32, usize) {
        (self.bin_def_id, self.bin_instance)
    }

    /// The shape in bin coordinates, `None` if the shape is not in `catalogue`.
    pub fn placed_polygon(&self, catalogue: &Catalogue) -> Option<Polygon> {
        catalogue
            .shape(self.shape_id)
            .map(|s| s.polygon.transform_clone(&self.transformation()))
    }
}

/// Result of a nesting run: every shape instance is either placed or reported as unplaced.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    /// Placements, in the order they were made
    pub placements: Vec<Placement>,
    /// One shape id per instance which could not be placed
    pub unplaced: Vec<i32>,
}

impl Solution {
    pub fn n_placed(&self) -> usize {
        self.placements.len()
    }

    pub fn n_unplaced(&self) -> usize {
        self.unplaced.len()
    }

    /// Keys of all bin instances that host at least one shape, in the order they were opened.
    pub fn layout_keys(&self) -> Vec<(i32, usize)> {
        self.placements
            .iter()
            .map(|p| p.layout_key())
            .unique()
            .collect()
    }

    /// Placements per bin instance, in the order the bin instances were opened.
    pub fn layouts(&self) -> Vec<((i32, usize), Vec<&Placement>)> {
        self.layout_keys()
            .into_iter()
            .map(|key| {
                let placements = self
                    .placements
                    .iter()
                    .filter(|p| p.layout_key() == key)
                    .collect_vec();
                (key, placements)
            })
            .collect()
    }

    /// Derived statistics, shapes and bins are looked up in `catalogue`.
    pub fn stats(&self, catalogue: &Catalogue) -> SolutionStats {
        let mut bins_used: BTreeMap<i32, usize> = BTreeMap::new();
        for (bin_def_id, _) in self.layout_keys() {
            *bins_used.entry(bin_def_id).or_default() += 1;
        }
        let used_bin_area: i128 = bins_used
            .iter()
            .filter_map(|(id, n)| catalogue.bin(*id).map(|b| b.area() * *n as i128))
            .sum();
        let placed_double_area: i128 = self
            .placements
            .iter()
            .filter_map(|p| catalogue.shape(p.shape_id))
            .map(|s| s.double_area())
            .sum();
        let placed_shape_area = placed_double_area as f64 / 2.0;
        let density = match used_bin_area {
            0 => 0.0,
            a => placed_shape_area / a as f64,
        };

        SolutionStats {
            n_placed: self.n_placed(),
            n_unplaced: self.n_unplaced(),
            n_layouts: bins_used.values().sum(),
            bins_used,
            used_bin_area: used_bin_area as f64,
            placed_shape_area,
            density,
        }
    }
}

/// Aggregated figures of a [`Solution`]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SolutionStats {
    pub n_placed: usize,
    pub n_unplaced: usize,
    /// Number of opened bin instances
    pub n_layouts: usize,
    /// Opened instances per bin definition id
    pub bins_used: BTreeMap<i32, usize>,
    pub used_bin_area: f64,
    pub placed_shape_area: f64,
    /// Placed shape area divided by used bin area
    pub density: f64,
}
