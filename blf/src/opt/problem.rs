use std::cmp::Reverse;

use itertools::Itertools;
use log::debug;

use nesty::entities::{BinDef, BinType, Placement, ShapeDef, Solution};
use nesty::geometry::DTransformation;
use nesty::geometry::primitives::{Point, SPolygon};

use crate::config::BLFConfig;
use crate::opt::layout::{Layout, PItemKey, PlacedShape};

/// One (rotation, mirrored) variant of a shape definition.
#[derive(Clone, Debug)]
pub struct Orientation {
    pub rotation: i32,
    pub mirrored: bool,
    /// Silhouette of the shape in this orientation, before translation
    pub silhouette: SPolygon,
}

impl Orientation {
    pub fn d_transf(&self, translation: (i64, i64)) -> DTransformation {
        DTransformation::new(self.rotation, self.mirrored, translation)
    }
}

/// A shape definition with all of its distinct orientations precomputed.
#[derive(Clone, Debug)]
pub struct PreparedShape {
    pub id: i32,
    pub orientations: Vec<Orientation>,
}

impl PreparedShape {
    pub fn new(def: &ShapeDef, config: &BLFConfig, spacing: i64) -> nesty::Result<Self> {
        let mut orientations: Vec<Orientation> = vec![];
        let mut seen: Vec<Vec<Point>> = vec![];
        for (rotation, mirrored) in config.orientations() {
            let silhouette = def.silhouette(&DTransformation::new(rotation, mirrored, (0, 0)), spacing)?;
            let key = canonical_form(&silhouette);
            if seen.contains(&key) {
                //same geometry as an earlier orientation
                continue;
            }
            seen.push(key);
            orientations.push(Orientation {
                rotation,
                mirrored,
                silhouette,
            });
        }
        debug!(
            "[BLF] shape {} has {} distinct orientations",
            def.id,
            orientations.len()
        );
        Ok(PreparedShape {
            id: def.id,
            orientations,
        })
    }

    /// Orientations that may be used in a bin of `bin_type`. Shapes in a bar are only translated,
    /// which leaves the first orientation: unrotated and unmirrored.
    pub fn orientations_in(&self, bin_type: BinType) -> &[Orientation] {
        match bin_type {
            BinType::Rectangle => &self.orientations,
            BinType::Bar => {
                let n = self
                    .orientations
                    .first()
                    .map_or(0, |o| usize::from(o.rotation == 0 && !o.mirrored));
                &self.orientations[..n]
            }
        }
    }

    /// A shape without orientations can never be placed.
    pub fn unplaceable(id: i32) -> Self {
        PreparedShape {
            id,
            orientations: vec![],
        }
    }
}

/// Vertices translated to the origin and starting from the smallest vertex, equal for congruent placements.
fn canonical_form(sp: &SPolygon) -> Vec<Point> {
    let min = sp.bbox.min_corner();
    let moved = sp
        .vertices
        .iter()
        .map(|p| Point(p.0 - min.0, p.1 - min.1))
        .collect_vec();
    let start = moved.iter().position_min().unwrap_or(0);
    moved[start..].iter().chain(moved[..start].iter()).copied().collect()
}

/// A bin definition with its placement region and the remaining number of instances that can be opened.
#[derive(Clone, Debug)]
pub struct PreparedBin {
    pub id: i32,
    pub bin_type: BinType,
    /// Region the silhouettes have to stay within, see [`BinDef::placement_region`]
    pub region: Vec<SPolygon>,
    /// Whether anything is left of the bin after trimming
    pub usable: bool,
    pub stock: usize,
    pub n_opened: usize,
}

impl PreparedBin {
    pub fn new(def: &BinDef, trimming: i64, spacing: i64) -> nesty::Result<Self> {
        Ok(PreparedBin {
            id: def.id,
            bin_type: def.bin_type,
            region: def.placement_region(trimming, spacing)?,
            usable: !def.usable_region(trimming)?.is_empty(),
            stock: def.count,
            n_opened: 0,
        })
    }

    pub fn is_usable(&self) -> bool {
        self.usable
    }

    /// True if the bounding box of `shape` in at least one allowed orientation fits in the bounding box of a region component.
    pub fn can_hold(&self, shape: &PreparedShape) -> bool {
        shape.orientations_in(self.bin_type).iter().any(|o| {
            self.region.iter().any(|r| {
                r.bbox.width() >= o.silhouette.bbox.width()
                    && r.bbox.height() >= o.silhouette.bbox.height()
            })
        })
    }
}

/// Where a placement is made: in an already opened layout or in a fresh instance of a bin definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BLFLayoutType {
    Open(usize),
    Closed { bin_index: usize },
}

#[derive(Clone, Debug)]
pub struct BLFPlacement {
    pub layout_id: BLFLayoutType,
    pub shape_id: i32,
    pub instance_index: usize,
    pub d_transf: DTransformation,
    pub silhouette: SPolygon,
}

/// Dynamic state of a nesting run: the bins with their remaining stock, the opened layouts and the unplaced shapes.
#[derive(Clone, Debug)]
pub struct BLFProblem {
    /// Prepared bin definitions, in ascending id order
    pub bins: Vec<PreparedBin>,
    /// Opened layouts, in the order they were opened
    pub layouts: Vec<Layout>,
    /// One shape id per instance that could not be placed
    pub unplaced: Vec<i32>,
    /// Every placement, in the order it was made
    placement_log: Vec<(usize, PItemKey)>,
}

impl BLFProblem {
    pub fn new(bins: Vec<PreparedBin>) -> Self {
        Self {
            bins,
            layouts: vec![],
            unplaced: vec![],
            placement_log: vec![],
        }
    }

    /// Places a shape according to the provided [`BLFPlacement`]. A closed bin is opened first.
    /// Returns the index of the layout the shape was placed in.
    pub fn place_shape(&mut self, p: BLFPlacement) -> usize {
        let l_index = match p.layout_id {
            BLFLayoutType::Open(l_index) => l_index,
            BLFLayoutType::Closed { bin_index } => self.open_bin(bin_index),
        };
        let pik = self.layouts[l_index].place_shape(PlacedShape {
            shape_id: p.shape_id,
            instance_index: p.instance_index,
            d_transf: p.d_transf,
            silhouette: p.silhouette,
        });
        self.placement_log.push((l_index, pik));
        l_index
    }

    pub fn register_unplaced(&mut self, shape_id: i32) {
        self.unplaced.push(shape_id);
    }

    /// Index of the bin definition to open for `shape` when no open layout accepts it:
    /// the one with the most remaining stock among those which can hold the shape, ties broken by ascending id.
    pub fn bin_to_open(&self, shape: &PreparedShape) -> Option<usize> {
        self.bins
            .iter()
            .enumerate()
            .filter(|(_, b)| b.stock > 0 && b.is_usable() && b.can_hold(shape))
            .min_by_key(|(_, b)| (Reverse(b.stock), b.id))
            .map(|(i, _)| i)
    }

    pub fn n_placed(&self) -> usize {
        self.placement_log.len()
    }

    /// Creates a [`Solution`] of the current state.
    pub fn save(&self) -> Solution {
        let placements = self
            .placement_log
            .iter()
            .map(|&(l_index, pik)| {
                let layout = &self.layouts[l_index];
                let ps = &layout.placed_shapes[pik];
                Placement {
                    shape_id: ps.shape_id,
                    instance_index: ps.instance_index,
                    bin_def_id: layout.bin_def_id,
                    bin_instance: layout.bin_instance,
                    x: ps.d_transf.translation.0,
                    y: ps.d_transf.translation.1,
                    rotation: ps.d_transf.rotation,
                    mirrored: ps.d_transf.mirrored,
                }
            })
            .collect();
        Solution {
            placements,
            unplaced: self.unplaced.clone(),
        }
    }

    fn open_bin(&mut self, bin_index: usize) -> usize {
        let bin = &mut self.bins[bin_index];
        debug_assert!(bin.stock > 0 && bin.is_usable());
        bin.stock -= 1;
        let layout = Layout::new(bin.id, bin.n_opened, bin.bin_type, bin.region.clone());
        bin.n_opened += 1;
        debug!(
            "[BLF] opened instance {} of bin {}",
            layout.bin_instance, layout.bin_def_id
        );
        self.layouts.push(layout);
        self.layouts.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(id: i32, size: i64) -> ShapeDef {
        let outer = vec![Point(0, 0), Point(size, 0), Point(size, size), Point(0, size)];
        ShapeDef::from_loops(id, 1, vec![outer]).unwrap()
    }

    #[test]
    fn symmetric_orientations_are_merged() {
        let config = BLFConfig {
            allow_mirroring: true,
            ..BLFConfig::default()
        };
        let prepared = PreparedShape::new(&square(1, 10), &config, 0).unwrap();
        assert_eq!(prepared.orientations.len(), 1);

        let bar = ShapeDef::from_loops(
            2,
            1,
            vec![vec![Point(0, 0), Point(30, 0), Point(30, 10), Point(0, 10)]],
        )
        .unwrap();
        let prepared = PreparedShape::new(&bar, &config, 0).unwrap();
        let kept = prepared
            .orientations
            .iter()
            .map(|o| (o.rotation, o.mirrored))
            .collect_vec();
        assert_eq!(kept, vec![(0, false), (90, false)]);
    }

    #[test]
    fn bin_with_most_stock_is_opened_first() {
        let bins = [(3, 2), (1, 5), (2, 5)]
            .iter()
            .map(|&(id, count)| {
                let def = BinDef::new(id, count, 100, 100, BinType::Rectangle).unwrap();
                PreparedBin::new(&def, 0, 0).unwrap()
            })
            .sorted_by_key(|b| b.id)
            .collect_vec();
        let mut problem = BLFProblem::new(bins);
        let shape = PreparedShape::new(&square(1, 10), &BLFConfig::default(), 0).unwrap();

        let first = problem.bin_to_open(&shape).unwrap();
        assert_eq!(problem.bins[first].id, 1);
        problem.open_bin(first);
        let second = problem.bin_to_open(&shape).unwrap();
        assert_eq!(problem.bins[second].id, 2);
    }

    #[test]
    fn too_large_shape_gets_no_bin() {
        let def = BinDef::new(1, 1, 100, 50, BinType::Rectangle).unwrap();
        let problem = BLFProblem::new(vec![PreparedBin::new(&def, 0, 0).unwrap()]);
        let shape = PreparedShape::new(&square(1, 60), &BLFConfig::default(), 0).unwrap();
        assert_eq!(problem.bin_to_open(&shape), None);
        assert_eq!(problem.bin_to_open(&PreparedShape::unplaceable(2)), None);
    }

    #[test]
    fn bars_only_hold_upright_shapes() {
        let upright = ShapeDef::from_loops(
            1,
            1,
            vec![vec![Point(0, 0), Point(20, 0), Point(20, 80), Point(0, 80)]],
        )
        .unwrap();
        let shape = PreparedShape::new(&upright, &BLFConfig::default(), 0).unwrap();
        assert_eq!(shape.orientations_in(BinType::Rectangle).len(), 2);
        assert_eq!(shape.orientations_in(BinType::Bar).len(), 1);

        let bar = BinDef::new(1, 1, 100, 30, BinType::Bar).unwrap();
        let sheet = BinDef::new(2, 1, 100, 30, BinType::Rectangle).unwrap();
        assert!(!PreparedBin::new(&bar, 0, 0).unwrap().can_hold(&shape));
        assert!(PreparedBin::new(&sheet, 0, 0).unwrap().can_hold(&shape));
    }

    #[test]
    fn spacing_can_leave_a_usable_bin_without_room() {
        let def = BinDef::new(1, 1, 100, 100, BinType::Rectangle).unwrap();
        let bin = PreparedBin::new(&def, 10, 200).unwrap();
        assert!(bin.is_usable());
        assert!(bin.region.is_empty());
        assert!(!PreparedBin::new(&def, 50, 0).unwrap().is_usable());
    }
}
