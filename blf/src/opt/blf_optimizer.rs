use std::collections::BTreeMap;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info, warn};
use thousands::Separable;

use nesty::NestyError;
use nesty::entities::{Catalogue, Solution};
use nesty::util::assertions;

use crate::config::BLFConfig;
use crate::opt::problem::{BLFLayoutType, BLFPlacement, BLFProblem, PreparedBin, PreparedShape};
use crate::opt::search::{placement_order, search};

/// Bottom-Left-Fill (BLF) optimizer: places shape instances one by one, largest first,
/// at the first position found by a bottom-left scan of the open bins.
pub struct BLFOptimizer<'a> {
    pub catalogue: &'a Catalogue,
    pub config: BLFConfig,
    pub spacing: i64,
    pub trimming: i64,
    pub problem: BLFProblem,
    pub shapes: BTreeMap<i32, PreparedShape>,
    pub sample_counter: usize,
}

impl<'a> BLFOptimizer<'a> {
    /// Prepares bins and shapes, fails on problems that prevent any nesting from starting.
    pub fn new(
        catalogue: &'a Catalogue,
        config: BLFConfig,
        spacing: i64,
        trimming: i64,
    ) -> nesty::Result<Self> {
        if spacing < 0 || trimming < 0 {
            return Err(NestyError::InvalidParameter(format!(
                "spacing and trimming must be non-negative, got {spacing} and {trimming}"
            )));
        }
        config.validate()?;
        if catalogue.n_shape_defs() == 0 {
            return Err(NestyError::EmptyCatalogue);
        }

        let bins = catalogue
            .bins()
            .map(|def| PreparedBin::new(def, trimming, spacing))
            .collect::<nesty::Result<Vec<_>>>()?;

        for bin in bins.iter().filter(|b| !b.is_usable()) {
            warn!(
                "[BLF] bin {} has no usable region left after a trimming of {}, it will never be opened",
                bin.id, trimming
            );
        }
        for bin in bins.iter().filter(|b| b.is_usable() && b.region.is_empty()) {
            warn!(
                "[BLF] bin {} leaves no room for a spacing of {} to its trimmed edge, nothing will be placed in it",
                bin.id, spacing
            );
        }
        if !bins.iter().any(|b| b.is_usable()) {
            return Err(NestyError::NoUsableCapacity);
        }

        let shapes = catalogue
            .shapes()
            .map(|def| {
                let prepared = PreparedShape::new(def, &config, spacing).unwrap_or_else(|e| {
                    warn!("[BLF] shape {} cannot be prepared, its instances will not be placed: {e}", def.id);
                    PreparedShape::unplaceable(def.id)
                });
                (def.id, prepared)
            })
            .collect();

        Ok(Self {
            catalogue,
            config,
            spacing,
            trimming,
            problem: BLFProblem::new(bins),
            shapes,
            sample_counter: 0,
        })
    }

    pub fn solve(&mut self) -> Solution {
        let start = Instant::now();
        let total = self.catalogue.total_shape_qty();

        for (shape_id, instance_index) in placement_order(self.catalogue) {
            let shape = &self.shapes[&shape_id];
            match search_layouts(&self.problem, shape, instance_index, &mut self.sample_counter) {
                Some(placement) => {
                    let d_transf = placement.d_transf;
                    let l_index = self.problem.place_shape(placement);
                    let layout = &self.problem.layouts[l_index];
                    info!(
                        "[BLF] placing shape {}/{} with id {} at [{}] in bin {}:{}",
                        self.problem.n_placed(),
                        total,
                        shape_id,
                        d_transf,
                        layout.bin_def_id,
                        layout.bin_instance
                    );
                }
                None => {
                    info!("[BLF] shape {shape_id} (instance {instance_index}) does not fit anywhere");
                    self.problem.register_unplaced(shape_id);
                }
            }
        }

        let solution = self.problem.save();
        debug_assert!(assertions::solution_valid(
            &solution,
            self.catalogue,
            self.spacing,
            self.trimming
        ));

        let stats = solution.stats(self.catalogue);
        info!(
            "[BLF] optimization finished in {:.3}ms ({} candidates)",
            start.elapsed().as_secs_f64() * 1000.0,
            self.sample_counter.separate_with_commas()
        );
        info!(
            "[BLF] solution contains {} placed and {} unplaced shapes in {} bins with a density of {:.3}%",
            stats.n_placed,
            stats.n_unplaced,
            stats.n_layouts,
            stats.density * 100.0
        );
        solution
    }
}

fn search_layouts(
    problem: &BLFProblem,
    shape: &PreparedShape,
    instance_index: usize,
    sample_counter: &mut usize,
) -> Option<BLFPlacement> {
    //search all open layouts, then a single fresh bin
    let open_layouts = (0..problem.layouts.len()).map(BLFLayoutType::Open);
    let fresh_bin = problem
        .bin_to_open(shape)
        .map(|bin_index| BLFLayoutType::Closed { bin_index });

    for layout_id in open_layouts.chain(fresh_bin) {
        debug!("[BLF] searching in {:?}", layout_id);
        let found = match layout_id {
            BLFLayoutType::Open(l_index) => {
                let layout = &problem.layouts[l_index];
                let placed = layout.silhouettes().collect_vec();
                search(
                    &layout.region,
                    &placed,
                    layout.bin_type,
                    shape,
                    sample_counter,
                )
            }
            BLFLayoutType::Closed { bin_index } => {
                let bin = &problem.bins[bin_index];
                search(
                    &bin.region,
                    &[],
                    bin.bin_type,
                    shape,
                    sample_counter,
                )
            }
        };

        if let Some((d_transf, silhouette)) = found {
            return Some(BLFPlacement {
                layout_id,
                shape_id: shape.id,
                instance_index,
                d_transf,
                silhouette,
            });
        }
    }
    None
}
