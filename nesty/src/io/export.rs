use std::time::Duration;

use crate::entities::{Catalogue, Solution};
use crate::io::ext_repr::{ExtLayout, ExtSolution};

/// Exports a solution, grouping its placements per opened bin instance.
pub fn export_solution(solution: &Solution, catalogue: &Catalogue, run_time: Duration) -> ExtSolution {
    let layouts = solution
        .layouts()
        .into_iter()
        .map(|((bin_def_id, bin_instance), placements)| {
            let bin_area = catalogue.bin(bin_def_id).map_or(0, |b| b.area());
            let placed_double_area: i128 = placements
                .iter()
                .filter_map(|p| catalogue.shape(p.shape_id))
                .map(|s| s.double_area())
                .sum();
            let density = match bin_area {
                0 => 0.0,
                a => placed_double_area as f64 / 2.0 / a as f64,
            };
            ExtLayout {
                bin_def_id,
                bin_instance,
                placements: placements.into_iter().copied().collect(),
                density,
            }
        })
        .collect();

    ExtSolution {
        layouts,
        unplaced: solution.unplaced.clone(),
        stats: solution.stats(catalogue),
        run_time_ms: run_time.as_millis() as u64,
    }
}
