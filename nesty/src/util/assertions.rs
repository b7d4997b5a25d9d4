use std::collections::{BTreeMap, HashSet};

use itertools::Itertools;
use log::error;

use crate::entities::{BinType, Catalogue, Solution};
use crate::geometry::primitives::SPolygon;
use crate::geometry::{contains, intersects};

/// Every shape instance of the catalogue is either placed or reported unplaced, exactly once.
pub fn counts_conserved(solution: &Solution, catalogue: &Catalogue) -> bool {
    if solution.n_placed() + solution.n_unplaced() != catalogue.total_shape_qty() {
        error!(
            "[ASSERT] {} placed + {} unplaced != {} demanded",
            solution.n_placed(),
            solution.n_unplaced(),
            catalogue.total_shape_qty()
        );
        return false;
    }

    let mut accounted: BTreeMap<i32, usize> = BTreeMap::new();
    for id in solution
        .placements
        .iter()
        .map(|p| p.shape_id)
        .chain(solution.unplaced.iter().copied())
    {
        *accounted.entry(id).or_default() += 1;
    }
    let per_shape_ok = catalogue
        .shapes()
        .all(|s| accounted.get(&s.id).copied().unwrap_or(0) == s.count)
        && accounted.keys().all(|id| catalogue.shape(*id).is_some());
    if !per_shape_ok {
        error!("[ASSERT] per shape quantities do not match the catalogue");
    }

    let instances_unique = solution
        .placements
        .iter()
        .map(|p| (p.shape_id, p.instance_index))
        .all_unique();
    if !instances_unique {
        error!("[ASSERT] a shape instance was placed twice");
    }

    per_shape_ok && instances_unique
}

/// No bin definition hosts more instances than its `count` allows.
pub fn bin_stock_respected(solution: &Solution, catalogue: &Catalogue) -> bool {
    solution.layout_keys().iter().all(|&(bin_def_id, bin_instance)| {
        let ok = catalogue
            .bin(bin_def_id)
            .is_some_and(|b| bin_instance < b.count);
        if !ok {
            error!("[ASSERT] bin instance {bin_def_id}:{bin_instance} exceeds the stock");
        }
        ok
    })
}

/// Every silhouette lies within the placement region of its bin and no two silhouettes in the same bin instance overlap.
/// Placements in a bar are neither rotated nor mirrored and rest on the bottom edge of its placement region.
pub fn placements_feasible(
    solution: &Solution,
    catalogue: &Catalogue,
    spacing: i64,
    trimming: i64,
) -> bool {
    let mut regions: BTreeMap<i32, Vec<SPolygon>> = BTreeMap::new();
    let mut silhouettes: BTreeMap<(i32, usize), Vec<SPolygon>> = BTreeMap::new();

    for p in &solution.placements {
        let (Some(shape), Some(bin)) = (catalogue.shape(p.shape_id), catalogue.bin(p.bin_def_id))
        else {
            error!("[ASSERT] placement refers to an unknown definition: {p:?}");
            return false;
        };
        if !regions.contains_key(&bin.id) {
            match bin.placement_region(trimming, spacing) {
                Ok(region) => regions.insert(bin.id, region),
                Err(e) => {
                    error!("[ASSERT] placement region of bin {}: {e}", bin.id);
                    return false;
                }
            };
        }
        let region = &regions[&bin.id];
        let silhouette = match shape.silhouette(&p.transformation(), spacing) {
            Ok(s) => s,
            Err(e) => {
                error!("[ASSERT] silhouette of {p:?}: {e}");
                return false;
            }
        };

        if !region.iter().any(|r| contains(r, &silhouette)) {
            error!("[ASSERT] {p:?} exceeds the usable region of its bin");
            return false;
        }
        if bin.bin_type == BinType::Bar {
            if p.rotation != 0 || p.mirrored {
                error!("[ASSERT] {p:?} is not upright in its bar");
                return false;
            }
            if !region.iter().any(|r| r.bbox.y_min == silhouette.bbox.y_min) {
                error!("[ASSERT] {p:?} does not rest on the bottom of its bar");
                return false;
            }
        }

        let placed = silhouettes.entry(p.layout_key()).or_default();
        if placed.iter().any(|other| intersects(other, &silhouette)) {
            error!("[ASSERT] {p:?} overlaps with another shape");
            return false;
        }
        placed.push(silhouette);
    }
    true
}

/// All of the above.
pub fn solution_valid(
    solution: &Solution,
    catalogue: &Catalogue,
    spacing: i64,
    trimming: i64,
) -> bool {
    counts_conserved(solution, catalogue)
        && bin_stock_respected(solution, catalogue)
        && placements_feasible(solution, catalogue, spacing, trimming)
}

/// Rotation and mirroring of a placement only take values the engine was allowed to use.
pub fn orientations_allowed(solution: &Solution, allowed: &HashSet<(i32, bool)>) -> bool {
    solution
        .placements
        .iter()
        .all(|p| allowed.contains(&(p.rotation, p.mirrored)))
}
