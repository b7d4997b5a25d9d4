use log::{info, warn};

use nesty::entities::{BinDef, BinType, Catalogue, ShapeDef, Solution};
use nesty::io::paths::decode_paths;

use crate::config::BLFConfig;
use crate::opt::blf_optimizer::BLFOptimizer;

/// A nesting session: the catalogue under construction and the solution of the last successful run.
///
/// Definitions are upserted by id, re-appending an id replaces the earlier definition.
/// Every mutation of the catalogue and every successful run bumps the [`generation`](Session::generation).
#[derive(Debug, Default)]
pub struct Session {
    catalogue: Catalogue,
    config: BLFConfig,
    solution: Option<Solution>,
    generation: u64,
}

impl Session {
    pub fn new(config: BLFConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Starts a session from an already imported catalogue.
    pub fn from_catalogue(catalogue: Catalogue, config: BLFConfig) -> Self {
        info!(
            "[SES] loaded {} bin definitions and {} shape definitions",
            catalogue.n_bin_defs(),
            catalogue.n_shape_defs()
        );
        Self {
            catalogue,
            config,
            solution: None,
            generation: 1,
        }
    }

    pub fn config(&self) -> &BLFConfig {
        &self.config
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Removes all definitions and the last solution.
    pub fn clear(&mut self) {
        self.catalogue.clear();
        self.solution = None;
        self.generation += 1;
        info!("[SES] cleared (generation {})", self.generation);
    }

    pub fn append_bin(&mut self, bin: BinDef) {
        self.catalogue.upsert_bin(bin);
        self.generation += 1;
    }

    pub fn append_shape(&mut self, shape: ShapeDef) {
        self.catalogue.upsert_shape(shape);
        self.generation += 1;
    }

    /// Validates and upserts a bin definition given in its host representation.
    /// On error the catalogue is left untouched.
    pub fn append_bin_def(
        &mut self,
        id: i32,
        count: i32,
        length: i64,
        width: i64,
        bin_type: i32,
    ) -> nesty::Result<()> {
        let bin_type = BinType::try_from(bin_type)?;
        let bin = BinDef::new(id, count, length, width, bin_type)?;
        self.append_bin(bin);
        Ok(())
    }

    /// Validates and upserts a shape definition given as an encoded path sequence
    /// (see [`nesty::io::paths`]). On error the catalogue is left untouched.
    pub fn append_shape_def(&mut self, id: i32, count: i32, paths: &[i64]) -> nesty::Result<()> {
        let loops = decode_paths(paths).map_err(|e| {
            warn!("[SES] rejected paths of shape {id}: {e}");
            e
        })?;
        let shape = ShapeDef::from_loops(id, count, loops)?;
        self.append_shape(shape);
        Ok(())
    }

    /// Nests the current catalogue. On success the new solution replaces the previous one,
    /// on failure the previous solution is kept.
    pub fn execute_nesting(&mut self, spacing: i64, trimming: i64) -> nesty::Result<&Solution> {
        info!(
            "[SES] executing nesting of {} shape instances on {} bin definitions (spacing: {spacing}, trimming: {trimming})",
            self.catalogue.total_shape_qty(),
            self.catalogue.n_bin_defs()
        );
        let solution = BLFOptimizer::new(&self.catalogue, self.config, spacing, trimming)
            .map_err(|e| {
                warn!("[SES] nesting could not start: {e}");
                e
            })?
            .solve();
        self.generation += 1;
        Ok(self.solution.insert(solution))
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Hands the last solution over to the caller, later calls return `None` until the next run.
    pub fn take_solution(&mut self) -> Option<Solution> {
        self.solution.take()
    }

    /// Counter that changes whenever the catalogue is modified or a new solution is computed.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
